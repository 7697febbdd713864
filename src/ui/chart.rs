//! Chart views that draw a [`ChartSpec`] into the terminal.

use std::f64::consts::TAU;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph,
    },
    Frame,
};

use crate::dashboard::{ChartSpec, PayloadRange, PieSpec, ScatterSpec};
use super::theme::Theme;

/// Sampling resolution of the pie disc (points per diameter)
const PIE_RESOLUTION: usize = 160;

/// Draws a chart spec of either kind inside a bordered panel
pub struct ChartView<'a> {
    spec: &'a ChartSpec,
    x_range: PayloadRange,
    theme: &'a Theme,
}

impl<'a> ChartView<'a> {
    /// `x_range` sets the payload axis of scatter charts
    pub fn new(spec: &'a ChartSpec, x_range: PayloadRange, theme: &'a Theme) -> Self {
        ChartView {
            spec,
            x_range,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.spec.title()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title_style(self.theme.title_style());

        match self.spec {
            ChartSpec::Pie(pie) if pie.total() > 0 => self.render_pie(frame, area, block, pie),
            ChartSpec::Scatter(scatter) if !scatter.is_empty() => {
                self.render_scatter(frame, area, block, scatter)
            }
            _ => self.render_empty(frame, area, block),
        }
    }

    fn render_pie(&self, frame: &mut Frame, area: Rect, block: Block, pie: &PieSpec) {
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner);

        let values: Vec<u64> = pie.segments.iter().map(|s| s.value).collect();
        let sectors = pie_sectors(&values, PIE_RESOLUTION);
        let colors: Vec<_> = pie
            .segments
            .iter()
            .map(|s| self.theme.spec_color(&s.color))
            .collect();

        // Braille cells are 2x4 dots, so widen the x bounds to keep the disc round
        let disc = chunks[0];
        let y_half = 1.1;
        let x_half = if disc.height > 0 {
            y_half * f64::from(disc.width) / (2.0 * f64::from(disc.height))
        } else {
            y_half
        };

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-x_half, x_half])
            .y_bounds([-y_half, y_half])
            .paint(|ctx| {
                for (coords, color) in sectors.iter().zip(colors.iter()) {
                    ctx.draw(&Points {
                        coords: coords.as_slice(),
                        color: *color,
                    });
                }
            });
        frame.render_widget(canvas, disc);

        let total = pie.total() as f64;
        let mut lines = vec![Line::from("")];
        for (segment, color) in pie.segments.iter().zip(colors.iter()) {
            lines.push(Line::from(vec![
                Span::styled("■ ", Style::default().fg(*color)),
                Span::styled(format!("{:<16}", segment.label), self.theme.normal_style()),
                Span::raw(format!(
                    "{:>4}  {:>5.1}%",
                    segment.value,
                    100.0 * segment.value as f64 / total
                )),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    fn render_scatter(&self, frame: &mut Frame, area: Rect, block: Block, scatter: &ScatterSpec) {
        let all_points: Vec<Vec<(f64, f64)>> = scatter
            .series
            .iter()
            .map(|s| {
                s.points
                    .iter()
                    .map(|p| (p.payload_kg, f64::from(p.outcome)))
                    .collect()
            })
            .collect();

        let datasets: Vec<Dataset> = scatter
            .series
            .iter()
            .zip(all_points.iter())
            .map(|(series, points)| {
                Dataset::default()
                    .name(series.name.clone())
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(self.theme.spec_color(&series.color)))
                    .data(points)
            })
            .collect();

        let [x_min, x_max] = axis_bounds(self.x_range);
        let x_labels = vec![
            Span::raw(format!("{:.0}", x_min)),
            Span::raw(format!("{:.0}", (x_min + x_max) / 2.0)),
            Span::raw(format!("{:.0}", x_max)),
        ];
        let y_labels = vec![
            Span::raw(""),
            Span::raw("0"),
            Span::raw(""),
            Span::raw("1"),
            Span::raw(""),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title(Span::styled(scatter.x_label.clone(), self.theme.dimmed_style()))
                    .style(self.theme.normal_style())
                    .bounds([x_min, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(scatter.y_label.clone(), self.theme.dimmed_style()))
                    .style(self.theme.normal_style())
                    .bounds([-0.5, 1.5])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect, block: Block) {
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let message = Paragraph::new("No data available")
            .style(self.theme.dimmed_style())
            .alignment(Alignment::Center);

        frame.render_widget(message, inner);
    }
}

/// Payload axis bounds; degenerate or inverted ranges get a usable span
fn axis_bounds(range: PayloadRange) -> [f64; 2] {
    if range.low < range.high {
        [range.low, range.high]
    } else {
        [range.low, range.low + 1.0]
    }
}

/// Sample a unit disc and assign each point to the segment whose angular
/// sector contains it. Sectors run clockwise from twelve o'clock, sized in
/// proportion to `values`.
pub fn pie_sectors(values: &[u64], resolution: usize) -> Vec<Vec<(f64, f64)>> {
    let mut sectors = vec![Vec::new(); values.len()];
    let total: u64 = values.iter().sum();
    if total == 0 || resolution == 0 {
        return sectors;
    }

    let mut bounds = Vec::with_capacity(values.len());
    let mut cumulative = 0u64;
    for value in values {
        cumulative += value;
        bounds.push(cumulative as f64 / total as f64);
    }

    let step = 2.0 / resolution as f64;
    for i in 0..=resolution {
        for j in 0..=resolution {
            let x = -1.0 + step * i as f64;
            let y = -1.0 + step * j as f64;
            if x * x + y * y > 1.0 {
                continue;
            }
            let fraction = x.atan2(y).rem_euclid(TAU) / TAU;
            let idx = bounds
                .iter()
                .position(|b| fraction < *b)
                .unwrap_or(values.len() - 1);
            sectors[idx].push((x, y));
        }
    }
    sectors
}
