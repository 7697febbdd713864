//! Payload range slider state and widget.
//!
//! The slider has two handles. Only one is active at a time; moving it
//! snaps to the next multiple of the step and never lets the handles cross.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::dashboard::{layout::RangeSlider, PayloadRange};
use super::theme::Theme;

/// Which slider handle responds to arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handle {
    #[default]
    Low,
    High,
}

/// Current position of both handles plus the slider's fixed configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SliderState {
    min: f64,
    max: f64,
    step: f64,
    default: PayloadRange,
    range: PayloadRange,
    active: Handle,
}

impl SliderState {
    pub fn new(slider: &RangeSlider) -> Self {
        SliderState {
            min: slider.min,
            max: slider.max,
            step: slider.step,
            default: slider.value,
            range: slider.value,
            active: Handle::Low,
        }
    }

    pub fn range(&self) -> PayloadRange {
        self.range
    }

    pub fn active(&self) -> Handle {
        self.active
    }

    pub fn toggle_handle(&mut self) {
        self.active = match self.active {
            Handle::Low => Handle::High,
            Handle::High => Handle::Low,
        };
    }

    /// Move the active handle up by one step. Returns true if the range changed.
    ///
    /// A handle already past the clamp (a default taken from data outside
    /// the slider bounds) stays where it is.
    pub fn increase(&mut self) -> bool {
        let before = self.range;
        match self.active {
            Handle::Low => {
                let next = ((self.range.low / self.step).floor() + 1.0) * self.step;
                let next = next.min(self.range.high).min(self.max);
                if next > self.range.low {
                    self.range.low = next;
                }
            }
            Handle::High => {
                let next = ((self.range.high / self.step).floor() + 1.0) * self.step;
                let next = next.min(self.max);
                if next > self.range.high {
                    self.range.high = next;
                }
            }
        }
        self.range != before
    }

    /// Move the active handle down by one step. Returns true if the range changed.
    pub fn decrease(&mut self) -> bool {
        let before = self.range;
        match self.active {
            Handle::Low => {
                let next = ((self.range.low / self.step).ceil() - 1.0) * self.step;
                let next = next.max(self.min);
                if next < self.range.low {
                    self.range.low = next;
                }
            }
            Handle::High => {
                let next = ((self.range.high / self.step).ceil() - 1.0) * self.step;
                let next = next.max(self.range.low).max(self.min);
                if next < self.range.high {
                    self.range.high = next;
                }
            }
        }
        self.range != before
    }

    /// Restore the default range. Returns true if the range changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.range != self.default;
        self.range = self.default;
        changed
    }

    /// Position of a value along a track of `width` cells
    fn position(&self, value: f64, width: usize) -> usize {
        if width == 0 || self.max <= self.min {
            return 0;
        }
        let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        (ratio * (width - 1) as f64).round() as usize
    }
}

/// Slider panel showing the track, both handles and the mark labels
pub struct SliderView<'a> {
    state: &'a SliderState,
    slider: &'a RangeSlider,
    theme: &'a Theme,
}

impl<'a> SliderView<'a> {
    pub fn new(state: &'a SliderState, slider: &'a RangeSlider, theme: &'a Theme) -> Self {
        SliderView {
            state,
            slider,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let (border_style, title_style) = self.theme.panel_styles(focused);
        let block = Block::default()
            .title(format!(" {} ", self.slider.label))
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(border_style)
            .title_style(title_style);

        let inner = block.inner(area);
        let width = inner.width as usize;
        let range = self.state.range();
        let low_pos = self.state.position(range.low, width);
        let high_pos = self.state.position(range.high, width);

        let track: String = (0..width)
            .map(|i| {
                if i == low_pos || i == high_pos {
                    '●'
                } else if i > low_pos && i < high_pos {
                    '━'
                } else {
                    '─'
                }
            })
            .collect();

        let mut marks = vec![' '; width];
        for mark in &self.slider.marks {
            let label: Vec<char> = mark.label.chars().collect();
            let pos = self.state.position(f64::from(mark.value), width);
            let start = pos.saturating_sub(label.len() / 2).min(width.saturating_sub(label.len()));
            for (offset, c) in label.into_iter().enumerate() {
                if let Some(slot) = marks.get_mut(start + offset) {
                    *slot = c;
                }
            }
        }

        let active_style = |handle: Handle| {
            if focused && self.state.active() == handle {
                self.theme.highlight_style()
            } else {
                self.theme.normal_style()
            }
        };

        let lines = vec![
            Line::from(Span::styled(track, Style::default().fg(self.theme.title))),
            Line::from(Span::styled(marks.into_iter().collect::<String>(), self.theme.dimmed_style())),
            Line::from(vec![
                Span::styled(format!(" low {:.0} kg ", range.low), active_style(Handle::Low)),
                Span::raw("  "),
                Span::styled(format!(" high {:.0} kg ", range.high), active_style(Handle::High)),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(low: f64, high: f64) -> SliderState {
        SliderState::new(&RangeSlider::payload(PayloadRange::new(low, high)))
    }

    #[test]
    fn test_starts_at_default() {
        let slider = state(500.0, 2000.0);
        assert_eq!(slider.range(), PayloadRange::new(500.0, 2000.0));
        assert_eq!(slider.active(), Handle::Low);
    }

    #[test]
    fn test_low_handle_snaps_to_step() {
        let mut slider = state(500.0, 5000.0);
        assert!(slider.increase());
        assert_eq!(slider.range().low, 1000.0);
        assert!(slider.increase());
        assert_eq!(slider.range().low, 2000.0);
        assert!(slider.decrease());
        assert_eq!(slider.range().low, 1000.0);
        assert!(slider.decrease());
        assert_eq!(slider.range().low, 0.0);
        assert!(!slider.decrease());
        assert_eq!(slider.range().low, 0.0);
    }

    #[test]
    fn test_handles_cannot_cross() {
        let mut slider = state(500.0, 2000.0);
        slider.increase();
        slider.increase();
        assert_eq!(slider.range().low, 2000.0);
        assert!(!slider.increase());
        assert_eq!(slider.range().low, 2000.0);

        slider.toggle_handle();
        assert_eq!(slider.active(), Handle::High);
        assert!(!slider.decrease());
        assert_eq!(slider.range(), PayloadRange::new(2000.0, 2000.0));
    }

    #[test]
    fn test_high_handle_clamped_to_max() {
        let mut slider = state(0.0, 9600.0);
        slider.toggle_handle();
        assert!(slider.increase());
        assert_eq!(slider.range().high, 10000.0);
        assert!(!slider.increase());
        assert_eq!(slider.range().high, 10000.0);
    }

    #[test]
    fn test_handle_beyond_max_never_moves_backwards() {
        let mut slider = state(500.0, 15600.0);
        slider.toggle_handle();
        assert!(!slider.increase());
        assert_eq!(slider.range().high, 15600.0);

        // Decreasing still steps down from the out-of-range value
        assert!(slider.decrease());
        assert_eq!(slider.range().high, 15000.0);
    }

    #[test]
    fn test_reset() {
        let mut slider = state(500.0, 2000.0);
        assert!(!slider.reset());
        slider.increase();
        assert!(slider.reset());
        assert_eq!(slider.range(), PayloadRange::new(500.0, 2000.0));
    }

    #[test]
    fn test_track_position() {
        let slider = state(0.0, 10000.0);
        assert_eq!(slider.position(0.0, 11), 0);
        assert_eq!(slider.position(5000.0, 11), 5);
        assert_eq!(slider.position(10000.0, 11), 10);
        assert_eq!(slider.position(20000.0, 11), 10);
        assert_eq!(slider.position(5000.0, 0), 0);
    }
}
