//! Dashboard core: control values, chart handlers, and the page layout.
//!
//! Hosts (the web server and the terminal UI) own the event loop and the
//! current control values. Whenever a control changes they ask the
//! [`Dashboard`] to re-render the affected chart slot.

mod controls;
pub mod layout;
mod pie;
mod scatter;
mod spec;

pub use controls::{Controls, PayloadRange, SiteSelection};
pub use layout::PageLayout;
pub use spec::{ChartSpec, PieSpec, ScatterSpec};

use crate::data::LaunchTable;

use pie::SuccessPie;
use scatter::PayloadScatter;

/// A chart that can be drawn from the current control values
pub trait Renderable {
    fn render(&self, controls: &Controls) -> ChartSpec;
}

/// Cycling list of hex colors used for per-site and per-category series
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new(vec![
            "#FF6B6B".to_string(), // Red
            "#4ECDC4".to_string(), // Teal
            "#45B7D1".to_string(), // Blue
            "#96CEB4".to_string(), // Green
            "#FFEAA7".to_string(), // Yellow
            "#DDA0DD".to_string(), // Plum
            "#98D8C8".to_string(), // Mint
            "#F7DC6F".to_string(), // Gold
        ])
    }
}

impl Palette {
    /// Build a palette; an empty list falls back to the default colors
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            return Palette::default();
        }
        Palette { colors }
    }

    /// Get a color by index (cycles through available colors)
    pub fn color(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    #[allow(dead_code)] // Used in tests
    pub fn len(&self) -> usize {
        self.colors.len()
    }
}

/// Process-wide, read-only dashboard state: the table, the palette, and
/// the page layout derived from them
#[derive(Debug, Clone)]
pub struct Dashboard {
    table: LaunchTable,
    palette: Palette,
    layout: PageLayout,
}

impl Dashboard {
    pub fn new(table: LaunchTable, palette: Palette) -> Self {
        let layout = PageLayout::for_table(&table);
        Dashboard {
            table,
            palette,
            layout,
        }
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Controls as they stand when the page is first shown
    pub fn default_controls(&self) -> Controls {
        Controls::new(SiteSelection::All, self.layout.default_range())
    }

    pub fn pie(&self) -> SuccessPie<'_> {
        SuccessPie::new(&self.table, &self.palette)
    }

    pub fn scatter(&self) -> PayloadScatter<'_> {
        PayloadScatter::new(&self.table, &self.palette)
    }

    /// Render the chart slot with the given id, if the layout has one
    pub fn render_slot(&self, slot_id: &str, controls: &Controls) -> Option<ChartSpec> {
        match slot_id {
            layout::PIE_CHART_ID => Some(self.pie().render(controls)),
            layout::SCATTER_CHART_ID => Some(self.scatter().render(controls)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_table;

    #[test]
    fn test_palette_cycles() {
        let palette = Palette::default();
        let len = palette.len();
        assert_eq!(palette.color(0), palette.color(len));
        assert_ne!(palette.color(0), palette.color(1));
    }

    #[test]
    fn test_empty_palette_falls_back_to_default() {
        assert_eq!(Palette::new(Vec::new()), Palette::default());
    }

    #[test]
    fn test_default_controls() {
        let dashboard = Dashboard::new(sample_table(), Palette::default());
        let controls = dashboard.default_controls();
        assert_eq!(controls.site, SiteSelection::All);
        assert_eq!(controls.payload, PayloadRange::new(500.0, 2000.0));
    }

    #[test]
    fn test_render_slot_dispatch() {
        let dashboard = Dashboard::new(sample_table(), Palette::default());
        let controls = dashboard.default_controls();
        assert!(matches!(
            dashboard.render_slot(layout::PIE_CHART_ID, &controls),
            Some(ChartSpec::Pie(_))
        ));
        assert!(matches!(
            dashboard.render_slot(layout::SCATTER_CHART_ID, &controls),
            Some(ChartSpec::Scatter(_))
        ));
        assert!(dashboard.render_slot("no-such-chart", &controls).is_none());
    }
}
