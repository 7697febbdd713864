//! Static page description, built once at startup.
//!
//! The layout names the two dynamic chart slots; hosts fill them by
//! rendering the matching [`Renderable`](super::Renderable).

use serde::Serialize;

use crate::data::LaunchTable;

use super::controls::{PayloadRange, ALL_SITES, ALL_SITES_LABEL};

pub const PAGE_TITLE: &str = "SpaceX Launch Records Dashboard";
pub const SITE_DROPDOWN_ID: &str = "site-dropdown";
pub const PAYLOAD_SLIDER_ID: &str = "payload-slider";
pub const PIE_CHART_ID: &str = "success-pie-chart";
pub const SCATTER_CHART_ID: &str = "success-payload-scatter-chart";

pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 10000.0;
pub const SLIDER_STEP: f64 = 1000.0;
const SLIDER_MARK_EVERY: u32 = 2500;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Single-select site control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropdown {
    pub id: String,
    pub options: Vec<SelectOption>,
    pub value: String,
    pub placeholder: String,
    pub searchable: bool,
}

impl Dropdown {
    fn sites(sites: &[String]) -> Self {
        let options = std::iter::once(SelectOption {
            label: ALL_SITES_LABEL.to_string(),
            value: ALL_SITES.to_string(),
        })
        .chain(sites.iter().map(|site| SelectOption {
            label: site.clone(),
            value: site.clone(),
        }))
        .collect();

        Dropdown {
            id: SITE_DROPDOWN_ID.to_string(),
            options,
            value: ALL_SITES.to_string(),
            placeholder: "Select a Launch Site here".to_string(),
            searchable: true,
        }
    }

    /// Indices of the options whose label contains `query`, ignoring case.
    /// An empty query, or a dropdown that is not searchable, keeps every option.
    pub fn matching(&self, query: &str) -> Vec<usize> {
        let needle = query.trim().to_lowercase();
        self.options
            .iter()
            .enumerate()
            .filter(|(_, o)| {
                !self.searchable || needle.is_empty() || o.label.to_lowercase().contains(&needle)
            })
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: u32,
    pub label: String,
}

/// Dual-handle payload control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub id: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    pub value: PayloadRange,
}

impl RangeSlider {
    /// Slider with the standard payload bounds and the given default value
    pub fn payload(value: PayloadRange) -> Self {
        let marks = (SLIDER_MIN as u32..=SLIDER_MAX as u32)
            .step_by(SLIDER_MARK_EVERY as usize)
            .map(|v| SliderMark {
                value: v,
                label: format!("{v} Kg"),
            })
            .collect();

        RangeSlider {
            id: PAYLOAD_SLIDER_ID.to_string(),
            label: "Payload range (Kg):".to_string(),
            min: SLIDER_MIN,
            max: SLIDER_MAX,
            step: SLIDER_STEP,
            marks,
            value,
        }
    }
}

/// Named placeholder for a chart filled in by a handler
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlot {
    pub id: String,
}

/// The whole page, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    pub title: String,
    pub site_dropdown: Dropdown,
    pub charts: Vec<ChartSlot>,
    pub payload_slider: RangeSlider,
}

impl PageLayout {
    pub fn builder(title: impl Into<String>) -> PageLayoutBuilder {
        PageLayoutBuilder {
            title: title.into(),
            site_dropdown: None,
            payload_slider: None,
            charts: Vec::new(),
        }
    }

    /// The standard dashboard page for a loaded table
    pub fn for_table(table: &LaunchTable) -> Self {
        let bounds = table.bounds();
        PageLayout::builder(PAGE_TITLE)
            .site_dropdown(table.sites())
            .chart_slot(PIE_CHART_ID)
            .payload_slider(PayloadRange::new(bounds.min, bounds.max))
            .chart_slot(SCATTER_CHART_ID)
            .build()
    }

    /// Default control values, as shown before any user interaction
    pub fn default_range(&self) -> PayloadRange {
        self.payload_slider.value
    }
}

pub struct PageLayoutBuilder {
    title: String,
    site_dropdown: Option<Dropdown>,
    payload_slider: Option<RangeSlider>,
    charts: Vec<ChartSlot>,
}

impl PageLayoutBuilder {
    /// Dropdown with "All Sites" first, followed by each site
    pub fn site_dropdown(mut self, sites: &[String]) -> Self {
        self.site_dropdown = Some(Dropdown::sites(sites));
        self
    }

    pub fn payload_slider(mut self, value: PayloadRange) -> Self {
        self.payload_slider = Some(RangeSlider::payload(value));
        self
    }

    pub fn chart_slot(mut self, id: &str) -> Self {
        self.charts.push(ChartSlot { id: id.to_string() });
        self
    }

    pub fn build(self) -> PageLayout {
        PageLayout {
            title: self.title,
            site_dropdown: self.site_dropdown.unwrap_or_else(|| Dropdown::sites(&[])),
            charts: self.charts,
            payload_slider: self
                .payload_slider
                .unwrap_or_else(|| RangeSlider::payload(PayloadRange::new(SLIDER_MIN, SLIDER_MAX))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_table;

    #[test]
    fn test_dropdown_options() {
        let layout = PageLayout::for_table(&sample_table());
        let values: Vec<&str> = layout
            .site_dropdown
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, vec!["ALL", "SiteA", "SiteB"]);
        assert_eq!(layout.site_dropdown.options[0].label, "All Sites");
        assert_eq!(layout.site_dropdown.value, "ALL");
    }

    #[test]
    fn test_dropdown_search() {
        let layout = PageLayout::for_table(&sample_table());
        let dropdown = &layout.site_dropdown;
        assert!(dropdown.searchable);
        assert_eq!(dropdown.matching(""), vec![0, 1, 2]);
        assert_eq!(dropdown.matching("siteb"), vec![2]);
        assert_eq!(dropdown.matching(" Site"), vec![0, 1, 2]);
        assert_eq!(dropdown.matching("all"), vec![0]);
        assert!(dropdown.matching("KSC").is_empty());
    }

    #[test]
    fn test_slider_defaults_to_observed_bounds() {
        let layout = PageLayout::for_table(&sample_table());
        let slider = &layout.payload_slider;
        assert_eq!(slider.min, 0.0);
        assert_eq!(slider.max, 10000.0);
        assert_eq!(slider.step, 1000.0);
        assert_eq!(layout.default_range(), PayloadRange::new(500.0, 2000.0));
    }

    #[test]
    fn test_slider_marks() {
        let slider = RangeSlider::payload(PayloadRange::new(0.0, 10000.0));
        let labels: Vec<&str> = slider.marks.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["0 Kg", "2500 Kg", "5000 Kg", "7500 Kg", "10000 Kg"]
        );
    }

    #[test]
    fn test_chart_slots_in_page_order() {
        let layout = PageLayout::for_table(&sample_table());
        let ids: Vec<&str> = layout.charts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![PIE_CHART_ID, SCATTER_CHART_ID]);
    }

    #[test]
    fn test_builder_without_controls() {
        let layout = PageLayout::builder("Empty").build();
        assert_eq!(layout.site_dropdown.options.len(), 1);
        assert!(layout.charts.is_empty());
    }
}
