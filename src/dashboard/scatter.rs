//! Payload-outcome correlator backing the scatter chart.

use tracing::debug;

use crate::data::LaunchTable;

use super::controls::{Controls, SiteSelection};
use super::spec::{ChartSpec, ScatterPoint, ScatterSeries, ScatterSpec};
use super::{Palette, Renderable};

pub const X_LABEL: &str = "Payload Mass (kg)";
pub const Y_LABEL: &str = "Launch Outcome";

/// Scatter chart of payload against outcome, colored by booster category
pub struct PayloadScatter<'a> {
    table: &'a LaunchTable,
    palette: &'a Palette,
}

impl<'a> PayloadScatter<'a> {
    pub fn new(table: &'a LaunchTable, palette: &'a Palette) -> Self {
        PayloadScatter { table, palette }
    }
}

impl Renderable for PayloadScatter<'_> {
    fn render(&self, controls: &Controls) -> ChartSpec {
        let categories = self.table.booster_categories();
        let mut points: Vec<Vec<ScatterPoint>> = vec![Vec::new(); categories.len()];

        let matching = self
            .table
            .records()
            .iter()
            .filter(|r| controls.payload.contains(r.payload_kg))
            .filter(|r| controls.site.matches(&r.site));

        for record in matching {
            if let Some(idx) = self.table.category_index(&record.booster_category) {
                points[idx].push(ScatterPoint {
                    payload_kg: record.payload_kg,
                    outcome: record.outcome.class(),
                    site: record.site.clone(),
                });
            }
        }

        // Colors are keyed on the table-wide category index so a category
        // keeps its color whatever the filter leaves behind.
        let series: Vec<ScatterSeries> = categories
            .iter()
            .zip(points)
            .enumerate()
            .filter(|(_, (_, points))| !points.is_empty())
            .map(|(idx, (name, points))| ScatterSeries {
                name: name.clone(),
                color: self.palette.color(idx).to_string(),
                points,
            })
            .collect();

        let title = match &controls.site {
            SiteSelection::All => "Correlation between Payload and Success for all Sites".to_string(),
            SiteSelection::Site(site) => format!("Correlation between Payload and Success for {site}"),
        };

        let spec = ScatterSpec {
            title,
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            series,
        };
        debug!(
            site = %controls.site,
            low = controls.payload.low,
            high = controls.payload.high,
            points = spec.points().count(),
            "rendered payload scatter"
        );
        ChartSpec::Scatter(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::PayloadRange;
    use crate::data::{sample_table, LaunchRecord, Outcome};

    fn render(table: &LaunchTable, site: SiteSelection, low: f64, high: f64) -> ScatterSpec {
        let palette = Palette::default();
        let controls = Controls::new(site, PayloadRange::new(low, high));
        match PayloadScatter::new(table, &palette).render(&controls) {
            ChartSpec::Scatter(scatter) => scatter,
            other => panic!("expected a scatter chart, got {other:?}"),
        }
    }

    fn site(name: &str) -> SiteSelection {
        SiteSelection::Site(name.to_string())
    }

    #[test]
    fn test_all_sites_full_range() {
        let table = sample_table();
        let spec = render(&table, SiteSelection::All, 0.0, 10000.0);
        assert_eq!(spec.points().count(), 3);
        assert_eq!(spec.title, "Correlation between Payload and Success for all Sites");
        assert_eq!(spec.x_label, "Payload Mass (kg)");
        assert_eq!(spec.y_label, "Launch Outcome");
    }

    #[test]
    fn test_site_and_range_filter() {
        let table = sample_table();
        let spec = render(&table, site("SiteA"), 1000.0, 10000.0);
        let points: Vec<&ScatterPoint> = spec.points().collect();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].payload_kg, 2000.0);
        assert_eq!(points[0].outcome, 0);
        assert_eq!(spec.title, "Correlation between Payload and Success for SiteA");
    }

    #[test]
    fn test_points_respect_bounds_and_site() {
        let table = sample_table();
        for (low, high) in [(0.0, 1500.0), (500.0, 500.0), (1500.0, 2000.0)] {
            let spec = render(&table, site("SiteA"), low, high);
            for point in spec.points() {
                assert!(low <= point.payload_kg && point.payload_kg <= high);
                assert_eq!(point.site, "SiteA");
            }
        }
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let table = sample_table();
        let spec = render(&table, SiteSelection::All, 500.0, 2000.0);
        assert_eq!(spec.points().count(), 3);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let table = sample_table();
        let spec = render(&table, SiteSelection::All, 2000.0, 500.0);
        assert!(spec.is_empty());
        assert!(spec.series.is_empty());
    }

    #[test]
    fn test_unknown_site_is_empty() {
        let table = sample_table();
        let spec = render(&table, site("Atlantis"), 0.0, 10000.0);
        assert!(spec.is_empty());
    }

    #[test]
    fn test_series_per_category_with_stable_colors() {
        let table = LaunchTable::new(vec![
            LaunchRecord::new("SiteA", 100.0, Outcome::Success, "v1"),
            LaunchRecord::new("SiteA", 9000.0, Outcome::Failure, "FT"),
            LaunchRecord::new("SiteB", 4000.0, Outcome::Success, "B5"),
            LaunchRecord::new("SiteB", 4500.0, Outcome::Success, "FT"),
        ])
        .unwrap();
        let palette = Palette::default();

        let full = render(&table, SiteSelection::All, 0.0, 10000.0);
        let names: Vec<&str> = full.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["v1", "FT", "B5"]);
        assert_eq!(full.series[1].points.len(), 2);

        // With "v1" filtered out, "FT" keeps the color of its table position
        let partial = render(&table, SiteSelection::All, 1000.0, 10000.0);
        assert_eq!(partial.series[0].name, "FT");
        assert_eq!(partial.series[0].color, palette.color(1));
    }
}
