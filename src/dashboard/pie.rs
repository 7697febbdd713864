//! Site-outcome aggregator backing the success pie chart.

use tracing::debug;

use crate::data::{LaunchTable, Outcome};

use super::controls::{Controls, SiteSelection};
use super::spec::{ChartSpec, PieSegment, PieSpec};
use super::{Palette, Renderable};

/// Fixed color for successful launches
pub const SUCCESS_COLOR: &str = "#28a745";
/// Fixed color for failed launches
pub const FAILURE_COLOR: &str = "#dc3545";

/// Pie chart of success counts, driven by the site dropdown only
pub struct SuccessPie<'a> {
    table: &'a LaunchTable,
    palette: &'a Palette,
}

impl<'a> SuccessPie<'a> {
    pub fn new(table: &'a LaunchTable, palette: &'a Palette) -> Self {
        SuccessPie { table, palette }
    }

    /// One segment per site, valued by that site's success count.
    /// Sites without a single success contribute no segment.
    fn successes_by_site(&self) -> PieSpec {
        let sites = self.table.sites();
        let mut counts = vec![0u64; sites.len()];
        for record in self.table.records() {
            if record.outcome.is_success() {
                if let Some(idx) = self.table.site_index(&record.site) {
                    counts[idx] += 1;
                }
            }
        }

        let segments = sites
            .iter()
            .zip(counts)
            .enumerate()
            .filter(|(_, (_, count))| *count > 0)
            .map(|(idx, (site, count))| PieSegment {
                label: site.clone(),
                value: count,
                color: self.palette.color(idx).to_string(),
            })
            .collect();

        PieSpec {
            title: "Total Successful Launches by Site".to_string(),
            segments,
        }
    }

    /// Success and failure counts for a single site
    fn outcomes_at_site(&self, site: &str) -> PieSpec {
        let (successes, failures) =
            self.table
                .at_site(site)
                .fold((0u64, 0u64), |(s, f), record| match record.outcome {
                    Outcome::Success => (s + 1, f),
                    Outcome::Failure => (s, f + 1),
                });

        let segments = [
            (Outcome::Success, successes, SUCCESS_COLOR),
            (Outcome::Failure, failures, FAILURE_COLOR),
        ]
        .into_iter()
        .filter(|(_, count, _)| *count > 0)
        .map(|(outcome, count, color)| PieSegment {
            label: outcome.label().to_string(),
            value: count,
            color: color.to_string(),
        })
        .collect();

        PieSpec {
            title: format!("Total Success and Failures for site {site}"),
            segments,
        }
    }
}

impl Renderable for SuccessPie<'_> {
    fn render(&self, controls: &Controls) -> ChartSpec {
        let pie = match &controls.site {
            SiteSelection::All => self.successes_by_site(),
            SiteSelection::Site(site) => self.outcomes_at_site(site),
        };
        debug!(
            site = %controls.site,
            segments = pie.segments.len(),
            total = pie.total(),
            "rendered success pie"
        );
        ChartSpec::Pie(pie)
    }
}
