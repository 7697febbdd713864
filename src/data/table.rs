//! In-memory launch table, loaded once and read many times.

use super::models::{LaunchRecord, PayloadBounds};

/// The full, immutable collection of launch records
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    bounds: PayloadBounds,
    sites: Vec<String>,
    booster_categories: Vec<String>,
}

impl LaunchTable {
    /// Build a table from records. Returns `None` for an empty set, since
    /// payload bounds only exist over at least one record.
    pub fn new(records: Vec<LaunchRecord>) -> Option<Self> {
        let bounds = PayloadBounds::from_payloads(records.iter().map(|r| r.payload_kg))?;
        let sites = distinct_in_order(records.iter().map(|r| r.site.as_str()));
        let booster_categories =
            distinct_in_order(records.iter().map(|r| r.booster_category.as_str()));

        Some(LaunchTable {
            records,
            bounds,
            sites,
            booster_categories,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn bounds(&self) -> PayloadBounds {
        self.bounds
    }

    /// Distinct site names in order of first appearance
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Distinct booster version categories in order of first appearance
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn site_index(&self, site: &str) -> Option<usize> {
        self.sites.iter().position(|s| s == site)
    }

    pub fn category_index(&self, category: &str) -> Option<usize> {
        self.booster_categories.iter().position(|c| c == category)
    }

    /// Total number of successful launches across all sites
    #[allow(dead_code)] // Used in tests
    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_success()).count()
    }

    /// Records launched from the given site
    pub fn at_site<'a>(&'a self, site: &'a str) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
        self.records.iter().filter(move |r| r.site == site)
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
