//! Control values supplied by the host whenever the user changes an input.

use serde::{Deserialize, Serialize};

/// Wire value of the "all sites" dropdown option
pub const ALL_SITES: &str = "ALL";
/// Display label of the "all sites" dropdown option
pub const ALL_SITES_LABEL: &str = "All Sites";

/// Current value of the site dropdown
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Parse a dropdown value. `ALL` (or nothing) selects every site.
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL_SITES) => SiteSelection::All,
            Some(site) => SiteSelection::Site(site.to_string()),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(site) => site,
        }
    }

    /// Whether a record launched from `site` passes this selection
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }
}

impl std::fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteSelection::All => f.write_str(ALL_SITES_LABEL),
            SiteSelection::Site(site) => f.write_str(site),
        }
    }
}

/// Inclusive payload interval selected on the range slider.
///
/// `low > high` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    pub fn contains(&self, payload_kg: f64) -> bool {
        self.low <= payload_kg && payload_kg <= self.high
    }
}

/// Snapshot of every control on the page
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl Controls {
    pub fn new(site: SiteSelection, payload: PayloadRange) -> Self {
        Controls { site, payload }
    }
}
