//! Data models representing historical launch records.

use serde::{Deserialize, Serialize};

/// Binary outcome of a launch, stored as the `class` column (0 or 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Parse the numeric class indicator used by the dataset
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The numeric class indicator (0 = failure, 1 = success)
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single launch (one row of the dataset)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Self {
        LaunchRecord {
            site: site.into(),
            payload_kg,
            outcome,
            booster_category: booster_category.into(),
        }
    }
}

/// Minimum and maximum payload observed over the whole table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    /// Compute bounds over a set of payloads. Returns `None` when empty.
    pub fn from_payloads(payloads: impl IntoIterator<Item = f64>) -> Option<Self> {
        payloads.into_iter().fold(None, |acc, p| match acc {
            None => Some(PayloadBounds { min: p, max: p }),
            Some(b) => Some(PayloadBounds {
                min: b.min.min(p),
                max: b.max.max(p),
            }),
        })
    }

    #[allow(dead_code)] // Used in tests
    pub fn contains(&self, payload_kg: f64) -> bool {
        self.min <= payload_kg && payload_kg <= self.max
    }
}
