//! Declarative chart descriptions consumed by a rendering layer.

use serde::{Deserialize, Serialize};

/// A chart description: kind, data, labels, colors and title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieSpec),
    Scatter(ScatterSpec),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(pie) => &pie.title,
            ChartSpec::Scatter(scatter) => &scatter.title,
        }
    }
}

/// Proportion chart made of labeled segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSpec {
    pub title: String,
    pub segments: Vec<PieSegment>,
}

impl PieSpec {
    /// Sum of all segment values
    pub fn total(&self) -> u64 {
        self.segments.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSegment {
    pub label: String,
    pub value: u64,
    /// Hex color, e.g. `#28a745`
    pub color: String,
}

/// Payload vs. outcome chart, one series per booster category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterSpec {
    /// Every point across all series
    pub fn points(&self) -> impl Iterator<Item = &ScatterPoint> {
        self.series.iter().flat_map(|s| s.points.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub name: String,
    pub color: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub payload_kg: f64,
    /// Outcome class (0 = failure, 1 = success)
    pub outcome: u8,
    pub site: String,
}
