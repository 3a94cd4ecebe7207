// File: crates/chart-advisor/src/observation.rs
// Summary: Observation model: one time-stamped value with optional category and display label.
// Notes:
// - Observations are plain values; every transform in this crate returns new
//   vectors and never edits a slice it was given.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category stamped on every observation produced by the aggregator.
pub const AGGREGATED_CATEGORY: &str = "aggregated";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value, category: None, label: None }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Category when present and non-empty.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// True for observations emitted by the aggregator.
    pub fn is_aggregate(&self) -> bool {
        self.category() == Some(AGGREGATED_CATEGORY)
    }
}

/// Values of a sequence, in order.
pub fn values(observations: &[Observation]) -> Vec<f64> {
    observations.iter().map(|o| o.value).collect()
}
