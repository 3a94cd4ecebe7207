// File: crates/chart-advisor/src/types.rs
// Summary: Shared types: chart kinds, ranked suggestions, aggregation granularity, calendar zone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Pie,
    Scatter,
    Area,
    Radar,
    Bubble,
    Gauge,
}

impl ChartType {
    pub const fn name(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
            ChartType::Scatter => "scatter",
            ChartType::Area => "area",
            ChartType::Radar => "radar",
            ChartType::Bubble => "bubble",
            ChartType::Gauge => "gauge",
        }
    }

    pub fn all() -> &'static [ChartType] {
        &[
            ChartType::Line,
            ChartType::Bar,
            ChartType::Pie,
            ChartType::Scatter,
            ChartType::Area,
            ChartType::Radar,
            ChartType::Bubble,
            ChartType::Gauge,
        ]
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognized chart type or granularity names.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for ChartType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let want = s.trim().to_ascii_lowercase();
        ChartType::all()
            .iter()
            .copied()
            .find(|t| t.name() == want)
            .ok_or_else(|| ParseNameError { kind: "chart type", value: s.to_string() })
    }
}

/// One ranked recommendation.
/// Contract: `confidence` is within 0..=100.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSuggestion {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub confidence: u8,
    pub reason: String,
}

impl ChartSuggestion {
    pub fn new(chart_type: ChartType, confidence: u8, reason: impl Into<String>) -> Self {
        Self { chart_type, confidence: confidence.min(100), reason: reason.into() }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Raw points, no bucketing.
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub const fn name(&self) -> &'static str {
        match self {
            Granularity::None => "none",
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "raw" => Ok(Granularity::None),
            "daily" => Ok(Granularity::Daily),
            "weekly" => Ok(Granularity::Weekly),
            "monthly" => Ok(Granularity::Monthly),
            _ => Err(ParseNameError { kind: "granularity", value: s.to_string() }),
        }
    }
}

/// Calendar used to derive bucket keys and labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarZone {
    #[default]
    Local,
    Utc,
}
