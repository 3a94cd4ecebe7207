// File: crates/chart-advisor/src/advisor.rs
// Summary: Chart-type heuristics: profile a raw series and rank plausible chart kinds.

use std::collections::HashSet;
use tracing::debug;

use crate::observation::{values, Observation};
use crate::stats::{mean, min_max, population_std_dev};
use crate::types::{ChartSuggestion, ChartType};

/// Relative change between first and last thirds that counts as a trend.
pub const TREND_THRESHOLD: f64 = 0.1;
/// Max ratio of interval std dev to mean interval for an even time distribution.
pub const EVEN_DISTRIBUTION_THRESHOLD: f64 = 0.3;
/// Deviations beyond this many std devs count as outliers.
pub const OUTLIER_STD_DEVS: f64 = 2.0;

/// Minimum points for trend detection.
pub const MIN_TREND_POINTS: usize = 6;
/// Below this many points the series counts as evenly distributed.
pub const MIN_DISTRIBUTION_POINTS: usize = 3;
/// Minimum points for outlier counting.
pub const MIN_OUTLIER_POINTS: usize = 4;

/// Bar charts need fewer than this many categories.
pub const BAR_MAX_CATEGORIES_EXCLUSIVE: usize = 15;
/// Pie charts accept at most this many categories.
pub const PIE_MAX_CATEGORIES: usize = 7;

/// Measurements the suggestion rules are evaluated against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesProfile {
    pub len: usize,
    pub has_trend: bool,
    pub evenly_distributed: bool,
    /// Distinct non-empty categories; 1 when none are present.
    pub unique_categories: usize,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub outlier_count: usize,
}

impl SeriesProfile {
    pub fn analyze(observations: &[Observation]) -> Self {
        let vals = values(observations);
        let (min, max) = min_max(&vals).unwrap_or((0.0, 0.0));
        let profile = Self {
            len: observations.len(),
            has_trend: has_trend(&vals),
            evenly_distributed: is_evenly_distributed(observations),
            unique_categories: unique_categories(observations),
            min,
            max,
            range: max - min,
            outlier_count: outlier_count(&vals),
        };
        debug!(?profile, "series profiled");
        profile
    }

    /// Candidate suggestions, ranked. Empty only for a zero-length profile.
    pub fn suggestions(&self) -> Vec<ChartSuggestion> {
        if self.len == 0 { return Vec::new(); }
        let u = self.unique_categories;
        let mut out = Vec::with_capacity(5);

        let line_confidence = if self.has_trend { 90 } else if self.evenly_distributed { 85 } else { 70 };
        let line_reason = if self.has_trend {
            "clear trend over time"
        } else if self.evenly_distributed {
            "evenly spaced time series"
        } else {
            "continuous values over time"
        };
        out.push(ChartSuggestion::new(ChartType::Line, line_confidence, line_reason));

        if u > 1 && u < BAR_MAX_CATEGORIES_EXCLUSIVE {
            let confidence = if u > 3 { 85 } else { 70 };
            out.push(ChartSuggestion::new(ChartType::Bar, confidence, format!("compares {u} categories")));
        }

        if u > 1 && u <= PIE_MAX_CATEGORIES {
            let confidence = if u <= 5 { 75 } else { 60 };
            out.push(ChartSuggestion::new(ChartType::Pie, confidence, format!("shows the share of {u} categories")));
        }

        if self.has_trend && self.min >= 0.0 {
            out.push(ChartSuggestion::new(ChartType::Area, 75, "non-negative values with a trend"));
        }

        if !self.evenly_distributed || self.outlier_count > 2 {
            let (confidence, reason) = if self.outlier_count > 2 {
                (80, format!("{} outliers stand out", self.outlier_count))
            } else {
                (65, "irregular time spacing".to_string())
            };
            out.push(ChartSuggestion::new(ChartType::Scatter, confidence, reason));
        }

        // sort_by is stable: ties keep emission order
        out.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        out
    }
}

/// Rank chart types for a raw series. Never empty.
pub fn suggest_chart_types(observations: &[Observation]) -> Vec<ChartSuggestion> {
    if observations.is_empty() {
        return vec![ChartSuggestion::new(ChartType::Line, 80, "default")];
    }
    SeriesProfile::analyze(observations).suggestions()
}

/// The override when given, else the top-ranked suggestion.
pub fn recommended_chart_type(observations: &[Observation], chart_override: Option<ChartType>) -> ChartType {
    chart_override.unwrap_or_else(|| top_chart_type(&suggest_chart_types(observations)))
}

pub(crate) fn top_chart_type(suggestions: &[ChartSuggestion]) -> ChartType {
    suggestions.first().map(|s| s.chart_type).unwrap_or(ChartType::Line)
}

fn has_trend(vals: &[f64]) -> bool {
    let n = vals.len();
    if n < MIN_TREND_POINTS { return false; }
    let third = n / 3;
    let (Some(first), Some(last)) = (mean(&vals[..third]), mean(&vals[n - third..])) else {
        return false;
    };
    // a zero baseline has no relative change
    if first == 0.0 { return false; }
    (last - first).abs() > TREND_THRESHOLD * first
}

fn is_evenly_distributed(observations: &[Observation]) -> bool {
    if observations.len() < MIN_DISTRIBUTION_POINTS { return true; }
    let deltas: Vec<f64> = observations
        .windows(2)
        .map(|w| (w[1].timestamp - w[0].timestamp).num_milliseconds() as f64)
        .collect();
    match (mean(&deltas), population_std_dev(&deltas)) {
        (Some(m), Some(sd)) => sd < EVEN_DISTRIBUTION_THRESHOLD * m,
        _ => true,
    }
}

fn unique_categories(observations: &[Observation]) -> usize {
    let seen: HashSet<&str> = observations.iter().filter_map(Observation::category).collect();
    seen.len().max(1)
}

fn outlier_count(vals: &[f64]) -> usize {
    if vals.len() < MIN_OUTLIER_POINTS { return 0; }
    let (Some(m), Some(sd)) = (mean(vals), population_std_dev(vals)) else { return 0; };
    vals.iter().filter(|v| (*v - m).abs() > OUTLIER_STD_DEVS * sd).count()
}
