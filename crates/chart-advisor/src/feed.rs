// File: crates/chart-advisor/src/feed.rs
// Summary: Caller-driven series feed: fetch, aggregate, advise, and notify observers.
// Notes:
// - Nothing runs on its own. Callers either call `refresh` directly or call
//   `poll` from their own loop, which refreshes once the interval has elapsed.
// - A failed refresh keeps the previous snapshot and exposes the error via
//   `last_error` until the next successful refresh.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::advisor::{suggest_chart_types, top_chart_type};
use crate::aggregate::aggregate_with_zone;
use crate::config::FeedConfig;
use crate::error::{FeedError, SourceError};
use crate::observation::Observation;
use crate::types::{CalendarZone, ChartSuggestion, ChartType, Granularity};

/// Supplies raw observations, e.g. from a database query or a file.
pub trait ObservationSource {
    fn fetch(&self) -> Result<Vec<Observation>, SourceError>;
}

impl<F> ObservationSource for F
where
    F: Fn() -> Result<Vec<Observation>, SourceError>,
{
    fn fetch(&self) -> Result<Vec<Observation>, SourceError> { self() }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedOptions {
    pub granularity: Granularity,
    pub chart_override: Option<ChartType>,
    pub refresh_interval: Duration,
    pub zone: CalendarZone,
}

impl Default for FeedOptions {
    fn default() -> Self { Self::from(&FeedConfig::default()) }
}

impl From<&FeedConfig> for FeedOptions {
    fn from(cfg: &FeedConfig) -> Self {
        Self {
            granularity: cfg.granularity,
            chart_override: cfg.chart_override,
            refresh_interval: cfg.refresh_interval(),
            zone: cfg.zone,
        }
    }
}

/// Result of the last successful refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedSnapshot {
    pub raw: Vec<Observation>,
    /// `raw` aggregated at `granularity`; equal to `raw` for `Granularity::None`.
    pub display: Vec<Observation>,
    /// Ranked suggestions computed from `raw`.
    pub suggestions: Vec<ChartSuggestion>,
    /// Override when set, else the top suggestion.
    pub chart_type: ChartType,
    pub granularity: Granularity,
    pub fetched_at: DateTime<Utc>,
}

pub enum FeedEvent<'a> {
    Updated(&'a FeedSnapshot),
    Failed { message: &'a str },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&FeedEvent<'_>)>;

pub struct SeriesFeed<S: ObservationSource> {
    source: S,
    options: FeedOptions,
    snapshot: Option<FeedSnapshot>,
    last_error: Option<String>,
    last_attempt: Option<Instant>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl<S: ObservationSource> SeriesFeed<S> {
    pub fn new(source: S, options: FeedOptions) -> Self {
        Self {
            source,
            options,
            snapshot: None,
            last_error: None,
            last_attempt: None,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn options(&self) -> &FeedOptions { &self.options }
    pub fn snapshot(&self) -> Option<&FeedSnapshot> { self.snapshot.as_ref() }
    pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&FeedEvent<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// True before the first attempt and once `refresh_interval` has passed since the last one.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_attempt {
            None => true,
            Some(at) => now.saturating_duration_since(at) >= self.options.refresh_interval,
        }
    }

    /// Refresh when due. `None` means no refresh was attempted.
    pub fn poll(&mut self, now: Instant) -> Option<Result<(), FeedError>> {
        if !self.is_due(now) { return None; }
        Some(self.refresh_at(now))
    }

    pub fn refresh(&mut self) -> Result<(), FeedError> {
        self.refresh_at(Instant::now())
    }

    fn refresh_at(&mut self, now: Instant) -> Result<(), FeedError> {
        self.last_attempt = Some(now);
        match self.source.fetch() {
            Ok(raw) => {
                let snapshot = self.build_snapshot(raw);
                info!(
                    points = snapshot.raw.len(),
                    display = snapshot.display.len(),
                    chart = %snapshot.chart_type,
                    granularity = %snapshot.granularity,
                    "feed refreshed"
                );
                self.snapshot = Some(snapshot);
                self.last_error = None;
                self.notify_updated();
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "feed refresh failed");
                notify(&mut self.observers, &FeedEvent::Failed { message: &message });
                self.last_error = Some(message);
                Err(FeedError::Source(e))
            }
        }
    }

    /// Change granularity and rebuild the display series from cached data.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.options.granularity = granularity;
        if let Some(snap) = self.snapshot.as_mut() {
            snap.display = display_series(&snap.raw, granularity, self.options.zone);
            snap.granularity = granularity;
            debug!(%granularity, display = snap.display.len(), "display series rebuilt");
            self.notify_updated();
        }
    }

    /// Change or clear the chart override and reselect from cached suggestions.
    pub fn set_chart_override(&mut self, chart_override: Option<ChartType>) {
        self.options.chart_override = chart_override;
        if let Some(snap) = self.snapshot.as_mut() {
            snap.chart_type = chart_override.unwrap_or_else(|| top_chart_type(&snap.suggestions));
            self.notify_updated();
        }
    }

    fn build_snapshot(&self, raw: Vec<Observation>) -> FeedSnapshot {
        let granularity = self.options.granularity;
        let display = display_series(&raw, granularity, self.options.zone);
        let suggestions = suggest_chart_types(&raw);
        let chart_type = self.options.chart_override.unwrap_or_else(|| top_chart_type(&suggestions));
        FeedSnapshot { raw, display, suggestions, chart_type, granularity, fetched_at: Utc::now() }
    }

    fn notify_updated(&mut self) {
        if let Some(snap) = self.snapshot.as_ref() {
            notify(&mut self.observers, &FeedEvent::Updated(snap));
        }
    }
}

fn display_series(raw: &[Observation], granularity: Granularity, zone: CalendarZone) -> Vec<Observation> {
    if granularity == Granularity::None { return raw.to_vec(); }
    aggregate_with_zone(raw, granularity, zone)
}

fn notify(observers: &mut [(SubscriptionId, Observer)], event: &FeedEvent<'_>) {
    for (_, observer) in observers.iter_mut() {
        observer(event);
    }
}
