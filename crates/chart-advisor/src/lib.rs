// File: crates/chart-advisor/src/lib.rs
// Summary: Core library entry point; exports chart-type advice, calendar aggregation, feed and analytics APIs.

pub mod observation;
pub mod types;
pub mod stats;
pub mod advisor;
pub mod aggregate;
pub mod feed;
pub mod events;
pub mod config;
pub mod error;
pub mod logging;

pub use observation::{Observation, AGGREGATED_CATEGORY};
pub use types::{CalendarZone, ChartSuggestion, ChartType, Granularity};
pub use advisor::{recommended_chart_type, suggest_chart_types, SeriesProfile};
pub use aggregate::{aggregate, aggregate_in, aggregate_with_zone};
pub use feed::{FeedEvent, FeedOptions, FeedSnapshot, ObservationSource, SeriesFeed, SubscriptionId};
pub use events::{AnalyticsEvent, BatchOptions, EventBatcher, EventSink};
pub use config::Config;
pub use error::{ConfigError, FeedError, SinkError, SourceError};
