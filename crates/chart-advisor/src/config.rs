// File: crates/chart-advisor/src/config.rs
// Summary: TOML configuration loaded once at startup and passed down explicitly.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::ConfigError;
use crate::types::{CalendarZone, ChartType, Granularity};

pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub analytics: AnalyticsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, falling back to defaults when the file does not exist.
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid("feed.refresh_interval_secs must be at least 1".into()));
        }
        if self.analytics.batch_size == 0 {
            return Err(ConfigError::Invalid("analytics.batch_size must be at least 1".into()));
        }
        if self.analytics.flush_interval_ms == 0 {
            return Err(ConfigError::Invalid("analytics.flush_interval_ms must be at least 1".into()));
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid(format!("logging.level '{}' is not one of {:?}", self.logging.level, LOG_LEVELS)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub granularity: Granularity,
    /// Forces a chart type instead of the top suggestion.
    pub chart_override: Option<ChartType>,
    pub refresh_interval_secs: u64,
    pub zone: CalendarZone,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::None,
            chart_override: None,
            refresh_interval_secs: 30,
            zone: CalendarZone::Local,
        }
    }
}

impl FeedConfig {
    pub fn refresh_interval(&self) -> Duration { Duration::from_secs(self.refresh_interval_secs) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub batch_size: usize,
    pub flush_interval_ms: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { batch_size: 10, flush_interval_ms: 5_000 }
    }
}

impl AnalyticsConfig {
    pub fn flush_interval(&self) -> Duration { Duration::from_millis(self.flush_interval_ms) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}
