// File: crates/chart-advisor/src/logging.rs
// Summary: tracing-subscriber setup for binaries and tests.
//
// `RUST_LOG` takes precedence over the configured level:
//   RUST_LOG=chart_advisor=debug cargo run -p chart-advisor-demo -- data.csv

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use tracing_subscriber::util::TryInitError;

/// Install a fmt subscriber filtered at `level` unless `RUST_LOG` is set.
/// Fails when a global subscriber is already installed.
pub fn init_logging(level: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .try_init()?;

    tracing::info!(level = %level, "logging initialized");
    Ok(())
}
