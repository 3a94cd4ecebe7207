// File: crates/demo/src/main.rs
// Summary: Demo loads observations from CSV, runs the feed once, prints ranked chart
// suggestions and the display series, and logs analytics batches.
//
// Usage: chart-advisor-demo [observations.csv] [chart-advisor.toml]
// CSV header: timestamp,value,category,label   (RFC 3339 timestamps; optional fields may be empty)

use anyhow::{Context, Result};
use chart_advisor::config::Config;
use chart_advisor::logging::init_logging;
use chart_advisor::{
    AnalyticsEvent, BatchOptions, EventBatcher, EventSink, FeedEvent, FeedOptions, Observation, ObservationSource,
    SeriesFeed, SinkError, SourceError,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    let data_arg = std::env::args().nth(1).unwrap_or_else(|| "observations.csv".to_string());
    let config_arg = std::env::args().nth(2).unwrap_or_else(|| "chart-advisor.toml".to_string());

    let config = Config::load_or_default(&config_arg)
        .with_context(|| format!("failed to load config '{config_arg}'"))?;
    init_logging(&config.logging.level).context("failed to initialize logging")?;

    let path = resolve_path(&data_arg)?;
    println!("Using input file: {}", path.display());

    let mut batcher = EventBatcher::new(Arc::new(LogSink), BatchOptions::from(&config.analytics));
    batcher.start().context("failed to start analytics batcher")?;

    let mut feed = SeriesFeed::new(CsvSource { path: path.clone() }, FeedOptions::from(&config.feed));
    feed.subscribe(|event| {
        if let FeedEvent::Failed { message } = event {
            eprintln!("refresh failed: {message}");
        }
    });
    feed.refresh()
        .with_context(|| format!("failed to load observations from '{}'", path.display()))?;

    let Some(snap) = feed.snapshot() else {
        anyhow::bail!("feed produced no snapshot");
    };
    if snap.raw.is_empty() {
        println!("No observations loaded; check headers and delimiter.");
    }
    println!("Loaded {} observations ({} shown at {} granularity)", snap.raw.len(), snap.display.len(), snap.granularity);
    batcher.track(
        AnalyticsEvent::new("series_loaded")
            .with_property("points", snap.raw.len() as u64)
            .with_property("granularity", snap.granularity.name()),
    );

    println!("Suggestions:");
    for s in &snap.suggestions {
        println!("  {:<8} {:>3}  {}", s.chart_type, s.confidence, s.reason);
        batcher.track(
            AnalyticsEvent::new("chart_suggested")
                .with_property("type", s.chart_type.name())
                .with_property("confidence", s.confidence),
        );
    }
    println!("Chart type: {}", snap.chart_type);

    println!("Series:");
    for o in &snap.display {
        let label = o.label.clone().unwrap_or_else(|| o.timestamp.to_rfc3339());
        println!("  {:<24} {:>12.4}", label, o.value);
    }

    let flushed = batcher.stop();
    info!(flushed, "demo finished");
    Ok(())
}

/// Reads every row of a CSV file on each fetch.
struct CsvSource {
    path: PathBuf,
}

impl ObservationSource for CsvSource {
    fn fetch(&self) -> Result<Vec<Observation>, SourceError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(csv_error)?;
        let mut out = Vec::new();
        for rec in rdr.deserialize::<Observation>() {
            out.push(rec.map_err(csv_error)?);
        }
        Ok(out)
    }
}

fn csv_error(e: csv::Error) -> SourceError {
    if e.is_io_error() {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => SourceError::Io(io),
            other => SourceError::Parse(format!("{other:?}")),
        }
    } else {
        SourceError::Parse(e.to_string())
    }
}

/// Writes each flushed batch to the log as JSON.
struct LogSink;

impl EventSink for LogSink {
    fn persist(&self, batch: &[AnalyticsEvent]) -> Result<(), SinkError> {
        let json = serde_json::to_string(batch).map_err(|e| SinkError::Rejected(e.to_string()))?;
        info!(events = batch.len(), batch = %json, "analytics batch");
        Ok(())
    }
}

fn resolve_path(raw: &str) -> Result<PathBuf> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok(p.to_path_buf());
    }
    anyhow::bail!("file not found: {}", p.display());
}
