// File: crates/chart-advisor/src/events.rs
// Summary: Analytics event batching with size-triggered and periodic flushes.
// Notes:
// - Events are queued in arrival order; a flush drains the whole queue in one
//   sink call.
// - A failed batch is logged and dropped. There is no retry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::AnalyticsConfig;
use crate::error::SinkError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub name: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), properties: Map::new(), timestamp: Utc::now() }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Destination for flushed batches (database table, HTTP collector, log).
pub trait EventSink: Send + Sync {
    fn persist(&self, batch: &[AnalyticsEvent]) -> Result<(), SinkError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    /// Queue length that triggers an immediate flush. At least 1.
    pub batch_size: usize,
    pub flush_interval: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self { Self::from(&AnalyticsConfig::default()) }
}

impl From<&AnalyticsConfig> for BatchOptions {
    fn from(cfg: &AnalyticsConfig) -> Self {
        Self { batch_size: cfg.batch_size.max(1), flush_interval: cfg.flush_interval() }
    }
}

struct Shared {
    queue: Mutex<Vec<AnalyticsEvent>>,
    sink: Arc<dyn EventSink>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Vec<AnalyticsEvent>> {
        // a panicking sink must not wedge the queue
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn flush(&self) -> usize {
        let batch = std::mem::take(&mut *self.lock());
        if batch.is_empty() { return 0; }
        match self.sink.persist(&batch) {
            Ok(()) => {
                debug!(events = batch.len(), "analytics batch flushed");
                batch.len()
            }
            Err(e) => {
                error!(error = %e, dropped = batch.len(), "analytics batch dropped");
                0
            }
        }
    }
}

struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Explicitly owned analytics buffer with a `start`/`stop` lifecycle.
pub struct EventBatcher {
    shared: Arc<Shared>,
    options: BatchOptions,
    worker: Option<Worker>,
}

impl EventBatcher {
    pub fn new(sink: Arc<dyn EventSink>, options: BatchOptions) -> Self {
        let options = BatchOptions { batch_size: options.batch_size.max(1), ..options };
        Self {
            shared: Arc::new(Shared { queue: Mutex::new(Vec::new()), sink }),
            options,
            worker: None,
        }
    }

    pub fn options(&self) -> BatchOptions { self.options }
    pub fn is_running(&self) -> bool { self.worker.is_some() }
    pub fn pending(&self) -> usize { self.shared.lock().len() }

    /// Spawn the periodic flush worker. No-op when already running.
    pub fn start(&mut self) -> std::io::Result<()> {
        if self.worker.is_some() { return Ok(()); }
        let (stop, stop_rx) = mpsc::channel::<()>();
        let shared = Arc::clone(&self.shared);
        let interval = self.options.flush_interval;
        let handle = std::thread::Builder::new()
            .name("analytics-flush".into())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => { shared.flush(); }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;
        self.worker = Some(Worker { stop, handle });
        info!(batch_size = self.options.batch_size, interval_ms = interval.as_millis() as u64, "analytics batcher started");
        Ok(())
    }

    /// Stop the worker (if any) and flush whatever is still queued.
    /// Returns the number of events persisted by the final flush.
    pub fn stop(&mut self) -> usize {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop.send(());
            if worker.handle.join().is_err() {
                error!("analytics flush worker panicked");
            }
            info!("analytics batcher stopped");
        }
        self.shared.flush()
    }

    /// Queue an event; flushes on the caller's thread once `batch_size` is reached.
    pub fn track(&self, event: AnalyticsEvent) {
        let reached = {
            let mut queue = self.shared.lock();
            queue.push(event);
            queue.len() >= self.options.batch_size
        };
        if reached {
            self.shared.flush();
        }
    }

    /// Drain the queue into the sink. Returns the number persisted (0 on failure).
    pub fn flush(&self) -> usize {
        self.shared.flush()
    }
}

impl Drop for EventBatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
