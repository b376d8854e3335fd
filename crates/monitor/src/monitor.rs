//! Fixed-interval scheduler driving the [`Scanner`].
//!
//! The loop awaits each pass before waiting for the next tick, so passes can
//! never overlap; ticks missed while a slow pass runs are skipped rather than
//! replayed. Cancellation is checked between passes, never inside one.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::MonitorConfig;
use crate::scanner::Scanner;
use crate::sink::AlertSink;
use crate::store::{AlertProfileStore, AlertStore, MeasurementStore, PgStore};

/// Owns the scanner and its state for the lifetime of the process.
#[derive(Debug)]
pub struct AlertMonitor {
    scanner: Scanner,
    interval: Duration,
}

impl AlertMonitor {
    pub fn new(scanner: Scanner, interval: Duration) -> Self {
        Self { scanner, interval }
    }

    /// Build a monitor whose stores are all backed by one PostgreSQL pool.
    pub fn with_pg(store: PgStore, config: &MonitorConfig) -> Self {
        let store = Arc::new(store);
        let source: Arc<dyn MeasurementStore> = store.clone();
        let profiles: Arc<dyn AlertProfileStore> = store.clone();
        let alerts: Arc<dyn AlertStore> = store;
        let scanner = Scanner::new(source, AlertSink::new(profiles, alerts), config);
        Self::new(scanner, config.scan_interval)
    }

    /// Scan until the process terminates.
    pub async fn start(self) {
        self.run(CancellationToken::new()).await;
    }

    /// Run the scan loop on a background task and return a handle to stop it.
    pub fn spawn(self) -> MonitorHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run(cancel.clone()));
        MonitorHandle { cancel, task }
    }

    /// Run the scan loop until `cancel` is triggered.
    ///
    /// The first pass starts immediately. Returns the monitor so callers can
    /// inspect its state after shutdown.
    pub async fn run(mut self, cancel: CancellationToken) -> Self {
        tracing::info!(
            interval_secs = self.interval.as_secs_f64(),
            "Alert monitor started"
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("Alert monitor stopping");
                    break;
                }
                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }

        self
    }

    async fn tick(&mut self) {
        match self.scanner.scan_once(Utc::now()).await {
            Ok(report) => {
                if report.alerted > 0 || report.dead_lettered > 0 {
                    tracing::info!(?report, "Scan pass complete");
                } else {
                    tracing::debug!(?report, "Scan pass complete");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch measurements, skipping pass");
            }
        }
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }
}

/// Handle to a monitor running on a background task.
#[derive(Debug)]
pub struct MonitorHandle {
    cancel: CancellationToken,
    task: JoinHandle<AlertMonitor>,
}

impl MonitorHandle {
    /// Ask the monitor to stop after the pass in progress, if any.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the monitor and wait up to `timeout` for it to exit.
    ///
    /// Returns the stopped monitor, or `None` if it did not exit in time
    /// (the task is aborted) or panicked.
    pub async fn shutdown(self, timeout: Duration) -> Option<AlertMonitor> {
        self.stop();
        let abort = self.task.abort_handle();
        match tokio::time::timeout(timeout, self.task).await {
            Ok(Ok(monitor)) => Some(monitor),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Alert monitor task failed");
                None
            }
            Err(_) => {
                tracing::warn!("Alert monitor did not stop in time, aborting");
                abort.abort();
                None
            }
        }
    }
}
