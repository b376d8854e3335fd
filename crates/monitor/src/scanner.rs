//! One evaluation pass over the most recent measurements.
//!
//! Pure pipeline logic plus the in-memory state carried between passes. The
//! caller (see [`crate::monitor`]) supplies the clock and drives passes
//! sequentially, so the seen-set and cooldown records are only ever mutated
//! through `&mut self`.

use std::collections::HashMap;
use std::sync::Arc;

use airwatch_core::cooldown::{CooldownScope, CooldownThrottle};
use airwatch_core::measurement::Measurement;
use airwatch_core::seen::SeenTracker;
use airwatch_core::thresholds::ThresholdTable;
use airwatch_core::types::{DbId, Timestamp};

use crate::config::MonitorConfig;
use crate::error::{MonitorError, MonitorResult};
use crate::sink::AlertSink;
use crate::store::MeasurementStore;

/// Per-pass counters, one bucket per measurement outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Rows returned by the measurement store.
    pub fetched: usize,
    /// Skipped because they were evaluated on an earlier pass.
    pub already_seen: usize,
    /// Within range; marked seen without an alert.
    pub within_range: usize,
    /// Alert written; marked seen.
    pub alerted: usize,
    /// Violation held back by the recipient's cooldown; not marked seen.
    pub suppressed: usize,
    /// Violation for a recipient without an alert profile; not marked seen.
    pub profile_missing: usize,
    /// Gave up after too many missing-profile retries; marked seen.
    pub dead_lettered: usize,
    /// Alert write failed on storage; not marked seen.
    pub failed: usize,
    /// Sensor type unknown to the threshold table; marked seen.
    pub unknown_category: usize,
}

/// Scans measurements, deduplicates, throttles, and emits alerts.
pub struct Scanner {
    source: Arc<dyn MeasurementStore>,
    sink: AlertSink,
    thresholds: ThresholdTable,
    seen: SeenTracker,
    cooldown: CooldownThrottle,
    scope: CooldownScope,
    fetch_limit: i64,
    max_profile_retries: u32,
    /// Consecutive missing-profile failures per measurement.
    profile_failures: HashMap<DbId, u32>,
}

impl Scanner {
    pub fn new(source: Arc<dyn MeasurementStore>, sink: AlertSink, config: &MonitorConfig) -> Self {
        Self {
            source,
            sink,
            thresholds: ThresholdTable::default(),
            seen: SeenTracker::with_capacity(config.effective_seen_capacity()),
            cooldown: CooldownThrottle::new(config.alert_cooldown),
            scope: config.cooldown_scope,
            fetch_limit: config.fetch_limit,
            max_profile_retries: config.max_profile_retries,
            profile_failures: HashMap::new(),
        }
    }

    /// Replace the default threshold table.
    pub fn with_thresholds(mut self, thresholds: ThresholdTable) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn seen(&self) -> &SeenTracker {
        &self.seen
    }

    pub fn cooldown(&self) -> &CooldownThrottle {
        &self.cooldown
    }

    /// Mutable access to the cooldown records, e.g. to seed a recent emission.
    pub fn cooldown_mut(&mut self) -> &mut CooldownThrottle {
        &mut self.cooldown
    }

    /// Run one pass at time `now`.
    ///
    /// Only a failed fetch is returned as an error (the pass is skipped).
    /// Per-measurement failures are logged and counted in the report.
    pub async fn scan_once(&mut self, now: Timestamp) -> MonitorResult<ScanReport> {
        let batch = self
            .source
            .fetch_recent_with_recipient(self.fetch_limit)
            .await?;

        let mut report = ScanReport {
            fetched: batch.len(),
            ..ScanReport::default()
        };

        // Counters for measurements that dropped out of the fetch window
        // will never be consulted again.
        self.profile_failures
            .retain(|id, _| batch.iter().any(|m| m.id == *id));

        for measurement in &batch {
            self.evaluate(measurement, now, &mut report).await;
        }

        Ok(report)
    }

    async fn evaluate(&mut self, m: &Measurement, now: Timestamp, report: &mut ScanReport) {
        // Keyed by measurement id alone: rows for other owners of a shared
        // sensor are skipped once any owner has been alerted.
        if self.seen.contains(m.id) {
            tracing::trace!(measurement_id = m.id, "Measurement already evaluated");
            report.already_seen += 1;
            return;
        }

        let category = match m.category() {
            Ok(category) => category,
            Err(_) => {
                let e = MonitorError::UnknownSensorType {
                    measurement_id: m.id,
                    sensor_type_id: m.sensor_type_id,
                };
                tracing::warn!(error = %e, sensor_uuid = %m.sensor_uuid, "Skipping measurement");
                self.seen.mark(m.id);
                report.unknown_category += 1;
                return;
            }
        };

        let Some(code) = self.thresholds.classify(category, m.value) else {
            self.seen.mark(m.id);
            report.within_range += 1;
            return;
        };

        let key = self.scope.key(&m.recipient, category);
        if !self.cooldown.allow(&key, now) {
            tracing::debug!(
                measurement_id = m.id,
                recipient = %m.recipient,
                code = code.code(),
                "Alert suppressed, recipient in cooldown"
            );
            report.suppressed += 1;
            return;
        }

        tracing::info!(
            measurement_id = m.id,
            value = m.value,
            category = %category,
            code = code.code(),
            "Value out of range, creating alert"
        );

        match self.sink.emit(&m.recipient, code, now, m.location).await {
            Ok(alert_id) => {
                self.cooldown.record_emission(key, now);
                self.seen.mark(m.id);
                self.profile_failures.remove(&m.id);
                report.alerted += 1;
                tracing::info!(
                    alert_id,
                    measurement_id = m.id,
                    recipient = %m.recipient,
                    sensor_uuid = %m.sensor_uuid,
                    code = code.code(),
                    "Alert created"
                );
            }
            Err(e @ MonitorError::RecipientProfileMissing { .. }) => {
                self.on_profile_missing(m, &e, report);
            }
            Err(e) => {
                report.failed += 1;
                tracing::error!(
                    measurement_id = m.id,
                    recipient = %m.recipient,
                    error = %e,
                    "Failed to create alert"
                );
            }
        }
    }

    fn on_profile_missing(&mut self, m: &Measurement, e: &MonitorError, report: &mut ScanReport) {
        let attempts = self.profile_failures.entry(m.id).or_insert(0);
        *attempts += 1;
        let attempts = *attempts;

        if self.max_profile_retries > 0 && attempts >= self.max_profile_retries {
            self.profile_failures.remove(&m.id);
            self.seen.mark(m.id);
            report.dead_lettered += 1;
            tracing::error!(
                measurement_id = m.id,
                recipient = %m.recipient,
                attempts,
                "Giving up on alert, recipient still has no alert profile"
            );
            return;
        }

        report.profile_missing += 1;
        tracing::warn!(
            measurement_id = m.id,
            attempts,
            error = %e,
            "Alert not created, will retry"
        );
    }
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("seen", &self.seen.len())
            .field("scope", &self.scope)
            .field("fetch_limit", &self.fetch_limit)
            .field("max_profile_retries", &self.max_profile_retries)
            .finish_non_exhaustive()
    }
}
