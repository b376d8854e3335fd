#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use airwatch_core::alert::{Location, ViolationCode};
use airwatch_core::measurement::Measurement;
use airwatch_core::sensor::{SENSOR_TYPE_OZONE, SENSOR_TYPE_TEMPERATURE};
use airwatch_core::types::{DbId, Timestamp};
use airwatch_monitor::error::MonitorResult;
use airwatch_monitor::{
    AlertProfileStore, AlertSink, AlertStore, MeasurementStore, MonitorConfig, MonitorError,
    Scanner,
};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Mutex;

/// An alert row captured by [`FakeStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAlert {
    pub id: DbId,
    pub profile_id: DbId,
    pub timestamp: Timestamp,
    pub location: Option<Location>,
    pub code: i32,
}

/// In-memory implementation of every monitor store.
#[derive(Default)]
pub struct FakeStore {
    measurements: Mutex<Vec<Measurement>>,
    profiles: Mutex<HashMap<String, DbId>>,
    alerts: Mutex<Vec<StoredAlert>>,
    pub fail_fetch: AtomicBool,
    pub fail_insert: AtomicBool,
    pub fetch_calls: AtomicUsize,
    /// How long each fetch takes; `None` returns immediately.
    pub fetch_delay: Mutex<Option<Duration>>,
    /// Fetches currently in progress, and the most ever seen at once.
    pub fetches_in_flight: AtomicUsize,
    pub max_fetches_in_flight: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn add_measurement(&self, m: Measurement) {
        self.measurements.lock().await.push(m);
    }

    pub async fn add_profile(&self, recipient: &str, id: DbId) {
        self.profiles.lock().await.insert(recipient.to_string(), id);
    }

    pub async fn alerts(&self) -> Vec<StoredAlert> {
        self.alerts.lock().await.clone()
    }

    pub async fn alert_codes(&self) -> Vec<i32> {
        self.alerts.lock().await.iter().map(|a| a.code).collect()
    }
}

#[async_trait]
impl MeasurementStore for FakeStore {
    async fn fetch_recent_with_recipient(&self, limit: i64) -> MonitorResult<Vec<Measurement>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.fetches_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_fetches_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        let delay = *self.fetch_delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.fetches_in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(MonitorError::StorageUnavailable(sqlx::Error::PoolTimedOut));
        }
        let mut rows = self.measurements.lock().await.clone();
        rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at).then(b.id.cmp(&a.id)));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }
}

#[async_trait]
impl AlertProfileStore for FakeStore {
    async fn find_alert_profile_id(&self, recipient: &str) -> MonitorResult<Option<DbId>> {
        Ok(self.profiles.lock().await.get(recipient).copied())
    }
}

#[async_trait]
impl AlertStore for FakeStore {
    async fn insert_alert(
        &self,
        profile_id: DbId,
        timestamp: Timestamp,
        location: Option<Location>,
        code: ViolationCode,
    ) -> MonitorResult<DbId> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(MonitorError::StorageUnavailable(sqlx::Error::PoolTimedOut));
        }
        let mut alerts = self.alerts.lock().await;
        let id = alerts.len() as DbId + 1;
        alerts.push(StoredAlert {
            id,
            profile_id,
            timestamp,
            location,
            code: code.code(),
        });
        Ok(id)
    }
}

/// A fixed instant plus `secs` seconds.
pub fn at(secs: i64) -> Timestamp {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn temperature(id: DbId, value: f64, recipient: &str, recorded_at: Timestamp) -> Measurement {
    measurement(id, SENSOR_TYPE_TEMPERATURE, value, recipient, recorded_at)
}

pub fn ozone(id: DbId, value: f64, recipient: &str, recorded_at: Timestamp) -> Measurement {
    measurement(id, SENSOR_TYPE_OZONE, value, recipient, recorded_at)
}

pub fn measurement(
    id: DbId,
    sensor_type_id: i16,
    value: f64,
    recipient: &str,
    recorded_at: Timestamp,
) -> Measurement {
    Measurement {
        id,
        value,
        recorded_at,
        sensor_type_id,
        sensor_uuid: format!("sensor-{id}"),
        recipient: recipient.to_string(),
        location: None,
    }
}

pub fn sink(store: &Arc<FakeStore>) -> AlertSink {
    AlertSink::new(store.clone(), store.clone())
}

pub fn scanner(store: &Arc<FakeStore>, config: &MonitorConfig) -> Scanner {
    Scanner::new(store.clone(), sink(store), config)
}
