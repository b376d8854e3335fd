//! Storage seams consumed by the monitor.
//!
//! The scanner and sink only see these traits; [`PgStore`] implements all
//! three on top of the `airwatch-db` repositories. Tests substitute in-memory
//! fakes.

use airwatch_core::alert::{Location, ViolationCode};
use airwatch_core::measurement::Measurement;
use airwatch_core::types::{DbId, Timestamp};
use airwatch_db::models::alert::CreateAlert;
use airwatch_db::repositories::{AlertProfileRepo, AlertRepo, MeasurementRepo};
use airwatch_db::DbPool;
use async_trait::async_trait;

use crate::error::MonitorResult;

/// Read-only view over stored telemetry.
#[async_trait]
pub trait MeasurementStore: Send + Sync {
    /// At most `limit` of the most recent measurements, newest first, each
    /// joined with the contact identity of its owner.
    async fn fetch_recent_with_recipient(&self, limit: i64) -> MonitorResult<Vec<Measurement>>;
}

/// Lookup of the alert profile a recipient's alerts are attached to.
#[async_trait]
pub trait AlertProfileStore: Send + Sync {
    async fn find_alert_profile_id(&self, recipient: &str) -> MonitorResult<Option<DbId>>;
}

/// Append-only alert log.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Append an alert and return its id.
    async fn insert_alert(
        &self,
        profile_id: DbId,
        timestamp: Timestamp,
        location: Option<Location>,
        code: ViolationCode,
    ) -> MonitorResult<DbId>;
}

/// PostgreSQL-backed implementation of every store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MeasurementStore for PgStore {
    async fn fetch_recent_with_recipient(&self, limit: i64) -> MonitorResult<Vec<Measurement>> {
        let rows = MeasurementRepo::fetch_recent_with_recipient(&self.pool, limit).await?;
        Ok(rows.into_iter().map(Measurement::from).collect())
    }
}

#[async_trait]
impl AlertProfileStore for PgStore {
    async fn find_alert_profile_id(&self, recipient: &str) -> MonitorResult<Option<DbId>> {
        Ok(AlertProfileRepo::find_id_by_email(&self.pool, recipient).await?)
    }
}

#[async_trait]
impl AlertStore for PgStore {
    async fn insert_alert(
        &self,
        profile_id: DbId,
        timestamp: Timestamp,
        location: Option<Location>,
        code: ViolationCode,
    ) -> MonitorResult<DbId> {
        let alert = AlertRepo::insert(
            &self.pool,
            &CreateAlert {
                alert_profile_id: profile_id,
                created_at: timestamp,
                location,
                code: code.code(),
            },
        )
        .await?;
        Ok(alert.id)
    }
}
