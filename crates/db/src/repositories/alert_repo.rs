//! Repository for the `alerts` table (append-only).

use airwatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::alert::{Alert, CreateAlert};

/// Column list for `alerts` SELECT queries.
const COLUMNS: &str = "\
    id, alert_profile_id, created_at, \
    location[0] AS location_x, location[1] AS location_y, code";

/// Provides query operations for alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Append an alert row.
    pub async fn insert(pool: &PgPool, input: &CreateAlert) -> Result<Alert, sqlx::Error> {
        let (x, y) = match input.location {
            Some(loc) => (Some(loc.x), Some(loc.y)),
            None => (None, None),
        };
        let query = format!(
            "INSERT INTO alerts (alert_profile_id, created_at, location, code) \
             VALUES ($1, $2, point($3::float8, $4::float8), $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(input.alert_profile_id)
            .bind(input.created_at)
            .bind(x)
            .bind(y)
            .bind(input.code)
            .fetch_one(pool)
            .await
    }

    /// Alerts for a user, newest first. Read side for alert listings and
    /// storage tests; the monitor only appends.
    pub async fn list_for_email(pool: &PgPool, email: &str) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts \
             WHERE alert_profile_id = (SELECT id FROM alert_profiles WHERE user_email = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(email)
            .fetch_all(pool)
            .await
    }

    /// Number of alerts attached to a profile. Used by storage tests.
    pub async fn count_for_profile(pool: &PgPool, alert_profile_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM alerts WHERE alert_profile_id = $1")
            .bind(alert_profile_id)
            .fetch_one(pool)
            .await
    }
}
