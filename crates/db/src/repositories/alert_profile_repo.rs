//! Repository for the `alert_profiles` table.

use airwatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::alert::AlertProfile;

/// Provides query operations for per-user alert profiles.
pub struct AlertProfileRepo;

impl AlertProfileRepo {
    /// Find the alert profile id registered for a user email.
    pub async fn find_id_by_email(pool: &PgPool, email: &str) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM alert_profiles WHERE user_email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Create the alert profile for a user, or return the existing one.
    /// Profile registration lives outside the monitor; used to seed fixtures.
    pub async fn ensure_for_email(pool: &PgPool, email: &str) -> Result<AlertProfile, sqlx::Error> {
        sqlx::query_as::<_, AlertProfile>(
            "INSERT INTO alert_profiles (user_email) VALUES ($1) \
             ON CONFLICT (user_email) DO UPDATE SET user_email = EXCLUDED.user_email \
             RETURNING id, user_email",
        )
        .bind(email)
        .fetch_one(pool)
        .await
    }
}
