//! Alert and alert-profile models.

use airwatch_core::alert::Location;
use airwatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// The per-user row alerts are attached to.
#[derive(Debug, Clone, FromRow)]
pub struct AlertProfile {
    pub id: DbId,
    pub user_email: String,
}

/// A persisted alert (append-only).
#[derive(Debug, Clone, FromRow)]
pub struct Alert {
    pub id: DbId,
    pub alert_profile_id: DbId,
    pub created_at: Timestamp,
    pub location_x: Option<f64>,
    pub location_y: Option<f64>,
    pub code: i32,
}

impl Alert {
    pub fn location(&self) -> Option<Location> {
        Location::from_parts(self.location_x, self.location_y)
    }
}

/// DTO for appending an alert.
#[derive(Debug, Clone)]
pub struct CreateAlert {
    pub alert_profile_id: DbId,
    pub created_at: Timestamp,
    pub location: Option<Location>,
    pub code: i32,
}
