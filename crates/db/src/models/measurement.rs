//! Sensor measurement models.

use airwatch_core::alert::Location;
use airwatch_core::measurement::Measurement;
use airwatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A measurement joined with the email of the user owning its sensor.
///
/// `location` is split into its `POINT` coordinates; both are `NULL` when the
/// measurement carries no location.
#[derive(Debug, Clone, FromRow)]
pub struct MeasurementWithRecipient {
    pub id: DbId,
    pub value: f64,
    pub recorded_at: Timestamp,
    pub sensor_type_id: i16,
    pub sensor_uuid: String,
    pub recipient_email: String,
    pub location_x: Option<f64>,
    pub location_y: Option<f64>,
}

impl MeasurementWithRecipient {
    pub fn location(&self) -> Option<Location> {
        Location::from_parts(self.location_x, self.location_y)
    }
}

impl From<MeasurementWithRecipient> for Measurement {
    fn from(row: MeasurementWithRecipient) -> Self {
        let location = row.location();
        Self {
            id: row.id,
            value: row.value,
            recorded_at: row.recorded_at,
            sensor_type_id: row.sensor_type_id,
            sensor_uuid: row.sensor_uuid,
            recipient: row.recipient_email,
            location,
        }
    }
}

/// DTO for inserting a measurement (fixture seeding).
#[derive(Debug, Clone)]
pub struct CreateMeasurement {
    pub sensor_uuid: String,
    pub value: f64,
    pub recorded_at: Timestamp,
    pub sensor_type_id: i16,
    pub location: Option<Location>,
}
