//! A stored sensor reading as seen by the alert monitor.

use crate::alert::Location;
use crate::error::CoreError;
use crate::sensor::SensorCategory;
use crate::types::{DbId, Timestamp};

/// A measurement joined with the contact identity of the user owning its
/// sensor. Read-only to the monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Storage-assigned, monotonically increasing id.
    pub id: DbId,
    pub value: f64,
    pub recorded_at: Timestamp,
    /// Raw `sensor_types.id`; see [`Measurement::category`].
    pub sensor_type_id: i16,
    pub sensor_uuid: String,
    /// Email of the user owning the sensor.
    pub recipient: String,
    pub location: Option<Location>,
}

impl Measurement {
    pub fn category(&self) -> Result<SensorCategory, CoreError> {
        SensorCategory::from_type_id(self.sensor_type_id)
    }
}
