//! Sensor categories and their stable `sensor_types` ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// `sensor_types.id` for temperature sensors.
pub const SENSOR_TYPE_TEMPERATURE: i16 = 1;

/// `sensor_types.id` for ozone sensors.
pub const SENSOR_TYPE_OZONE: i16 = 2;

/// The kind of quantity a sensor measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorCategory {
    /// Air temperature in degrees Celsius.
    Temperature,
    /// Ozone concentration.
    Ozone,
}

impl SensorCategory {
    pub const ALL: [SensorCategory; 2] = [SensorCategory::Temperature, SensorCategory::Ozone];

    /// Map a `sensor_types.id` to its category.
    pub fn from_type_id(id: i16) -> Result<Self, CoreError> {
        match id {
            SENSOR_TYPE_TEMPERATURE => Ok(Self::Temperature),
            SENSOR_TYPE_OZONE => Ok(Self::Ozone),
            other => Err(CoreError::UnknownSensorType(other)),
        }
    }

    /// The `sensor_types.id` this category is stored under.
    pub fn type_id(self) -> i16 {
        match self {
            Self::Temperature => SENSOR_TYPE_TEMPERATURE,
            Self::Ozone => SENSOR_TYPE_OZONE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Ozone => "ozone",
        }
    }
}

impl fmt::Display for SensorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "temperature" => Ok(Self::Temperature),
            "ozone" => Ok(Self::Ozone),
            _ => Err(CoreError::UnknownSensorTypeName(s.to_string())),
        }
    }
}
