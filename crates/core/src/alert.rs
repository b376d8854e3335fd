//! Alert types for threshold violation notifications.
//!
//! Violation codes are user-facing and persisted in `alerts.code`, so the
//! integer values must never change.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::sensor::SensorCategory;

/// Which side of the acceptable range a value fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Value below the category minimum.
    Low,
    /// Value above the category maximum.
    High,
}

/// A stable, user-facing code for a threshold violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ViolationCode {
    TemperatureLow,
    TemperatureHigh,
    OzoneLow,
    OzoneHigh,
}

impl ViolationCode {
    pub const ALL: [ViolationCode; 4] = [
        ViolationCode::TemperatureLow,
        ViolationCode::TemperatureHigh,
        ViolationCode::OzoneLow,
        ViolationCode::OzoneHigh,
    ];

    /// Build the code for a category and direction.
    pub fn new(category: SensorCategory, direction: Direction) -> Self {
        match (category, direction) {
            (SensorCategory::Temperature, Direction::Low) => Self::TemperatureLow,
            (SensorCategory::Temperature, Direction::High) => Self::TemperatureHigh,
            (SensorCategory::Ozone, Direction::Low) => Self::OzoneLow,
            (SensorCategory::Ozone, Direction::High) => Self::OzoneHigh,
        }
    }

    /// Integer value stored in `alerts.code`.
    pub fn code(self) -> i32 {
        match self {
            Self::TemperatureLow => 101,
            Self::TemperatureHigh => 102,
            Self::OzoneLow => 201,
            Self::OzoneHigh => 202,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|v| v.code() == code)
            .ok_or(CoreError::UnknownViolationCode(code))
    }

    pub fn category(self) -> SensorCategory {
        match self {
            Self::TemperatureLow | Self::TemperatureHigh => SensorCategory::Temperature,
            Self::OzoneLow | Self::OzoneHigh => SensorCategory::Ozone,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::TemperatureLow | Self::OzoneLow => Direction::Low,
            Self::TemperatureHigh | Self::OzoneHigh => Direction::High,
        }
    }
}

impl From<ViolationCode> for i32 {
    fn from(code: ViolationCode) -> Self {
        code.code()
    }
}

impl TryFrom<i32> for ViolationCode {
    type Error = CoreError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A planar location as stored in a PostgreSQL `POINT` column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build from nullable `location[0]` / `location[1]` columns.
    pub fn from_parts(x: Option<f64>, y: Option<f64>) -> Option<Self> {
        match (x, y) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }
}
