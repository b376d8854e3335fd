//! Threshold table for sensor readings.
//!
//! Pure logic, no database access. The caller fetches measurements and asks
//! the table whether each value is out of range.

use crate::alert::{Direction, ViolationCode};
use crate::error::CoreError;
use crate::sensor::SensorCategory;

/// Acceptable temperature range in degrees Celsius.
pub const TEMPERATURE_RANGE: Threshold = Threshold { min: 0.0, max: 40.0 };

/// Acceptable ozone range.
pub const OZONE_RANGE: Threshold = Threshold { min: 0.0, max: 300.0 };

/// Inclusive `[min, max]` bounds for a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub min: f64,
    pub max: f64,
}

impl Threshold {
    pub fn new(min: f64, max: f64) -> Result<Self, CoreError> {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(CoreError::Validation(format!(
                "invalid threshold range [{min}, {max}]"
            )));
        }
        Ok(Self { min, max })
    }

    /// Which bound `value` violates, if any. Both bounds count as normal.
    pub fn check(&self, value: f64) -> Option<Direction> {
        if value < self.min {
            Some(Direction::Low)
        } else if value > self.max {
            Some(Direction::High)
        } else {
            None // within range, or NaN
        }
    }
}

/// Static mapping from sensor category to its acceptable range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    pub temperature: Threshold,
    pub ozone: Threshold,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE_RANGE,
            ozone: OZONE_RANGE,
        }
    }
}

impl ThresholdTable {
    /// Range configured for a category.
    pub fn range(&self, category: SensorCategory) -> Threshold {
        match category {
            SensorCategory::Temperature => self.temperature,
            SensorCategory::Ozone => self.ozone,
        }
    }

    /// Classify a reading. Returns `None` when the value is within range.
    pub fn classify(&self, category: SensorCategory, value: f64) -> Option<ViolationCode> {
        self.range(category)
            .check(value)
            .map(|direction| ViolationCode::new(category, direction))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
