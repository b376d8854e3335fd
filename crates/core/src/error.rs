#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown sensor type id: {0}")]
    UnknownSensorType(i16),

    #[error("Unknown sensor type name: {0}")]
    UnknownSensorTypeName(String),

    #[error("Unknown violation code: {0}")]
    UnknownViolationCode(i32),

    #[error("Validation failed: {0}")]
    Validation(String),
}
