use airwatch_core::types::DbId;

/// Errors raised while scanning measurements or emitting alerts.
///
/// None of these are fatal: the scanner logs them and retries on a later
/// pass.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// A fetch or write against the database failed.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    /// The recipient has no alert profile to attach the alert to.
    #[error("No alert profile for recipient {recipient}")]
    RecipientProfileMissing { recipient: String },

    /// The measurement references a sensor type the threshold table does not know.
    #[error("Measurement {measurement_id} has unknown sensor type {sensor_type_id}")]
    UnknownSensorType {
        measurement_id: DbId,
        sensor_type_id: i16,
    },
}

pub type MonitorResult<T> = Result<T, MonitorError>;
