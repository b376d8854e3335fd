//! Repository for the `measurements` table (append-only time-series).

use airwatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::measurement::{CreateMeasurement, MeasurementWithRecipient};

/// Column list for measurement reads joined with the owning user.
const JOINED_COLUMNS: &str = "\
    m.id, m.value, m.recorded_at, m.sensor_type_id, m.sensor_uuid, \
    us.user_email AS recipient_email, \
    m.location[0] AS location_x, m.location[1] AS location_y";

/// Provides query operations for sensor measurements.
pub struct MeasurementRepo;

impl MeasurementRepo {
    /// Insert a measurement and return its id. Ingestion lives outside the
    /// monitor; this is used to seed fixtures.
    pub async fn insert(pool: &PgPool, input: &CreateMeasurement) -> Result<DbId, sqlx::Error> {
        let (x, y) = match input.location {
            Some(loc) => (Some(loc.x), Some(loc.y)),
            None => (None, None),
        };
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO measurements (sensor_uuid, value, recorded_at, sensor_type_id, location) \
             VALUES ($1, $2, $3, $4, point($5::float8, $6::float8)) \
             RETURNING id",
        )
        .bind(&input.sensor_uuid)
        .bind(input.value)
        .bind(input.recorded_at)
        .bind(input.sensor_type_id)
        .bind(x)
        .bind(y)
        .fetch_one(pool)
        .await
    }

    /// The `limit` most recent measurements, newest first, each joined with
    /// the email of the user owning the sensor.
    ///
    /// Measurements from sensors with no owner are not returned. A sensor
    /// owned by several users yields one row per owner, all sharing the
    /// measurement id; the monitor dedups by that id, so the first owner
    /// alerted settles the measurement for the others.
    pub async fn fetch_recent_with_recipient(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<MeasurementWithRecipient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM measurements m \
             JOIN user_sensors us ON us.sensor_uuid = m.sensor_uuid \
             JOIN users u ON u.email = us.user_email \
             ORDER BY m.recorded_at DESC, m.id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, MeasurementWithRecipient>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
