use airwatch_core::alert::Location;
use airwatch_db::models::alert::CreateAlert;
use airwatch_db::models::measurement::CreateMeasurement;
use airwatch_db::repositories::{AlertProfileRepo, AlertRepo, MeasurementRepo};
use chrono::{Duration, Utc};
use sqlx::PgPool;

async fn seed_owner(pool: &PgPool, email: &str, sensor_uuid: &str) {
    sqlx::query("INSERT INTO users (email, username) VALUES ($1, $1)")
        .bind(email)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO sensors (uuid) VALUES ($1)")
        .bind(sensor_uuid)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO user_sensors (user_email, sensor_uuid) VALUES ($1, $2)")
        .bind(email)
        .bind(sensor_uuid)
        .execute(pool)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_seeds_sensor_types(pool: PgPool) {
    airwatch_db::health_check(&pool).await.unwrap();

    let names: Vec<(i16, String)> = sqlx::query_as("SELECT id, name FROM sensor_types ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(
        names,
        vec![(1, "temperature".to_string()), (2, "ozone".to_string())]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fetch_recent_is_newest_first_and_bounded(pool: PgPool) {
    seed_owner(&pool, "r1@example.com", "sensor-uuid-1").await;
    let base = Utc::now();

    for i in 0..12 {
        MeasurementRepo::insert(
            &pool,
            &CreateMeasurement {
                sensor_uuid: "sensor-uuid-1".into(),
                value: f64::from(i),
                recorded_at: base + Duration::seconds(i64::from(i)),
                sensor_type_id: 1,
                location: (i == 11).then(|| Location::new(1.0, 2.0)),
            },
        )
        .await
        .unwrap();
    }

    let rows = MeasurementRepo::fetch_recent_with_recipient(&pool, 10)
        .await
        .unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].value, 11.0);
    assert_eq!(rows[0].recipient_email, "r1@example.com");
    assert_eq!(rows[0].location(), Some(Location::new(1.0, 2.0)));
    assert_eq!(rows[1].location(), None);
    assert!(rows.windows(2).all(|w| w[0].recorded_at >= w[1].recorded_at));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unowned_sensor_measurements_are_not_returned(pool: PgPool) {
    sqlx::query("INSERT INTO sensors (uuid) VALUES ('orphan')")
        .execute(&pool)
        .await
        .unwrap();
    MeasurementRepo::insert(
        &pool,
        &CreateMeasurement {
            sensor_uuid: "orphan".into(),
            value: 500.0,
            recorded_at: Utc::now(),
            sensor_type_id: 2,
            location: None,
        },
    )
    .await
    .unwrap();

    let rows = MeasurementRepo::fetch_recent_with_recipient(&pool, 10)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_alert_profile_lookup_and_insert(pool: PgPool) {
    seed_owner(&pool, "r1@example.com", "sensor-uuid-1").await;

    assert_eq!(
        AlertProfileRepo::find_id_by_email(&pool, "r1@example.com")
            .await
            .unwrap(),
        None
    );

    let profile = AlertProfileRepo::ensure_for_email(&pool, "r1@example.com")
        .await
        .unwrap();
    let again = AlertProfileRepo::ensure_for_email(&pool, "r1@example.com")
        .await
        .unwrap();
    assert_eq!(profile.id, again.id);

    let found = AlertProfileRepo::find_id_by_email(&pool, "r1@example.com")
        .await
        .unwrap();
    assert_eq!(found, Some(profile.id));

    let created_at = Utc::now();
    let alert = AlertRepo::insert(
        &pool,
        &CreateAlert {
            alert_profile_id: profile.id,
            created_at,
            location: Some(Location::new(0.0, 0.0)),
            code: 101,
        },
    )
    .await
    .unwrap();
    assert_eq!(alert.code, 101);
    assert_eq!(alert.location(), Some(Location::new(0.0, 0.0)));

    AlertRepo::insert(
        &pool,
        &CreateAlert {
            alert_profile_id: profile.id,
            created_at: created_at + Duration::seconds(60),
            location: None,
            code: 202,
        },
    )
    .await
    .unwrap();

    let listed = AlertRepo::list_for_email(&pool, "r1@example.com")
        .await
        .unwrap();
    assert_eq!(listed.iter().map(|a| a.code).collect::<Vec<_>>(), vec![202, 101]);
    assert_eq!(listed[0].location(), None);
    assert_eq!(AlertRepo::count_for_profile(&pool, profile.id).await.unwrap(), 2);
}
