use std::time::Duration;

use airwatch_monitor::telemetry::{self, LogFormat};
use airwatch_monitor::{AlertMonitor, MonitorConfig, PgStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    telemetry::init_tracing(LogFormat::from_env());

    // --- Configuration ---
    let config = MonitorConfig::from_env();
    tracing::info!(
        interval_secs = config.scan_interval.as_secs(),
        cooldown_secs = config.alert_cooldown.as_secs(),
        fetch_limit = config.fetch_limit,
        cooldown_scope = ?config.cooldown_scope,
        "Loaded monitor configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = airwatch_db::create_pool(&database_url, config.max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    airwatch_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    airwatch_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Monitor ---
    let handle = AlertMonitor::with_pg(PgStore::new(pool.clone()), &config).spawn();

    shutdown_signal().await;

    if handle.shutdown(Duration::from_secs(5)).await.is_some() {
        tracing::info!("Alert monitor stopped");
    }

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
