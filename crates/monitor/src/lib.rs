//! Air-quality alert monitor.
//!
//! Periodically scans the most recent sensor measurements, classifies them
//! against the threshold table, and appends an alert for the owning user when
//! a reading is out of range:
//!
//! - [`store`] — storage seams ([`MeasurementStore`], [`AlertProfileStore`],
//!   [`AlertStore`]) and their PostgreSQL implementation.
//! - [`AlertSink`] — resolves a recipient's alert profile and writes the alert.
//! - [`Scanner`] — one evaluation pass with dedup and cooldown state.
//! - [`AlertMonitor`] — the fixed-interval scheduler driving the scanner.

pub mod config;
pub mod error;
pub mod monitor;
pub mod scanner;
pub mod sink;
pub mod store;
pub mod telemetry;

pub use config::MonitorConfig;
pub use error::MonitorError;
pub use monitor::{AlertMonitor, MonitorHandle};
pub use scanner::{ScanReport, Scanner};
pub use sink::AlertSink;
pub use store::{AlertProfileStore, AlertStore, MeasurementStore, PgStore};
