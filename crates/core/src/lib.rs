//! Air-quality alerting domain logic.
//!
//! Everything in this crate is pure (no DB access, no clocks): sensor
//! categories, the threshold table, violation codes and the two pieces of
//! in-memory state the monitor keeps between scans. The `monitor` crate wires
//! them to storage.

pub mod alert;
pub mod cooldown;
pub mod error;
pub mod measurement;
pub mod seen;
pub mod sensor;
pub mod thresholds;
pub mod types;
