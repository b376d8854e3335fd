//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod alert_profile_repo;
pub mod alert_repo;
pub mod measurement_repo;

pub use alert_profile_repo::AlertProfileRepo;
pub use alert_repo::AlertRepo;
pub use measurement_repo::MeasurementRepo;
