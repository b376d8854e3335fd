//! Row models and insert DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the database row and
//! a create DTO for inserts.

pub mod alert;
pub mod measurement;
