//! Data access layer.
//!
//! Repositories wrap the SQLite pool and implement the storage traits the
//! services depend on.

pub mod user_repository;
