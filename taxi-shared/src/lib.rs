//! # Taxi Shared Library
//!
//! Domain model, validation rules and persistence for the taxi fleet
//! service, used by the API server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Manufacturers, drivers, cars and their database operations
//! - `validation`: License number and username rules
//! - `auth`: Password hashing, JWT tokens and request authentication
//! - `db`: Connection pool and migrations
//! - `error`: Error type for model writes

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod validation;

/// Current version of the taxi shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
