//! # timebank shared library
//!
//! Shared types and storage access used by the timebank API server.
//!
//! ## Module Organization
//!
//! - `models`: storage records and their CRUD operations
//! - `db`: connection pool and migrations
//! - `auth`: password hashing primitive

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the timebank shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
