//! # Questify Shared Library
//!
//! Shared types and utilities used by the Questify API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `auth`: JWT issuance/validation, password hashing, request auth context
//! - `db`: Connection pooling and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Questify shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
