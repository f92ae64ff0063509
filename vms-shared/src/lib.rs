//! # VMS Shared Library
//!
//! Domain model, storage and services for the volunteer management system,
//! used by the `vms-api` server.
//!
//! ## Module Organization
//!
//! - `models`: entity types and their PostgreSQL operations
//! - `store`: the `EntityStore` trait with in-memory and PostgreSQL backends
//! - `services`: lookups and the shift registration engine
//! - `auth`: JWT validation and request authentication
//! - `db`: connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod services;
pub mod store;

/// Current version of the VMS shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
