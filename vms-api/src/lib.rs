//! # VMS API Server Library
//!
//! HTTP surface of the volunteer management system.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration from environment variables
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: Route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
