/// Database layer for the PostgreSQL backend
///
/// - `pool`: connection pool with health checks
/// - `migrations`: embedded schema migrations
///
/// Row-level operations live on the types in [`crate::models`].

pub mod migrations;
pub mod pool;
