/// Caller authentication
///
/// - [`jwt`]: HS256 token issuing and validation
/// - [`middleware`]: Axum middleware and the [`middleware::AuthContext`] extractor

pub mod jwt;
pub mod middleware;
