/// Caller authentication for Axum
///
/// [`jwt_auth_middleware`] validates the `Authorization: Bearer <token>`
/// header and stores an [`AuthContext`] in the request extensions. Handlers
/// then take `AuthContext` as an extractor; a route reached without the
/// middleware rejects with 401.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{middleware, routing::get, Router};
/// use vms_shared::auth::middleware::{jwt_auth_middleware, AuthContext};
///
/// async fn whoami(auth: AuthContext) -> String {
///     format!("user {}", auth.user_id)
/// }
///
/// let secret: Arc<str> = Arc::from("a-secret-of-at-least-32-bytes!!!");
/// let app: Router = Router::new()
///     .route("/whoami", get(whoami))
///     .layer(middleware::from_fn_with_state(secret, jwt_auth_middleware));
/// ```

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::jwt::{validate_access_token, JwtError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Jwt,
}

/// Authenticated caller, added to request extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Caller's user ID (`sub` claim)
    pub user_id: i64,
    pub method: AuthMethod,
}

impl AuthContext {
    pub fn from_jwt(user_id: i64) -> Self {
        Self {
            user_id,
            method: AuthMethod::Jwt,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingCredentials,

    #[error("{0}")]
    InvalidFormat(String),

    #[error("{0}")]
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            AuthError::MissingCredentials | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
        };
        let code = match status {
            StatusCode::BAD_REQUEST => "bad_request",
            _ => "unauthorized",
        };
        (status, Json(json!({ "error": code, "message": self.to_string() }))).into_response()
    }
}

/// Validates the bearer token in `headers` and returns the caller
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_access_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        other => AuthError::InvalidToken(format!("Invalid token: {}", other)),
    })?;

    let user_id = claims
        .user_id()
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    debug!(user_id, "Authenticated request");
    Ok(AuthContext::from_jwt(user_id))
}

/// Rejects the request unless it carries a valid access token
///
/// Mount with `axum::middleware::from_fn_with_state(secret, jwt_auth_middleware)`.
pub async fn jwt_auth_middleware(
    State(secret): State<Arc<str>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth = authenticate(req.headers(), &secret)?;
    req.extensions_mut().insert(auth);
    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AuthError::MissingCredentials)
    }
}
