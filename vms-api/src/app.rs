/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use vms_api::{app::{build_router, AppState}, config::Config};
/// use vms_shared::store::memory::MemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, routes};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use vms_shared::{auth::middleware::jwt_auth_middleware, store::EntityStore};

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// The store as the services take it
    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }
}

/// Builds the router with all routes and middleware
///
/// ```text
/// /
/// ├── GET /health
/// └── /v1/                                   (Bearer JWT)
///     ├── /organizations            GET POST
///     │   └── /:id                  GET DELETE
///     ├── /events                   GET POST
///     │   └── /:id                  GET PUT DELETE
///     ├── /jobs                     GET POST
///     │   ├── /:id                  GET PUT DELETE
///     │   └── /:id/shifts           GET
///     ├── /shifts                   POST
///     │   └── /:id                  GET DELETE
///     └── /volunteers               POST
///         ├── /:id                  GET DELETE
///         ├── /:id/shifts           GET
///         └── /:id/shifts/:shift_id GET POST DELETE
/// ```
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let v1_routes = Router::new()
        .route(
            "/organizations",
            get(routes::organizations::list_organizations)
                .post(routes::organizations::create_organization),
        )
        .route(
            "/organizations/:id",
            get(routes::organizations::get_organization)
                .delete(routes::organizations::delete_organization),
        )
        .route(
            "/events",
            get(routes::events::list_events).post(routes::events::create_event),
        )
        .route(
            "/events/:id",
            get(routes::events::get_event)
                .put(routes::events::update_event)
                .delete(routes::events::delete_event),
        )
        .route(
            "/jobs",
            get(routes::jobs::list_jobs).post(routes::jobs::create_job),
        )
        .route(
            "/jobs/:id",
            get(routes::jobs::get_job)
                .put(routes::jobs::update_job)
                .delete(routes::jobs::delete_job),
        )
        .route("/jobs/:id/shifts", get(routes::jobs::list_job_shifts))
        .route("/shifts", post(routes::shifts::create_shift))
        .route(
            "/shifts/:id",
            get(routes::shifts::get_shift).delete(routes::shifts::delete_shift),
        )
        .route("/volunteers", post(routes::volunteers::create_volunteer))
        .route(
            "/volunteers/:id",
            get(routes::volunteers::get_volunteer).delete(routes::volunteers::delete_volunteer),
        )
        .route(
            "/volunteers/:id/shifts",
            get(routes::registrations::list_signed_up_shifts),
        )
        .route(
            "/volunteers/:id/shifts/:shift_id",
            get(routes::registrations::get_registration)
                .post(routes::registrations::register)
                .delete(routes::registrations::cancel_registration),
        )
        .layer(axum::middleware::from_fn_with_state(
            Arc::<str>::from(state.jwt_secret()),
            jwt_auth_middleware,
        ));

    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
