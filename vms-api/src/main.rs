//! # VMS API Server
//!
//! JSON API for organizations, events, jobs, shifts and volunteer sign-ups.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=$(openssl rand -hex 32) cargo run -p vms-api
//! STORE_BACKEND=postgres DATABASE_URL=postgresql://... cargo run -p vms-api
//! ```

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vms_api::{
    app::{build_router, AppState},
    config::{Config, StoreBackend},
};
use vms_shared::{
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    store::{memory::MemoryStore, postgres::PgStore, EntityStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vms_api=debug,vms_shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("VMS API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let (store, pg_store) = open_store(&config).await?;
    tracing::info!(backend = store.backend_name(), "Entity store ready");

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pg_store) = pg_store {
        close_pool(pg_store.pool()).await;
    }
    tracing::info!("Server stopped");
    Ok(())
}

/// Opens the configured store; a PostgreSQL store is also returned so its pool
/// can be closed on shutdown
async fn open_store(config: &Config) -> anyhow::Result<(Arc<dyn EntityStore>, Option<PgStore>)> {
    match config.store.backend {
        StoreBackend::Memory => {
            let store: Arc<dyn EntityStore> = Arc::new(MemoryStore::new());
            Ok((store, None))
        }
        StoreBackend::Postgres => {
            let url = config
                .store
                .database_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;

            let pool = create_pool(DatabaseConfig {
                url,
                max_connections: config.store.max_connections,
                ..Default::default()
            })
            .await?;
            run_migrations(&pool).await?;

            let pg_store = PgStore::new(pool);
            let store: Arc<dyn EntityStore> = Arc::new(pg_store.clone());
            Ok((store, Some(pg_store)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
