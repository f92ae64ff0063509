/// Schema migrations
///
/// Migrations live in `vms-shared/migrations/` and are embedded at compile time
/// with `sqlx::migrate!`. They are applied on startup when the service runs
/// against PostgreSQL.
///
/// # Example
///
/// ```no_run
/// use vms_shared::db::migrations::{ensure_database_exists, run_migrations};
/// use vms_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example(url: String) -> Result<(), Box<dyn std::error::Error>> {
/// ensure_database_exists(&url).await?;
/// let pool = create_pool(DatabaseConfig { url, ..Default::default() }).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::{migrate::MigrateDatabase, postgres::PgPool, Postgres};
use tracing::{debug, error, info};

/// Applied-migration summary read from `_sqlx_migrations`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub applied_migrations: usize,
    pub latest_version: Option<i64>,
}

impl MigrationStatus {
    /// True once the embedded migrations have all been applied
    pub fn is_current(&self) -> bool {
        let latest_embedded = sqlx::migrate!("./migrations")
            .iter()
            .map(|m| m.version)
            .max();
        self.latest_version == latest_embedded
    }
}

/// Applies every pending migration
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    if let Err(e) = sqlx::migrate!("./migrations").run(pool).await {
        error!(error = %e, "Migration failed");
        return Err(e);
    }

    info!("Database schema is up to date");
    Ok(())
}

/// Reads which migrations have been applied
///
/// Returns an empty status if sqlx has never run against this database.
pub async fn get_migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public' AND table_name = '_sqlx_migrations'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        debug!("No migrations table yet");
        return Ok(MigrationStatus {
            applied_migrations: 0,
            latest_version: None,
        });
    }

    let (count, latest_version): (i64, Option<i64>) = sqlx::query_as(
        "SELECT COUNT(*), MAX(version) FROM _sqlx_migrations WHERE success = true",
    )
    .fetch_one(pool)
    .await?;

    Ok(MigrationStatus {
        applied_migrations: count as usize,
        latest_version,
    })
}

/// Creates the database named in `database_url` if it is missing
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if !Postgres::database_exists(database_url).await? {
        info!("Creating database");
        Postgres::create_database(database_url).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_status_is_not_current() {
        let status = MigrationStatus {
            applied_migrations: 0,
            latest_version: None,
        };
        assert!(!status.is_current());
    }

    #[test]
    fn test_status_at_initial_schema_is_current() {
        let status = MigrationStatus {
            applied_migrations: 1,
            latest_version: Some(20240101000000),
        };
        assert!(status.is_current());
    }
}
