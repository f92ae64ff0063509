/// Organization model and database operations
///
/// Organizations are the long-lived roots of the ownership tree. Deleting an
/// organization removes its events and everything below them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE organizations (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(75) NOT NULL,
///     address VARCHAR(255) NOT NULL DEFAULT ''
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

/// Organization record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    /// Unique organization ID
    pub id: i64,

    /// Display name
    pub name: String,

    /// Postal address
    pub address: String,
}

/// Input for creating a new organization
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrganization {
    #[validate(length(min = 1, max = 75, message = "Name must be 1-75 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: String,
}

impl Organization {
    /// Creates a new organization
    pub async fn create(pool: &PgPool, data: CreateOrganization) -> Result<Self, sqlx::Error> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            INSERT INTO organizations (name, address)
            VALUES ($1, $2)
            RETURNING id, name, address
            "#,
        )
        .bind(data.name)
        .bind(data.address)
        .fetch_one(pool)
        .await?;

        Ok(organization)
    }

    /// Finds an organization by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let organization = sqlx::query_as::<_, Organization>(
            "SELECT id, name, address FROM organizations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(organization)
    }

    /// Lists all organizations sorted by name (byte order), ties by ID
    pub async fn list_ordered_by_name(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let organizations = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, address
            FROM organizations
            ORDER BY name COLLATE "C" ASC, id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(organizations)
    }

    /// Deletes an organization and, via FK cascade, its events
    ///
    /// # Returns
    ///
    /// True if the organization was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
