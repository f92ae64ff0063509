/// Volunteer model and database operations
///
/// Each volunteer profile is linked to exactly one authenticated user identity
/// (`user_id`, the `sub` claim of the caller's token).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE volunteers (
///     id BIGSERIAL PRIMARY KEY,
///     first_name VARCHAR(30) NOT NULL,
///     last_name VARCHAR(30) NOT NULL,
///     address VARCHAR(75) NOT NULL DEFAULT '',
///     city VARCHAR(75) NOT NULL DEFAULT '',
///     state VARCHAR(75) NOT NULL DEFAULT '',
///     country VARCHAR(75) NOT NULL DEFAULT '',
///     phone_number VARCHAR(20) NOT NULL DEFAULT '',
///     email VARCHAR(254) NOT NULL,
///     user_id BIGINT NOT NULL,
///     CONSTRAINT volunteers_user_id_key UNIQUE (user_id)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

/// Volunteer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Volunteer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub phone_number: String,
    pub email: String,

    /// Authenticated identity this profile belongs to
    pub user_id: i64,
}

/// Input for creating a new volunteer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVolunteer {
    #[validate(length(min = 1, max = 30, message = "First name must be 1-30 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 30, message = "Last name must be 1-30 characters"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(length(max = 75))]
    pub address: String,

    #[serde(default)]
    #[validate(length(max = 75))]
    pub city: String,

    #[serde(default)]
    #[validate(length(max = 75))]
    pub state: String,

    #[serde(default)]
    #[validate(length(max = 75))]
    pub country: String,

    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone_number: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub user_id: i64,
}

impl Volunteer {
    /// Creates a new volunteer
    ///
    /// # Errors
    ///
    /// Returns a unique violation if another volunteer is already linked to
    /// `user_id`.
    pub async fn create(pool: &PgPool, data: CreateVolunteer) -> Result<Self, sqlx::Error> {
        let volunteer = sqlx::query_as::<_, Volunteer>(
            r#"
            INSERT INTO volunteers (first_name, last_name, address, city, state,
                                    country, phone_number, email, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, first_name, last_name, address, city, state,
                      country, phone_number, email, user_id
            "#,
        )
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.address)
        .bind(data.city)
        .bind(data.state)
        .bind(data.country)
        .bind(data.phone_number)
        .bind(data.email)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(volunteer)
    }

    /// Finds a volunteer by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let volunteer = sqlx::query_as::<_, Volunteer>(
            r#"
            SELECT id, first_name, last_name, address, city, state,
                   country, phone_number, email, user_id
            FROM volunteers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(volunteer)
    }

    /// Finds the volunteer linked to a user identity
    pub async fn find_by_user_id(pool: &PgPool, user_id: i64) -> Result<Option<Self>, sqlx::Error> {
        let volunteer = sqlx::query_as::<_, Volunteer>(
            r#"
            SELECT id, first_name, last_name, address, city, state,
                   country, phone_number, email, user_id
            FROM volunteers
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(volunteer)
    }

    /// Deletes a volunteer; registrations follow by cascade
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM volunteers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
