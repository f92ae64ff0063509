/// Job model and database operations
///
/// A job belongs to exactly one event and owns the shifts volunteers sign up for.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE jobs (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(75) NOT NULL,
///     start_date DATE NOT NULL,
///     end_date DATE NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     event_id BIGINT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
///     CONSTRAINT jobs_date_range_check CHECK (end_date >= start_date)
/// );
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::{Validate, ValidationError};

/// Job record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    /// Unique job ID
    pub id: i64,

    /// Job title (e.g., "Software Developer")
    pub name: String,

    /// First day the job runs
    pub start_date: NaiveDate,

    /// Last day the job runs (inclusive)
    pub end_date: NaiveDate,

    /// Free-form description
    pub description: String,

    /// Owning event
    pub event_id: i64,
}

/// Input for creating a new job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_job_dates"))]
pub struct CreateJob {
    #[validate(length(min = 1, max = 75, message = "Name must be 1-75 characters"))]
    pub name: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[serde(default)]
    pub description: String,

    pub event_id: i64,
}

/// Full replacement of a job's fields, including moving it to another event
pub type UpdateJob = CreateJob;

fn validate_job_dates(data: &CreateJob) -> Result<(), ValidationError> {
    super::check_date_range(data.start_date, data.end_date)
}

impl Job {
    /// Creates a new job under an event
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The event does not exist (foreign key violation)
    /// - The date range is inverted (check violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateJob) -> Result<Self, sqlx::Error> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (name, start_date, end_date, description, event_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, start_date, end_date, description, event_id
            "#,
        )
        .bind(data.name)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.description)
        .bind(data.event_id)
        .fetch_one(pool)
        .await?;

        Ok(job)
    }

    /// Finds a job by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, name, start_date, end_date, description, event_id
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(job)
    }

    /// Replaces a job's fields, returning None if it didn't exist
    ///
    /// Shifts stay attached to the job.
    pub async fn update(pool: &PgPool, id: i64, data: UpdateJob) -> Result<Option<Self>, sqlx::Error> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET name = $2, start_date = $3, end_date = $4, description = $5, event_id = $6
            WHERE id = $1
            RETURNING id, name, start_date, end_date, description, event_id
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.description)
        .bind(data.event_id)
        .fetch_optional(pool)
        .await?;

        Ok(job)
    }

    /// Lists all jobs sorted by title (byte order), ties by ID
    pub async fn list_ordered_by_name(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, name, start_date, end_date, description, event_id
            FROM jobs
            ORDER BY name COLLATE "C" ASC, id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(jobs)
    }

    /// Deletes a job; its shifts and their registrations follow by cascade
    ///
    /// # Returns
    ///
    /// True if the job was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_job_validation() {
        let job = CreateJob {
            name: "Systems Administrator".to_string(),
            start_date: NaiveDate::from_ymd_opt(2012, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2012, 10, 26).unwrap(),
            description: "A systems administrator job".to_string(),
            event_id: 1,
        };
        assert!(job.validate().is_ok());

        let too_long = CreateJob {
            name: "x".repeat(76),
            ..job.clone()
        };
        assert!(too_long.validate().is_err());

        let inverted = CreateJob {
            start_date: NaiveDate::from_ymd_opt(2012, 11, 1).unwrap(),
            ..job
        };
        assert!(inverted.validate().is_err());
    }
}
