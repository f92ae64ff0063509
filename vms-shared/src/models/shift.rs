/// Shift model and database operations
///
/// A shift is a bounded-capacity, time-boxed unit of volunteer work under a job.
/// `max_volunteers` caps the number of live registrations (see
/// [`crate::models::volunteer_shift`]); zero is allowed and means the shift
/// cannot be signed up for.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE shifts (
///     id BIGSERIAL PRIMARY KEY,
///     date DATE NOT NULL,
///     start_time TIME NOT NULL,
///     end_time TIME NOT NULL,
///     max_volunteers INTEGER NOT NULL,
///     job_id BIGINT NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
///     CONSTRAINT shifts_max_volunteers_check CHECK (max_volunteers >= 0)
/// );
/// ```
///
/// `end_time` may be earlier than `start_time`; such shifts run past midnight.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

/// Shift record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Shift {
    /// Unique shift ID
    pub id: i64,

    /// Day the shift takes place
    pub date: NaiveDate,

    /// Wall-clock start
    pub start_time: NaiveTime,

    /// Wall-clock end
    pub end_time: NaiveTime,

    /// Upper bound on simultaneous live registrations
    pub max_volunteers: i32,

    /// Owning job
    pub job_id: i64,
}

/// Input for creating a new shift
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShift {
    pub date: NaiveDate,

    pub start_time: NaiveTime,

    pub end_time: NaiveTime,

    #[validate(range(min = 0, message = "max_volunteers must not be negative"))]
    pub max_volunteers: i32,

    pub job_id: i64,
}

impl Shift {
    /// Creates a new shift under a job
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The job does not exist (foreign key violation)
    /// - `max_volunteers` is negative (check violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateShift) -> Result<Self, sqlx::Error> {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            INSERT INTO shifts (date, start_time, end_time, max_volunteers, job_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, date, start_time, end_time, max_volunteers, job_id
            "#,
        )
        .bind(data.date)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.max_volunteers)
        .bind(data.job_id)
        .fetch_one(pool)
        .await?;

        Ok(shift)
    }

    /// Finds a shift by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            SELECT id, date, start_time, end_time, max_volunteers, job_id
            FROM shifts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(shift)
    }

    /// Lists a job's shifts by date ascending, ties by ID
    pub async fn list_by_job_ordered_by_date(
        pool: &PgPool,
        job_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let shifts = sqlx::query_as::<_, Shift>(
            r#"
            SELECT id, date, start_time, end_time, max_volunteers, job_id
            FROM shifts
            WHERE job_id = $1
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(pool)
        .await?;

        Ok(shifts)
    }

    /// Lists the shifts a volunteer holds a registration for, by shift ID
    pub async fn list_by_volunteer(
        pool: &PgPool,
        volunteer_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let shifts = sqlx::query_as::<_, Shift>(
            r#"
            SELECT s.id, s.date, s.start_time, s.end_time, s.max_volunteers, s.job_id
            FROM shifts s
            JOIN volunteer_shifts vs ON vs.shift_id = s.id
            WHERE vs.volunteer_id = $1
            ORDER BY s.id ASC
            "#,
        )
        .bind(volunteer_id)
        .fetch_all(pool)
        .await?;

        Ok(shifts)
    }

    /// Deletes a shift; its registrations follow by cascade
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns true if this shift spans midnight
    pub fn crosses_midnight(&self) -> bool {
        self.end_time < self.start_time
    }
}
