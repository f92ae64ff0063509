/// Event model and database operations
///
/// An event spans a date range and owns the jobs volunteers can work.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE events (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(75) NOT NULL,
///     start_date DATE NOT NULL,
///     end_date DATE NOT NULL,
///     organization_id BIGINT REFERENCES organizations(id) ON DELETE CASCADE,
///     CONSTRAINT events_date_range_check CHECK (end_date >= start_date)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use vms_shared::models::event::{Event, CreateEvent};
/// use chrono::NaiveDate;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let event = Event::create(&pool, CreateEvent {
///     name: "Open Source Event".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2012, 10, 22).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2012, 10, 23).unwrap(),
///     organization_id: None,
/// }).await?;
///
/// let events = Event::list_ordered_by_name(&pool).await?;
/// # Ok(())
/// # }
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::{Validate, ValidationError};

/// Event record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    /// Unique event ID
    pub id: i64,

    /// Event name
    pub name: String,

    /// First day of the event
    pub start_date: NaiveDate,

    /// Last day of the event (inclusive)
    pub end_date: NaiveDate,

    /// Owning organization, if any
    pub organization_id: Option<i64>,
}

/// Input for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_event_dates"))]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 75, message = "Name must be 1-75 characters"))]
    pub name: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[serde(default)]
    pub organization_id: Option<i64>,
}

/// Edits replace every field, so they take the same input as creation
pub type UpdateEvent = CreateEvent;

fn validate_event_dates(data: &CreateEvent) -> Result<(), ValidationError> {
    super::check_date_range(data.start_date, data.end_date)
}

impl Event {
    /// Creates a new event
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `organization_id` references a missing organization (foreign key violation)
    /// - The date range is inverted (check violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateEvent) -> Result<Self, sqlx::Error> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, start_date, end_date, organization_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, start_date, end_date, organization_id
            "#,
        )
        .bind(data.name)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.organization_id)
        .fetch_one(pool)
        .await?;

        Ok(event)
    }

    /// Finds an event by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, start_date, end_date, organization_id
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(event)
    }

    /// Replaces an event's fields; its jobs, shifts and registrations are untouched
    ///
    /// # Returns
    ///
    /// The updated event, or None if it didn't exist
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateEvent,
    ) -> Result<Option<Self>, sqlx::Error> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET name = $2, start_date = $3, end_date = $4, organization_id = $5
            WHERE id = $1
            RETURNING id, name, start_date, end_date, organization_id
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.organization_id)
        .fetch_optional(pool)
        .await?;

        Ok(event)
    }

    /// Lists all events sorted by name (byte order), ties by ID
    pub async fn list_ordered_by_name(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, start_date, end_date, organization_id
            FROM events
            ORDER BY name COLLATE "C" ASC, id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(events)
    }

    /// Deletes an event; jobs, shifts and registrations follow by cascade
    ///
    /// # Returns
    ///
    /// True if the event was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
