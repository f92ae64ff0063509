/// VolunteerShift model and database operations
///
/// A VolunteerShift row means "this volunteer is registered for this shift".
/// Rows are created only through [`VolunteerShift::reserve`] and removed only by
/// [`VolunteerShift::delete`] or by cascade from the volunteer or the shift.
/// There is no update operation.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE volunteer_shifts (
///     id BIGSERIAL PRIMARY KEY,
///     volunteer_id BIGINT NOT NULL REFERENCES volunteers(id) ON DELETE CASCADE,
///     shift_id BIGINT NOT NULL REFERENCES shifts(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT volunteer_shifts_volunteer_id_shift_id_key UNIQUE (volunteer_id, shift_id)
/// );
/// ```
///
/// # Concurrency
///
/// `reserve` locks the shift row (`SELECT ... FOR UPDATE`) before counting, so
/// all reservations against one shift are serialized. The unique constraint on
/// `(volunteer_id, shift_id)` backs up the duplicate check.
///
/// # Example
///
/// ```no_run
/// use vms_shared::models::volunteer_shift::{Reservation, VolunteerShift};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// match VolunteerShift::reserve(&pool, 1, 2).await? {
///     Reservation::Created(record) => println!("Registered: {}", record.id),
///     Reservation::Existing(_) => println!("Already registered"),
///     Reservation::Full { max_volunteers, .. } => println!("Full ({})", max_volunteers),
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Registration record joining a volunteer to a shift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VolunteerShift {
    /// Unique registration ID
    pub id: i64,

    /// Registered volunteer
    pub volunteer_id: i64,

    /// Shift registered for
    pub shift_id: i64,

    /// When the registration was made
    pub created_at: DateTime<Utc>,
}

/// Result of an atomic reservation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reservation {
    /// A new registration was created
    Created(VolunteerShift),

    /// The pair was already registered; nothing was written
    Existing(VolunteerShift),

    /// The shift has no free places; nothing was written
    Full {
        /// Shift capacity
        max_volunteers: i32,

        /// Live registrations at the time of the attempt
        registered: i64,
    },
}

impl VolunteerShift {
    /// Atomically registers a volunteer for a shift, honouring capacity
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The shift does not exist (`sqlx::Error::RowNotFound`)
    /// - The volunteer does not exist (foreign key violation)
    /// - Database connection fails
    pub async fn reserve(
        pool: &PgPool,
        volunteer_id: i64,
        shift_id: i64,
    ) -> Result<Reservation, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Serializes every reservation against this shift
        let max_volunteers: i32 =
            sqlx::query_scalar("SELECT max_volunteers FROM shifts WHERE id = $1 FOR UPDATE")
                .bind(shift_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(sqlx::Error::RowNotFound)?;

        let existing = sqlx::query_as::<_, VolunteerShift>(
            r#"
            SELECT id, volunteer_id, shift_id, created_at
            FROM volunteer_shifts
            WHERE volunteer_id = $1 AND shift_id = $2
            "#,
        )
        .bind(volunteer_id)
        .bind(shift_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(record) = existing {
            tx.commit().await?;
            return Ok(Reservation::Existing(record));
        }

        let (registered,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM volunteer_shifts WHERE shift_id = $1")
                .bind(shift_id)
                .fetch_one(&mut *tx)
                .await?;

        if registered >= i64::from(max_volunteers) {
            tx.commit().await?;
            return Ok(Reservation::Full {
                max_volunteers,
                registered,
            });
        }

        let record = sqlx::query_as::<_, VolunteerShift>(
            r#"
            INSERT INTO volunteer_shifts (volunteer_id, shift_id)
            VALUES ($1, $2)
            ON CONFLICT (volunteer_id, shift_id) DO NOTHING
            RETURNING id, volunteer_id, shift_id, created_at
            "#,
        )
        .bind(volunteer_id)
        .bind(shift_id)
        .fetch_optional(&mut *tx)
        .await?;

        let reservation = match record {
            Some(record) => Reservation::Created(record),
            None => {
                // Lost a race on the unique constraint; report the winner's row
                let record = sqlx::query_as::<_, VolunteerShift>(
                    r#"
                    SELECT id, volunteer_id, shift_id, created_at
                    FROM volunteer_shifts
                    WHERE volunteer_id = $1 AND shift_id = $2
                    "#,
                )
                .bind(volunteer_id)
                .bind(shift_id)
                .fetch_one(&mut *tx)
                .await?;
                Reservation::Existing(record)
            }
        };

        tx.commit().await?;
        Ok(reservation)
    }

    /// Finds the registration for a (volunteer, shift) pair
    pub async fn find(
        pool: &PgPool,
        volunteer_id: i64,
        shift_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let record = sqlx::query_as::<_, VolunteerShift>(
            r#"
            SELECT id, volunteer_id, shift_id, created_at
            FROM volunteer_shifts
            WHERE volunteer_id = $1 AND shift_id = $2
            "#,
        )
        .bind(volunteer_id)
        .bind(shift_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Deletes the registration for a (volunteer, shift) pair
    ///
    /// # Returns
    ///
    /// True if a registration was deleted, false if none existed
    pub async fn delete(pool: &PgPool, volunteer_id: i64, shift_id: i64) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM volunteer_shifts WHERE volunteer_id = $1 AND shift_id = $2")
                .bind(volunteer_id)
                .bind(shift_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts live registrations for a shift
    pub async fn count_by_shift(pool: &PgPool, shift_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM volunteer_shifts WHERE shift_id = $1")
                .bind(shift_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}

impl Reservation {
    /// Returns the registration record, if the pair is now registered
    pub fn record(&self) -> Option<&VolunteerShift> {
        match self {
            Reservation::Created(record) | Reservation::Existing(record) => Some(record),
            Reservation::Full { .. } => None,
        }
    }
}
