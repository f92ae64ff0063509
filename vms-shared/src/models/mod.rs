/// Database models for VMS
///
/// This module contains the persisted entities and their PostgreSQL operations.
/// The in-memory backend in [`crate::store::memory`] stores the same structs.
///
/// # Models
///
/// - `organization`: Organizations that own events
/// - `event`: Events, owning jobs
/// - `job`: Jobs within an event, owning shifts
/// - `shift`: Capacity-bounded, time-boxed units of work
/// - `volunteer`: Volunteer profiles linked to an authenticated user
/// - `volunteer_shift`: Registrations joining volunteers to shifts
///
/// # Ownership
///
/// ```text
/// Organization ─< Event ─< Job ─< Shift ─< VolunteerShift >─ Volunteer
/// ```
///
/// Deleting any parent removes everything below it.
///
/// # Example
///
/// ```no_run
/// use vms_shared::models::job::{Job, CreateJob};
/// use vms_shared::db::pool::{create_pool, DatabaseConfig};
/// use chrono::NaiveDate;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let job = Job::create(&pool, CreateJob {
///     name: "Software Developer".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2012, 10, 22).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2012, 10, 23).unwrap(),
///     description: "A software job".to_string(),
///     event_id: 1,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod event;
pub mod job;
pub mod organization;
pub mod shift;
pub mod volunteer;
pub mod volunteer_shift;

use validator::ValidationError;

/// Rejects date ranges that end before they start
pub(crate) fn check_date_range(
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
) -> Result<(), ValidationError> {
    if end < start {
        let mut err = ValidationError::new("date_range");
        err.message = Some("end_date must not be before start_date".into());
        return Err(err);
    }
    Ok(())
}
