/// Entity store abstraction
///
/// [`EntityStore`] is the durable home of every entity in [`crate::models`].
/// Services take `&dyn EntityStore` and never talk to a backend directly.
///
/// # Backends
///
/// - [`memory::MemoryStore`]: arena + index tables behind one lock
/// - [`postgres::PgStore`]: PostgreSQL via sqlx, cascades done by foreign keys
///
/// # Contract
///
/// - `get_*` returns `Ok(None)` for unknown IDs
/// - `update_*` returns `Ok(None)` for unknown IDs and leaves dependents in place
/// - `delete_*` returns `Ok(false)` for unknown IDs and removes dependents otherwise
/// - `create_*` referencing a missing parent fails with [`StoreError::MissingReference`]
/// - [`EntityStore::reserve_shift`] is the single authority for registration
///   uniqueness and capacity; it performs check-then-act atomically
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vms_shared::store::{memory::MemoryStore, EntityStore};
///
/// # async fn example() -> Result<(), vms_shared::store::StoreError> {
/// let store: Arc<dyn EntityStore> = Arc::new(MemoryStore::new());
/// assert!(store.get_job(42).await?.is_none());
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{
    event::{CreateEvent, Event, UpdateEvent},
    job::{CreateJob, Job, UpdateJob},
    organization::{CreateOrganization, Organization},
    shift::{CreateShift, Shift},
    volunteer::{CreateVolunteer, Volunteer},
    volunteer_shift::VolunteerShift,
};

pub use crate::models::volunteer_shift::Reservation;

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A referenced parent record does not exist
    #[error("{entity} {id} does not exist")]
    MissingReference { entity: &'static str, id: i64 },

    /// A uniqueness constraint was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The record violates a data constraint
    #[error("Invalid data: {0}")]
    Invalid(String),
}

/// Storage for organizations, events, jobs, shifts, volunteers and registrations
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Short backend identifier for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Verifies the backend is reachable
    async fn health_check(&self) -> StoreResult<()>;

    async fn create_organization(&self, data: CreateOrganization) -> StoreResult<Organization>;
    async fn get_organization(&self, id: i64) -> StoreResult<Option<Organization>>;
    /// Organizations sorted by name, ties by ID
    async fn list_organizations(&self) -> StoreResult<Vec<Organization>>;
    async fn delete_organization(&self, id: i64) -> StoreResult<bool>;

    async fn create_event(&self, data: CreateEvent) -> StoreResult<Event>;
    async fn get_event(&self, id: i64) -> StoreResult<Option<Event>>;
    /// Events sorted by name, ties by ID
    async fn list_events(&self) -> StoreResult<Vec<Event>>;
    async fn update_event(&self, id: i64, data: UpdateEvent) -> StoreResult<Option<Event>>;
    async fn delete_event(&self, id: i64) -> StoreResult<bool>;

    async fn create_job(&self, data: CreateJob) -> StoreResult<Job>;
    async fn get_job(&self, id: i64) -> StoreResult<Option<Job>>;
    /// Jobs sorted by name, ties by ID
    async fn list_jobs(&self) -> StoreResult<Vec<Job>>;
    async fn update_job(&self, id: i64, data: UpdateJob) -> StoreResult<Option<Job>>;
    async fn delete_job(&self, id: i64) -> StoreResult<bool>;

    async fn create_shift(&self, data: CreateShift) -> StoreResult<Shift>;
    async fn get_shift(&self, id: i64) -> StoreResult<Option<Shift>>;
    /// A job's shifts sorted by date, ties by ID
    async fn list_shifts_by_job(&self, job_id: i64) -> StoreResult<Vec<Shift>>;
    async fn delete_shift(&self, id: i64) -> StoreResult<bool>;

    async fn create_volunteer(&self, data: CreateVolunteer) -> StoreResult<Volunteer>;
    async fn get_volunteer(&self, id: i64) -> StoreResult<Option<Volunteer>>;
    async fn get_volunteer_by_user(&self, user_id: i64) -> StoreResult<Option<Volunteer>>;
    async fn delete_volunteer(&self, id: i64) -> StoreResult<bool>;

    /// Atomically registers a volunteer for a shift if the pair is free and
    /// the shift has room
    ///
    /// Fails with [`StoreError::MissingReference`] if either side is missing.
    async fn reserve_shift(&self, volunteer_id: i64, shift_id: i64) -> StoreResult<Reservation>;

    async fn find_volunteer_shift(
        &self,
        volunteer_id: i64,
        shift_id: i64,
    ) -> StoreResult<Option<VolunteerShift>>;

    /// Removes the registration for a pair; false if there was none
    async fn delete_volunteer_shift(&self, volunteer_id: i64, shift_id: i64) -> StoreResult<bool>;

    async fn count_volunteer_shifts(&self, shift_id: i64) -> StoreResult<i64>;

    /// Shifts the volunteer holds a registration for, sorted by shift ID
    async fn list_shifts_for_volunteer(&self, volunteer_id: i64) -> StoreResult<Vec<Shift>>;
}
