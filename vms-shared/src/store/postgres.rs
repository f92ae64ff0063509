/// PostgreSQL entity store
///
/// Thin adapter from [`EntityStore`] onto the model functions in
/// [`crate::models`]. Referential integrity, cascades and the date/capacity
/// checks are enforced by the schema; this module only translates constraint
/// violations into [`StoreError`] variants.
///
/// # Example
///
/// ```no_run
/// use vms_shared::db::pool::{create_pool, DatabaseConfig};
/// use vms_shared::store::{postgres::PgStore, EntityStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgStore::new(pool);
/// let jobs = store.list_jobs().await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::PgPool;

use super::{EntityStore, Reservation, StoreError, StoreResult};
use crate::db::pool;
use crate::models::{
    event::{CreateEvent, Event, UpdateEvent},
    job::{CreateJob, Job, UpdateJob},
    organization::{CreateOrganization, Organization},
    shift::{CreateShift, Shift},
    volunteer::{CreateVolunteer, Volunteer},
    volunteer_shift::VolunteerShift,
};

/// [`EntityStore`] backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for migrations and pool stats
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps constraint violations on insert to store errors
///
/// `parent` names the entity a foreign key violation points at.
fn map_write_error(err: sqlx::Error, parent: &'static str, parent_id: i64) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return StoreError::MissingReference {
                entity: parent,
                id: parent_id,
            };
        }
        if db_err.is_unique_violation() {
            return StoreError::Conflict(db_err.message().to_string());
        }
        if db_err.is_check_violation() {
            return StoreError::Invalid(db_err.message().to_string());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl EntityStore for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> StoreResult<()> {
        pool::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_organization(&self, data: CreateOrganization) -> StoreResult<Organization> {
        Ok(Organization::create(&self.pool, data).await?)
    }

    async fn get_organization(&self, id: i64) -> StoreResult<Option<Organization>> {
        Ok(Organization::find_by_id(&self.pool, id).await?)
    }

    async fn list_organizations(&self) -> StoreResult<Vec<Organization>> {
        Ok(Organization::list_ordered_by_name(&self.pool).await?)
    }

    async fn delete_organization(&self, id: i64) -> StoreResult<bool> {
        Ok(Organization::delete(&self.pool, id).await?)
    }

    async fn create_event(&self, data: CreateEvent) -> StoreResult<Event> {
        let organization_id = data.organization_id.unwrap_or_default();
        Event::create(&self.pool, data)
            .await
            .map_err(|e| map_write_error(e, "organization", organization_id))
    }

    async fn get_event(&self, id: i64) -> StoreResult<Option<Event>> {
        Ok(Event::find_by_id(&self.pool, id).await?)
    }

    async fn list_events(&self) -> StoreResult<Vec<Event>> {
        Ok(Event::list_ordered_by_name(&self.pool).await?)
    }

    async fn update_event(&self, id: i64, data: UpdateEvent) -> StoreResult<Option<Event>> {
        let organization_id = data.organization_id.unwrap_or_default();
        Event::update(&self.pool, id, data)
            .await
            .map_err(|e| map_write_error(e, "organization", organization_id))
    }

    async fn delete_event(&self, id: i64) -> StoreResult<bool> {
        Ok(Event::delete(&self.pool, id).await?)
    }

    async fn create_job(&self, data: CreateJob) -> StoreResult<Job> {
        let event_id = data.event_id;
        Job::create(&self.pool, data)
            .await
            .map_err(|e| map_write_error(e, "event", event_id))
    }

    async fn get_job(&self, id: i64) -> StoreResult<Option<Job>> {
        Ok(Job::find_by_id(&self.pool, id).await?)
    }

    async fn list_jobs(&self) -> StoreResult<Vec<Job>> {
        Ok(Job::list_ordered_by_name(&self.pool).await?)
    }

    async fn update_job(&self, id: i64, data: UpdateJob) -> StoreResult<Option<Job>> {
        let event_id = data.event_id;
        Job::update(&self.pool, id, data)
            .await
            .map_err(|e| map_write_error(e, "event", event_id))
    }

    async fn delete_job(&self, id: i64) -> StoreResult<bool> {
        Ok(Job::delete(&self.pool, id).await?)
    }

    async fn create_shift(&self, data: CreateShift) -> StoreResult<Shift> {
        let job_id = data.job_id;
        Shift::create(&self.pool, data)
            .await
            .map_err(|e| map_write_error(e, "job", job_id))
    }

    async fn get_shift(&self, id: i64) -> StoreResult<Option<Shift>> {
        Ok(Shift::find_by_id(&self.pool, id).await?)
    }

    async fn list_shifts_by_job(&self, job_id: i64) -> StoreResult<Vec<Shift>> {
        Ok(Shift::list_by_job_ordered_by_date(&self.pool, job_id).await?)
    }

    async fn delete_shift(&self, id: i64) -> StoreResult<bool> {
        Ok(Shift::delete(&self.pool, id).await?)
    }

    async fn create_volunteer(&self, data: CreateVolunteer) -> StoreResult<Volunteer> {
        let user_id = data.user_id;
        Volunteer::create(&self.pool, data).await.map_err(|e| {
            match map_write_error(e, "user", user_id) {
                StoreError::Conflict(_) => StoreError::Conflict(format!(
                    "user {} already has a volunteer profile",
                    user_id
                )),
                other => other,
            }
        })
    }

    async fn get_volunteer(&self, id: i64) -> StoreResult<Option<Volunteer>> {
        Ok(Volunteer::find_by_id(&self.pool, id).await?)
    }

    async fn get_volunteer_by_user(&self, user_id: i64) -> StoreResult<Option<Volunteer>> {
        Ok(Volunteer::find_by_user_id(&self.pool, user_id).await?)
    }

    async fn delete_volunteer(&self, id: i64) -> StoreResult<bool> {
        Ok(Volunteer::delete(&self.pool, id).await?)
    }

    async fn reserve_shift(&self, volunteer_id: i64, shift_id: i64) -> StoreResult<Reservation> {
        match VolunteerShift::reserve(&self.pool, volunteer_id, shift_id).await {
            Ok(reservation) => Ok(reservation),
            Err(sqlx::Error::RowNotFound) => Err(StoreError::MissingReference {
                entity: "shift",
                id: shift_id,
            }),
            Err(e) => Err(map_write_error(e, "volunteer", volunteer_id)),
        }
    }

    async fn find_volunteer_shift(
        &self,
        volunteer_id: i64,
        shift_id: i64,
    ) -> StoreResult<Option<VolunteerShift>> {
        Ok(VolunteerShift::find(&self.pool, volunteer_id, shift_id).await?)
    }

    async fn delete_volunteer_shift(&self, volunteer_id: i64, shift_id: i64) -> StoreResult<bool> {
        Ok(VolunteerShift::delete(&self.pool, volunteer_id, shift_id).await?)
    }

    async fn count_volunteer_shifts(&self, shift_id: i64) -> StoreResult<i64> {
        Ok(VolunteerShift::count_by_shift(&self.pool, shift_id).await?)
    }

    async fn list_shifts_for_volunteer(&self, volunteer_id: i64) -> StoreResult<Vec<Shift>> {
        Ok(Shift::list_by_volunteer(&self.pool, volunteer_id).await?)
    }
}
