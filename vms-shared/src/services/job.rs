/// Job lookups
///
/// # Example
///
/// ```
/// use vms_shared::services::job;
/// use vms_shared::store::memory::MemoryStore;
///
/// # async fn example() -> Result<(), vms_shared::store::StoreError> {
/// let store = MemoryStore::new();
/// assert!(job::get_job_by_id(&store, 1).await?.is_none());
/// assert!(job::get_jobs_ordered_by_title(&store).await?.is_empty());
/// # Ok(())
/// # }
/// ```

use tracing::{debug, info};

use crate::models::job::{Job, UpdateJob};
use crate::store::{EntityStore, StoreResult};

pub async fn get_job_by_id(store: &dyn EntityStore, job_id: i64) -> StoreResult<Option<Job>> {
    debug!(job_id, "Fetching job");
    store.get_job(job_id).await
}

/// All jobs, sorted by name (byte order), ties by ID
pub async fn get_jobs_ordered_by_title(store: &dyn EntityStore) -> StoreResult<Vec<Job>> {
    store.list_jobs().await
}

/// Replaces a job's fields; its shifts and their registrations are kept
pub async fn update_job(
    store: &dyn EntityStore,
    job_id: i64,
    data: UpdateJob,
) -> StoreResult<Option<Job>> {
    let updated = store.update_job(job_id, data).await?;
    match &updated {
        Some(job) => info!(job_id, event_id = job.event_id, "Updated job"),
        None => debug!(job_id, "No job to update"),
    }
    Ok(updated)
}

/// Deletes a job together with its shifts and their registrations
///
/// Returns false if the job did not exist.
pub async fn delete_job(store: &dyn EntityStore, job_id: i64) -> StoreResult<bool> {
    let deleted = store.delete_job(job_id).await?;
    if deleted {
        info!(job_id, "Deleted job");
    }
    Ok(deleted)
}
