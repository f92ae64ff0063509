/// Volunteer lookups
///
/// Deleting a volunteer drops their registrations, which frees the places
/// they held on shifts.

use tracing::info;

use crate::models::volunteer::Volunteer;
use crate::store::{EntityStore, StoreResult};

pub async fn get_volunteer_by_id(
    store: &dyn EntityStore,
    volunteer_id: i64,
) -> StoreResult<Option<Volunteer>> {
    store.get_volunteer(volunteer_id).await
}

/// The volunteer profile linked to an authenticated user, if any
pub async fn get_volunteer_by_user_id(
    store: &dyn EntityStore,
    user_id: i64,
) -> StoreResult<Option<Volunteer>> {
    store.get_volunteer_by_user(user_id).await
}

pub async fn delete_volunteer(store: &dyn EntityStore, volunteer_id: i64) -> StoreResult<bool> {
    let deleted = store.delete_volunteer(volunteer_id).await?;
    if deleted {
        info!(volunteer_id, "Deleted volunteer");
    }
    Ok(deleted)
}
