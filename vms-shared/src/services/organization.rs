use tracing::info;

use crate::models::organization::Organization;
use crate::store::{EntityStore, StoreResult};

pub async fn get_organization_by_id(
    store: &dyn EntityStore,
    organization_id: i64,
) -> StoreResult<Option<Organization>> {
    store.get_organization(organization_id).await
}

pub async fn get_organizations_ordered_by_name(
    store: &dyn EntityStore,
) -> StoreResult<Vec<Organization>> {
    store.list_organizations().await
}

/// Deletes an organization and the events it owns
pub async fn delete_organization(store: &dyn EntityStore, organization_id: i64) -> StoreResult<bool> {
    let deleted = store.delete_organization(organization_id).await?;
    if deleted {
        info!(organization_id, "Deleted organization");
    }
    Ok(deleted)
}
