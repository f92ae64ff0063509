/// Event lookups

use tracing::{debug, info};

use crate::models::event::{Event, UpdateEvent};
use crate::store::{EntityStore, StoreResult};

pub async fn get_event_by_id(store: &dyn EntityStore, event_id: i64) -> StoreResult<Option<Event>> {
    debug!(event_id, "Fetching event");
    store.get_event(event_id).await
}

/// All events, sorted by name, ties by ID
pub async fn get_events_ordered_by_name(store: &dyn EntityStore) -> StoreResult<Vec<Event>> {
    store.list_events().await
}

/// Replaces an event's fields; None if it does not exist
pub async fn update_event(
    store: &dyn EntityStore,
    event_id: i64,
    data: UpdateEvent,
) -> StoreResult<Option<Event>> {
    let updated = store.update_event(event_id, data).await?;
    if updated.is_some() {
        info!(event_id, "Updated event");
    }
    Ok(updated)
}

/// Deletes an event and everything below it (jobs, shifts, registrations)
pub async fn delete_event(store: &dyn EntityStore, event_id: i64) -> StoreResult<bool> {
    let deleted = store.delete_event(event_id).await?;
    if deleted {
        info!(event_id, "Deleted event");
    }
    Ok(deleted)
}
