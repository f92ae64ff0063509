/// Event endpoints
///
/// - `GET /v1/events` - List, ordered by name
/// - `POST /v1/events` - Create (optionally under an organization)
/// - `GET /v1/events/:id` - Fetch
/// - `PUT /v1/events/:id` - Edit
/// - `DELETE /v1/events/:id` - Delete with its jobs and shifts

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;
use vms_shared::{
    models::event::{CreateEvent, Event, UpdateEvent},
    services::event,
};

pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(event::get_events_ordered_by_name(state.store()).await?))
}

/// Create event
///
/// ```text
/// POST /v1/events
/// Authorization: Bearer <jwt_token>
///
/// {
///   "name": "Open Source Event",
///   "start_date": "2012-10-22",
///   "end_date": "2012-10-23",
///   "organization_id": 1
/// }
/// ```
///
/// Answers 201 with the stored event, or 422 if `end_date` precedes
/// `start_date` or the organization does not exist.
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEvent>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    req.validate()?;

    let created = state.store.create_event(req).await?;
    info!(event_id = created.id, "Event created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Event>> {
    event::get_event_by_id(state.store(), id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("event", id))
}

/// Edit event
///
/// Takes the same body as creation and replaces every field. Answers 404 for
/// an unknown event and 422 for the same data errors as creation.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateEvent>,
) -> ApiResult<Json<Event>> {
    req.validate()?;

    event::update_event(state.store(), id, req)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("event", id))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !event::delete_event(state.store(), id).await? {
        return Err(ApiError::not_found("event", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
