/// Shift endpoints
///
/// - `POST /v1/shifts` - Create under a job
/// - `GET /v1/shifts/:id` - Fetch, with current availability
/// - `DELETE /v1/shifts/:id` - Delete with its registrations
///
/// # Response
///
/// ```json
/// {
///   "id": 1,
///   "date": "2012-10-23",
///   "start_time": "09:00:00",
///   "end_time": "15:00:00",
///   "max_volunteers": 2,
///   "job_id": 1,
///   "availability": { "max_volunteers": 2, "registered": 1, "remaining": 1 }
/// }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use validator::Validate;
use vms_shared::{
    models::shift::{CreateShift, Shift},
    services::shift::{self, ShiftAvailability},
};

#[derive(Debug, Serialize)]
pub struct ShiftResponse {
    #[serde(flatten)]
    pub shift: Shift,
    pub availability: ShiftAvailability,
}

pub async fn create_shift(
    State(state): State<AppState>,
    Json(req): Json<CreateShift>,
) -> ApiResult<(StatusCode, Json<Shift>)> {
    req.validate()?;

    let created = state.store.create_shift(req).await?;
    info!(
        shift_id = created.id,
        job_id = created.job_id,
        max_volunteers = created.max_volunteers,
        "Shift created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_shift(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ShiftResponse>> {
    let found = shift::get_shift_by_id(state.store(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("shift", id))?;

    // The shift may be deleted between the two reads
    let availability = shift::get_shift_availability(state.store(), id)
        .await?
        .ok_or_else(|| ApiError::not_found("shift", id))?;

    Ok(Json(ShiftResponse {
        shift: found,
        availability,
    }))
}

pub async fn delete_shift(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !shift::delete_shift(state.store(), id).await? {
        return Err(ApiError::not_found("shift", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
