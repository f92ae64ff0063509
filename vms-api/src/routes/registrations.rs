/// Shift registration endpoints
///
/// - `GET /v1/volunteers/:id/shifts` - Shifts the volunteer is signed up for
/// - `GET /v1/volunteers/:id/shifts/:shift_id` - The registration record
/// - `POST /v1/volunteers/:id/shifts/:shift_id` - Sign up
/// - `DELETE /v1/volunteers/:id/shifts/:shift_id` - Cancel
///
/// # Status codes
///
/// | Call | Outcome | Status |
/// |---|---|---|
/// | POST | new registration | 201 |
/// | POST | already registered | 200 |
/// | POST | shift full | 409 `capacity_exceeded` |
/// | POST | unknown volunteer or shift | 404 |
/// | DELETE | cancelled | 204 |
/// | DELETE | nothing to cancel | 404 |

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use vms_shared::{
    models::{shift::Shift, volunteer_shift::VolunteerShift},
    services::{shift, volunteer},
};

pub async fn list_signed_up_shifts(
    State(state): State<AppState>,
    Path(volunteer_id): Path<i64>,
) -> ApiResult<Json<Vec<Shift>>> {
    if volunteer::get_volunteer_by_id(state.store(), volunteer_id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found("volunteer", volunteer_id));
    }
    Ok(Json(
        shift::get_shifts_signed_up_for(state.store(), volunteer_id).await?,
    ))
}

pub async fn get_registration(
    State(state): State<AppState>,
    Path((volunteer_id, shift_id)): Path<(i64, i64)>,
) -> ApiResult<Json<VolunteerShift>> {
    let record = shift::get_volunteer_shift_by_id(state.store(), volunteer_id, shift_id).await?;
    Ok(Json(record))
}

pub async fn register(
    State(state): State<AppState>,
    Path((volunteer_id, shift_id)): Path<(i64, i64)>,
) -> ApiResult<(StatusCode, Json<VolunteerShift>)> {
    let registration = shift::register(state.store(), volunteer_id, shift_id).await?;

    let status = if registration.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(registration.into_record())))
}

pub async fn cancel_registration(
    State(state): State<AppState>,
    Path((volunteer_id, shift_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    shift::cancel_shift_registration(state.store(), volunteer_id, shift_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
