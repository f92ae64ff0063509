/// Job endpoints
///
/// - `GET /v1/jobs` - List, ordered by title
/// - `POST /v1/jobs` - Create under an event
/// - `GET /v1/jobs/:id` - Fetch
/// - `PUT /v1/jobs/:id` - Replace its fields, keeping its shifts
/// - `DELETE /v1/jobs/:id` - Delete with its shifts and their registrations
/// - `GET /v1/jobs/:id/shifts` - The job's shifts, earliest first

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
    models::{
        job::{CreateJob, Job, UpdateJob},
        shift::Shift,
    },
    services::{job, shift},
};

pub async fn list_jobs(State(state): State<AppState>) -> ApiResult<Json<Vec<Job>>> {
    Ok(Json(job::get_jobs_ordered_by_title(state.store()).await?))
}

pub async fn create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJob>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    req.validate()?;

    let created = state.store.create_job(req).await?;
    info!(job_id = created.id, event_id = created.event_id, "Job created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_job(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Job>> {
    job::get_job_by_id(state.store(), id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("job", id))
}

pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateJob>,
) -> ApiResult<Json<Job>> {
    req.validate()?;

    job::update_job(state.store(), id, req)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("job", id))
}

pub async fn delete_job(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    if !job::delete_job(state.store(), id).await? {
        return Err(ApiError::not_found("job", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// 404 for an unknown job; an existing job without shifts gives `[]`
pub async fn list_job_shifts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<Shift>>> {
    if job::get_job_by_id(state.store(), id).await?.is_none() {
        return Err(ApiError::not_found("job", id));
    }
    Ok(Json(shift::get_shifts_ordered_by_date(state.store(), id).await?))
}
