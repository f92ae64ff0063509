/// Organization endpoints
///
/// - `GET /v1/organizations` - List, ordered by name
/// - `POST /v1/organizations` - Create
/// - `GET /v1/organizations/:id` - Fetch
/// - `DELETE /v1/organizations/:id` - Delete with its events, jobs and shifts

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
    models::organization::{CreateOrganization, Organization},
    services::organization,
};

pub async fn list_organizations(State(state): State<AppState>) -> ApiResult<Json<Vec<Organization>>> {
    Ok(Json(
        organization::get_organizations_ordered_by_name(state.store()).await?,
    ))
}

pub async fn create_organization(
    State(state): State<AppState>,
    Json(req): Json<CreateOrganization>,
) -> ApiResult<(StatusCode, Json<Organization>)> {
    req.validate()?;

    let created = state.store.create_organization(req).await?;
    info!(organization_id = created.id, "Organization created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_organization(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Organization>> {
    organization::get_organization_by_id(state.store(), id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("organization", id))
}

pub async fn delete_organization(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !organization::delete_organization(state.store(), id).await? {
        return Err(ApiError::not_found("organization", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
