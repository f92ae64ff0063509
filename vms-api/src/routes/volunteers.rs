/// Volunteer endpoints
///
/// - `POST /v1/volunteers` - Create the caller's volunteer profile
/// - `GET /v1/volunteers/:id` - Fetch
/// - `DELETE /v1/volunteers/:id` - Delete, dropping their registrations

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;
use vms_shared::{
    auth::middleware::AuthContext,
    models::volunteer::{CreateVolunteer, Volunteer},
    services::volunteer,
};

/// Profile fields; the owning user comes from the caller's token
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVolunteerRequest {
    #[validate(length(min = 1, max = 30, message = "First name must be 1-30 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 30, message = "Last name must be 1-30 characters"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(length(max = 75))]
    pub address: String,

    #[serde(default)]
    #[validate(length(max = 75))]
    pub city: String,

    #[serde(default)]
    #[validate(length(max = 75))]
    pub state: String,

    #[serde(default)]
    #[validate(length(max = 75))]
    pub country: String,

    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone_number: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

impl CreateVolunteerRequest {
    fn for_user(self, user_id: i64) -> CreateVolunteer {
        CreateVolunteer {
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            city: self.city,
            state: self.state,
            country: self.country,
            phone_number: self.phone_number,
            email: self.email,
            user_id,
        }
    }
}

/// Create volunteer
///
/// ```text
/// POST /v1/volunteers
/// Authorization: Bearer <jwt_token>
///
/// {
///   "first_name": "Yoshi",
///   "last_name": "Turtle",
///   "email": "yoshi@nintendo.com"
/// }
/// ```
///
/// Answers 201, or 409 if the caller already has a profile.
pub async fn create_volunteer(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<CreateVolunteerRequest>,
) -> ApiResult<(StatusCode, Json<Volunteer>)> {
    req.validate()?;

    let created = state
        .store
        .create_volunteer(req.for_user(auth.user_id))
        .await?;
    info!(volunteer_id = created.id, user_id = auth.user_id, "Volunteer created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_volunteer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Volunteer>> {
    volunteer::get_volunteer_by_id(state.store(), id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("volunteer", id))
}

pub async fn delete_volunteer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !volunteer::delete_volunteer(state.store(), id).await? {
        return Err(ApiError::not_found("volunteer", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
