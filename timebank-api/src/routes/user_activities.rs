/// User-activity category endpoints
///
/// # Endpoints
///
/// - `GET /v1/user-activities` - List categories
/// - `GET /v1/user-activities/:id` - Fetch a category
/// - `POST /v1/user-activities` - Create a category
/// - `PUT /v1/user-activities` - Update a category (id in body)
/// - `DELETE /v1/user-activities/:id` - Delete a category

use crate::{
    app::AppState,
    error::{validate_request, ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use timebank_shared::models::user_activity::{CreateUserActivity, UpdateUserActivity, UserActivity};
use validator::Validate;

const USER_ACTIVITY_NOT_FOUND: &str = "User activity not found";

/// Create user-activity request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserActivityRequest {
    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: i64,

    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
}

/// Update user-activity request; the id names the record to mutate
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserActivityRequest {
    #[validate(range(min = 1, message = "Id must be positive"))]
    pub id: i64,

    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: i64,

    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
}

/// User-activity response
#[derive(Debug, Serialize)]
pub struct UserActivityResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

impl From<UserActivity> for UserActivityResponse {
    fn from(user_activity: UserActivity) -> Self {
        Self {
            id: user_activity.id,
            user_id: user_activity.user_id,
            name: user_activity.name,
        }
    }
}

/// Lists all user-activity categories
pub async fn list_user_activities(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<UserActivityResponse>>> {
    let user_activities = UserActivity::list(&state.db).await?;
    Ok(Json(
        user_activities
            .into_iter()
            .map(UserActivityResponse::from)
            .collect(),
    ))
}

/// Fetches a user-activity category by ID
pub async fn get_user_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserActivityResponse>> {
    let user_activity = UserActivity::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to fetch user activity", USER_ACTIVITY_NOT_FOUND))?;

    Ok(Json(user_activity.into()))
}

/// Creates a new user-activity category
pub async fn create_user_activity(
    State(state): State<AppState>,
    Json(req): Json<CreateUserActivityRequest>,
) -> ApiResult<Json<UserActivityResponse>> {
    validate_request(&req)?;

    let user_activity = UserActivity::create(
        &state.db,
        CreateUserActivity {
            user_id: req.user_id,
            name: req.name,
        },
    )
    .await?;

    Ok(Json(user_activity.into()))
}

/// Updates an existing user-activity category
pub async fn update_user_activity(
    State(state): State<AppState>,
    Json(req): Json<UpdateUserActivityRequest>,
) -> ApiResult<Json<UserActivityResponse>> {
    validate_request(&req)?;

    UserActivity::find_by_id(&state.db, req.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to update user activity", USER_ACTIVITY_NOT_FOUND))?;

    let user_activity = UserActivity::update(
        &state.db,
        req.id,
        UpdateUserActivity {
            user_id: req.user_id,
            name: req.name,
        },
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Failed to update user activity", USER_ACTIVITY_NOT_FOUND))?;

    Ok(Json(user_activity.into()))
}

/// Deletes a user-activity category by ID
pub async fn delete_user_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    UserActivity::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to delete user activity", USER_ACTIVITY_NOT_FOUND))?;

    UserActivity::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
