/// Activity endpoints
///
/// # Endpoints
///
/// - `GET /v1/activities` - List activities
/// - `GET /v1/activities/:id` - Fetch an activity
/// - `POST /v1/activities` - Create an activity
/// - `PUT /v1/activities` - Update an activity (id in body)
/// - `DELETE /v1/activities/:id` - Delete an activity

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
use timebank_shared::models::activity::{Activity, CreateActivity, UpdateActivity};
use validator::Validate;

const ACTIVITY_NOT_FOUND: &str = "Activity not found";

/// Create activity request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(length(min = 1, message = "Code must not be empty"))]
    pub code: String,

    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,

    #[validate(range(min = 1, message = "Project id must be positive"))]
    pub project_id: i64,

    #[validate(range(min = 1, message = "Effort hours must be positive"))]
    pub effort_hours: i32,

    #[validate(range(min = 1, message = "Hour bag id must be positive"))]
    pub hour_bag_id: i64,

    #[validate(range(min = 1, message = "User activity id must be positive"))]
    pub user_activity_id: i64,
}

/// Update activity request; the id names the record to mutate
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateActivityRequest {
    #[validate(range(min = 1, message = "Id must be positive"))]
    pub id: i64,

    #[validate(length(min = 1, message = "Code must not be empty"))]
    pub code: String,

    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,

    #[validate(range(min = 1, message = "Project id must be positive"))]
    pub project_id: i64,

    #[validate(range(min = 1, message = "Effort hours must be positive"))]
    pub effort_hours: i32,

    #[validate(range(min = 1, message = "Hour bag id must be positive"))]
    pub hour_bag_id: i64,

    #[validate(range(min = 1, message = "User activity id must be positive"))]
    pub user_activity_id: i64,
}

/// Activity response
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub id: i64,
    pub code: String,
    pub description: String,
    pub project_id: i64,
    pub effort_hours: i32,
    pub hour_bag_id: i64,
    pub user_activity_id: i64,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            code: activity.code,
            description: activity.description,
            project_id: activity.project_id,
            effort_hours: activity.effort_hours,
            hour_bag_id: activity.hour_bag_id,
            user_activity_id: activity.user_activity_id,
        }
    }
}

/// Lists all activities
pub async fn list_activities(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ActivityResponse>>> {
    let activities = Activity::list(&state.db).await?;
    Ok(Json(
        activities.into_iter().map(ActivityResponse::from).collect(),
    ))
}

/// Fetches an activity by ID
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ActivityResponse>> {
    let activity = Activity::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to fetch activity", ACTIVITY_NOT_FOUND))?;

    Ok(Json(activity.into()))
}

/// Creates a new activity
pub async fn create_activity(
    State(state): State<AppState>,
    Json(req): Json<CreateActivityRequest>,
) -> ApiResult<Json<ActivityResponse>> {
    validate_request(&req)?;

    let activity = Activity::create(
        &state.db,
        CreateActivity {
            code: req.code,
            description: req.description,
            project_id: req.project_id,
            effort_hours: req.effort_hours,
            hour_bag_id: req.hour_bag_id,
            user_activity_id: req.user_activity_id,
        },
    )
    .await?;

    Ok(Json(activity.into()))
}

/// Updates an existing activity
pub async fn update_activity(
    State(state): State<AppState>,
    Json(req): Json<UpdateActivityRequest>,
) -> ApiResult<Json<ActivityResponse>> {
    validate_request(&req)?;

    Activity::find_by_id(&state.db, req.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to update activity", ACTIVITY_NOT_FOUND))?;

    let activity = Activity::update(
        &state.db,
        req.id,
        UpdateActivity {
            code: req.code,
            description: req.description,
            project_id: req.project_id,
            effort_hours: req.effort_hours,
            hour_bag_id: req.hour_bag_id,
            user_activity_id: req.user_activity_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Failed to update activity", ACTIVITY_NOT_FOUND))?;

    Ok(Json(activity.into()))
}

/// Deletes an activity by ID
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    Activity::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to delete activity", ACTIVITY_NOT_FOUND))?;

    Activity::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
