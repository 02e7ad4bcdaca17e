/// Hour bag endpoints
///
/// The lifecycle rules live here:
///
/// - An update may not shrink capacity below the hours already consumed.
///   Violations are collected into a list before the request is rejected, so
///   additional rules can be reported together with this one.
/// - A bag cannot be deleted while any activity still draws from it.
/// - A new bag always starts with zero consumed hours and active status;
///   client-supplied values for either field are ignored.
///
/// # Endpoints
///
/// - `GET /v1/hour-bags` - List hour bags
/// - `GET /v1/hour-bags/active` - List active hour bags
/// - `GET /v1/hour-bags/:id` - Fetch an hour bag
/// - `POST /v1/hour-bags` - Create an hour bag
/// - `PUT /v1/hour-bags` - Update an hour bag (id in body)
/// - `DELETE /v1/hour-bags/:id` - Delete an hour bag

use crate::{
    app::AppState,
    error::{validate_request, ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timebank_shared::models::{
    activity::Activity,
    hour_bag::{CreateHourBag, HourBag, UpdateHourBag},
};
use validator::{Validate, ValidationError};

const HOUR_BAG_NOT_FOUND: &str = "Hour bag not found";
const CONSUMED_EXCEEDS_CAPACITY: &str = "consumed hours exceed requested capacity";
const DEPENDENT_ACTIVITIES: &str = "hour bag has dependent activities";

/// Create hour bag request
///
/// Carries no consumed-hours or status field; both are server-assigned.
/// Unknown fields in the payload are dropped at deserialization, so a client
/// attempting to set either is silently ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateHourBagRequest {
    #[validate(range(min = 1, message = "Company id must be positive"))]
    pub company_id: i64,

    #[validate(range(min = 1, message = "Hours must be positive"))]
    pub hours: i32,

    #[validate(custom(function = "validate_positive_cost"))]
    pub hour_cost: Decimal,

    pub registration_date: DateTime<Utc>,
}

/// Update hour bag request; the id names the record to mutate
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateHourBagRequest {
    #[validate(range(min = 1, message = "Id must be positive"))]
    pub id: i64,

    #[validate(range(min = 1, message = "Hours must be positive"))]
    pub hours: i32,

    #[validate(custom(function = "validate_positive_cost"))]
    pub hour_cost: Decimal,

    pub registration_date: DateTime<Utc>,
}

/// Hour bag response
#[derive(Debug, Serialize)]
pub struct HourBagResponse {
    pub id: i64,
    pub company_id: i64,
    pub hours: i32,
    pub consumed_hours: i32,
    pub hour_cost: Decimal,
    pub registration_date: DateTime<Utc>,
    pub status: bool,
}

impl From<HourBag> for HourBagResponse {
    fn from(hour_bag: HourBag) -> Self {
        Self {
            id: hour_bag.id,
            company_id: hour_bag.company_id,
            hours: hour_bag.hours,
            consumed_hours: hour_bag.consumed_hours,
            hour_cost: hour_bag.hour_cost,
            registration_date: hour_bag.registration_date,
            status: hour_bag.status,
        }
    }
}

fn validate_positive_cost(hour_cost: &Decimal) -> Result<(), ValidationError> {
    if *hour_cost <= Decimal::ZERO {
        let mut error = ValidationError::new("hour_cost");
        error.message = Some("Hour cost must be positive".into());
        return Err(error);
    }
    Ok(())
}

/// Collects rule violations for resizing a stored bag to `requested_hours`
///
/// Currently a single rule: the new capacity may not fall below the hours
/// already consumed. Returns an empty list when the resize is admissible.
fn update_violations(current: &HourBag, requested_hours: i32) -> Vec<String> {
    let mut errors = Vec::new();

    if current.consumed_hours > requested_hours {
        errors.push(CONSUMED_EXCEEDS_CAPACITY.to_string());
    }

    errors
}

/// Lists all hour bags
pub async fn list_hour_bags(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<HourBagResponse>>> {
    let hour_bags = HourBag::list(&state.db).await?;
    Ok(Json(
        hour_bags.into_iter().map(HourBagResponse::from).collect(),
    ))
}

/// Lists hour bags that are still active
pub async fn list_active_hour_bags(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<HourBagResponse>>> {
    let hour_bags = HourBag::find_by_status(&state.db, true).await?;
    Ok(Json(
        hour_bags.into_iter().map(HourBagResponse::from).collect(),
    ))
}

/// Fetches an hour bag by ID
pub async fn get_hour_bag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<HourBagResponse>> {
    let hour_bag = HourBag::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to fetch hour bag", HOUR_BAG_NOT_FOUND))?;

    Ok(Json(hour_bag.into()))
}

/// Creates a new hour bag
///
/// The created bag always reports `consumed_hours: 0` and `status: true`.
pub async fn create_hour_bag(
    State(state): State<AppState>,
    Json(req): Json<CreateHourBagRequest>,
) -> ApiResult<Json<HourBagResponse>> {
    validate_request(&req)?;

    let hour_bag = HourBag::create(
        &state.db,
        CreateHourBag {
            company_id: req.company_id,
            hours: req.hours,
            hour_cost: req.hour_cost,
            registration_date: req.registration_date,
        },
    )
    .await?;

    Ok(Json(hour_bag.into()))
}

/// Updates an existing hour bag
///
/// Re-fetches the stored bag, checks the capacity invariant against it, and
/// only then applies the field changes. Consumed hours and status are never
/// mutated by this path. On violation nothing is written and the stored
/// record is unchanged.
pub async fn update_hour_bag(
    State(state): State<AppState>,
    Json(req): Json<UpdateHourBagRequest>,
) -> ApiResult<Json<HourBagResponse>> {
    validate_request(&req)?;

    let current = HourBag::find_by_id(&state.db, req.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to update hour bag", HOUR_BAG_NOT_FOUND))?;

    let violations = update_violations(&current, req.hours);
    if !violations.is_empty() {
        return Err(ApiError::CapacityViolation {
            message: "Failed to update hour bag".to_string(),
            details: violations,
        });
    }

    let hour_bag = HourBag::update(
        &state.db,
        req.id,
        UpdateHourBag {
            hours: req.hours,
            hour_cost: req.hour_cost,
            registration_date: req.registration_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Failed to update hour bag", HOUR_BAG_NOT_FOUND))?;

    Ok(Json(hour_bag.into()))
}

/// Deletes an hour bag by ID
///
/// Blocked while any activity references the bag; the check runs before any
/// mutation, so a rejected delete leaves the record in place.
pub async fn delete_hour_bag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let hour_bag = HourBag::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to delete hour bag", HOUR_BAG_NOT_FOUND))?;

    if Activity::exists_by_hour_bag_id(&state.db, hour_bag.id).await? {
        return Err(ApiError::referential_conflict(
            "Failed to delete hour bag",
            DEPENDENT_ACTIVITIES,
        ));
    }

    HourBag::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
