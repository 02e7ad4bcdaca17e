/// User endpoints
///
/// Creation enforces email uniqueness before anything is persisted, and the
/// raw password is hashed before the record is constructed; neither the raw
/// password nor the stored hash ever appears in a response.
///
/// # Endpoints
///
/// - `GET /v1/users` - List users
/// - `GET /v1/users/:id` - Fetch a user
/// - `POST /v1/users` - Create a user (signup)
/// - `PUT /v1/users` - Update a user (id in body)
/// - `DELETE /v1/users/:id` - Delete a user

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
use timebank_shared::{
    auth::password,
    models::user::{CreateUser, UpdateUser, User},
};
use validator::Validate;

const USER_NOT_FOUND: &str = "User not found";

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Raw password; hashed before storage, never logged
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,

    #[validate(range(min = 1, message = "Role id must be positive"))]
    pub role_id: i64,
}

/// Update user request; the id names the record to mutate
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(range(min = 1, message = "Id must be positive"))]
    pub id: i64,

    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    #[validate(range(min = 1, message = "Role id must be positive"))]
    pub role_id: i64,
}

/// User response; excludes the password hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role_id: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role_id: user.role_id,
        }
    }
}

/// Lists all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = User::list(&state.db).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetches a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to fetch user", USER_NOT_FOUND))?;

    Ok(Json(user.into()))
}

/// Creates a new user
///
/// Rejects the request before any insert when another user already holds the
/// email address.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    validate_request(&req)?;

    if User::exists_by_email(&state.db, &req.email).await? {
        return Err(ApiError::duplicate_key(
            "Failed to save user",
            format!("user with email {} already exists", req.email),
        ));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
            role_id: req.role_id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User created");

    Ok(Json(user.into()))
}

/// Updates an existing user
pub async fn update_user(
    State(state): State<AppState>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    validate_request(&req)?;

    User::find_by_id(&state.db, req.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to update user", USER_NOT_FOUND))?;

    let user = User::update(
        &state.db,
        req.id,
        UpdateUser {
            name: req.name,
            role_id: req.role_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Failed to update user", USER_NOT_FOUND))?;

    Ok(Json(user.into()))
}

/// Deletes a user by ID
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to delete user", USER_NOT_FOUND))?;

    User::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_excludes_password_hash() {
        let user = User {
            id: 1,
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role_id: 2,
        };

        let response: UserResponse = user.into();
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "jane@example.com");
    }

    #[test]
    fn test_create_user_request_validation() {
        let req = CreateUserRequest {
            name: String::new(),
            email: "not-an-email".to_string(),
            password: String::new(),
            role_id: 0,
        };

        assert!(req.validate().is_err());

        let req = CreateUserRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret".to_string(),
            role_id: 1,
        };

        assert!(req.validate().is_ok());
    }
}
