/// Role endpoints
///
/// Roles are read-only reference data: list and fetch only.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use timebank_shared::models::role::Role;

const ROLE_NOT_FOUND: &str = "Role not found";

/// Role response
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub id: i64,
    pub name: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
        }
    }
}

/// Lists all roles
pub async fn list_roles(State(state): State<AppState>) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = Role::list(&state.db).await?;
    Ok(Json(roles.into_iter().map(RoleResponse::from).collect()))
}

/// Fetches a role by ID
pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<RoleResponse>> {
    let role = Role::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to fetch role", ROLE_NOT_FOUND))?;

    Ok(Json(role.into()))
}
