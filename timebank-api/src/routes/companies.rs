/// Company endpoints
///
/// # Endpoints
///
/// - `GET /v1/companies` - List companies
/// - `GET /v1/companies/user/:id` - List companies owned by a user
/// - `GET /v1/companies/:id` - Fetch a company
/// - `POST /v1/companies` - Create a company
/// - `PUT /v1/companies` - Update a company (id in body)
/// - `DELETE /v1/companies/:id` - Delete a company

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
use timebank_shared::models::company::{Company, CreateCompany, UpdateCompany};
use validator::Validate;

const COMPANY_NOT_FOUND: &str = "Company not found";

/// Create company request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: i64,
}

/// Update company request; the id names the record to mutate
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(range(min = 1, message = "Id must be positive"))]
    pub id: i64,

    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: i64,
}

/// Company response
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            user_id: company.user_id,
        }
    }
}

/// Lists all companies
pub async fn list_companies(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CompanyResponse>>> {
    let companies = Company::list(&state.db).await?;
    Ok(Json(
        companies.into_iter().map(CompanyResponse::from).collect(),
    ))
}

/// Lists all companies owned by the given user
///
/// A user with no companies yields an empty list, not an error.
pub async fn list_companies_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<CompanyResponse>>> {
    let companies = Company::find_by_user_id(&state.db, user_id).await?;
    Ok(Json(
        companies.into_iter().map(CompanyResponse::from).collect(),
    ))
}

/// Fetches a company by ID
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CompanyResponse>> {
    let company = Company::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to fetch company", COMPANY_NOT_FOUND))?;

    Ok(Json(company.into()))
}

/// Creates a new company
pub async fn create_company(
    State(state): State<AppState>,
    Json(req): Json<CreateCompanyRequest>,
) -> ApiResult<Json<CompanyResponse>> {
    validate_request(&req)?;

    let company = Company::create(
        &state.db,
        CreateCompany {
            name: req.name,
            user_id: req.user_id,
        },
    )
    .await?;

    Ok(Json(company.into()))
}

/// Updates an existing company
pub async fn update_company(
    State(state): State<AppState>,
    Json(req): Json<UpdateCompanyRequest>,
) -> ApiResult<Json<CompanyResponse>> {
    validate_request(&req)?;

    Company::find_by_id(&state.db, req.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to update company", COMPANY_NOT_FOUND))?;

    let company = Company::update(
        &state.db,
        req.id,
        UpdateCompany {
            name: req.name,
            user_id: req.user_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Failed to update company", COMPANY_NOT_FOUND))?;

    Ok(Json(company.into()))
}

/// Deletes a company by ID
///
/// No referential guard: projects and hour bags referencing the company are
/// not checked before removal.
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    Company::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to delete company", COMPANY_NOT_FOUND))?;

    Company::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
