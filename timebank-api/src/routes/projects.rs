/// Project endpoints
///
/// Besides plain CRUD, this module hosts the user → company → project
/// aggregation: all projects belonging to companies owned by a user, each
/// enriched with its owning company's name.
///
/// # Endpoints
///
/// - `GET /v1/projects` - List projects
/// - `GET /v1/projects/user/:id` - Aggregated projects across a user's companies
/// - `GET /v1/projects/:id` - Fetch a project
/// - `POST /v1/projects` - Create a project
/// - `PUT /v1/projects` - Update a project (id in body)
/// - `DELETE /v1/projects/:id` - Delete a project

use crate::{
    app::AppState,
    error::{validate_request, ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use futures::future;
use serde::{Deserialize, Serialize};
use timebank_shared::models::{
    company::Company,
    project::{CreateProject, Project, UpdateProject},
};
use validator::Validate;

const PROJECT_NOT_FOUND: &str = "Project not found";

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    #[validate(range(min = 1, message = "Company id must be positive"))]
    pub company_id: i64,
}

/// Update project request; the id names the record to mutate
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(range(min = 1, message = "Id must be positive"))]
    pub id: i64,

    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    #[validate(range(min = 1, message = "Company id must be positive"))]
    pub company_id: i64,
}

/// Project response
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub name: String,
    pub company_id: i64,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            company_id: project.company_id,
        }
    }
}

/// Aggregated project record, enriched with the owning company's name
#[derive(Debug, Serialize)]
pub struct ProjectCompanyResponse {
    pub project_id: i64,
    pub project_name: String,
    pub company_id: i64,
    pub company_name: String,
}

/// Lists all projects
pub async fn list_projects(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let projects = Project::list(&state.db).await?;
    Ok(Json(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ))
}

/// Lists all projects belonging to companies owned by the given user
///
/// Fetches the user's companies, then each company's projects. The
/// per-company fetches are independent and run concurrently; results are
/// merged in company-then-project iteration order with no global sort. A
/// user with no companies yields an empty list. Any failed sub-fetch fails
/// the whole aggregation.
pub async fn list_projects_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<ProjectCompanyResponse>>> {
    let companies = Company::find_by_user_id(&state.db, user_id).await?;

    let fetches = companies.iter().map(|company| {
        let db = state.db.clone();
        async move {
            Project::find_by_company_id(&db, company.id)
                .await
                .map(|projects| (company, projects))
        }
    });

    let fetched = future::try_join_all(fetches).await?;

    let aggregated = fetched
        .into_iter()
        .flat_map(|(company, projects)| {
            projects
                .into_iter()
                .map(move |project| ProjectCompanyResponse {
                    project_id: project.id,
                    project_name: project.name,
                    company_id: company.id,
                    company_name: company.name.clone(),
                })
        })
        .collect();

    Ok(Json(aggregated))
}

/// Fetches a project by ID
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to fetch project", PROJECT_NOT_FOUND))?;

    Ok(Json(project.into()))
}

/// Creates a new project
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    validate_request(&req)?;

    let project = Project::create(
        &state.db,
        CreateProject {
            name: req.name,
            company_id: req.company_id,
        },
    )
    .await?;

    Ok(Json(project.into()))
}

/// Updates an existing project
pub async fn update_project(
    State(state): State<AppState>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    validate_request(&req)?;

    Project::find_by_id(&state.db, req.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to update project", PROJECT_NOT_FOUND))?;

    let project = Project::update(
        &state.db,
        req.id,
        UpdateProject {
            name: req.name,
            company_id: req.company_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Failed to update project", PROJECT_NOT_FOUND))?;

    Ok(Json(project.into()))
}

/// Deletes a project by ID
///
/// No referential guard: activities referencing the project are not checked
/// before removal.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Failed to delete project", PROJECT_NOT_FOUND))?;

    Project::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
