/// Project model and database operations
///
/// Projects belong to a company via `company_id`. The by-company lookup backs
/// the user → company → project aggregation in the API layer.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Project record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,

    pub name: String,

    /// Owning company
    pub company_id: i64,
}

/// Input for creating a new project
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub company_id: i64,
}

/// Input for updating an existing project
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub name: String,
    pub company_id: i64,
}

impl Project {
    /// Creates a new project
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, company_id)
            VALUES ($1, $2)
            RETURNING id, name, company_id
            "#,
        )
        .bind(data.name)
        .bind(data.company_id)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT id, name, company_id FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let projects =
            sqlx::query_as::<_, Project>("SELECT id, name, company_id FROM projects ORDER BY id")
                .fetch_all(pool)
                .await?;

        Ok(projects)
    }

    /// Lists all projects belonging to the given company
    pub async fn find_by_company_id(
        pool: &PgPool,
        company_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, name, company_id FROM projects WHERE company_id = $1",
        )
        .bind(company_id)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Updates an existing project
    ///
    /// Returns `None` if no project with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = $2, company_id = $3
            WHERE id = $1
            RETURNING id, name, company_id
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.company_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project by ID
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
