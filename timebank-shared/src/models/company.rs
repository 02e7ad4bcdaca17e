/// Company model and database operations
///
/// Companies are owned by a user via `user_id`. Deleting a company does not
/// cascade to its projects or hour bags.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Company record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub id: i64,

    pub name: String,

    /// Owning user
    pub user_id: i64,
}

/// Input for creating a new company
#[derive(Debug, Clone)]
pub struct CreateCompany {
    pub name: String,
    pub user_id: i64,
}

/// Input for updating an existing company
#[derive(Debug, Clone)]
pub struct UpdateCompany {
    pub name: String,
    pub user_id: i64,
}

impl Company {
    /// Creates a new company
    pub async fn create(pool: &PgPool, data: CreateCompany) -> Result<Self, sqlx::Error> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, user_id)
            VALUES ($1, $2)
            RETURNING id, name, user_id
            "#,
        )
        .bind(data.name)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(company)
    }

    /// Finds a company by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let company =
            sqlx::query_as::<_, Company>("SELECT id, name, user_id FROM companies WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(company)
    }

    /// Lists all companies
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let companies =
            sqlx::query_as::<_, Company>("SELECT id, name, user_id FROM companies ORDER BY id")
                .fetch_all(pool)
                .await?;

        Ok(companies)
    }

    /// Lists all companies owned by the given user
    pub async fn find_by_user_id(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let companies = sqlx::query_as::<_, Company>(
            "SELECT id, name, user_id FROM companies WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(companies)
    }

    /// Updates an existing company
    ///
    /// Returns `None` if no company with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateCompany,
    ) -> Result<Option<Self>, sqlx::Error> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $2, user_id = $3
            WHERE id = $1
            RETURNING id, name, user_id
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.user_id)
        .fetch_optional(pool)
        .await?;

        Ok(company)
    }

    /// Deletes a company by ID
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
