/// User-activity model and database operations
///
/// A named category tag used to classify activities.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User-activity record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserActivity {
    pub id: i64,

    /// User this category belongs to
    pub user_id: i64,

    pub name: String,
}

/// Input for creating a new user-activity category
#[derive(Debug, Clone)]
pub struct CreateUserActivity {
    pub user_id: i64,
    pub name: String,
}

/// Input for updating an existing user-activity category
#[derive(Debug, Clone)]
pub struct UpdateUserActivity {
    pub user_id: i64,
    pub name: String,
}

impl UserActivity {
    /// Creates a new user-activity category
    pub async fn create(pool: &PgPool, data: CreateUserActivity) -> Result<Self, sqlx::Error> {
        let user_activity = sqlx::query_as::<_, UserActivity>(
            r#"
            INSERT INTO user_activities (user_id, name)
            VALUES ($1, $2)
            RETURNING id, user_id, name
            "#,
        )
        .bind(data.user_id)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(user_activity)
    }

    /// Finds a user-activity category by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user_activity = sqlx::query_as::<_, UserActivity>(
            "SELECT id, user_id, name FROM user_activities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user_activity)
    }

    /// Lists all user-activity categories
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let user_activities = sqlx::query_as::<_, UserActivity>(
            "SELECT id, user_id, name FROM user_activities ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(user_activities)
    }

    /// Updates an existing user-activity category
    ///
    /// Returns `None` if no record with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateUserActivity,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user_activity = sqlx::query_as::<_, UserActivity>(
            r#"
            UPDATE user_activities
            SET user_id = $2, name = $3
            WHERE id = $1
            RETURNING id, user_id, name
            "#,
        )
        .bind(id)
        .bind(data.user_id)
        .bind(data.name)
        .fetch_optional(pool)
        .await?;

        Ok(user_activity)
    }

    /// Deletes a user-activity category by ID
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_activities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
