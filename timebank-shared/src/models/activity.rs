/// Activity model and database operations
///
/// An activity is a unit of work performed under a project, drawing hours
/// from an hour bag and tagged with a user-activity category. The
/// `exists_by_hour_bag_id` predicate gates hour bag deletion.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Activity record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Activity {
    pub id: i64,

    /// Short tracking code
    pub code: String,

    pub description: String,

    /// Project this work was performed under
    pub project_id: i64,

    /// Hours of effort spent
    pub effort_hours: i32,

    /// Hour bag the effort draws from
    pub hour_bag_id: i64,

    /// Category tag
    pub user_activity_id: i64,
}

/// Input for creating a new activity
#[derive(Debug, Clone)]
pub struct CreateActivity {
    pub code: String,
    pub description: String,
    pub project_id: i64,
    pub effort_hours: i32,
    pub hour_bag_id: i64,
    pub user_activity_id: i64,
}

/// Input for updating an existing activity
#[derive(Debug, Clone)]
pub struct UpdateActivity {
    pub code: String,
    pub description: String,
    pub project_id: i64,
    pub effort_hours: i32,
    pub hour_bag_id: i64,
    pub user_activity_id: i64,
}

impl Activity {
    /// Creates a new activity
    pub async fn create(pool: &PgPool, data: CreateActivity) -> Result<Self, sqlx::Error> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (code, description, project_id, effort_hours, hour_bag_id, user_activity_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, code, description, project_id, effort_hours, hour_bag_id, user_activity_id
            "#,
        )
        .bind(data.code)
        .bind(data.description)
        .bind(data.project_id)
        .bind(data.effort_hours)
        .bind(data.hour_bag_id)
        .bind(data.user_activity_id)
        .fetch_one(pool)
        .await?;

        Ok(activity)
    }

    /// Finds an activity by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, code, description, project_id, effort_hours, hour_bag_id, user_activity_id
            FROM activities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(activity)
    }

    /// Lists all activities
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, code, description, project_id, effort_hours, hour_bag_id, user_activity_id
            FROM activities
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(activities)
    }

    /// Checks whether any activity draws from the given hour bag
    pub async fn exists_by_hour_bag_id(
        pool: &PgPool,
        hour_bag_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM activities WHERE hour_bag_id = $1)")
                .bind(hour_bag_id)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Updates an existing activity
    ///
    /// Returns `None` if no activity with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateActivity,
    ) -> Result<Option<Self>, sqlx::Error> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            UPDATE activities
            SET code = $2, description = $3, project_id = $4, effort_hours = $5,
                hour_bag_id = $6, user_activity_id = $7
            WHERE id = $1
            RETURNING id, code, description, project_id, effort_hours, hour_bag_id, user_activity_id
            "#,
        )
        .bind(id)
        .bind(data.code)
        .bind(data.description)
        .bind(data.project_id)
        .bind(data.effort_hours)
        .bind(data.hour_bag_id)
        .bind(data.user_activity_id)
        .fetch_optional(pool)
        .await?;

        Ok(activity)
    }

    /// Deletes an activity by ID
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
