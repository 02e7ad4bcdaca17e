/// Role model
///
/// Read-only reference data; roles are seeded outside the API and only ever
/// fetched.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Role record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

impl Role {
    /// Finds a role by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let role = sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(role)
    }

    /// Lists all roles
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let roles = sqlx::query_as::<_, Role>("SELECT id, name FROM roles ORDER BY id")
            .fetch_all(pool)
            .await?;

        Ok(roles)
    }
}
