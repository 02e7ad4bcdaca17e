/// Hour bag model and database operations
///
/// An hour bag is a purchased pool of billable hours at a fixed unit cost,
/// tracked against consumption by activities. `consumed_hours` and `status`
/// are server-assigned on creation (0 and true) and are not touched by
/// updates; only `hours`, `hour_cost` and `registration_date` are mutable.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE hour_bags (
///     id BIGSERIAL PRIMARY KEY,
///     company_id BIGINT NOT NULL REFERENCES companies(id),
///     hours INTEGER NOT NULL CHECK (hours > 0),
///     consumed_hours INTEGER NOT NULL DEFAULT 0 CHECK (consumed_hours >= 0),
///     hour_cost NUMERIC(12, 2) NOT NULL CHECK (hour_cost > 0),
///     registration_date TIMESTAMPTZ NOT NULL,
///     status BOOLEAN NOT NULL DEFAULT TRUE
/// );
/// ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Hour bag record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HourBag {
    pub id: i64,

    /// Company the hours were purchased for
    pub company_id: i64,

    /// Total purchased capacity
    pub hours: i32,

    /// Hours already drawn by activities; must stay <= hours
    pub consumed_hours: i32,

    /// Unit price per hour
    pub hour_cost: Decimal,

    /// When the purchase was registered
    pub registration_date: DateTime<Utc>,

    /// Active flag
    pub status: bool,
}

/// Input for creating a new hour bag
///
/// Consumed hours and status are not part of the input: a new bag always
/// starts with zero consumption and active status.
#[derive(Debug, Clone)]
pub struct CreateHourBag {
    pub company_id: i64,
    pub hours: i32,
    pub hour_cost: Decimal,
    pub registration_date: DateTime<Utc>,
}

/// Input for updating an existing hour bag
///
/// Only capacity, unit cost and registration date are mutable.
#[derive(Debug, Clone)]
pub struct UpdateHourBag {
    pub hours: i32,
    pub hour_cost: Decimal,
    pub registration_date: DateTime<Utc>,
}

impl HourBag {
    /// Creates a new hour bag
    ///
    /// `consumed_hours` is set to 0 and `status` to true regardless of what
    /// the caller received over the wire.
    pub async fn create(pool: &PgPool, data: CreateHourBag) -> Result<Self, sqlx::Error> {
        let hour_bag = sqlx::query_as::<_, HourBag>(
            r#"
            INSERT INTO hour_bags (company_id, hours, consumed_hours, hour_cost, registration_date, status)
            VALUES ($1, $2, 0, $3, $4, TRUE)
            RETURNING id, company_id, hours, consumed_hours, hour_cost, registration_date, status
            "#,
        )
        .bind(data.company_id)
        .bind(data.hours)
        .bind(data.hour_cost)
        .bind(data.registration_date)
        .fetch_one(pool)
        .await?;

        Ok(hour_bag)
    }

    /// Finds an hour bag by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let hour_bag = sqlx::query_as::<_, HourBag>(
            r#"
            SELECT id, company_id, hours, consumed_hours, hour_cost, registration_date, status
            FROM hour_bags
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(hour_bag)
    }

    /// Lists all hour bags
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let hour_bags = sqlx::query_as::<_, HourBag>(
            r#"
            SELECT id, company_id, hours, consumed_hours, hour_cost, registration_date, status
            FROM hour_bags
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(hour_bags)
    }

    /// Lists hour bags with the given status
    pub async fn find_by_status(pool: &PgPool, status: bool) -> Result<Vec<Self>, sqlx::Error> {
        let hour_bags = sqlx::query_as::<_, HourBag>(
            r#"
            SELECT id, company_id, hours, consumed_hours, hour_cost, registration_date, status
            FROM hour_bags
            WHERE status = $1
            ORDER BY id
            "#,
        )
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(hour_bags)
    }

    /// Updates an existing hour bag
    ///
    /// Mutates `hours`, `hour_cost` and `registration_date` only; consumption
    /// and status are left untouched. Returns `None` if no bag with the given
    /// ID exists. Callers are expected to have validated the capacity
    /// invariant against the current record first.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateHourBag,
    ) -> Result<Option<Self>, sqlx::Error> {
        let hour_bag = sqlx::query_as::<_, HourBag>(
            r#"
            UPDATE hour_bags
            SET hours = $2, hour_cost = $3, registration_date = $4
            WHERE id = $1
            RETURNING id, company_id, hours, consumed_hours, hour_cost, registration_date, status
            "#,
        )
        .bind(id)
        .bind(data.hours)
        .bind(data.hour_cost)
        .bind(data.registration_date)
        .fetch_optional(pool)
        .await?;

        Ok(hour_bag)
    }

    /// Deletes an hour bag by ID
    ///
    /// Returns true if a row was removed. Callers are expected to have
    /// checked for dependent activities first.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hour_bags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
