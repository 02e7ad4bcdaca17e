/// Storage records for timebank
///
/// Each module pairs a `sqlx::FromRow` record with its CRUD operations.
/// Lookups return `Option` so callers decide how a missing row is reported.
///
/// # Models
///
/// - `user`: user accounts (email unique, password stored hashed)
/// - `role`: read-only reference data
/// - `company`: companies owned by a user
/// - `project`: projects belonging to a company
/// - `activity`: units of work drawing hours from an hour bag
/// - `user_activity`: category tags attached to activities
/// - `hour_bag`: purchased pools of billable hours

pub mod activity;
pub mod company;
pub mod hour_bag;
pub mod project;
pub mod role;
pub mod user;
pub mod user_activity;
