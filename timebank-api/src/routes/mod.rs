/// API route handlers
///
/// One module per resource. Handlers orchestrate validation and storage
/// access; request/response DTOs live next to the handlers that use them.

pub mod activities;
pub mod companies;
pub mod health;
pub mod hour_bags;
pub mod projects;
pub mod roles;
pub mod user_activities;
pub mod users;
