/// Database access layer
///
/// - `pool`: PostgreSQL connection pool management
/// - `migrations`: embedded schema migrations

pub mod migrations;
pub mod pool;
