/// Database layer for Questify
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with a startup health check
/// - `migrations`: Migration runner (schema is applied at boot)

pub mod migrations;
pub mod pool;
