/// Custom middleware for the API server
///
/// - `security`: security-related response headers
///
/// JWT authentication lives in `app.rs` as a `from_fn_with_state` layer
/// because it needs the shared state (secret + pool).

pub mod security;
