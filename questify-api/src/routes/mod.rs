/// HTTP route handlers
///
/// One module per resource. Handlers return `ApiResult<impl IntoResponse>`
/// and wrap payloads in the shared success envelope.

pub mod auth;
pub mod health;
pub mod oauth;
pub mod pomodoro;
pub mod tasks;
pub mod users;
