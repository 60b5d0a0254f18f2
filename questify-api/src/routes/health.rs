/// Health check endpoint
///
/// Reports the service version and whether the database answers a trivial
/// query. Always returns 200; a broken database is reported in the body so
/// monitors can distinguish "API down" from "database down".

use crate::{app::AppState, error::ApiResult, response::ApiResponse};
use axum::{extract::State, Json};
use serde::Serialize;

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status ("ok" or "degraded")
    pub status: String,

    /// Crate version
    pub version: String,

    /// Database reachability ("up" or "down")
    pub database: String,
}

/// GET /api/health
pub async fn health_check(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<HealthResponse>>> {
    let db_healthy = questify_shared::db::pool::health_check(&state.db)
        .await
        .is_ok();

    let payload = HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" }.to_string(),
        version: questify_shared::VERSION.to_string(),
        database: if db_healthy { "up" } else { "down" }.to_string(),
    };

    Ok(ApiResponse::ok("Service health", payload))
}
