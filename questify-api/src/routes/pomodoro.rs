/// Pomodoro session endpoints
///
/// Sessions record server-side focus intervals: `start` opens one,
/// `complete` closes it and awards XP, `pause` and `reset` mutate it in
/// place. Mutation endpoints take the session id in the JSON body as
/// `sessionId`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{extract::State, Extension, Json};
use questify_shared::auth::middleware::CurrentUser;
use questify_shared::models::pomodoro_session::PomodoroSession;
use serde::Deserialize;
use uuid::Uuid;

/// Request body carrying a session id
#[derive(Debug, Deserialize)]
pub struct SessionIdRequest {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
}

/// Loads a session and verifies it belongs to the caller
///
/// A session owned by someone else is reported as 404, same as a missing
/// one, unless the caller is an admin.
async fn load_owned_session(
    state: &AppState,
    current: &CurrentUser,
    session_id: Uuid,
) -> ApiResult<PomodoroSession> {
    let session = PomodoroSession::find_by_id(&state.db, session_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))?;

    if !current.can_access(session.user_id) {
        return Err(ApiError::NotFound("Session not found".to_string()));
    }

    Ok(session)
}

/// GET /api/pomodoro
pub async fn list_sessions(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<Vec<PomodoroSession>>>> {
    let sessions = PomodoroSession::list_by_user(&state.db, current.user_id).await?;
    Ok(ApiResponse::ok("Pomodoro sessions", sessions))
}

/// POST /api/pomodoro/start
pub async fn start_session(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<PomodoroSession>>> {
    let session = PomodoroSession::start(&state.db, current.user_id).await?;

    tracing::debug!(session_id = %session.id, "Pomodoro session started");

    Ok(ApiResponse::ok("Pomodoro session started", session))
}

/// POST /api/pomodoro/complete
///
/// Marks the session completed, stamps `end_time`, and awards the fixed XP.
/// Completing an already-completed session awards XP again; the client only
/// calls this once per focus interval.
pub async fn complete_session(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<SessionIdRequest>,
) -> ApiResult<Json<ApiResponse<PomodoroSession>>> {
    load_owned_session(&state, &current, body.session_id).await?;

    let session = PomodoroSession::complete(&state.db, body.session_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))?;

    tracing::debug!(session_id = %session.id, xp = session.xp_earned, "Pomodoro session completed");

    Ok(ApiResponse::ok(
        "Pomodoro session completed successfully",
        session,
    ))
}

/// POST /api/pomodoro/pause
pub async fn pause_session(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<SessionIdRequest>,
) -> ApiResult<Json<ApiResponse<PomodoroSession>>> {
    let existing = load_owned_session(&state, &current, body.session_id).await?;

    if existing.completed {
        return Err(ApiError::BadRequest(
            "Cannot pause a completed session".to_string(),
        ));
    }

    // The update re-checks the completed flag, so a complete racing in
    // between the fetch and this point still wins
    let session = PomodoroSession::pause(&state.db, body.session_id)
        .await?
        .ok_or_else(|| {
            ApiError::BadRequest("Cannot pause a completed session".to_string())
        })?;

    Ok(ApiResponse::ok("Session paused", session))
}

/// POST /api/pomodoro/reset
pub async fn reset_session(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<SessionIdRequest>,
) -> ApiResult<Json<ApiResponse<PomodoroSession>>> {
    load_owned_session(&state, &current, body.session_id).await?;

    let session = PomodoroSession::reset(&state.db, body.session_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))?;

    Ok(ApiResponse::ok("Session reset", session))
}
