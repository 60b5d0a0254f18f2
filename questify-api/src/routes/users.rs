/// User management endpoints
///
/// Listing is admin-only; reading and updating a profile is allowed for the
/// profile owner or an admin.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use questify_shared::auth::middleware::CurrentUser;
use questify_shared::models::user::{UpdateProfile, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pagination query parameters for the user list
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Page size (default 50, capped at 200)
    pub limit: Option<i64>,

    /// Offset into the result set
    pub offset: Option<i64>,
}

impl ListQuery {
    /// Resolves the query into a `(limit, offset)` window
    ///
    /// The limit is clamped to 1..=200 and the offset floored at zero, so
    /// hostile query strings can't turn into unbounded scans.
    fn window(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(50).clamp(1, 200);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Paginated user list payload
#[derive(Debug, Serialize)]
pub struct UserListPayload {
    pub users: Vec<User>,
    pub total: i64,
}

/// GET /api/users (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ApiResponse<UserListPayload>>> {
    if !current.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let (limit, offset) = query.window();

    let users = User::list(&state.db, limit, offset).await?;
    let total = User::count(&state.db).await?;

    Ok(ApiResponse::ok("Users", UserListPayload { users, total }))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<User>>> {
    if !current.can_access(id) {
        return Err(ApiError::Forbidden(
            "Not allowed to access this user".to_string(),
        ));
    }

    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(ApiResponse::ok("User", user))
}

/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProfile>,
) -> ApiResult<Json<ApiResponse<User>>> {
    if !current.can_access(id) {
        return Err(ApiError::Forbidden(
            "Not allowed to modify this user".to_string(),
        ));
    }

    let user = User::update_profile(&state.db, id, body)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %id, "Profile updated");

    Ok(ApiResponse::ok("Profile updated", user))
}
