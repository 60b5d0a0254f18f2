/// Task CRUD endpoints
///
/// Every operation is scoped to the authenticated owner. A task that exists
/// but belongs to someone else is reported as 404, never 403, so task ids
/// can't be probed.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use questify_shared::auth::middleware::CurrentUser;
use questify_shared::models::task::Task;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Request body for creating or renaming a task
#[derive(Debug, Deserialize, Validate)]
pub struct TaskRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
}

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<Vec<Task>>>> {
    let tasks = Task::list_by_owner(&state.db, current.user_id).await?;
    Ok(ApiResponse::ok("Tasks", tasks))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<TaskRequest>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    body.validate().map_err(ApiError::from_validation)?;

    let task = Task::create(&state.db, current.user_id, &body.title).await?;

    tracing::debug!(task_id = %task.id, "Task created");

    Ok(ApiResponse::ok("Task created", task))
}

/// GET /api/tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = Task::find_by_id_and_owner(&state.db, id, current.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(ApiResponse::ok("Task", task))
}

/// PUT /api/tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<TaskRequest>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    body.validate().map_err(ApiError::from_validation)?;

    let task = Task::update_title(&state.db, id, current.user_id, &body.title)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(ApiResponse::ok("Task updated", task))
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let deleted = Task::delete(&state.db, id, current.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(ApiResponse::message("Task deleted"))
}
