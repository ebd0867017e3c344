use super::dto::*;
use super::error::*;
use super::AppState;
use crate::db::database::Backend;
use crate::db::store::{DocumentStore, NewTask};
use crate::libs::task::Task;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub const TASK_CREATED: &str = "Task created successfully";
pub const TASK_UPDATED: &str = "Task updated successfully";
pub const TASK_DELETED: &str = "Task deleted successfully";
pub const TASK_ORDER_UPDATED: &str = "Task order updated successfully";

async fn store<'a>(state: &'a AppState, failure: &str) -> Result<&'a Backend, ApiErrorResponse> {
    state
        .database
        .get()
        .await
        .map_err(|error| ApiErrorResponse::internal(failure, error))
}

/// The id exactly as given; only an all-blank id is rejected.
fn task_id(id: &str) -> Result<&str, ApiErrorResponse> {
    if id.trim().is_empty() {
        return Err(ApiErrorResponse::bad_request(TASK_ID_REQUIRED));
    }
    Ok(id)
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string() })
}

/// GET /api/tasks
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<TaskListResponse>, ApiErrorResponse> {
    let documents = store(&state, GET_TASKS_FAILED)
        .await?
        .list()
        .await
        .map_err(|error| ApiErrorResponse::internal(GET_TASKS_FAILED, error))?;

    let tasks = documents.into_iter().map(Task::from_document).collect();
    Ok(Json(TaskListResponse { tasks }))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiErrorResponse> {
    let request: CreateTaskRequest = parse_body(&body)?;
    let title = request.validate()?;

    let id = store(&state, CREATE_TASK_FAILED)
        .await?
        .create(NewTask::titled(title))
        .await
        .map_err(|error| ApiErrorResponse::internal(CREATE_TASK_FAILED, error))?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: TASK_CREATED.to_string(),
        }),
    ))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiErrorResponse> {
    let id = task_id(&id)?;
    let request: UpdateTaskRequest = parse_body(&body)?;
    let field = request.validate()?;

    store(&state, UPDATE_TASK_FAILED)
        .await?
        .update(id, field)
        .await
        .map_err(|error| ApiErrorResponse::internal(UPDATE_TASK_FAILED, error))?;

    Ok(Json(MessageResponse::new(TASK_UPDATED)))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiErrorResponse> {
    let id = task_id(&id)?;

    store(&state, DELETE_TASK_FAILED)
        .await?
        .delete(id)
        .await
        .map_err(|error| ApiErrorResponse::internal(DELETE_TASK_FAILED, error))?;

    Ok(Json(MessageResponse::new(TASK_DELETED)))
}

/// POST /api/tasks/order
pub async fn reorder_tasks(State(state): State<AppState>, body: Bytes) -> Result<Json<MessageResponse>, ApiErrorResponse> {
    let request: ReorderRequest = parse_body(&body)?;
    let writes = request.validate()?;

    store(&state, UPDATE_ORDER_FAILED)
        .await?
        .commit_orders(&writes)
        .await
        .map_err(|error| ApiErrorResponse::internal(UPDATE_ORDER_FAILED, error))?;

    Ok(Json(MessageResponse::new(TASK_ORDER_UPDATED)))
}
