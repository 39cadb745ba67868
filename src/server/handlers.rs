use super::AppState;
use crate::db::tasks::{Tasks, MAX_PAGE_SIZE};
use crate::libs::error::{ErrorKind, TaskError};
use crate::libs::messages::Message;
use crate::libs::task::{NewTask, Task, TaskUpdate};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    offset: u32,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    MAX_PAGE_SIZE
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

/// Error body in the `{"detail": "..."}` shape clients expect.
#[derive(Debug)]
pub struct ApiError(TaskError);

impl From<TaskError> for ApiError {
    fn from(error: TaskError) -> Self {
        ApiError(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(TaskError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(TaskError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(TaskError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self.0.kind() {
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, Message::TaskNotFound.to_string()),
            ErrorKind::Validation => (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string()),
            ErrorKind::Infra => {
                error!(error = %self.0, "task store request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string())
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

// Extractors whose rejections answer with 422 and a `{"detail"}` body
// instead of axum's plain-text defaults.

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Runs `f` against a connection opened for this request only.
///
/// rusqlite is blocking, so the work is moved off the async executor.
async fn with_tasks<T, F>(state: &AppState, f: F) -> Result<T, TaskError>
where
    F: FnOnce(&mut Tasks) -> Result<T, TaskError> + Send + 'static,
    T: Send + 'static,
{
    let db = state.db.clone();
    tokio::task::spawn_blocking(move || {
        let mut tasks = db.tasks()?;
        f(&mut tasks)
    })
    .await?
}

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": Message::Welcome.to_string() }))
}

pub async fn list_tasks(State(state): State<Arc<AppState>>, ApiQuery(query): ApiQuery<ListQuery>) -> Result<Json<Vec<Task>>, ApiError> {
    debug!(offset = query.offset, limit = query.limit, "list tasks");
    let tasks = with_tasks(&state, move |tasks| tasks.list(query.offset, query.limit)).await?;
    Ok(Json(tasks))
}

pub async fn create_task(State(state): State<Arc<AppState>>, ApiJson(task): ApiJson<NewTask>) -> Result<Json<Task>, ApiError> {
    let created = with_tasks(&state, move |tasks| tasks.insert(&task)).await?;
    debug!(id = created.id, "task created");
    Ok(Json(created))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<TaskUpdate>,
) -> Result<Json<Task>, ApiError> {
    let updated = with_tasks(&state, move |tasks| tasks.update(id, &update)).await?;
    debug!(id, "task updated");
    Ok(Json(updated))
}

pub async fn delete_task(State(state): State<Arc<AppState>>, ApiPath(id): ApiPath<i64>) -> Result<Json<DeleteResponse>, ApiError> {
    with_tasks(&state, move |tasks| tasks.delete(id)).await?;
    debug!(id, "task deleted");
    Ok(Json(DeleteResponse { ok: true }))
}
