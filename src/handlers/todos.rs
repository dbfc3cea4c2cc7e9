// handlers/todos.rs - /api/todos handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::database::Todo;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
}

/// GET /api/todos - List every todo
pub async fn all_todos(State(state): State<AppState>) -> ApiResult<Vec<Todo>> {
    let todos = state.todos.all_todos().await?;
    Ok(ApiResponse::success(todos))
}

/// POST /api/todos - Create a todo
///
/// Expected Input:
/// ```json
/// { "title": "Buy milk" }
/// ```
///
/// Responds 201 with the stored todo, e.g. `{"id":1,"title":"Buy milk","done":false}`.
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ApiResult<Todo> {
    let Json(payload) = payload?;
    let todo = state.todos.create_todo(&payload.title).await?;
    Ok(ApiResponse::created(todo))
}

/// DELETE /api/todos/:id - Delete a todo by id
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid todo id: {}", id)))?;

    state.todos.delete_todo(id).await?;
    Ok(ApiResponse::no_content())
}
