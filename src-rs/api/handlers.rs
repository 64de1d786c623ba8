use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::TaskError;
use crate::task::TaskRunner;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
}

pub async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

pub async fn handle_create_task(
    State(runner): State<Arc<TaskRunner>>,
    Json(req): Json<CreateTaskRequest>,
) -> Response {
    match runner.create_task(&req.name) {
        Ok(task) => (StatusCode::CREATED, Json(json!(task))).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn handle_list_tasks(State(runner): State<Arc<TaskRunner>>) -> Json<serde_json::Value> {
    Json(json!({ "tasks": runner.list_tasks() }))
}

pub async fn handle_get_task(
    State(runner): State<Arc<TaskRunner>>,
    Path(id): Path<String>,
) -> Response {
    match runner.get_task(&id) {
        Ok(task) => Json(json!(task)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn handle_delete_task(
    State(runner): State<Arc<TaskRunner>>,
    Path(id): Path<String>,
) -> Response {
    match runner.delete_task(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn handle_task_result(
    State(runner): State<Arc<TaskRunner>>,
    Path(id): Path<String>,
) -> Response {
    match runner.task_result(&id) {
        Ok(task) => Json(json!(task)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: TaskError) -> Response {
    let code = match err {
        TaskError::Validation => StatusCode::BAD_REQUEST,
        TaskError::NotFound => StatusCode::NOT_FOUND,
        TaskError::NotReady => StatusCode::from_u16(425).unwrap(),
    };
    (code, Json(json!({ "error": err.to_string() }))).into_response()
}
