//! HTTP routes for the todo API.
//!
//! Handlers stay thin: extract, delegate to [`TodoService`], wrap the result.
//! Extraction failures are folded into the service's own error cases so
//! clients see exactly two 4xx statuses: 400 for a missing or unreadable
//! `content`, 404 for an unknown (or non-numeric) id.

use axum::body::Body;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, Span};
use uuid::Uuid;

use crate::error::{TodoError, TodoResult};
use crate::model::{DeleteAllResponse, Message, Todo, TodoInput};
use crate::service::{require_content, TodoService};

pub fn router(service: TodoService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/todo",
            get(list_todos).post(create_todo).delete(delete_all_todos),
        )
        .route(
            "/todo/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(service)
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        uri = %request.uri(),
    )
}

fn input_or_default(payload: Result<Json<TodoInput>, JsonRejection>) -> TodoInput {
    match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable request body");
            TodoInput::default()
        }
    }
}

fn todo_id(path: Result<Path<u64>, PathRejection>) -> TodoResult<u64> {
    path.map(|Path(id)| id).map_err(|_| TodoError::NotFound)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn create_todo(
    State(service): State<TodoService>,
    payload: Result<Json<TodoInput>, JsonRejection>,
) -> TodoResult<(StatusCode, Json<Todo>)> {
    let input = input_or_default(payload);
    let todo = service.create(input.content).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn list_todos(State(service): State<TodoService>) -> TodoResult<Json<Vec<Todo>>> {
    Ok(Json(service.list().await?))
}

async fn get_todo(
    State(service): State<TodoService>,
    path: Result<Path<u64>, PathRejection>,
) -> TodoResult<Json<Todo>> {
    let id = todo_id(path)?;
    Ok(Json(service.get(id).await?))
}

async fn update_todo(
    State(service): State<TodoService>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<TodoInput>, JsonRejection>,
) -> TodoResult<Json<Todo>> {
    // Content is checked first so a bad body on a bad id is still a 400.
    let content = require_content(input_or_default(payload).content)?;
    let id = todo_id(path)?;
    Ok(Json(service.update(id, Some(content)).await?))
}

async fn delete_todo(
    State(service): State<TodoService>,
    path: Result<Path<u64>, PathRejection>,
) -> TodoResult<Json<Message>> {
    let id = todo_id(path)?;
    service.delete(id).await?;
    Ok(Json(Message::new("Todo deleted")))
}

async fn delete_all_todos(
    State(service): State<TodoService>,
) -> TodoResult<Json<DeleteAllResponse>> {
    let deleted_count = service.delete_all().await?;
    Ok(Json(DeleteAllResponse {
        message: "All todos deleted".to_string(),
        deleted_count,
    }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(Message::new("Not Found")))
}
