//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, DeleteAllResult, MessageBody, Todo, UpdateTodo};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/todo", self.base_url)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/todo/{id}", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        bodiless(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_todo(&self, id: u64) -> HttpRequest {
        bodiless(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_todo(&self, id: u64, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Patch, self.item_url(id), input)
    }

    pub fn build_delete_todo(&self, id: u64) -> HttpRequest {
        bodiless(HttpMethod::Delete, self.item_url(id))
    }

    pub fn build_delete_all_todos(&self) -> HttpRequest {
        bodiless(HttpMethod::Delete, self.collection_url())
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        decode(&response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    /// Returns the number of todos the server removed.
    pub fn parse_delete_all_todos(&self, response: HttpResponse) -> Result<u64, ApiError> {
        check_status(&response, 200)?;
        let result: DeleteAllResult = decode(&response)?;
        Ok(result.deleted_count)
    }
}

fn bodiless(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json<T: Serialize>(method: HttpMethod, path: String, input: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => {
            let message = serde_json::from_str::<MessageBody>(&response.body)
                .map(|body| body.message)
                .unwrap_or_else(|_| response.body.clone());
            Err(ApiError::BadRequest(message))
        }
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODO_JSON: &str = r#"{"id":1,"content":"Test","createdAt":"2026-01-01T00:00:00Z","updatedAt":"2026-01-01T00:00:00Z"}"#;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todo");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_todo_uses_integer_id() {
        let req = client().build_get_todo(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todo/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_todo_produces_correct_request() {
        let input = CreateTodo {
            content: "Buy milk".to_string(),
        };
        let req = client().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todo");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "content": "Buy milk" }));
    }

    #[test]
    fn build_update_todo_uses_patch() {
        let input = UpdateTodo {
            content: "Updated".to_string(),
        };
        let req = client().build_update_todo(3, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "http://localhost:3000/todo/3");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["content"], "Updated");
    }

    #[test]
    fn build_delete_requests() {
        let one = client().build_delete_todo(5);
        assert_eq!(one.method, HttpMethod::Delete);
        assert_eq!(one.path, "http://localhost:3000/todo/5");

        let all = client().build_delete_all_todos();
        assert_eq!(all.method, HttpMethod::Delete);
        assert_eq!(all.path, "http://localhost:3000/todo");
        assert!(all.body.is_none());
    }

    #[test]
    fn parse_list_todos_success() {
        let todos = client()
            .parse_list_todos(response(200, &format!("[{TODO_JSON}]")))
            .unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, 1);
        assert_eq!(todos[0].content, "Test");
    }

    #[test]
    fn parse_get_todo_not_found() {
        let err = client()
            .parse_get_todo(response(404, r#"{"message":"Todo not found"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_todo_success() {
        let todo = client().parse_create_todo(response(201, TODO_JSON)).unwrap();
        assert_eq!(todo.content, "Test");
        assert_eq!(todo.created_at, "2026-01-01T00:00:00Z");
    }

    #[test]
    fn parse_create_todo_bad_request_carries_message() {
        let err = client()
            .parse_create_todo(response(400, r#"{"message":"content is required"}"#))
            .unwrap_err();
        match err {
            ApiError::BadRequest(message) => assert_eq!(message, "content is required"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client()
            .parse_create_todo(response(500, r#"{"message":"storage unavailable: down"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_delete_todo_success_and_not_found() {
        assert!(client()
            .parse_delete_todo(response(200, r#"{"message":"Todo deleted"}"#))
            .is_ok());
        let err = client().parse_delete_todo(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_delete_all_returns_count() {
        let count = client()
            .parse_delete_all_todos(response(200, r#"{"message":"All todos deleted","deletedCount":4}"#))
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        let req = client.build_list_todos();
        assert_eq!(req.path, "http://localhost:3000/todo");
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client().parse_list_todos(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
