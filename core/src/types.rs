//! Domain DTOs for the todo API.
//!
//! These mirror the server's wire schema but are defined independently so
//! the client carries no server dependencies. Timestamps stay as the RFC 3339
//! strings the server sends.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub content: String,
}

/// Request payload for replacing the content of an existing todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub content: String,
}

/// Body of a successful delete-all response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllResult {
    pub message: String,
    pub deleted_count: u64,
}

/// `{ "message": ... }` body sent with confirmations and errors.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MessageBody {
    pub message: String,
}
