//! Records and request/response payloads for the todo API.
//!
//! # Design
//! `Todo` is both the stored record and the wire representation; field names
//! are camelCase on the wire. Request payloads keep `content` optional so a
//! missing field reaches the service as a validation failure (400) instead
//! of being rejected by the JSON extractor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the counter that mints todo ids.
pub const PLAN_ID_SEQUENCE: &str = "planId";

/// A single persisted todo item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Builds a fresh record with both timestamps set to `now`.
    pub fn new(id: u64, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /todo` and `PATCH /todo/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct TodoInput {
    #[serde(default)]
    pub content: Option<String>,
}

/// Generic `{ "message": ... }` body used for confirmations and errors.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by `DELETE /todo`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllResponse {
    pub message: String,
    pub deleted_count: u64,
}
