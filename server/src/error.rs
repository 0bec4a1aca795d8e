//! Error taxonomy for todo operations and its HTTP mapping.
//!
//! # Design
//! `Validation` and `NotFound` are expected outcomes and map to 4xx.
//! Every other failure comes from storage and maps to 500 with the
//! underlying message. The `IntoResponse` impl is the only place where
//! errors become status codes, and it logs every 5xx.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use crate::model::Message;
use crate::store::StoreError;

pub type TodoResult<T> = Result<T, TodoError>;

#[derive(Debug, Error)]
pub enum TodoError {
    /// A required input was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// No todo matches the requested id.
    #[error("Todo not found")]
    NotFound,

    #[error("{0}")]
    StorageUnavailable(#[from] StoreError),
}

impl TodoError {
    pub fn missing_content() -> Self {
        Self::Validation("content is required".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else if status == StatusCode::BAD_REQUEST {
            warn!(error = %self, "rejected request");
        }
        (status, Json(Message::new(self.to_string()))).into_response()
    }
}
