//! Persistence backends for todos and id counters.
//!
//! # Design
//! `Store` is the single seam between the service layer and storage. Every
//! method is one round trip against the backend. `next_sequence` must be a
//! single atomic increment-and-fetch (upsert) so concurrent callers never
//! observe the same value; backends must not implement it as a read followed
//! by a write.
//!
//! Two backends ship with the crate: [`MemoryStore`] (default, used by
//! tests) and [`SqliteStore`] (durable, file-backed).

mod memory;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::{StorageBackend, StorageConfig};
use crate::model::Todo;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or its handle is unusable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A record with this id already exists.
    #[error("todo {0} already exists")]
    Duplicate(u64),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// Async storage operations shared by every backend.
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug {
    /// Atomically increments the counter `name` and returns the new value.
    /// A missing counter is created with value 1.
    async fn next_sequence(&self, name: &str) -> StoreResult<u64>;

    async fn insert(&self, todo: Todo) -> StoreResult<Todo>;

    /// All todos in ascending id order.
    async fn list(&self) -> StoreResult<Vec<Todo>>;

    async fn get(&self, id: u64) -> StoreResult<Option<Todo>>;

    /// Replaces the content of `id`, returning the updated record or `None`
    /// when no such todo exists.
    async fn update_content(
        &self,
        id: u64,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Todo>>;

    /// Removes `id`, returning the removed record or `None`.
    async fn remove(&self, id: u64) -> StoreResult<Option<Todo>>;

    /// Removes every todo and returns how many were removed. Counters are
    /// left untouched.
    async fn clear(&self) -> StoreResult<u64>;
}

/// Opens the backend selected by `config`.
pub fn open(config: &StorageConfig) -> StoreResult<Arc<dyn Store>> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageBackend::Sqlite => Ok(Arc::new(SqliteStore::open(&config.path)?)),
    }
}
