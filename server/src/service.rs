//! Todo CRUD operations on top of a [`Store`].
//!
//! # Design
//! Each operation validates its input, performs at most one allocation and
//! one storage call, and reports missing records as `TodoError::NotFound`.
//! Create is two independent steps (allocate, then insert); an insert
//! failure leaves the allocated id unused and that gap is never reclaimed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::allocator::IdAllocator;
use crate::error::{TodoError, TodoResult};
use crate::model::Todo;
use crate::store::Store;

#[derive(Debug, Clone)]
pub struct TodoService {
    store: Arc<dyn Store>,
    allocator: IdAllocator,
}

impl TodoService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let allocator = IdAllocator::new(Arc::clone(&store));
        Self { store, allocator }
    }

    pub async fn create(&self, content: Option<String>) -> TodoResult<Todo> {
        let content = require_content(content)?;
        let id = self.allocator.allocate().await?;
        let todo = self.store.insert(Todo::new(id, content, Utc::now())).await?;
        info!(id = todo.id, "todo created");
        Ok(todo)
    }

    pub async fn list(&self) -> TodoResult<Vec<Todo>> {
        let todos = self.store.list().await?;
        debug!(count = todos.len(), "todos listed");
        Ok(todos)
    }

    pub async fn get(&self, id: u64) -> TodoResult<Todo> {
        self.store.get(id).await?.ok_or(TodoError::NotFound)
    }

    /// Replaces the content of `id`. Content is validated before the lookup,
    /// so an invalid body never touches storage.
    pub async fn update(&self, id: u64, content: Option<String>) -> TodoResult<Todo> {
        let content = require_content(content)?;
        let todo = self
            .store
            .update_content(id, &content, Utc::now())
            .await?
            .ok_or(TodoError::NotFound)?;
        info!(id, "todo updated");
        Ok(todo)
    }

    pub async fn delete(&self, id: u64) -> TodoResult<Todo> {
        let todo = self.store.remove(id).await?.ok_or(TodoError::NotFound)?;
        info!(id, "todo deleted");
        Ok(todo)
    }

    /// Removes every todo and returns how many were removed.
    pub async fn delete_all(&self) -> TodoResult<u64> {
        let removed = self.store.clear().await?;
        info!(removed, "all todos deleted");
        Ok(removed)
    }
}

/// Accepts only present, non-empty content.
pub(crate) fn require_content(content: Option<String>) -> TodoResult<String> {
    match content {
        Some(content) if !content.is_empty() => Ok(content),
        _ => Err(TodoError::missing_content()),
    }
}
