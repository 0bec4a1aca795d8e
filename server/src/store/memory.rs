use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use super::{Store, StoreError, StoreResult};
use crate::model::Todo;

/// In-process document store. Todos are kept in id order; counters live
/// behind their own lock so allocation never waits on todo reads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: RwLock<BTreeMap<u64, Todo>>,
    counters: Mutex<HashMap<String, u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn next_sequence(&self, name: &str) -> StoreResult<u64> {
        let mut counters = self.counters.lock().await;
        let seq = counters.entry(name.to_string()).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }

    async fn insert(&self, todo: Todo) -> StoreResult<Todo> {
        let mut todos = self.todos.write().await;
        if todos.contains_key(&todo.id) {
            return Err(StoreError::Duplicate(todo.id));
        }
        todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn list(&self) -> StoreResult<Vec<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.values().cloned().collect())
    }

    async fn get(&self, id: u64) -> StoreResult<Option<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.get(&id).cloned())
    }

    async fn update_content(
        &self,
        id: u64,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Todo>> {
        let mut todos = self.todos.write().await;
        Ok(todos.get_mut(&id).map(|todo| {
            todo.content = content.to_string();
            todo.updated_at = updated_at;
            todo.clone()
        }))
    }

    async fn remove(&self, id: u64) -> StoreResult<Option<Todo>> {
        let mut todos = self.todos.write().await;
        Ok(todos.remove(&id))
    }

    async fn clear(&self) -> StoreResult<u64> {
        let mut todos = self.todos.write().await;
        let removed = todos.len() as u64;
        todos.clear();
        Ok(removed)
    }
}
