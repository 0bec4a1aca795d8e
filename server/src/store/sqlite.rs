//! SQLite-backed store.
//!
//! # Design
//! One connection guarded by a mutex; every call runs on tokio's blocking
//! pool. Schema is created on open. The id counter is advanced with a single
//! `INSERT .. ON CONFLICT DO UPDATE .. RETURNING` statement, which SQLite
//! executes atomically.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{error, info};

use super::{Store, StoreError, StoreResult};
use crate::model::Todo;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS todos (
    id         INTEGER PRIMARY KEY,
    content    TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS counters (
    name TEXT PRIMARY KEY,
    seq  INTEGER NOT NULL
);";

const NEXT_SEQUENCE_SQL: &str = "INSERT INTO counters (name, seq) VALUES (?1, 1)
     ON CONFLICT(name) DO UPDATE SET seq = seq + 1
     RETURNING seq";

const TODO_COLUMNS: &str = "id, content, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        let conn = Connection::open(path).map_err(|err| {
            error!(path = %path.display(), error = %err, "failed to open sqlite store");
            err
        })?;
        let store = Self::bootstrap(conn)?;
        info!(
            path = %path.display(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "sqlite store opened"
        );
        Ok(store)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("sqlite connection poisoned".to_string()))?;
            f(&guard).map_err(StoreError::from)
        })
        .await
        .map_err(|err| StoreError::Unavailable(err.to_string()))?
    }
}

// Ids and counters are stored as SQLite's signed INTEGER.
fn id_to_sql(id: u64) -> rusqlite::Result<i64> {
    i64::try_from(id).map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))
}

/// Lookup key for `id`, or `None` when no stored row can carry it.
fn lookup_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

fn id_from_sql(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let raw: i64 = row.get(idx)?;
    u64::try_from(raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(err)))
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: id_from_sql(row, 0)?,
        content: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}

#[async_trait]
impl Store for SqliteStore {
    async fn next_sequence(&self, name: &str) -> StoreResult<u64> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            conn.query_row(NEXT_SEQUENCE_SQL, params![name], |row| id_from_sql(row, 0))
        })
        .await
    }

    async fn insert(&self, todo: Todo) -> StoreResult<Todo> {
        let id = todo.id;
        let result = self
            .with_conn(move |conn| {
                conn.execute(
                    "INSERT INTO todos (id, content, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
                    params![id_to_sql(todo.id)?, todo.content, todo.created_at, todo.updated_at],
                )?;
                Ok(todo)
            })
            .await;
        match result {
            Err(StoreError::Sqlite(rusqlite::Error::SqliteFailure(err, _)))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::Duplicate(id))
            }
            other => other,
        }
    }

    async fn list(&self) -> StoreResult<Vec<Todo>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id"))?;
            let rows = stmt.query_map([], todo_from_row)?;
            rows.collect()
        })
        .await
    }

    async fn get(&self, id: u64) -> StoreResult<Option<Todo>> {
        let Some(id) = lookup_id(id) else {
            return Ok(None);
        };
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
                params![id],
                todo_from_row,
            )
            .optional()
        })
        .await
    }

    async fn update_content(
        &self,
        id: u64,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<Todo>> {
        let Some(id) = lookup_id(id) else {
            return Ok(None);
        };
        let content = content.to_string();
        self.with_conn(move |conn| {
            conn.query_row(
                &format!(
                    "UPDATE todos SET content = ?1, updated_at = ?2 WHERE id = ?3 RETURNING {TODO_COLUMNS}"
                ),
                params![content, updated_at, id],
                todo_from_row,
            )
            .optional()
        })
        .await
    }

    async fn remove(&self, id: u64) -> StoreResult<Option<Todo>> {
        let Some(id) = lookup_id(id) else {
            return Ok(None);
        };
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("DELETE FROM todos WHERE id = ?1 RETURNING {TODO_COLUMNS}"),
                params![id],
                todo_from_row,
            )
            .optional()
        })
        .await
    }

    async fn clear(&self) -> StoreResult<u64> {
        self.with_conn(|conn| conn.execute("DELETE FROM todos", []).map(|n| n as u64))
            .await
    }
}
