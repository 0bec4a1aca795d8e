//! Identifier allocation for new todos.
//!
//! # Design
//! `IdAllocator` owns no state of its own; it forwards to the store's
//! atomic increment-and-fetch for one named sequence. Concurrent callers
//! therefore receive distinct, strictly increasing values regardless of how
//! many server tasks share the store.

use std::sync::Arc;

use tracing::debug;

use crate::model::PLAN_ID_SEQUENCE;
use crate::store::{Store, StoreResult};

#[derive(Debug, Clone)]
pub struct IdAllocator {
    store: Arc<dyn Store>,
    sequence: String,
}

impl IdAllocator {
    /// Allocator bound to the `planId` sequence.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::with_sequence(store, PLAN_ID_SEQUENCE)
    }

    pub fn with_sequence(store: Arc<dyn Store>, sequence: impl Into<String>) -> Self {
        Self {
            store,
            sequence: sequence.into(),
        }
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Returns the next id. The first call for a fresh sequence returns 1.
    pub async fn allocate(&self) -> StoreResult<u64> {
        let id = self.store.next_sequence(&self.sequence).await?;
        debug!(sequence = %self.sequence, id, "allocated id");
        Ok(id)
    }
}
