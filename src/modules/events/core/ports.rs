// Ports define what the events core needs from a persistence backend, without implementing it.
//
// Purpose
// - Describe the one CRUD contract every backend satisfies: in memory, remote JSON document,
//   local storage, or the events HTTP API.
//
// Boundaries
// - No concrete input or output here. Adapters implement this trait in adapters/outbound.
//
// Failure semantics
// - `Unavailable` is a failed read. Callers keep their last known snapshot, never assume empty.
// - `WriteFailed` is a rejected or unreachable mutation.

use async_trait::async_trait;
use thiserror::Error;

use crate::modules::events::core::event::Event;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("backend write failed: {0}")]
    WriteFailed(String),
}

impl BackendError {
    /// Re-labels a failed read that happened as part of a write.
    pub fn into_write_failure(self) -> Self {
        match self {
            BackendError::Unavailable(reason) => BackendError::WriteFailed(reason),
            other => other,
        }
    }
}

#[async_trait]
pub trait PersistenceBackend: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Event>, BackendError>;

    /// Stores one record and returns it with its identity unchanged.
    async fn append(&self, event: Event) -> Result<Event, BackendError>;

    /// Overwrites the whole collection.
    async fn replace_all(&self, events: Vec<Event>) -> Result<(), BackendError>;

    async fn clear(&self) -> Result<(), BackendError> {
        self.replace_all(Vec::new()).await
    }

    /// Refetches, filters out `id` and writes the rest back.
    async fn remove(&self, id: &str) -> Result<(), BackendError> {
        let current = self
            .fetch_all()
            .await
            .map_err(BackendError::into_write_failure)?;
        let remaining = current.into_iter().filter(|e| e.id != id).collect();
        self.replace_all(remaining).await
    }
}
