// Local key-value storage port.
//
// Purpose
// - Device-local string storage keyed by name, the equivalent of browser local storage.
//   The events store keeps its offline cache here and the local backend its collection.
//
// Implementations
// - file: one file per key inside a directory, survives restarts.
// - in_memory: process-local, for tests and ephemeral contexts.

pub mod file;
pub mod in_memory;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
