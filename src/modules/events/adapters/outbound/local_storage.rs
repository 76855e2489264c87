// Local storage implementation of the PersistenceBackend port.
//
// Purpose
// - Keep the whole collection as one JSON document under a shared key of device storage,
//   for deployments without a server. Every context polls the same key.
//
// Responsibilities
// - Read-modify-write the document on every mutation. Mutations through one backend are
//   serialized, separate backends sharing the key still resolve as last writer wins.
// - After each successful write publish a change notice for the key, so other contexts
//   reconcile without waiting for their next poll.

use crate::modules::events::core::event::Event;
use crate::modules::events::core::ports::{BackendError, PersistenceBackend};
use crate::shared::infrastructure::change_channel::{ChangeChannel, ChangeNotice};
use crate::shared::infrastructure::key_value_storage::KeyValueStorage;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct LocalStorageBackend {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    origin: String,
    changes: Option<Arc<dyn ChangeChannel>>,
    write_lock: Mutex<()>,
}

impl LocalStorageBackend {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            origin: uuid::Uuid::now_v7().to_string(),
            changes: None,
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_changes(mut self, changes: Arc<dyn ChangeChannel>, origin: impl Into<String>) -> Self {
        self.changes = Some(changes);
        self.origin = origin.into();
        self
    }

    async fn read(&self) -> Result<Vec<Event>, BackendError> {
        let raw = self
            .storage
            .get(&self.key)
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        match raw {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| BackendError::Unavailable(format!("corrupt document at {}: {e}", self.key))),
        }
    }

    async fn write(&self, events: &[Event]) -> Result<(), BackendError> {
        let raw = serde_json::to_string(events)
            .map_err(|e| BackendError::WriteFailed(e.to_string()))?;
        self.storage
            .set(&self.key, &raw)
            .await
            .map_err(|e| BackendError::WriteFailed(e.to_string()))?;
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        if let Some(changes) = &self.changes {
            changes.publish(ChangeNotice {
                key: self.key.clone(),
                origin: self.origin.clone(),
            });
        }
    }
}

#[async_trait::async_trait]
impl PersistenceBackend for LocalStorageBackend {
    async fn fetch_all(&self) -> Result<Vec<Event>, BackendError> {
        self.read().await
    }

    async fn append(&self, event: Event) -> Result<Event, BackendError> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.read().await.map_err(BackendError::into_write_failure)?;
        events.push(event.clone());
        self.write(&events).await?;
        Ok(event)
    }

    async fn replace_all(&self, events: Vec<Event>) -> Result<(), BackendError> {
        let _guard = self.write_lock.lock().await;
        self.write(&events).await
    }

    async fn remove(&self, id: &str) -> Result<(), BackendError> {
        let _guard = self.write_lock.lock().await;
        let mut events = self.read().await.map_err(BackendError::into_write_failure)?;
        events.retain(|event| event.id != id);
        self.write(&events).await
    }

    async fn clear(&self) -> Result<(), BackendError> {
        // A missing document reads as an empty collection.
        let _guard = self.write_lock.lock().await;
        self.storage
            .remove(&self.key)
            .await
            .map_err(|e| BackendError::WriteFailed(e.to_string()))?;
        self.notify();
        Ok(())
    }
}
