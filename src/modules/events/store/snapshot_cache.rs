// Offline copy of the store's last known collection.
//
// Purpose
// - Give a store something to show when the backend cannot be reached at start-up.
//
// Responsibilities
// - Keep the collection as one JSON document under a single storage key.
// - Announce every successful save on the change channel, tagged with the writer's origin.
// - Never fail the caller. Storage and decoding errors are logged and swallowed.

use std::sync::Arc;

use crate::modules::events::core::event::Event;
use crate::shared::infrastructure::change_channel::{ChangeChannel, ChangeNotice};
use crate::shared::infrastructure::key_value_storage::KeyValueStorage;

pub const DEFAULT_CACHE_KEY: &str = "ngo-calendar-events";

#[derive(Clone)]
pub struct SnapshotCache {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    changes: Option<Arc<dyn ChangeChannel>>,
}

impl SnapshotCache {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            key: DEFAULT_CACHE_KEY.to_string(),
            changes: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_changes(mut self, changes: Arc<dyn ChangeChannel>) -> Self {
        self.changes = Some(changes);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The cached collection, or `None` when nothing usable is stored.
    pub async fn load(&self) -> Option<Vec<Event>> {
        let raw = match self.storage.get(&self.key).await {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "reading snapshot cache failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(events) => Some(events),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "snapshot cache is corrupt");
                None
            }
        }
    }

    pub async fn save(&self, events: &[Event], origin: &str) {
        let raw = match serde_json::to_string(events) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "encoding snapshot cache failed");
                return;
            }
        };
        if let Err(err) = self.storage.set(&self.key, &raw).await {
            tracing::warn!(key = %self.key, error = %err, "writing snapshot cache failed");
            return;
        }
        if let Some(changes) = &self.changes {
            changes.publish(ChangeNotice {
                key: self.key.clone(),
                origin: origin.to_string(),
            });
        }
    }
}
