// In memory implementation of the PersistenceBackend port.
//
// Purpose
// - Volatile backend for the events service when no remote document is configured,
//   and the default backend in tests.
//
// Responsibilities
// - Keep the collection in insertion order behind an async lock.
// - Lose everything on process restart. The instance is owned by whoever constructs it.
// - Offer offline and read-only switches so callers can exercise their failure paths.

use crate::modules::events::core::event::Event;
use crate::modules::events::core::ports::{BackendError, PersistenceBackend};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryBackend {
    events: RwLock<Vec<Event>>,
    is_offline: AtomicBool,
    rejects_writes: AtomicBool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(events),
            ..Self::default()
        }
    }

    /// Reads and writes fail while offline.
    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Writes fail, reads keep working.
    pub fn toggle_reject_writes(&self) {
        self.rejects_writes.fetch_xor(true, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<(), BackendError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("In-memory backend offline".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), BackendError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(BackendError::WriteFailed("In-memory backend offline".into()));
        }
        if self.rejects_writes.load(Ordering::SeqCst) {
            return Err(BackendError::WriteFailed(
                "In-memory backend rejects writes".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PersistenceBackend for InMemoryBackend {
    async fn fetch_all(&self) -> Result<Vec<Event>, BackendError> {
        self.check_read()?;
        Ok(self.events.read().await.clone())
    }

    async fn append(&self, event: Event) -> Result<Event, BackendError> {
        self.check_write()?;
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn replace_all(&self, events: Vec<Event>) -> Result<(), BackendError> {
        self.check_write()?;
        *self.events.write().await = events;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), BackendError> {
        self.check_write()?;
        self.events.write().await.retain(|e| e.id != id);
        Ok(())
    }
}
