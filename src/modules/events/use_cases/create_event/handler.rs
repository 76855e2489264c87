use crate::modules::events::core::event::{Event, EventDraft};
use crate::modules::events::core::ports::PersistenceBackend;
use crate::modules::events::use_cases::errors::ApplicationError;
use std::sync::Arc;

pub struct CreateEventHandler<TBackend>
where
    TBackend: PersistenceBackend + ?Sized + 'static,
{
    backend: Arc<TBackend>,
}

impl<TBackend> CreateEventHandler<TBackend>
where
    TBackend: PersistenceBackend + ?Sized + 'static,
{
    pub fn new(backend: Arc<TBackend>) -> Self {
        Self { backend }
    }

    /// Validates the draft, keeps a client-supplied id when it is not taken yet,
    /// otherwise assigns one, and appends the record.
    pub async fn handle(&self, draft: EventDraft) -> Result<Event, ApplicationError> {
        let supplied_id = draft.id.is_some();
        let event = draft.into_event()?;

        if supplied_id {
            let existing = self.backend.fetch_all().await?;
            if existing.iter().any(|e| e.id == event.id) {
                return Err(ApplicationError::AlreadyExists(event.id));
            }
        }

        let stored = self.backend.append(event).await?;
        tracing::info!(event_id = %stored.id, title = %stored.title, "event created");
        Ok(stored)
    }
}
