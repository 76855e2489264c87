use crate::modules::events::core::event::{Event, ValidationError};
use crate::modules::events::core::ports::PersistenceBackend;
use crate::modules::events::use_cases::errors::ApplicationError;
use std::collections::HashSet;
use std::sync::Arc;

pub struct ReplaceEventsHandler<TBackend>
where
    TBackend: PersistenceBackend + ?Sized + 'static,
{
    backend: Arc<TBackend>,
}

impl<TBackend> ReplaceEventsHandler<TBackend>
where
    TBackend: PersistenceBackend + ?Sized + 'static,
{
    pub fn new(backend: Arc<TBackend>) -> Self {
        Self { backend }
    }

    /// Overwrites the collection after checking every record and id uniqueness.
    pub async fn handle(&self, events: Vec<Event>) -> Result<Vec<Event>, ApplicationError> {
        check_collection(&events)?;
        self.backend.replace_all(events.clone()).await?;
        tracing::info!(count = events.len(), "events replaced");
        Ok(events)
    }
}

fn check_collection(events: &[Event]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        event.validate()?;
        if !seen.insert(event.id.as_str()) {
            return Err(ValidationError::DuplicateId(event.id.clone()));
        }
    }
    Ok(())
}
