use crate::modules::events::core::ports::PersistenceBackend;
use crate::modules::events::use_cases::create_event::handler::CreateEventHandler;
use crate::modules::events::use_cases::replace_events::handler::ReplaceEventsHandler;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn PersistenceBackend>,
    pub create_handler: Arc<CreateEventHandler<dyn PersistenceBackend>>,
    pub replace_handler: Arc<ReplaceEventsHandler<dyn PersistenceBackend>>,
}

impl AppState {
    /// Wires every use case to the one backend of this deployment.
    pub fn new(backend: Arc<dyn PersistenceBackend>) -> Self {
        Self {
            create_handler: Arc::new(CreateEventHandler::new(backend.clone())),
            replace_handler: Arc::new(ReplaceEventsHandler::new(backend.clone())),
            backend,
        }
    }
}
