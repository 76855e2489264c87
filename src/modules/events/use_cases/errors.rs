use crate::modules::events::core::event::ValidationError;
use crate::modules::events::core::ports::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("domain rejected: {0}")]
    Domain(#[from] ValidationError),

    #[error("event already exists: {0}")]
    AlreadyExists(String),
}
