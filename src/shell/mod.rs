// Composition root for the events service.
//
// Responsibilities
// - Read config from environment.
// - Instantiate the one persistence backend of this deployment.
// - Wire it into the use case handlers and the HTTP router.

pub mod config;
pub mod http;
pub mod state;

use std::sync::Arc;

use crate::modules::events::adapters::outbound::in_memory::InMemoryBackend;
use crate::modules::events::adapters::outbound::json_document::JsonDocumentBackend;
use crate::modules::events::adapters::outbound::local_storage::LocalStorageBackend;
use crate::modules::events::core::ports::PersistenceBackend;
use crate::shared::infrastructure::key_value_storage::StorageError;
use crate::shared::infrastructure::key_value_storage::file::FileStorage;
use config::BackendConfig;

pub async fn build_backend(
    config: &BackendConfig,
) -> Result<Arc<dyn PersistenceBackend>, StorageError> {
    let backend: Arc<dyn PersistenceBackend> = match config {
        BackendConfig::Memory => {
            tracing::info!("using the in-memory backend, events are lost on restart");
            Arc::new(InMemoryBackend::new())
        }
        BackendConfig::JsonBin(jsonbin) => {
            tracing::info!(base_url = %jsonbin.base_url, "using the remote document backend");
            Arc::new(JsonDocumentBackend::new(
                jsonbin.resource(),
                jsonbin.api_key.clone(),
            ))
        }
        BackendConfig::Local { data_dir, key } => {
            let storage = FileStorage::open(data_dir.clone()).await?;
            tracing::info!(dir = %data_dir.display(), key = %key, "using the local file backend");
            Arc::new(LocalStorageBackend::new(Arc::new(storage), key.clone()))
        }
    };
    Ok(backend)
}
