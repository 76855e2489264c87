// Remote JSON document implementation of the PersistenceBackend port (jsonbin.io compatible).
//
// Purpose
// - Persist the collection as one JSON array in a hosted document, so the events service
//   survives restarts without running a database.
//
// Responsibilities
// - fetch_all: GET {resource}/latest and read the `record` field (missing means empty).
// - append and remove: GET latest, modify, PUT the whole array back. Two writers can race and
//   the later PUT wins silently. There is no partial update primitive.
// - replace_all: PUT the array.
// - Authenticate every call with the `X-Master-Key` header.

use crate::modules::events::core::event::Event;
use crate::modules::events::core::ports::{BackendError, PersistenceBackend};
use reqwest::Client;
use serde::Deserialize;

const ACCESS_KEY_HEADER: &str = "X-Master-Key";

#[derive(Deserialize)]
struct LatestDocument {
    #[serde(default)]
    record: Option<Vec<Event>>,
}

pub struct JsonDocumentBackend {
    client: Client,
    resource: String,
    access_key: String,
}

impl JsonDocumentBackend {
    /// `resource` is the document URL, e.g. `https://api.jsonbin.io/v3/b/<bin id>`.
    pub fn new(resource: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            resource: resource.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
        }
    }

    async fn get_latest(&self) -> Result<Vec<Event>, BackendError> {
        let unavailable = |e: reqwest::Error| BackendError::Unavailable(e.to_string());
        let document: LatestDocument = self
            .client
            .get(format!("{}/latest", self.resource))
            .header(ACCESS_KEY_HEADER, &self.access_key)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;
        Ok(document.record.unwrap_or_default())
    }

    async fn put(&self, events: &[Event]) -> Result<(), BackendError> {
        let write_failed = |e: reqwest::Error| BackendError::WriteFailed(e.to_string());
        self.client
            .put(&self.resource)
            .header(ACCESS_KEY_HEADER, &self.access_key)
            .json(events)
            .send()
            .await
            .map_err(write_failed)?
            .error_for_status()
            .map_err(write_failed)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl PersistenceBackend for JsonDocumentBackend {
    async fn fetch_all(&self) -> Result<Vec<Event>, BackendError> {
        self.get_latest().await
    }

    async fn append(&self, event: Event) -> Result<Event, BackendError> {
        let mut events = self
            .get_latest()
            .await
            .map_err(BackendError::into_write_failure)?;
        events.push(event.clone());
        self.put(&events).await?;
        Ok(event)
    }

    async fn replace_all(&self, events: Vec<Event>) -> Result<(), BackendError> {
        self.put(&events).await
    }
}
