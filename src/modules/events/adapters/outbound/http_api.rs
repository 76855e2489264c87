// HTTP client implementation of the PersistenceBackend port, talking to the events API.
//
// Purpose
// - Let an events store running in a client context persist through the `/events` endpoint.
//
// Responsibilities
// - GET, POST, PUT and DELETE on `{base}/events`, mapping any transport failure or non-2xx
//   status to Unavailable for reads and WriteFailed for writes.
// - Use the endpoint's native DELETE for single-record removal.

use crate::modules::events::core::event::Event;
use crate::modules::events::core::ports::{BackendError, PersistenceBackend};
use reqwest::Client;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteEventRequest<'a> {
    event_id: &'a str,
}

pub struct HttpApiBackend {
    client: Client,
    events_url: String,
}

impl HttpApiBackend {
    /// `base_url` is the service root, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            client: Client::new(),
            events_url: format!("{}/events", base_url.as_ref().trim_end_matches('/')),
        }
    }
}

fn write_failed(e: reqwest::Error) -> BackendError {
    BackendError::WriteFailed(e.to_string())
}

#[async_trait::async_trait]
impl PersistenceBackend for HttpApiBackend {
    async fn fetch_all(&self) -> Result<Vec<Event>, BackendError> {
        let unavailable = |e: reqwest::Error| BackendError::Unavailable(e.to_string());
        self.client
            .get(&self.events_url)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)
    }

    async fn append(&self, event: Event) -> Result<Event, BackendError> {
        self.client
            .post(&self.events_url)
            .json(&event)
            .send()
            .await
            .map_err(write_failed)?
            .error_for_status()
            .map_err(write_failed)?
            .json()
            .await
            .map_err(write_failed)
    }

    async fn replace_all(&self, events: Vec<Event>) -> Result<(), BackendError> {
        self.client
            .put(&self.events_url)
            .json(&events)
            .send()
            .await
            .map_err(write_failed)?
            .error_for_status()
            .map_err(write_failed)?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), BackendError> {
        self.client
            .delete(&self.events_url)
            .json(&DeleteEventRequest { event_id: id })
            .send()
            .await
            .map_err(write_failed)?
            .error_for_status()
            .map_err(write_failed)?;
        Ok(())
    }
}
