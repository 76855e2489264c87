use crate::modules::events::adapters::outbound::http_api::HttpApiBackend;
use crate::modules::events::adapters::outbound::in_memory::InMemoryBackend;
use crate::modules::events::adapters::outbound::json_document::JsonDocumentBackend;
use crate::modules::events::core::category::Category;
use crate::modules::events::core::event::EventDraft;
use crate::modules::events::core::patch::EventPatch;
use crate::modules::events::core::ports::{BackendError, PersistenceBackend};
use crate::modules::events::store::events_store::{EventsStore, StoreError};
use crate::shell::http::router;
use crate::shell::state::AppState;
use crate::tests::fixtures::events::event_builder::make_event;
use crate::tests::fixtures::http::{FakeDocument, serve};
use serde_json::json;
use std::sync::Arc;

fn draft(title: &str, date: &str) -> EventDraft {
    EventDraft::new(title, date.parse().unwrap(), Category::Awareness)
}

async fn serve_events_api(backend: Arc<dyn PersistenceBackend>) -> String {
    serve(router(AppState::new(backend))).await
}

#[tokio::test]
async fn a_store_adds_and_deletes_through_the_events_endpoint() {
    let server_backend = Arc::new(InMemoryBackend::new());
    let base_url = serve_events_api(server_backend.clone()).await;
    let store = EventsStore::new(Arc::new(HttpApiBackend::new(&base_url)));
    store.initialize().await.unwrap();
    assert!(store.events().is_empty());

    let health_camp = store.add(draft("Health Camp", "2025-07-10")).await.unwrap();
    assert_eq!(store.events().len(), 1);
    assert_eq!(store.events()[0].title, "Health Camp");

    let tree_planting = store.add(draft("Tree planting", "2025-07-11")).await.unwrap();
    assert_ne!(health_camp.id, tree_planting.id);
    assert_eq!(server_backend.fetch_all().await.unwrap(), store.events());

    store.delete(&health_camp.id).await.unwrap();

    assert_eq!(store.events(), vec![tree_planting.clone()]);
    assert_eq!(server_backend.fetch_all().await.unwrap(), vec![tree_planting]);
}

#[tokio::test]
async fn a_store_updates_and_clears_through_the_events_endpoint() {
    let server_backend = Arc::new(InMemoryBackend::with_events(vec![
        make_event("e-1", "Health Camp", "2025-07-10"),
        make_event("e-2", "Tree planting", "2025-07-11"),
    ]));
    let base_url = serve_events_api(server_backend.clone()).await;
    let store = EventsStore::new(Arc::new(HttpApiBackend::new(&base_url)));
    store.initialize().await.unwrap();

    let patch = EventPatch {
        category: Some(Category::Volunteering),
        ..EventPatch::default()
    };
    store.update("e-2", patch).await.unwrap();
    assert_eq!(
        server_backend.fetch_all().await.unwrap()[1].category,
        Category::Volunteering
    );

    store.clear_all().await.unwrap();
    store.clear_all().await.unwrap();
    assert!(server_backend.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn a_rejected_write_is_rolled_back_in_the_store() {
    let server_backend = Arc::new(InMemoryBackend::new());
    let base_url = serve_events_api(server_backend.clone()).await;
    let store = EventsStore::new(Arc::new(HttpApiBackend::new(&base_url)));
    store.initialize().await.unwrap();
    let before = store.snapshot();
    server_backend.toggle_reject_writes();

    let result = store.add(draft("Health Camp", "2025-07-10")).await;

    assert!(matches!(
        result,
        Err(StoreError::Backend(BackendError::WriteFailed(_)))
    ));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn the_events_endpoint_persists_to_a_remote_document() {
    let document = FakeDocument::without_record();
    let document_url = serve(document.router("master-key")).await;
    let resource = format!("{document_url}/b/bin-0001");
    let backend = JsonDocumentBackend::new(resource, "master-key");
    let base_url = serve_events_api(Arc::new(backend)).await;
    let client = reqwest::Client::new();

    let created: serde_json::Value = client
        .post(format!("{base_url}/events"))
        .json(&json!({
            "title": "Health Camp",
            "date": "2025-07-10",
            "category": "Awareness"
        }))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let record = document.record().await;
    assert_eq!(record.as_array().unwrap().len(), 1);
    assert_eq!(record[0]["id"], id.as_str());
    assert_eq!(record[0]["isMultiDay"], false);

    let listed: serde_json::Value = client
        .get(format!("{base_url}/events?date=2025-07-10"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, record);

    let deleted = client
        .delete(format!("{base_url}/events"))
        .json(&json!({ "eventId": id }))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), reqwest::StatusCode::OK);
    assert_eq!(document.record().await, json!([]));
    assert_eq!(document.put_count(), 2);
}

#[tokio::test]
async fn the_events_endpoint_reports_an_unreachable_document_as_500() {
    let document = FakeDocument::with_record(json!([]));
    let document_url = serve(document.router("master-key")).await;
    let resource = format!("{document_url}/b/bin-0001");
    let backend = JsonDocumentBackend::new(resource, "wrong-key");
    let base_url = serve_events_api(Arc::new(backend)).await;

    let response = reqwest::get(format!("{base_url}/events")).await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Internal server error" }));
}
