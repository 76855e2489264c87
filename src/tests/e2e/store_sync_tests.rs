use crate::modules::events::adapters::outbound::local_storage::LocalStorageBackend;
use crate::modules::events::core::category::Category;
use crate::modules::events::core::event::EventDraft;
use crate::modules::events::store::events_store::{EventsStore, StoreSnapshot};
use crate::modules::events::store::snapshot_cache::SnapshotCache;
use crate::modules::events::store::sync_worker::{SyncHandle, spawn_default_sync};
use crate::shared::infrastructure::change_channel::ChangeChannel;
use crate::shared::infrastructure::change_channel::broadcast::BroadcastChannel;
use crate::shared::infrastructure::key_value_storage::KeyValueStorage;
use crate::shared::infrastructure::key_value_storage::file::FileStorage;
use crate::shared::infrastructure::key_value_storage::in_memory::InMemoryStorage;
use std::sync::Arc;
use std::time::Duration;

const SHARED_KEY: &str = "ngo-calendar-shared-events";
const WAIT: Duration = Duration::from_secs(2);

fn open_tab(
    storage: Arc<dyn KeyValueStorage>,
    channel: Arc<dyn ChangeChannel>,
    origin: &str,
) -> (Arc<EventsStore>, SyncHandle) {
    let backend = LocalStorageBackend::new(storage.clone(), SHARED_KEY)
        .with_changes(channel.clone(), origin);
    let cache = SnapshotCache::new(storage).with_changes(channel.clone());
    let store = Arc::new(
        EventsStore::new(Arc::new(backend))
            .with_cache(cache)
            .with_origin(origin),
    );
    let handle = spawn_default_sync(store.clone(), Some(channel.subscribe()));
    (store, handle)
}

async fn wait_until(store: &EventsStore, done: impl FnMut(&StoreSnapshot) -> bool) {
    let mut updates = store.subscribe();
    tokio::time::timeout(WAIT, updates.wait_for(done))
        .await
        .expect("tab did not sync in time")
        .expect("store dropped");
}

#[tokio::test]
async fn two_tabs_on_one_device_see_each_others_writes() {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn KeyValueStorage> =
        Arc::new(FileStorage::open(dir.path()).await.unwrap());
    let channel: Arc<dyn ChangeChannel> = Arc::new(BroadcastChannel::default());
    let (tab_a, _sync_a) = open_tab(storage.clone(), channel.clone(), "tab-a");
    let (tab_b, _sync_b) = open_tab(storage, channel, "tab-b");
    tab_a.initialize().await.unwrap();
    tab_b.initialize().await.unwrap();

    let added = tab_a
        .add(EventDraft::new(
            "Health Camp",
            "2025-07-10".parse().unwrap(),
            Category::Awareness,
        ))
        .await
        .unwrap();
    wait_until(&tab_b, |s| s.events.len() == 1).await;
    assert_eq!(tab_b.events(), vec![added.clone()]);

    tab_b.delete(&added.id).await.unwrap();
    wait_until(&tab_a, |s| s.events.is_empty()).await;
}

#[tokio::test]
async fn a_tab_opened_while_storage_is_down_shows_the_cached_events() {
    let dir = tempfile::tempdir().unwrap();
    let cache_storage = Arc::new(FileStorage::open(dir.path()).await.unwrap());
    let shared = Arc::new(InMemoryStorage::new());

    let first = EventsStore::new(Arc::new(LocalStorageBackend::new(shared.clone(), SHARED_KEY)))
        .with_cache(SnapshotCache::new(cache_storage.clone()));
    first.initialize().await.unwrap();
    first
        .add(EventDraft::new(
            "Tree planting",
            "2025-07-11".parse().unwrap(),
            Category::Volunteering,
        ))
        .await
        .unwrap();

    shared.toggle_offline();
    let reopened = EventsStore::new(Arc::new(LocalStorageBackend::new(shared, SHARED_KEY)))
        .with_cache(SnapshotCache::new(cache_storage));

    assert!(reopened.initialize().await.is_err());
    assert_eq!(reopened.events(), first.events());
    assert!(!reopened.is_loading());
}
