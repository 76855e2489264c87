// Client-side events store.
//
// Purpose
// - Hold the calendar collection a client context renders, and keep it in step with the
//   configured backend.
//
// Responsibilities
// - Apply mutations optimistically, then confirm them against the backend.
//   A failed add is rolled back. A failed update stays local. A failed delete refetches.
// - Fall back to the offline snapshot cache when the first load fails.
// - Mirror local mutations into the cache and react to change notices from other contexts.
// - Publish every state change through a watch channel.
//
// Boundaries
// - No lock is held across an await. Two operations in flight resolve last-writer-wins.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::watch;

use crate::modules::events::core::category::Category;
use crate::modules::events::core::event::{self, Event, EventDraft, ValidationError};
use crate::modules::events::core::filters;
use crate::modules::events::core::patch::EventPatch;
use crate::modules::events::core::ports::{BackendError, PersistenceBackend};
use crate::modules::events::store::snapshot_cache::SnapshotCache;
use crate::shared::infrastructure::change_channel::ChangeNotice;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub events: Vec<Event>,
    pub is_loading: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub struct EventsStore {
    backend: Arc<dyn PersistenceBackend>,
    cache: Option<SnapshotCache>,
    origin: String,
    state: watch::Sender<StoreSnapshot>,
}

impl EventsStore {
    /// A new store reports loading until `initialize` settles.
    pub fn new(backend: Arc<dyn PersistenceBackend>) -> Self {
        let (state, _) = watch::channel(StoreSnapshot {
            events: Vec::new(),
            is_loading: true,
        });
        Self {
            backend,
            cache: None,
            origin: uuid::Uuid::now_v7().to_string(),
            state,
        }
    }

    pub fn with_cache(mut self, cache: SnapshotCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Identifies this store on the change channel.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// First load. A failed fetch falls back to the cached snapshot and is still reported.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.state.send_modify(|s| s.is_loading = true);

        match self.backend.fetch_all().await {
            Ok(events) => {
                tracing::info!(count = events.len(), "events store initialized");
                self.state.send_modify(|s| {
                    s.events = events.clone();
                    s.is_loading = false;
                });
                self.save_cache(&events).await;
                Ok(())
            }
            Err(err) => {
                let cached = match &self.cache {
                    Some(cache) => cache.load().await,
                    None => None,
                };
                tracing::warn!(
                    error = %err,
                    cached = cached.as_ref().map_or(0, Vec::len),
                    "initial load failed, using cached snapshot"
                );
                self.state.send_modify(|s| {
                    if let Some(events) = cached {
                        s.events = events;
                    }
                    s.is_loading = false;
                });
                Err(err.into())
            }
        }
    }

    /// Unconditionally adopts the backend collection. Keeps the snapshot on failure.
    pub async fn reconcile(&self) -> Result<(), StoreError> {
        let events = self.backend.fetch_all().await?;
        let unchanged = self.state.borrow().events == events;
        if unchanged {
            return Ok(());
        }
        tracing::debug!(count = events.len(), "reconciled events from backend");
        self.state.send_modify(|s| s.events = events.clone());
        self.save_cache(&events).await;
        Ok(())
    }

    pub async fn add(&self, draft: EventDraft) -> Result<Event, StoreError> {
        let event = draft.into_event()?;
        self.state.send_modify(|s| s.events.push(event.clone()));

        match self.backend.append(event.clone()).await {
            Ok(stored) => {
                self.state.send_modify(|s| {
                    if let Some(slot) = s.events.iter_mut().rev().find(|e| e.id == event.id) {
                        *slot = stored.clone();
                    }
                });
                let events = self.events();
                self.save_cache(&events).await;
                tracing::info!(event_id = %stored.id, "event added");
                Ok(stored)
            }
            Err(err) => {
                self.state.send_modify(|s| {
                    if let Some(index) = s.events.iter().rposition(|e| e.id == event.id) {
                        s.events.remove(index);
                    }
                });
                tracing::warn!(event_id = %event.id, error = %err, "add rolled back");
                Err(err.into())
            }
        }
    }

    /// Merges `patch` into the event with `id`. `Ok(None)` when no such event is held.
    pub async fn update(&self, id: &str, patch: EventPatch) -> Result<Option<Event>, StoreError> {
        let current = self.state.borrow().events.iter().find(|e| e.id == id).cloned();
        let Some(current) = current else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(current));
        }
        let merged = patch.merged_into(&current);
        merged.validate()?;

        self.state.send_modify(|s| {
            if let Some(slot) = s.events.iter_mut().find(|e| e.id == id) {
                *slot = merged.clone();
            }
        });
        let events = self.events();
        self.save_cache(&events).await;

        self.backend.replace_all(events).await?;
        tracing::info!(event_id = %id, "event updated");
        Ok(Some(merged))
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.state.send_modify(|s| s.events.retain(|e| e.id != id));
        let events = self.events();
        self.save_cache(&events).await;

        if let Err(err) = self.backend.remove(id).await {
            tracing::warn!(event_id = %id, error = %err, "delete failed, refetching");
            match self.backend.fetch_all().await {
                Ok(events) => {
                    self.state.send_modify(|s| s.events = events.clone());
                    self.save_cache(&events).await;
                }
                Err(refetch) => tracing::warn!(error = %refetch, "refetch after failed delete failed"),
            }
            return Err(err.into());
        }
        tracing::info!(event_id = %id, "event deleted");
        Ok(())
    }

    pub async fn clear_all(&self) -> Result<(), StoreError> {
        self.state.send_modify(|s| s.events.clear());
        self.save_cache(&[]).await;
        self.backend.clear().await?;
        tracing::info!("events cleared");
        Ok(())
    }

    /// Reacts to a write made by another context.
    pub async fn apply_change(&self, notice: &ChangeNotice) -> Result<(), StoreError> {
        if notice.origin == self.origin {
            return Ok(());
        }
        match &self.cache {
            Some(cache) if cache.key() == notice.key => {
                if let Some(events) = cache.load().await {
                    tracing::debug!(origin = %notice.origin, "reloaded events from cache");
                    self.state.send_modify(|s| s.events = events);
                }
                Ok(())
            }
            _ => self.reconcile().await,
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state.subscribe()
    }

    /// Events on `day`, optionally of one category.
    pub fn events_on(&self, day: NaiveDate, category: Option<Category>) -> Vec<Event> {
        let events = filters::in_category(&self.state.borrow().events, category);
        filters::events_on(&events, day)
    }

    pub fn upcoming(&self, today: NaiveDate, category: Option<Category>) -> Vec<Event> {
        let events = filters::in_category(&self.state.borrow().events, category);
        filters::upcoming(&events, today)
    }

    pub fn upcoming_from_today(&self, category: Option<Category>) -> Vec<Event> {
        self.upcoming(event::today(), category)
    }

    async fn save_cache(&self, events: &[Event]) {
        if let Some(cache) = &self.cache {
            cache.save(events, &self.origin).await;
        }
    }
}
