//! Event persistence.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use cadence_core::types::{EventId, RepeatGroupId};
use cadence_recur::{EventPayload, Occurrence};
use tokio::sync::RwLock;

use crate::error::{ServiceError, ServiceResult};

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = ServiceResult<T>> + Send + 'a>>;

/// ## Summary
/// Persistence collaborator for occurrences.
///
/// The store is the only place persistent identifiers are minted: every
/// occurrence passed to `insert_batch` receives a fresh `EventId`.
pub trait EventStore: Send + Sync {
    /// All stored events, in insertion order.
    fn list(&self) -> StoreFuture<'_, Vec<Occurrence>>;

    fn get(&self, id: EventId) -> StoreFuture<'_, Option<Occurrence>>;

    /// Stores `events` and returns them with their assigned identifiers.
    fn insert_batch(&self, events: Vec<Occurrence>) -> StoreFuture<'_, Vec<Occurrence>>;

    /// Replaces the stored event with the same id; `None` if it does not exist.
    fn update(&self, event: Occurrence) -> StoreFuture<'_, Option<Occurrence>>;

    /// ## Summary
    /// Replaces every event in `events` atomically.
    ///
    /// Returns `None`, and changes nothing, if any id is unknown.
    fn update_many(&self, events: Vec<Occurrence>) -> StoreFuture<'_, Option<Vec<Occurrence>>>;

    /// Detaches the event from its series in place; `None` if it does not exist.
    fn detach(&self, id: EventId) -> StoreFuture<'_, Option<Occurrence>>;

    /// Returns whether an event was removed.
    fn delete(&self, id: EventId) -> StoreFuture<'_, bool>;

    /// Returns how many of `ids` were removed.
    fn delete_many(&self, ids: Vec<EventId>) -> StoreFuture<'_, usize>;

    fn find_group(&self, group_id: RepeatGroupId) -> StoreFuture<'_, Vec<Occurrence>>;

    /// Overwrites the payload of every current member of the group and
    /// returns the updated members.
    fn update_group(
        &self,
        group_id: RepeatGroupId,
        payload: EventPayload,
    ) -> StoreFuture<'_, Vec<Occurrence>>;

    /// Returns how many members of the group were removed.
    fn delete_group(&self, group_id: RepeatGroupId) -> StoreFuture<'_, usize>;
}

/// ## Summary
/// Array-backed store kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<Vec<Occurrence>>,
}

impl InMemoryEventStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Creates a store pre-populated with `events`.
    ///
    /// Events that already carry an id keep it; the rest get a new one.
    #[must_use]
    pub fn with_events(events: Vec<Occurrence>) -> Self {
        let events = events
            .into_iter()
            .map(|mut event| {
                event.id.get_or_insert_with(EventId::new);
                event
            })
            .collect();
        Self {
            events: RwLock::new(events),
        }
    }
}

impl EventStore for InMemoryEventStore {
    fn list(&self) -> StoreFuture<'_, Vec<Occurrence>> {
        Box::pin(async move { Ok(self.events.read().await.clone()) })
    }

    fn get(&self, id: EventId) -> StoreFuture<'_, Option<Occurrence>> {
        Box::pin(async move {
            Ok(self
                .events
                .read()
                .await
                .iter()
                .find(|event| event.id == Some(id))
                .cloned())
        })
    }

    fn insert_batch(&self, events: Vec<Occurrence>) -> StoreFuture<'_, Vec<Occurrence>> {
        Box::pin(async move {
            let inserted: Vec<Occurrence> = events
                .into_iter()
                .map(|mut event| {
                    event.id = Some(EventId::new());
                    event
                })
                .collect();

            let mut guard = self.events.write().await;
            guard.extend(inserted.iter().cloned());
            tracing::debug!(count = inserted.len(), total = guard.len(), "Inserted events");
            Ok(inserted)
        })
    }

    fn update(&self, event: Occurrence) -> StoreFuture<'_, Option<Occurrence>> {
        Box::pin(async move {
            let Some(id) = event.id else {
                return Err(ServiceError::ValidationError(
                    "cannot update an event without an id".to_string(),
                ));
            };

            let mut guard = self.events.write().await;
            let Some(slot) = guard.iter_mut().find(|stored| stored.id == Some(id)) else {
                return Ok(None);
            };
            *slot = event;
            Ok(Some(slot.clone()))
        })
    }

    fn update_many(&self, events: Vec<Occurrence>) -> StoreFuture<'_, Option<Vec<Occurrence>>> {
        Box::pin(async move {
            let mut ids = Vec::with_capacity(events.len());
            for event in &events {
                let id = event.id.ok_or_else(|| {
                    ServiceError::ValidationError(
                        "every event in a batch update needs an id".to_string(),
                    )
                })?;
                ids.push(id);
            }

            let mut guard = self.events.write().await;
            let mut slots = Vec::with_capacity(ids.len());
            for id in &ids {
                let Some(slot) = guard.iter().position(|stored| stored.id == Some(*id)) else {
                    tracing::debug!(%id, "Batch update references a missing event");
                    return Ok(None);
                };
                slots.push(slot);
            }

            for (slot, event) in slots.into_iter().zip(events.iter()) {
                guard[slot] = event.clone();
            }
            Ok(Some(events))
        })
    }

    fn detach(&self, id: EventId) -> StoreFuture<'_, Option<Occurrence>> {
        Box::pin(async move {
            let mut guard = self.events.write().await;
            Ok(guard
                .iter_mut()
                .find(|stored| stored.id == Some(id))
                .map(|slot| {
                    slot.detach();
                    slot.clone()
                }))
        })
    }

    fn delete(&self, id: EventId) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            let mut guard = self.events.write().await;
            let before = guard.len();
            guard.retain(|event| event.id != Some(id));
            Ok(guard.len() < before)
        })
    }

    fn delete_many(&self, ids: Vec<EventId>) -> StoreFuture<'_, usize> {
        Box::pin(async move {
            let ids: HashSet<EventId> = ids.into_iter().collect();
            let mut guard = self.events.write().await;
            let before = guard.len();
            guard.retain(|event| event.id.is_none_or(|id| !ids.contains(&id)));
            Ok(before - guard.len())
        })
    }

    fn find_group(&self, group_id: RepeatGroupId) -> StoreFuture<'_, Vec<Occurrence>> {
        Box::pin(async move {
            Ok(self
                .events
                .read()
                .await
                .iter()
                .filter(|event| event.group_id() == Some(group_id))
                .cloned()
                .collect())
        })
    }

    fn update_group(
        &self,
        group_id: RepeatGroupId,
        payload: EventPayload,
    ) -> StoreFuture<'_, Vec<Occurrence>> {
        Box::pin(async move {
            let mut guard = self.events.write().await;
            Ok(guard
                .iter_mut()
                .filter(|event| event.group_id() == Some(group_id))
                .map(|member| {
                    member.payload = payload.clone();
                    member.clone()
                })
                .collect())
        })
    }

    fn delete_group(&self, group_id: RepeatGroupId) -> StoreFuture<'_, usize> {
        Box::pin(async move {
            let mut guard = self.events.write().await;
            let before = guard.len();
            guard.retain(|event| event.group_id() != Some(group_id));
            Ok(before - guard.len())
        })
    }
}
