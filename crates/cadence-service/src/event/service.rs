//! Event and series operations on top of an `EventStore`.

use cadence_core::types::{EventId, RepeatGroupId};
use cadence_recur::{BaseEvent, EventPayload, Occurrence, OccurrenceGenerator};

use super::store::EventStore;
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Expands `base` into its occurrences and persists the whole batch.
///
/// ## Errors
/// Returns an error if the store rejects the batch.
///
/// ## Side Effects
/// Inserts every generated occurrence; an empty batch stores nothing.
#[tracing::instrument(skip(store, generator, base), fields(date = %base.date, rule = %base.repeat))]
pub async fn schedule_event(
    store: &dyn EventStore,
    generator: &OccurrenceGenerator,
    base: &BaseEvent,
) -> ServiceResult<Vec<Occurrence>> {
    let occurrences = generator.generate(base);
    if occurrences.is_empty() {
        tracing::debug!("Rule produced no occurrences, nothing stored");
        return Ok(occurrences);
    }
    store.insert_batch(occurrences).await
}

/// ## Summary
/// Replaces a stored event.
///
/// ## Errors
/// Returns `ServiceError::NotFound` if no event has the given id.
pub async fn update_event(
    store: &dyn EventStore,
    id: EventId,
    mut event: Occurrence,
) -> ServiceResult<Occurrence> {
    event.id = Some(id);
    store
        .update(event)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("event {id}")))
}

/// ## Summary
/// Replaces several stored events.
///
/// The batch is applied atomically, so a missing event leaves the store
/// unchanged.
///
/// ## Errors
/// Returns `ServiceError::ValidationError` if an event has no id, or
/// `ServiceError::NotFound` if one of the ids is unknown.
pub async fn update_events(
    store: &dyn EventStore,
    events: Vec<Occurrence>,
) -> ServiceResult<Vec<Occurrence>> {
    let requested = events.len();
    let updated = store.update_many(events).await?.ok_or_else(|| {
        ServiceError::NotFound("one or more events in the batch".to_string())
    })?;
    tracing::debug!(requested, "Batch updated");
    Ok(updated)
}

/// ## Summary
/// Deletes one stored event.
///
/// ## Errors
/// Returns `ServiceError::NotFound` if no event has the given id.
pub async fn delete_event(store: &dyn EventStore, id: EventId) -> ServiceResult<()> {
    if store.delete(id).await? {
        Ok(())
    } else {
        Err(ServiceError::NotFound(format!("event {id}")))
    }
}

/// ## Summary
/// Deletes every listed event that exists and returns how many were removed.
///
/// ## Errors
/// Returns an error if the store fails.
pub async fn delete_events(store: &dyn EventStore, ids: Vec<EventId>) -> ServiceResult<usize> {
    let requested = ids.len();
    let removed = store.delete_many(ids).await?;
    if removed < requested {
        tracing::debug!(requested, removed, "Some events were already gone");
    }
    Ok(removed)
}

/// ## Summary
/// Detaches one occurrence from its series.
///
/// The occurrence keeps its date and payload but loses its group identifier
/// and its rule becomes `None`. Siblings are untouched and nothing is
/// regenerated.
///
/// ## Errors
/// Returns `ServiceError::NotFound` if no event has the given id.
#[tracing::instrument(skip(store))]
pub async fn detach_occurrence(store: &dyn EventStore, id: EventId) -> ServiceResult<Occurrence> {
    let detached = store
        .detach(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("event {id}")))?;
    tracing::debug!("Occurrence detached");
    Ok(detached)
}

/// ## Summary
/// Overwrites the payload of every occurrence in a series, keeping each
/// occurrence's date and repeat info.
///
/// ## Errors
/// Returns `ServiceError::NotFound` if the group has no stored members.
#[tracing::instrument(skip(store, payload))]
pub async fn update_series(
    store: &dyn EventStore,
    group_id: RepeatGroupId,
    payload: EventPayload,
) -> ServiceResult<Vec<Occurrence>> {
    let updated = store.update_group(group_id, payload).await?;
    if updated.is_empty() {
        return Err(ServiceError::NotFound(format!("repeat group {group_id}")));
    }

    tracing::debug!(count = updated.len(), "Series updated");
    Ok(updated)
}

/// ## Summary
/// Deletes every occurrence in a series.
///
/// ## Errors
/// Returns `ServiceError::NotFound` if the group has no stored members.
#[tracing::instrument(skip(store))]
pub async fn delete_series(
    store: &dyn EventStore,
    group_id: RepeatGroupId,
) -> ServiceResult<usize> {
    let removed = store.delete_group(group_id).await?;
    if removed == 0 {
        return Err(ServiceError::NotFound(format!("repeat group {group_id}")));
    }
    tracing::debug!(removed, "Series deleted");
    Ok(removed)
}
