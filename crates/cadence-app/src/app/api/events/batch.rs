use cadence_core::types::EventId;
use cadence_recur::Occurrence;
use cadence_service::event::service::{delete_events, update_events};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::Deserialize;

use super::{EVENTS_LIST_ROUTE_COMPONENT, EventListResponse, json_body, render_error};
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Body of a batch delete.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventIdsBody {
    pub event_ids: Vec<EventId>,
}

async fn update_many(req: &mut Request, depot: &mut Depot) -> AppResult<Vec<Occurrence>> {
    let body: EventListResponse = json_body(req).await?;
    let store = get_store_from_depot(depot)?;
    Ok(update_events(store.as_ref(), body.events).await?)
}

/// ## Summary
/// PUT /api/events-list - Replaces several events at once.
///
/// ## Errors
/// Returns HTTP 404 without changing anything if any event does not exist.
#[handler]
async fn update_events_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match update_many(req, depot).await {
        Ok(events) => res.render(Json(EventListResponse { events })),
        Err(e) => render_error(res, &e),
    }
}

async fn delete_many(req: &mut Request, depot: &mut Depot) -> AppResult<usize> {
    let body: EventIdsBody = json_body(req).await?;
    let store = get_store_from_depot(depot)?;
    Ok(delete_events(store.as_ref(), body.event_ids).await?)
}

/// ## Summary
/// DELETE /api/events-list - Deletes every listed event; unknown ids are ignored.
#[handler]
async fn delete_events_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match delete_many(req, depot).await {
        Ok(removed) => {
            tracing::debug!(removed, "Batch delete finished");
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => render_error(res, &e),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(EVENTS_LIST_ROUTE_COMPONENT)
        .put(update_events_handler)
        .delete(delete_events_handler)
}
