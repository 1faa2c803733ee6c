use cadence_core::types::EventId;
use cadence_recur::Occurrence;
use cadence_service::event::service::{delete_event, detach_occurrence, update_event};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};

use super::{json_body, path_id, render_error};
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;

async fn update(req: &mut Request, depot: &mut Depot) -> AppResult<Occurrence> {
    let id: EventId = path_id(req, "id")?;
    let event: Occurrence = json_body(req).await?;
    let store = get_store_from_depot(depot)?;
    Ok(update_event(store.as_ref(), id, event).await?)
}

/// ## Summary
/// PUT /api/events/{id} - Replaces one stored event.
///
/// The path id wins over any id in the body.
///
/// ## Errors
/// Returns HTTP 404 if the event does not exist.
#[handler]
async fn update_event_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match update(req, depot).await {
        Ok(event) => res.render(Json(event)),
        Err(e) => render_error(res, &e),
    }
}

async fn remove(req: &mut Request, depot: &mut Depot) -> AppResult<()> {
    let id: EventId = path_id(req, "id")?;
    let store = get_store_from_depot(depot)?;
    Ok(delete_event(store.as_ref(), id).await?)
}

/// ## Summary
/// DELETE /api/events/{id}
///
/// ## Errors
/// Returns HTTP 404 if the event does not exist.
#[handler]
async fn delete_event_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match remove(req, depot).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => render_error(res, &e),
    }
}

async fn detach(req: &mut Request, depot: &mut Depot) -> AppResult<Occurrence> {
    let id: EventId = path_id(req, "id")?;
    let store = get_store_from_depot(depot)?;
    Ok(detach_occurrence(store.as_ref(), id).await?)
}

/// ## Summary
/// POST /api/events/{id}/detach - Removes one occurrence from its series.
///
/// ## Errors
/// Returns HTTP 404 if the event does not exist.
#[handler]
async fn detach_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match detach(req, depot).await {
        Ok(event) => res.render(Json(event)),
        Err(e) => render_error(res, &e),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("{id}")
        .put(update_event_handler)
        .delete(delete_event_handler)
        .push(Router::with_path("detach").post(detach_handler))
}
