use cadence_core::types::RepeatGroupId;
use cadence_recur::{EventPayload, Occurrence};
use cadence_service::event::service::{delete_series, update_series};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};

use super::{
    EventListResponse, RECURRING_EVENTS_ROUTE_COMPONENT, json_body, path_id, render_error,
};
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;

async fn update(req: &mut Request, depot: &mut Depot) -> AppResult<Vec<Occurrence>> {
    let group_id: RepeatGroupId = path_id(req, "group_id")?;
    let payload: EventPayload = json_body(req).await?;
    let store = get_store_from_depot(depot)?;
    Ok(update_series(store.as_ref(), group_id, payload).await?)
}

/// ## Summary
/// PUT /api/recurring-events/{groupId} - Overwrites the payload of every
/// occurrence still in the series. Dates are left alone.
///
/// ## Errors
/// Returns HTTP 404 if the series has no stored occurrences.
#[handler]
async fn update_series_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match update(req, depot).await {
        Ok(events) => res.render(Json(EventListResponse { events })),
        Err(e) => render_error(res, &e),
    }
}

async fn remove(req: &mut Request, depot: &mut Depot) -> AppResult<usize> {
    let group_id: RepeatGroupId = path_id(req, "group_id")?;
    let store = get_store_from_depot(depot)?;
    Ok(delete_series(store.as_ref(), group_id).await?)
}

/// ## Summary
/// DELETE /api/recurring-events/{groupId}
///
/// ## Errors
/// Returns HTTP 404 if the series has no stored occurrences.
#[handler]
async fn delete_series_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match remove(req, depot).await {
        Ok(removed) => {
            tracing::debug!(removed, "Series removed");
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => render_error(res, &e),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(RECURRING_EVENTS_ROUTE_COMPONENT).push(
        Router::with_path("{group_id}")
            .put(update_series_handler)
            .delete(delete_series_handler),
    )
}
