use cadence_recur::{BaseEvent, Occurrence};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};

use super::{EVENTS_ROUTE_COMPONENT, EventListResponse, item, json_body, render_error};
use crate::config::{generator_from_settings, get_config_from_depot};
use crate::error::AppResult;
use crate::store_handler::get_store_from_depot;
use cadence_service::event::service::schedule_event;

async fn list_all(depot: &mut Depot) -> AppResult<Vec<Occurrence>> {
    let store = get_store_from_depot(depot)?;
    Ok(store.list().await?)
}

/// ## Summary
/// GET /api/events - Every stored event.
#[handler]
async fn list_events(depot: &mut Depot, res: &mut Response) {
    match list_all(depot).await {
        Ok(events) => res.render(Json(EventListResponse { events })),
        Err(e) => render_error(res, &e),
    }
}

#[tracing::instrument(skip_all)]
async fn create(req: &mut Request, depot: &mut Depot) -> AppResult<Vec<Occurrence>> {
    let base: BaseEvent = json_body(req).await?;
    let settings = get_config_from_depot(depot)?;
    let generator = generator_from_settings(&settings)?;
    let store = get_store_from_depot(depot)?;
    Ok(schedule_event(store.as_ref(), &generator, &base).await?)
}

/// ## Summary
/// POST /api/events - Expands a base event into its occurrences and stores them.
///
/// A non-recurring event comes back as a one-element list.
///
/// ## Errors
/// Returns HTTP 400 if the body or its repeat rule is invalid.
#[handler]
async fn create_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match create(req, depot).await {
        Ok(events) => {
            tracing::debug!(count = events.len(), "Events created");
            res.status_code(StatusCode::CREATED);
            res.render(Json(EventListResponse { events }));
        }
        Err(e) => render_error(res, &e),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(EVENTS_ROUTE_COMPONENT)
        .get(list_events)
        .post(create_event)
        .push(item::routes())
}
