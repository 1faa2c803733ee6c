mod app_specific;
mod events;

use salvo::Router;

pub use cadence_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, EVENTS_LIST_ROUTE_PREFIX, EVENTS_ROUTE_PREFIX,
    RECURRING_EVENTS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main API router with every event handler.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(events::routes())
}
