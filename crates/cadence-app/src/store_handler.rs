use std::sync::Arc;

use cadence_core::error::CoreError;
use cadence_service::event::EventStore;
use salvo::async_trait;

use crate::error::AppResult;

pub struct EventStoreHandler {
    pub store: Arc<dyn EventStore>,
}

#[async_trait]
impl salvo::Handler for EventStoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.store));
    }
}

/// ## Summary
/// Retrieves the event store from the depot.
///
/// ## Errors
/// Returns an error if the event store is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn EventStore>> {
    depot
        .obtain::<Arc<dyn EventStore>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Event store not found in depot").into())
}
