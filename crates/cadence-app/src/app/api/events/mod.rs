//! JSON event endpoints.

mod batch;
mod collection;
mod item;
mod series;

use std::str::FromStr;

use cadence_recur::Occurrence;
use salvo::{Request, Response, Router, writing::Json};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{AppError, AppResult};
use cadence_core::constants::{
    EVENTS_LIST_ROUTE_COMPONENT, EVENTS_ROUTE_COMPONENT, RECURRING_EVENTS_ROUTE_COMPONENT,
};

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// A list of events, used both as a response and as the batch update body.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventListResponse {
    pub events: Vec<Occurrence>,
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(collection::routes())
        .push(batch::routes())
        .push(series::routes())
}

/// Writes `err` as a JSON error body with its mapped status code.
fn render_error(res: &mut Response, err: &AppError) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::debug!(error = %err, status = %status, "Request rejected");
    }
    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: err.to_string(),
    }));
}

/// ## Summary
/// Parses a typed identifier from the named path parameter.
///
/// ## Errors
/// Returns `AppError::BadRequest` if the parameter is missing, or the
/// identifier's own parse error if it is malformed.
fn path_id<T>(req: &Request, name: &str) -> AppResult<T>
where
    T: FromStr,
    AppError: From<T::Err>,
{
    let raw = req
        .param::<String>(name)
        .ok_or_else(|| AppError::BadRequest(format!("missing path parameter {name}")))?;
    Ok(raw.parse::<T>()?)
}

/// ## Summary
/// Deserializes the JSON request body.
///
/// ## Errors
/// Returns `AppError::BadRequest` if the body is not valid JSON for `T`,
/// including rules rejected during deserialization.
async fn json_body<T: DeserializeOwned>(req: &mut Request) -> AppResult<T> {
    req.parse_json().await.map_err(|e| {
        tracing::warn!(error = %e, "Rejected request body");
        AppError::BadRequest(format!("invalid request body: {e}"))
    })
}
