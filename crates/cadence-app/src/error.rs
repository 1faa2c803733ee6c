use salvo::http::StatusCode;
use thiserror::Error;

use cadence_core::error::CoreError;
use cadence_recur::RecurError;
use cadence_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    RecurError(#[from] RecurError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// ## Summary
    /// The HTTP status an error is reported with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::ServiceError(ServiceError::ValidationError(_))
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServiceError(ServiceError::RecurError(err)) | Self::RecurError(err) => {
                recur_status(err)
            }
            Self::ServiceError(ServiceError::CoreError(err)) | Self::CoreError(err) => {
                core_status(err)
            }
        }
    }
}

fn recur_status(err: &RecurError) -> StatusCode {
    match err {
        RecurError::InvalidRule(_) => StatusCode::BAD_REQUEST,
        RecurError::CoreError(inner) => core_status(inner),
    }
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
        CoreError::ConfigError(_) | CoreError::InvariantViolation(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
