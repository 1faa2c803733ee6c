use thiserror::Error;

/// Recurrence rule and generation errors
#[derive(Error, Debug)]
pub enum RecurError {
    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error(transparent)]
    CoreError(#[from] cadence_core::error::CoreError),
}

pub type RecurResult<T> = std::result::Result<T, RecurError>;
