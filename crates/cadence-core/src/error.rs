use thiserror::Error;

/// Errors shared by every cadence crate
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid {kind} identifier: {value}")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
