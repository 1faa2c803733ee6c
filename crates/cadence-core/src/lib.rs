//! Shared configuration, constants, identifiers and errors for the cadence crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
