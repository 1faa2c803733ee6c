//! Event persistence and series operations built on the recurrence engine.

pub mod error;
pub mod event;
