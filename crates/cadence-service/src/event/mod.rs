//! Stored events and operations on recurring series.

pub mod service;
pub mod store;

pub use store::{EventStore, InMemoryEventStore, StoreFuture};
