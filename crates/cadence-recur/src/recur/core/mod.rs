//! Recurrence data model.
//!
//! Rules are validated when they are constructed or deserialized, so every
//! `RecurrenceRule` value that exists is well formed. Event records carry an
//! explicit payload type that the generator clones verbatim into each
//! occurrence.

mod event;
mod rule;

pub use event::{BaseEvent, EventPayload, Occurrence, RepeatInfo};
pub use rule::{RecurrenceEndCondition, RecurrenceRule, RecurrenceType};
