//! Recurring-event date generation.
//!
//! Expands a base event and its repeat rule into the ordered list of
//! occurrences it stands for. Everything here is pure and synchronous: no
//! I/O, no shared state, and identical input always yields identical dates.

pub mod error;
pub mod recur;

pub use error::{RecurError, RecurResult};
pub use recur::core::{
    BaseEvent, EventPayload, Occurrence, RecurrenceEndCondition, RecurrenceRule, RecurrenceType,
    RepeatInfo,
};
pub use recur::expand::{GeneratorOptions, OccurrenceGenerator};
