//! Recurrence expansion.
//!
//! Dates are computed from the anchor for each occurrence index rather than
//! by stepping from the previous occurrence, so a clamped day in one short
//! month never drifts into the months after it.

mod advance;
mod generator;
mod termination;

pub use advance::{advance, is_leap_year, last_day_of_month};
pub use generator::{GeneratorOptions, OccurrenceGenerator};
pub use termination::should_stop;
