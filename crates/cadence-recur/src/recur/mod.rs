//! Recurrence rules, event records and the expansion engine.

pub mod core;
pub mod expand;

#[cfg(test)]
mod tests;
