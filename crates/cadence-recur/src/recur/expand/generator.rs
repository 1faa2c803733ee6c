//! Occurrence generation.

use cadence_core::constants::{DEFAULT_MAX_OCCURRENCES, DEFAULT_SAFETY_HORIZON};
use cadence_core::error::CoreError;
use cadence_core::types::RepeatGroupId;
use chrono::NaiveDate;

use super::advance::advance;
use super::termination::should_stop;
use crate::error::RecurResult;
use crate::recur::core::{BaseEvent, Occurrence, RepeatInfo};

/// ## Summary
/// Limits applied to every generated batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Last date a rule without an end condition may produce.
    pub horizon: NaiveDate,
    /// Batches are truncated to this many occurrences.
    pub max_occurrences: usize,
}

impl GeneratorOptions {
    /// ## Summary
    /// Creates options with an explicit horizon and batch cap.
    ///
    /// ## Errors
    /// Returns a configuration error if `max_occurrences` is zero.
    pub fn new(horizon: NaiveDate, max_occurrences: usize) -> RecurResult<Self> {
        if max_occurrences == 0 {
            return Err(CoreError::ConfigError(
                "occurrence cap must be at least 1".to_string(),
            )
            .into());
        }
        Ok(Self {
            horizon,
            max_occurrences,
        })
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_SAFETY_HORIZON,
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

/// ## Summary
/// Expands base events into their ordered occurrences.
///
/// Holds only immutable options, so one generator can be shared freely
/// between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct OccurrenceGenerator {
    options: GeneratorOptions,
}

impl OccurrenceGenerator {
    #[must_use]
    pub const fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// ## Summary
    /// Computes every occurrence of `base`.
    ///
    /// A non-recurring base yields exactly one occurrence carrying the base
    /// rule and no group identifier. A recurring base yields the anchor
    /// followed by each later date its rule allows, all sharing one freshly
    /// minted group identifier and differing only in `date`. An empty result
    /// is valid, e.g. for a zero count or an end date before the anchor.
    ///
    /// Batches longer than `max_occurrences` are truncated with a warning.
    ///
    /// ## Side Effects
    /// None beyond logging; `base` is only read.
    #[must_use]
    pub fn generate(&self, base: &BaseEvent) -> Vec<Occurrence> {
        let rule = base.repeat;
        if !rule.is_recurring() {
            tracing::trace!(date = %base.date, "Event does not repeat");
            return vec![Occurrence::from_base(base)];
        }

        let group_id = RepeatGroupId::new();
        let repeat = RepeatInfo::in_group(rule, group_id);
        let mut occurrences = Vec::new();

        for index in 0..=u32::MAX {
            let Some(date) = advance(base.date, index, rule.kind(), rule.interval()) else {
                tracing::debug!(index, %rule, "Occurrence date left the calendar range");
                break;
            };

            if should_stop(date, index, &rule, self.options.horizon) {
                tracing::trace!(index, %date, "Series ended");
                break;
            }

            if occurrences.len() >= self.options.max_occurrences {
                tracing::warn!(
                    anchor = %base.date,
                    %rule,
                    limit = self.options.max_occurrences,
                    "Recurring series truncated at occurrence cap"
                );
                break;
            }

            occurrences.push(Occurrence {
                id: None,
                date,
                payload: base.payload.clone(),
                repeat,
            });
        }

        tracing::debug!(
            %group_id,
            %rule,
            count = occurrences.len(),
            "Generated recurring series"
        );
        occurrences
    }
}
