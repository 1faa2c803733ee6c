//! Termination checks for the generation loop.

use chrono::NaiveDate;

use crate::recur::core::{RecurrenceEndCondition, RecurrenceRule};

/// ## Summary
/// Decides whether the candidate `date` at `index` must be rejected and the
/// series closed.
///
/// Evaluated before a date is accepted:
/// - `ByDate(end)` stops once `date > end`, so `end` itself is included;
/// - `ByCount(count)` stops once `index >= count`, emitting exactly `count`;
/// - `Never` stops once `date > horizon`.
#[must_use]
pub fn should_stop(
    date: NaiveDate,
    index: u32,
    rule: &RecurrenceRule,
    horizon: NaiveDate,
) -> bool {
    match rule.end() {
        RecurrenceEndCondition::Never => date > horizon,
        RecurrenceEndCondition::ByDate(end) => date > end,
        RecurrenceEndCondition::ByCount(count) => index >= count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recur::core::RecurrenceType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(end: RecurrenceEndCondition) -> RecurrenceRule {
        RecurrenceRule::new(RecurrenceType::Daily, 1, end).unwrap()
    }

    const HORIZON: NaiveDate = match NaiveDate::from_ymd_opt(2030, 1, 1) {
        Some(d) => d,
        None => panic!(),
    };

    #[test]
    fn test_end_date_is_inclusive() {
        let rule = daily(RecurrenceEndCondition::ByDate(date(2025, 5, 5)));
        assert!(!should_stop(date(2025, 5, 5), 4, &rule, HORIZON));
        assert!(should_stop(date(2025, 5, 6), 5, &rule, HORIZON));
    }

    #[test]
    fn test_end_date_ignores_horizon() {
        let rule = daily(RecurrenceEndCondition::ByDate(date(2040, 1, 1)));
        assert!(!should_stop(date(2031, 1, 1), 0, &rule, HORIZON));
    }

    #[test]
    fn test_count_stops_at_index_equal_to_count() {
        let rule = daily(RecurrenceEndCondition::ByCount(2));
        assert!(!should_stop(date(2025, 5, 20), 0, &rule, HORIZON));
        assert!(!should_stop(date(2025, 5, 22), 1, &rule, HORIZON));
        assert!(should_stop(date(2025, 5, 24), 2, &rule, HORIZON));
    }

    #[test]
    fn test_zero_count_stops_immediately() {
        let rule = daily(RecurrenceEndCondition::ByCount(0));
        assert!(should_stop(date(2025, 5, 20), 0, &rule, HORIZON));
    }

    #[test]
    fn test_never_stops_after_horizon() {
        let rule = daily(RecurrenceEndCondition::Never);
        assert!(!should_stop(HORIZON, 100, &rule, HORIZON));
        assert!(should_stop(date(2030, 1, 2), 101, &rule, HORIZON));
    }
}
