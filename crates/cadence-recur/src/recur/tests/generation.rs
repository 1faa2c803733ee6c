//! End-to-end generation behaviour.

use super::fixtures::{base, date, dates, payload};
use crate::recur::core::{BaseEvent, Occurrence, RecurrenceRule, RecurrenceType};
use crate::recur::expand::{GeneratorOptions, OccurrenceGenerator};
use cadence_core::constants::DEFAULT_SAFETY_HORIZON;

use crate::recur::core::RecurrenceEndCondition::{ByCount, ByDate, Never};

fn generate(event: &BaseEvent) -> Vec<Occurrence> {
    OccurrenceGenerator::default().generate(event)
}

#[test]
fn test_anchor_is_first_occurrence_for_every_type() {
    let anchor = date(2025, 1, 31);
    for kind in [
        RecurrenceType::Daily,
        RecurrenceType::Weekly,
        RecurrenceType::Monthly,
        RecurrenceType::Yearly,
    ] {
        let occurrences = generate(&base(anchor, kind, 1, ByCount(3)));
        assert_eq!(occurrences.len(), 3, "{kind}");
        assert_eq!(occurrences[0].date, anchor, "{kind}");
    }
}

#[test]
fn test_monthly_clamps_instead_of_skipping() {
    let occurrences = generate(&base(
        date(2025, 1, 31),
        RecurrenceType::Monthly,
        1,
        ByDate(date(2025, 4, 30)),
    ));
    assert_eq!(
        dates(&occurrences),
        vec![
            date(2025, 1, 31),
            date(2025, 2, 28),
            date(2025, 3, 31),
            date(2025, 4, 30),
        ]
    );
}

#[test]
fn test_monthly_31st_over_a_leap_year() {
    let occurrences = generate(&base(
        date(2024, 1, 31),
        RecurrenceType::Monthly,
        1,
        ByCount(13),
    ));
    let got = dates(&occurrences);
    assert_eq!(got.len(), 13);
    assert_eq!(got[1], date(2024, 2, 29));
    assert_eq!(got[3], date(2024, 4, 30));
    assert_eq!(got[12], date(2025, 1, 31));
}

#[test]
fn test_yearly_leap_day_clamps() {
    let occurrences = generate(&base(
        date(2024, 2, 29),
        RecurrenceType::Yearly,
        1,
        ByDate(date(2027, 2, 28)),
    ));
    assert_eq!(
        dates(&occurrences),
        vec![
            date(2024, 2, 29),
            date(2025, 2, 28),
            date(2026, 2, 28),
            date(2027, 2, 28),
        ]
    );
}

#[test]
fn test_count_termination() {
    let occurrences = generate(&base(
        date(2025, 5, 20),
        RecurrenceType::Daily,
        2,
        ByCount(2),
    ));
    assert_eq!(
        dates(&occurrences),
        vec![date(2025, 5, 20), date(2025, 5, 22)]
    );
}

#[test]
fn test_end_date_is_inclusive() {
    let occurrences = generate(&base(
        date(2025, 5, 1),
        RecurrenceType::Daily,
        1,
        ByDate(date(2025, 5, 5)),
    ));
    assert_eq!(occurrences.len(), 5);
    assert_eq!(occurrences.last().map(|o| o.date), Some(date(2025, 5, 5)));

    let one_day_earlier = generate(&base(
        date(2025, 5, 1),
        RecurrenceType::Daily,
        1,
        ByDate(date(2025, 5, 4)),
    ));
    assert_eq!(one_day_earlier.len(), 4);
    assert_eq!(
        one_day_earlier.last().map(|o| o.date),
        Some(date(2025, 5, 4))
    );
}

#[test]
fn test_weekly_interval_two() {
    let occurrences = generate(&base(
        date(2025, 5, 19),
        RecurrenceType::Weekly,
        2,
        ByDate(date(2025, 6, 30)),
    ));
    let got = dates(&occurrences);
    assert_eq!(got.len(), 4);
    for pair in got.windows(2) {
        assert_eq!((pair[1] - pair[0]).num_days(), 14);
    }
}

#[test]
fn test_non_recurring_passthrough() {
    let event = BaseEvent {
        date: date(2025, 7, 1),
        payload: payload(),
        repeat: RecurrenceRule::NONE,
    };
    let occurrences = generate(&event);

    assert_eq!(occurrences, vec![Occurrence::from_base(&event)]);
    assert_eq!(occurrences[0].group_id(), None);
    assert_eq!(occurrences[0].date, event.date);
    assert_eq!(occurrences[0].repeat.rule, RecurrenceRule::NONE);
}

#[test]
fn test_non_recurring_ignores_end_condition() {
    let event = BaseEvent {
        date: date(2025, 7, 1),
        payload: payload(),
        repeat: RecurrenceRule::new(RecurrenceType::None, 0, ByCount(0)).unwrap(),
    };
    assert_eq!(generate(&event).len(), 1);
}

#[test]
fn test_batch_shares_payload_rule_and_group() {
    let event = base(date(2025, 3, 3), RecurrenceType::Weekly, 1, ByCount(6));
    let occurrences = generate(&event);

    let group_id = occurrences[0].group_id();
    assert!(group_id.is_some());
    for occurrence in &occurrences {
        assert_eq!(occurrence.group_id(), group_id);
        assert_eq!(occurrence.payload, event.payload);
        assert_eq!(occurrence.repeat.rule, event.repeat);
        assert!(occurrence.id.is_none());
    }
}

#[test]
fn test_generation_is_deterministic_apart_from_group_id() {
    let event = base(date(2025, 1, 31), RecurrenceType::Monthly, 2, ByCount(8));
    let first = generate(&event);
    let second = generate(&event);

    assert_ne!(first[0].group_id(), second[0].group_id());
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.date, b.date);
        assert_eq!(a.payload, b.payload);
        assert_eq!(a.repeat.rule, b.repeat.rule);
    }
}

#[test]
fn test_zero_count_is_empty() {
    let occurrences = generate(&base(
        date(2025, 5, 1),
        RecurrenceType::Daily,
        1,
        ByCount(0),
    ));
    assert!(occurrences.is_empty());
}

#[test]
fn test_end_date_before_anchor_is_empty() {
    let occurrences = generate(&base(
        date(2025, 5, 1),
        RecurrenceType::Weekly,
        1,
        ByDate(date(2025, 4, 30)),
    ));
    assert!(occurrences.is_empty());
}

#[test]
fn test_never_runs_to_default_horizon() {
    let occurrences = generate(&base(
        date(2035, 12, 1),
        RecurrenceType::Daily,
        1,
        Never,
    ));
    assert_eq!(occurrences.len(), 31);
    assert_eq!(
        occurrences.last().map(|o| o.date),
        Some(DEFAULT_SAFETY_HORIZON)
    );
}

#[test]
fn test_never_respects_injected_horizon() {
    let options = GeneratorOptions::new(date(2025, 1, 10), 100).unwrap();
    let occurrences = OccurrenceGenerator::new(options).generate(&base(
        date(2025, 1, 1),
        RecurrenceType::Daily,
        1,
        Never,
    ));
    assert_eq!(occurrences.len(), 10);
}

#[test]
fn test_anchor_past_horizon_is_empty() {
    let options = GeneratorOptions::new(date(2025, 1, 10), 100).unwrap();
    let occurrences = OccurrenceGenerator::new(options).generate(&base(
        date(2025, 2, 1),
        RecurrenceType::Monthly,
        1,
        Never,
    ));
    assert!(occurrences.is_empty());
}

#[test_log::test]
fn test_cap_truncates_long_series() {
    let options = GeneratorOptions::new(DEFAULT_SAFETY_HORIZON, 3).unwrap();
    let occurrences = OccurrenceGenerator::new(options).generate(&base(
        date(2025, 1, 1),
        RecurrenceType::Daily,
        1,
        ByCount(1000),
    ));
    assert_eq!(
        dates(&occurrences),
        vec![date(2025, 1, 1), date(2025, 1, 2), date(2025, 1, 3)]
    );
}

#[test]
fn test_exact_cap_is_not_truncated() {
    let options = GeneratorOptions::new(DEFAULT_SAFETY_HORIZON, 4).unwrap();
    let occurrences = OccurrenceGenerator::new(options).generate(&base(
        date(2025, 1, 1),
        RecurrenceType::Weekly,
        1,
        ByCount(4),
    ));
    assert_eq!(occurrences.len(), 4);
}

#[test]
fn test_zero_cap_is_rejected() {
    assert!(GeneratorOptions::new(DEFAULT_SAFETY_HORIZON, 0).is_err());
}

#[test]
fn test_generator_is_shareable_across_threads() {
    let generator = OccurrenceGenerator::default();
    let event = base(date(2025, 1, 31), RecurrenceType::Monthly, 1, ByCount(12));

    let results: Vec<Vec<Occurrence>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| generator.generate(&event)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in &results {
        assert_eq!(dates(result), dates(&results[0]));
    }
}
