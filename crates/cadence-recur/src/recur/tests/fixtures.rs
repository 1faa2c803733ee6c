//! Shared builders for generation tests.

use chrono::{NaiveDate, NaiveTime};

use crate::recur::core::{
    BaseEvent, EventPayload, Occurrence, RecurrenceEndCondition, RecurrenceRule, RecurrenceType,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn payload() -> EventPayload {
    EventPayload {
        title: "Team sync".to_string(),
        start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        description: "Weekly planning".to_string(),
        location: "Room 2".to_string(),
        category: "work".to_string(),
        notification_time: 10,
    }
}

pub fn base(
    anchor: NaiveDate,
    kind: RecurrenceType,
    interval: i64,
    end: RecurrenceEndCondition,
) -> BaseEvent {
    BaseEvent {
        date: anchor,
        payload: payload(),
        repeat: RecurrenceRule::new(kind, interval, end).unwrap(),
    }
}

pub fn dates(occurrences: &[Occurrence]) -> Vec<NaiveDate> {
    occurrences.iter().map(|o| o.date).collect()
}
