//! Event records consumed and produced by the generator.

use cadence_core::types::{EventId, RepeatGroupId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::rule::{RecurrenceRule, RepeatWire};
use crate::error::RecurError;

/// The fields copied unchanged into every occurrence of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    #[serde(with = "hour_minute")]
    pub start_time: NaiveTime,
    #[serde(with = "hour_minute")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    /// Minutes before `start_time` at which to notify.
    #[serde(default)]
    pub notification_time: u32,
}

/// ## Summary
/// The caller-owned template a series is generated from.
///
/// `date` is the anchor: the first occurrence, emitted verbatim even when
/// later months have to clamp its day-of-month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseEvent {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub payload: EventPayload,
    #[serde(default)]
    pub repeat: RecurrenceRule,
}

/// The rule an occurrence was generated from and the series it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RepeatWire", into = "RepeatWire")]
pub struct RepeatInfo {
    pub rule: RecurrenceRule,
    pub group_id: Option<RepeatGroupId>,
}

impl RepeatInfo {
    /// Repeat info of an occurrence that belongs to no series.
    #[must_use]
    pub const fn standalone(rule: RecurrenceRule) -> Self {
        Self {
            rule,
            group_id: None,
        }
    }

    /// Repeat info shared by every member of one generated series.
    #[must_use]
    pub const fn in_group(rule: RecurrenceRule, group_id: RepeatGroupId) -> Self {
        Self {
            rule,
            group_id: Some(group_id),
        }
    }
}

impl TryFrom<RepeatWire> for RepeatInfo {
    type Error = RecurError;

    fn try_from(wire: RepeatWire) -> Result<Self, Self::Error> {
        Ok(Self {
            rule: wire.to_rule()?,
            group_id: wire.id,
        })
    }
}

impl From<RepeatInfo> for RepeatWire {
    fn from(info: RepeatInfo) -> Self {
        Self::from_rule(info.rule, info.group_id)
    }
}

/// ## Summary
/// A concrete event on one date.
///
/// Occurrences leave the generator with `id` unset; the event store assigns
/// it on insert. Once stored, each occurrence is edited independently of its
/// siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub payload: EventPayload,
    #[serde(default)]
    pub repeat: RepeatInfo,
}

impl Occurrence {
    /// The single occurrence of a base event that does not repeat.
    #[must_use]
    pub fn from_base(base: &BaseEvent) -> Self {
        Self {
            id: None,
            date: base.date,
            payload: base.payload.clone(),
            repeat: RepeatInfo::standalone(base.repeat),
        }
    }

    #[must_use]
    pub const fn group_id(&self) -> Option<RepeatGroupId> {
        self.repeat.group_id
    }

    /// ## Summary
    /// Turns this occurrence into a standalone event.
    ///
    /// Clears the group identifier and resets the rule to `None`. Siblings
    /// are untouched and nothing is regenerated.
    pub fn detach(&mut self) {
        self.repeat = RepeatInfo::default();
    }
}

/// `HH:MM` serde format for local wall-clock times.
mod hour_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recur::core::{RecurrenceEndCondition, RecurrenceType};

    const BASE_JSON: &str = r#"{
        "title": "Standup",
        "date": "2025-05-19",
        "startTime": "09:00",
        "endTime": "09:15",
        "description": "Daily sync",
        "location": "Room 4",
        "category": "work",
        "notificationTime": 10,
        "repeat": {"type": "weekly", "interval": 2, "endDate": "2025-06-30"}
    }"#;

    #[test]
    fn test_base_event_from_form_json() {
        let base: BaseEvent = serde_json::from_str(BASE_JSON).unwrap();
        assert_eq!(base.date, NaiveDate::from_ymd_opt(2025, 5, 19).unwrap());
        assert_eq!(base.payload.title, "Standup");
        assert_eq!(
            base.payload.start_time,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(base.payload.notification_time, 10);
        assert_eq!(base.repeat.kind(), RecurrenceType::Weekly);
        assert_eq!(
            base.repeat.end(),
            RecurrenceEndCondition::ByDate(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
        );
    }

    #[test]
    fn test_base_event_without_repeat_is_one_off() {
        let base: BaseEvent = serde_json::from_str(
            r#"{"title":"Dentist","date":"2025-07-01","startTime":"14:30","endTime":"15:00"}"#,
        )
        .unwrap();
        assert_eq!(base.repeat, RecurrenceRule::NONE);
        assert!(base.payload.description.is_empty());
    }

    #[test]
    fn test_rejects_malformed_time() {
        let result = serde_json::from_str::<BaseEvent>(
            r#"{"title":"x","date":"2025-07-01","startTime":"9am","endTime":"10:00"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_occurrence_serializes_flat_with_group_id() {
        let base: BaseEvent = serde_json::from_str(BASE_JSON).unwrap();
        let group_id = RepeatGroupId::new();
        let occurrence = Occurrence {
            id: None,
            date: base.date,
            payload: base.payload.clone(),
            repeat: RepeatInfo::in_group(base.repeat, group_id),
        };

        let value = serde_json::to_value(&occurrence).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["startTime"], "09:00");
        assert_eq!(value["repeat"]["id"], group_id.to_string());
        assert_eq!(value["repeat"]["type"], "weekly");

        let back: Occurrence = serde_json::from_value(value).unwrap();
        assert_eq!(back, occurrence);
    }

    #[test]
    fn test_detach_clears_group_and_rule() {
        let base: BaseEvent = serde_json::from_str(BASE_JSON).unwrap();
        let mut occurrence = Occurrence {
            id: Some(EventId::new()),
            date: base.date,
            payload: base.payload.clone(),
            repeat: RepeatInfo::in_group(base.repeat, RepeatGroupId::new()),
        };

        occurrence.detach();

        assert_eq!(occurrence.group_id(), None);
        assert!(!occurrence.repeat.rule.is_recurring());
        assert_eq!(occurrence.payload, base.payload);
        assert!(occurrence.id.is_some());
    }
}
