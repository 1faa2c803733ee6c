//! Repeat rule value types and their wire representation.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use cadence_core::types::RepeatGroupId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RecurError, RecurResult};

/// How a base date repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecurrenceType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceType {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Parses a recurrence type from its wire name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            _ => return None,
        })
    }
}

impl FromStr for RecurrenceType {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| RecurError::InvalidRule(format!("unknown type `{s}`")))
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a recurring series stops producing occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecurrenceEndCondition {
    /// Runs until the configured safety horizon.
    #[default]
    Never,
    /// Last allowed occurrence date, inclusive.
    ByDate(NaiveDate),
    /// Total number of occurrences, anchor included.
    ByCount(u32),
}

/// ## Summary
/// A validated repeat rule.
///
/// A rule with a recurring type always has an interval of at least one;
/// zero or negative intervals are rejected at construction instead of being
/// silently read as "does not repeat".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RepeatWire", into = "RepeatWire")]
pub struct RecurrenceRule {
    kind: RecurrenceType,
    interval: NonZeroU32,
    end: RecurrenceEndCondition,
}

impl RecurrenceRule {
    /// The rule of an event that happens once.
    pub const NONE: Self = Self {
        kind: RecurrenceType::None,
        interval: NonZeroU32::MIN,
        end: RecurrenceEndCondition::Never,
    };

    /// ## Summary
    /// Builds a rule from caller-supplied parts.
    ///
    /// For `RecurrenceType::None` the interval is ignored.
    ///
    /// ## Errors
    /// Returns `RecurError::InvalidRule` if a recurring type is paired with an
    /// interval below one or one that does not fit in 32 bits.
    pub fn new(
        kind: RecurrenceType,
        interval: i64,
        end: RecurrenceEndCondition,
    ) -> RecurResult<Self> {
        if kind == RecurrenceType::None {
            return Ok(Self { end, ..Self::NONE });
        }

        let interval = u32::try_from(interval)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| {
                RecurError::InvalidRule(format!(
                    "interval must be a positive integer, got {interval}"
                ))
            })?;

        Ok(Self {
            kind,
            interval,
            end,
        })
    }

    #[must_use]
    pub const fn kind(&self) -> RecurrenceType {
        self.kind
    }

    #[must_use]
    pub const fn interval(&self) -> NonZeroU32 {
        self.interval
    }

    #[must_use]
    pub const fn end(&self) -> RecurrenceEndCondition {
        self.end
    }

    /// Returns true if applying this rule yields more than the base event.
    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        !matches!(self.kind, RecurrenceType::None)
    }
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.interval)?;
        match self.end {
            RecurrenceEndCondition::Never => Ok(()),
            RecurrenceEndCondition::ByDate(date) => write!(f, " until {date}"),
            RecurrenceEndCondition::ByCount(count) => write!(f, " x{count}"),
        }
    }
}

/// JSON shape of the `repeat` object exchanged with clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatWire {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    #[serde(default = "default_interval")]
    pub(crate) interval: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) end_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<RepeatGroupId>,
}

const fn default_interval() -> i64 {
    1
}

impl RepeatWire {
    pub(crate) fn to_rule(&self) -> RecurResult<RecurrenceRule> {
        let kind = self.kind.parse::<RecurrenceType>()?;

        let end = match (self.end_date, self.end_count) {
            (Some(_), Some(_)) => {
                return Err(RecurError::InvalidRule(
                    "a rule ends either by date or by count, not both".to_string(),
                ));
            }
            (Some(date), None) => RecurrenceEndCondition::ByDate(date),
            // A non-positive count is a valid rule that produces nothing.
            (None, Some(count)) => RecurrenceEndCondition::ByCount(
                u32::try_from(count.max(0)).map_err(|_err| {
                    RecurError::InvalidRule(format!("count {count} is out of range"))
                })?,
            ),
            (None, None) => RecurrenceEndCondition::Never,
        };

        RecurrenceRule::new(kind, self.interval, end)
    }

    pub(crate) fn from_rule(rule: RecurrenceRule, id: Option<RepeatGroupId>) -> Self {
        let (end_date, end_count) = match rule.end {
            RecurrenceEndCondition::Never => (None, None),
            RecurrenceEndCondition::ByDate(date) => (Some(date), None),
            RecurrenceEndCondition::ByCount(count) => (None, Some(i64::from(count))),
        };

        Self {
            kind: rule.kind.as_str().to_string(),
            interval: i64::from(rule.interval.get()),
            end_date,
            end_count,
            id,
        }
    }
}

impl TryFrom<RepeatWire> for RecurrenceRule {
    type Error = RecurError;

    fn try_from(wire: RepeatWire) -> Result<Self, Self::Error> {
        wire.to_rule()
    }
}

impl From<RecurrenceRule> for RepeatWire {
    fn from(rule: RecurrenceRule) -> Self {
        Self::from_rule(rule, None)
    }
}
