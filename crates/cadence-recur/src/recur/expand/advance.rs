//! Date advancement with day-of-month clamping.

use std::num::NonZeroU32;

use chrono::{Datelike, Days, NaiveDate};

use crate::recur::core::RecurrenceType;

/// Gregorian leap-year test.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`.
#[must_use]
pub const fn last_day_of_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// ## Summary
/// Computes the date of the `index`-th occurrence (0-based) of a series.
///
/// The step count is `index * interval` units of `kind`, always measured
/// from `anchor`:
/// - daily and weekly add plain calendar days;
/// - monthly moves the month and clamps the day to the target month's
///   length (Jan 31 -> Feb 28 -> Mar 31);
/// - yearly moves the year and clamps Feb 29 to Feb 28 in common years.
///
/// Index 0 is the anchor itself. A `None` rule has no dates past the anchor.
///
/// Returns `None` if the result falls outside the representable calendar.
#[must_use]
pub fn advance(
    anchor: NaiveDate,
    index: u32,
    kind: RecurrenceType,
    interval: NonZeroU32,
) -> Option<NaiveDate> {
    if index == 0 {
        return Some(anchor);
    }

    let steps = u64::from(index) * u64::from(interval.get());
    match kind {
        RecurrenceType::None => None,
        RecurrenceType::Daily => anchor.checked_add_days(Days::new(steps)),
        RecurrenceType::Weekly => anchor.checked_add_days(Days::new(steps.checked_mul(7)?)),
        RecurrenceType::Monthly => add_months_clamped(anchor, steps),
        RecurrenceType::Yearly => add_years_clamped(anchor, steps),
    }
}

fn add_months_clamped(anchor: NaiveDate, months: u64) -> Option<NaiveDate> {
    let month_index = i64::from(anchor.month0()).checked_add(i64::try_from(months).ok()?)?;
    let year = i64::from(anchor.year()).checked_add(month_index.div_euclid(12))?;
    let year = i32::try_from(year).ok()?;
    let month = u32::try_from(month_index.rem_euclid(12)).ok()? + 1;

    let day = anchor.day().min(last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

fn add_years_clamped(anchor: NaiveDate, years: u64) -> Option<NaiveDate> {
    let year = i64::from(anchor.year()).checked_add(i64::try_from(years).ok()?)?;
    let year = i32::try_from(year).ok()?;

    let day = if anchor.month() == 2 && anchor.day() == 29 && !is_leap_year(year) {
        28
    } else {
        anchor.day()
    };
    NaiveDate::from_ymd_opt(year, anchor.month(), day)
}
