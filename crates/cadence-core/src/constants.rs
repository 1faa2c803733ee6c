use chrono::NaiveDate;

/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const EVENTS_ROUTE_COMPONENT: &str = "events";
pub const EVENTS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", EVENTS_ROUTE_COMPONENT);

pub const EVENTS_LIST_ROUTE_COMPONENT: &str = "events-list";
pub const EVENTS_LIST_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", EVENTS_LIST_ROUTE_COMPONENT);

pub const RECURRING_EVENTS_ROUTE_COMPONENT: &str = "recurring-events";
pub const RECURRING_EVENTS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", RECURRING_EVENTS_ROUTE_COMPONENT);

/// ## Summary
/// Absolute upper bound for rules that never end.
///
/// A fixed date rather than an offset from "now", so that generating the same
/// rule twice always yields the same occurrences.
pub const DEFAULT_SAFETY_HORIZON: NaiveDate = match NaiveDate::from_ymd_opt(2035, 12, 31) {
    Some(date) => date,
    None => panic!("safety horizon must be a valid calendar date"),
};

/// Largest number of occurrences a single rule evaluation may produce.
pub const DEFAULT_MAX_OCCURRENCES: usize = 5000;
