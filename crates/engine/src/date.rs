//! Calendar parsing for the date keys of the income document.
//!
//! Keys are compared by the instant they denote, never as strings, so
//! `2024-1-10`-style keys and `MM/DD/YYYY` keys sort correctly next to ISO
//! ones. Date-only keys mean midnight UTC; timestamps without an offset are
//! read as UTC too. Month (`YYYY-MM`) and year (`YYYY`) keys fall on the
//! first day of the period.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{EngineError, ResultEngine};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parses a date key into the UTC instant used for ordering.
pub fn parse_date_key(raw: &str) -> ResultEngine<NaiveDateTime> {
    let key = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(key) {
        return Ok(instant.naive_utc());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(key, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(key, format).ok())
                .or_else(|| parse_period_start(key))
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| EngineError::InvalidDate(raw.to_string()))
}

fn parse_period_start(key: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if key.len() == 4 && key.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::from_ymd_opt(key.parse().ok()?, 1, 1);
    }
    None
}
