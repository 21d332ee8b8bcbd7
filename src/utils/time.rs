//! Time utilities: parsing HH:MM, 12h rendering, durations.

use crate::core::normalize::parse_normalized;
use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveTime};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Parse operator input: accepts `HH:MM` as well as `9:05 AM`, `930pm`, ...
pub fn parse_time_input(t: &str) -> AppResult<NaiveTime> {
    parse_normalized(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    input.map(|s| parse_time_input(s)).transpose()
}

/// `HH:MM` → `hh:mm AM`.
pub fn to_ampm(t: NaiveTime) -> String {
    t.format("%I:%M %p").to_string()
}

/// Minutes from `start` to `end`, wrapping past midnight when `end < start`.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let mut d = end - start;
    if d < Duration::zero() {
        d += Duration::hours(24);
    }
    d.num_minutes()
}

/// `Xh Ym`, or `Active` for a record without end time.
pub fn format_duration(start: NaiveTime, end: Option<NaiveTime>) -> String {
    match end {
        Some(e) => {
            let mins = minutes_between(start, e);
            format!("{}h {}m", mins / 60, mins % 60)
        }
        None => "Active".to_string(),
    }
}
