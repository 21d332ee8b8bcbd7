//! Attendance-day window: a 24h interval starting at a configured hour
//! (e.g. 04:00) instead of midnight.

use crate::errors::{AppError, AppResult};
use crate::utils::date;
use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Rendering used inside the extraction instructions ("22/02/26 04:00 AM").
pub const WINDOW_LABEL_FORMAT: &str = "%d/%m/%y %I:%M %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceWindow {
    pub date: NaiveDate,
    pub start_hour: u32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl AttendanceWindow {
    /// Window for `date` beginning at `start_hour`:00 and ending at the same
    /// hour on the following calendar date.
    pub fn for_date(date: NaiveDate, start_hour: u32) -> AppResult<Self> {
        let start = date
            .and_hms_opt(start_hour, 0, 0)
            .ok_or(AppError::InvalidHour(start_hour))?;

        let next = date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;

        let end = next
            .and_hms_opt(start_hour, 0, 0)
            .ok_or(AppError::InvalidHour(start_hour))?;

        Ok(Self {
            date,
            start_hour,
            start,
            end,
        })
    }

    /// Window containing the instant `now`: before the start hour it is
    /// still the previous attendance day.
    pub fn containing(now: NaiveDateTime, start_hour: u32) -> AppResult<Self> {
        let mut date = now.date();
        if now.hour() < start_hour {
            date = date
                .checked_sub_days(Days::new(1))
                .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
        }
        Self::for_date(date, start_hour)
    }

    /// Window for an optional `YYYY-MM-DD` argument, defaulting to the
    /// attendance day in progress.
    pub fn from_arg(date_str: Option<&str>, start_hour: u32) -> AppResult<Self> {
        match date_str {
            Some(d) => Self::parse(d, start_hour),
            None => Self::containing(chrono::Local::now().naive_local(), start_hour),
        }
    }

    /// Same as `for_date`, parsing a `YYYY-MM-DD` string first.
    pub fn parse(date_str: &str, start_hour: u32) -> AppResult<Self> {
        let d = date::parse_date(date_str.trim())
            .ok_or_else(|| AppError::InvalidDate(date_str.to_string()))?;
        Self::for_date(d, start_hour)
    }

    pub fn start_label(&self) -> String {
        self.start.format(WINDOW_LABEL_FORMAT).to_string()
    }

    pub fn end_label(&self) -> String {
        self.end.format(WINDOW_LABEL_FORMAT).to_string()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open membership: `start <= at < end`.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at < self.end
    }

    /// Place a wall-clock time inside the window. Times earlier than the
    /// start hour belong to the following calendar date.
    pub fn instant_for(&self, time: NaiveTime) -> NaiveDateTime {
        if time.hour() >= self.start_hour {
            self.date.and_time(time)
        } else {
            self.end.date().and_time(time)
        }
    }
}
