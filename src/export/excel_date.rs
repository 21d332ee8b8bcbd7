// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveTime, Timelike};

/// Interpret an export cell as an Excel date or time, returning the number
/// format and the serial value.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(("dd/mm/yyyy", date_to_excel_serial(d)?));
    }

    if s.len() == 5
        && let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M")
    {
        let seconds = t.num_seconds_from_midnight() as f64;
        return Some(("hh:mm AM/PM", seconds / 86400.0));
    }

    None
}

/// Days since 1899-12-30 (Excel's 1900 date system).
fn date_to_excel_serial(d: NaiveDate) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((d - epoch).num_days() as f64)
}
