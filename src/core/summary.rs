use crate::core::window::AttendanceWindow;
use crate::models::day_summary::DaySummary;
use crate::models::record::AttendanceRecord;
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// Aggregate the records of one attendance day.
///
/// Duty start / end are compared as instants inside `window`, so a check-out
/// at 01:30 after a 04:00 day start counts as later than one at 23:00.
pub fn build_day_summary(records: &[&AttendanceRecord], window: &AttendanceWindow) -> DaySummary {
    let mut summary = DaySummary {
        total_records: records.len(),
        ..DaySummary::default()
    };

    let mut seen_sewadars = HashSet::new();
    let mut first_in: Option<NaiveDateTime> = None;
    let mut last_out: Option<NaiveDateTime> = None;

    for r in records {
        seen_sewadars.insert(r.sewadar_id.as_str());

        if r.is_open() {
            summary.active_count += 1;
        }

        match summary.counter_counts.iter_mut().find(|(c, _)| *c == r.counter) {
            Some((_, n)) => *n += 1,
            None => {
                summary.counters.push(r.counter.clone());
                summary.counter_counts.push((r.counter.clone(), 1));
            }
        }

        let start = window.instant_for(r.start_time);
        if first_in.is_none_or(|f| start < f) {
            first_in = Some(start);
        }

        if let Some(end) = r.end_time {
            let end = window.instant_for(end);
            if last_out.is_none_or(|l| end > l) {
                last_out = Some(end);
            }
        }
    }

    summary.total_sewadars = seen_sewadars.len();
    summary.duty_start = first_in.map(|dt| dt.time());
    summary.duty_end = last_out.map(|dt| dt.time());
    summary
}
