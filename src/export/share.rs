// src/export/share.rs

use crate::models::day_summary::DaySummary;
use crate::models::record::AttendanceRecord;
use crate::utils::date::long_display;
use crate::utils::formatting::counter_label;
use crate::utils::time::to_ampm;
use chrono::NaiveDate;

/// Chat-friendly summary (WhatsApp markup: `*bold*`, `_italic_`).
pub fn build_share_text(
    date: NaiveDate,
    records: &[&AttendanceRecord],
    summary: &DaySummary,
    team_name: &str,
) -> String {
    let mut text = format!("*{team_name} Report - {}*\n\n", long_display(&date));

    text.push_str("📊 *Summary*\n");
    text.push_str(&format!("• Total Sewadars: {}\n", summary.total_sewadars));
    text.push_str(&format!("• Active Spots: {}\n\n", summary.counters.len()));

    text.push_str("📋 *Attendance Log*\n");

    if records.is_empty() {
        text.push_str("_No entries recorded for this date._\n");
    } else {
        for r in records {
            let out = r.end_time.map(to_ampm).unwrap_or_else(|| "Active".into());
            text.push_str(&format!(
                "• *{}* ({})\n  Time: {} - {}\n",
                r.sewadar_name,
                counter_label(&r.counter),
                to_ampm(r.start_time),
                out
            ));
        }
    }

    text.push_str(&format!("\nGenerated via {team_name} Portal"));
    text
}
