use chrono::{NaiveDate, NaiveTime};
use sewalogger::core::summary::build_day_summary;
use sewalogger::core::window::AttendanceWindow;
use sewalogger::export::share::build_share_text;
use sewalogger::models::record::AttendanceRecord;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 22).unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn rec(id: &str, who: &str, counter: &str, start: &str, end: Option<&str>) -> AttendanceRecord {
    AttendanceRecord {
        id: id.to_string(),
        sewadar_id: format!("id-{who}"),
        sewadar_name: who.to_string(),
        counter: counter.to_string(),
        date: day(),
        start_time: t(start),
        end_time: end.map(t),
        created_at: "2026-02-22T09:00:00".to_string(),
    }
}

#[test]
fn test_counts_and_counters_in_first_seen_order() {
    let records = [
        rec("r1", "Ravi", "Tea", "09:00", Some("12:00")),
        rec("r2", "Sunita", "Dessert", "09:30", None),
        rec("r3", "Ravi", "Tea", "14:00", None),
    ];
    let refs: Vec<&AttendanceRecord> = records.iter().collect();
    let window = AttendanceWindow::for_date(day(), 4).unwrap();

    let s = build_day_summary(&refs, &window);

    assert_eq!(s.total_records, 3);
    assert_eq!(s.total_sewadars, 2);
    assert_eq!(s.active_count, 2);
    assert_eq!(s.counters, vec!["Tea", "Dessert"]);
    assert_eq!(s.counter_counts, vec![("Tea".to_string(), 2), ("Dessert".to_string(), 1)]);
    assert_eq!(s.duty_start, Some(t("09:00")));
    assert_eq!(s.duty_end, Some(t("12:00")));
}

#[test]
fn test_duty_end_after_midnight_is_latest() {
    let records = [
        rec("r1", "Ravi", "Tea", "18:00", Some("23:00")),
        rec("r2", "Sunita", "Tea", "20:00", Some("01:30")),
    ];
    let refs: Vec<&AttendanceRecord> = records.iter().collect();
    let window = AttendanceWindow::for_date(day(), 4).unwrap();

    let s = build_day_summary(&refs, &window);

    assert_eq!(s.duty_start, Some(t("18:00")));
    assert_eq!(s.duty_end, Some(t("01:30")));
}

#[test]
fn test_empty_day() {
    let window = AttendanceWindow::for_date(day(), 4).unwrap();
    let s = build_day_summary(&[], &window);

    assert_eq!(s.total_records, 0);
    assert!(s.duty_start.is_none());
    assert!(s.duty_end.is_none());

    let text = build_share_text(day(), &[], &s, "Jalpan Sewa");
    assert!(text.starts_with("*Jalpan Sewa Report - 22 February 2026*"));
    assert!(text.contains("_No entries recorded for this date._"));
}

#[test]
fn test_share_text_lists_every_record() {
    let records = [
        rec("r1", "Ravi", "Tea", "09:00", Some("17:30")),
        rec("r2", "Sunita", "", "09:30", None),
    ];
    let refs: Vec<&AttendanceRecord> = records.iter().collect();
    let window = AttendanceWindow::for_date(day(), 4).unwrap();
    let s = build_day_summary(&refs, &window);

    let text = build_share_text(day(), &refs, &s, "Jalpan Sewa");

    assert!(text.contains("• Total Sewadars: 2"));
    assert!(text.contains("• Active Spots: 2"));
    assert!(text.contains("• *Ravi* (Tea)\n  Time: 09:00 AM - 05:30 PM"));
    assert!(text.contains("• *Sunita* ((no counter))\n  Time: 09:30 AM - Active"));
    assert!(text.ends_with("Generated via Jalpan Sewa Portal"));
}
