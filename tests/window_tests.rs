use chrono::{Duration, NaiveDate, NaiveTime};
use sewalogger::core::window::AttendanceWindow;
use sewalogger::errors::AppError;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

#[test]
fn test_window_spans_24_hours_from_start_hour() {
    let w = AttendanceWindow::for_date(d("2026-02-22"), 4).unwrap();

    assert_eq!(w.start, d("2026-02-22").and_time(t("04:00")));
    assert_eq!(w.end, d("2026-02-23").and_time(t("04:00")));
    assert_eq!(w.duration(), Duration::hours(24));
    assert_eq!(w.start_label(), "22/02/26 04:00 AM");
    assert_eq!(w.end_label(), "23/02/26 04:00 AM");
}

#[test]
fn test_window_crosses_month_and_year() {
    let w = AttendanceWindow::for_date(d("2025-12-31"), 6).unwrap();
    assert_eq!(w.end, d("2026-01-01").and_time(t("06:00")));
}

#[test]
fn test_membership_is_half_open() {
    let w = AttendanceWindow::for_date(d("2026-02-22"), 4).unwrap();

    assert!(w.contains(w.start));
    assert!(!w.contains(w.end));
    assert!(w.contains(d("2026-02-23").and_time(t("03:59"))));
    assert!(!w.contains(d("2026-02-22").and_time(t("03:59"))));
}

#[test]
fn test_early_times_belong_to_next_calendar_day() {
    let w = AttendanceWindow::for_date(d("2026-02-22"), 4).unwrap();

    assert_eq!(w.instant_for(t("23:00")), d("2026-02-22").and_time(t("23:00")));
    assert_eq!(w.instant_for(t("01:30")), d("2026-02-23").and_time(t("01:30")));
}

#[test]
fn test_containing_before_start_hour_is_previous_day() {
    let now = d("2026-02-23").and_time(t("02:15"));
    let w = AttendanceWindow::containing(now, 4).unwrap();
    assert_eq!(w.date, d("2026-02-22"));

    let now = d("2026-02-23").and_time(t("04:00"));
    let w = AttendanceWindow::containing(now, 4).unwrap();
    assert_eq!(w.date, d("2026-02-23"));
}

#[test]
fn test_invalid_date_is_rejected() {
    let err = AttendanceWindow::parse("2026-02-30", 4).unwrap_err();
    assert!(matches!(err, AppError::InvalidDate(_)));

    let err = AttendanceWindow::parse("22/02/2026", 4).unwrap_err();
    assert!(matches!(err, AppError::InvalidDate(_)));
}

#[test]
fn test_invalid_start_hour_is_rejected() {
    let err = AttendanceWindow::for_date(d("2026-02-22"), 24).unwrap_err();
    assert!(matches!(err, AppError::InvalidHour(24)));
}
