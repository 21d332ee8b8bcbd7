use sewalogger::core::normalize::{is_canonical, normalize_time, parse_normalized};

#[test]
fn test_am_pm_conversion() {
    assert_eq!(normalize_time("9:00 AM"), "09:00");
    assert_eq!(normalize_time("12:00 AM"), "00:00");
    assert_eq!(normalize_time("12:30 PM"), "12:30");
    assert_eq!(normalize_time("11:45pm"), "23:45");
    assert_eq!(normalize_time("1:05 pm"), "13:05");
}

#[test]
fn test_24h_is_zero_padded() {
    assert_eq!(normalize_time("9:05"), "09:05");
    assert_eq!(normalize_time("17:30"), "17:30");
    assert_eq!(normalize_time("17:30:45"), "17:30");
    assert_eq!(normalize_time("  08:15 "), "08:15");
}

#[test]
fn test_compact_and_bare_hours() {
    assert_eq!(normalize_time("930PM"), "21:30");
    assert_eq!(normalize_time("0745"), "07:45");
    assert_eq!(normalize_time("9 PM"), "21:00");
    assert_eq!(normalize_time("9:30   pm"), "21:30");
}

#[test]
fn test_single_minute_digit() {
    assert_eq!(normalize_time("9:5 PM"), "21:05");
    assert_eq!(normalize_time("7:5"), "07:05");
    assert_eq!(normalize_time("12:0am"), "00:00");
    assert!(parse_normalized(&normalize_time("9:5 PM")).is_some());
}

#[test]
fn test_unparseable_is_returned_unchanged() {
    assert_eq!(normalize_time("morning"), "morning");
    assert_eq!(normalize_time(""), "");
    assert_eq!(normalize_time("25:00"), "25:00");
    assert!(parse_normalized("morning").is_none());
}

#[test]
fn test_normalization_is_idempotent() {
    for raw in ["9:00 AM", "12:00 AM", "11:45pm", "930PM", "17:30", "7:5"] {
        let once = normalize_time(raw);
        assert_eq!(normalize_time(&once), once, "input {raw:?}");
    }
}

#[test]
fn test_canonical_form() {
    assert!(is_canonical("09:05"));
    assert!(!is_canonical("9:05"));
    assert!(!is_canonical("24:00"));
    assert!(is_canonical(&normalize_time("9:05 am")));
}
