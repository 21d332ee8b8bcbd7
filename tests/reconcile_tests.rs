use chrono::{NaiveDate, NaiveTime};
use sewalogger::core::reconcile::{Mutation, Reconciler, SkipReason, default_selection};
use sewalogger::models::candidate::ParsedCandidate;
use sewalogger::models::event_type::EventType;
use sewalogger::models::record::AttendanceRecord;
use std::collections::BTreeSet;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 22).unwrap()
}

fn cand(name: &str, id: Option<&str>, ev: EventType, time: &str, counter: Option<&str>) -> ParsedCandidate {
    ParsedCandidate {
        raw_name: name.to_string(),
        matched_sewadar_id: id.map(str::to_string),
        event_type: ev,
        time: time.to_string(),
        counter: counter.map(str::to_string),
        confidence: 0.9,
    }
}

fn open_record(id: &str, sewadar_id: &str, date: NaiveDate) -> AttendanceRecord {
    AttendanceRecord {
        id: id.to_string(),
        sewadar_id: sewadar_id.to_string(),
        sewadar_name: "Ravi".to_string(),
        counter: "Tea".to_string(),
        date,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: None,
        created_at: "2026-02-22T09:00:00".to_string(),
    }
}

fn all(n: usize) -> BTreeSet<usize> {
    (0..n).collect()
}

#[test]
fn test_in_and_out_collapse_into_one_create() {
    let candidates = vec![
        cand("Ravi", Some("s1"), EventType::In, "9:05 AM", Some("Tea")),
        cand("Ravi", Some("s1"), EventType::Out, "5:30 PM", None),
    ];

    let plan = Reconciler::new("General").plan(&candidates, &all(2), &[], day());

    assert_eq!(
        plan.mutations,
        vec![Mutation::Create {
            sewadar_id: "s1".into(),
            counter: "Tea".into(),
            start_time: "09:05".into(),
            end_time: Some("17:30".into()),
        }]
    );
    assert!(plan.skipped.is_empty());
}

#[test]
fn test_lone_out_without_open_record_is_dropped() {
    let candidates = vec![cand("Ravi", Some("s1"), EventType::Out, "17:30", None)];

    let plan = Reconciler::new("General").plan(&candidates, &all(1), &[], day());

    assert!(plan.is_empty());
    assert_eq!(plan.skipped.len(), 1);
    assert_eq!(plan.skipped[0].reason, SkipReason::NoOpenRecord);
}

#[test]
fn test_lone_out_closes_open_record_of_the_same_day() {
    let candidates = vec![cand("Ravi", Some("s1"), EventType::Out, "5:30 pm", None)];
    let records = vec![
        open_record("r-old", "s1", NaiveDate::from_ymd_opt(2026, 2, 21).unwrap()),
        open_record("r1", "s1", day()),
    ];

    let plan = Reconciler::new("General").plan(&candidates, &all(1), &records, day());

    assert_eq!(
        plan.mutations,
        vec![Mutation::SetEndTime {
            record_id: "r1".into(),
            sewadar_id: "s1".into(),
            end_time: "17:30".into(),
        }]
    );
}

#[test]
fn test_first_in_and_last_out_win() {
    let candidates = vec![
        cand("Ravi", Some("s1"), EventType::In, "09:00", None),
        cand("Ravi", Some("s1"), EventType::In, "09:10", None),
        cand("Ravi", Some("s1"), EventType::Out, "12:00", None),
        cand("Ravi", Some("s1"), EventType::Out, "18:00", None),
    ];

    let plan = Reconciler::new("General").plan(&candidates, &all(4), &[], day());

    assert_eq!(plan.mutations.len(), 1);
    let Mutation::Create {
        counter,
        start_time,
        end_time,
        ..
    } = &plan.mutations[0]
    else {
        panic!("expected a create");
    };
    assert_eq!(counter, "General");
    assert_eq!(start_time, "09:00");
    assert_eq!(end_time.as_deref(), Some("18:00"));
}

#[test]
fn test_at_most_one_mutation_per_sewadar() {
    let candidates = vec![
        cand("Ravi", Some("s1"), EventType::In, "09:00", None),
        cand("Sunita", Some("s2"), EventType::In, "09:30", Some("Dessert")),
        cand("Ravi", Some("s1"), EventType::Out, "17:00", None),
        cand("Stranger", None, EventType::In, "10:00", None),
        cand("Mohan", Some("s3"), EventType::Out, "11:00", None),
    ];

    let plan = Reconciler::new("General").plan(&candidates, &all(5), &[], day());

    let ids: Vec<&str> = plan.mutations.iter().map(|m| m.sewadar_id()).collect();
    assert_eq!(ids, vec!["s1", "s2"]);
    assert_eq!(plan.skipped.len(), 2);
    assert!(plan.skipped.iter().any(|s| s.reason == SkipReason::Unmatched));
}

#[test]
fn test_lone_in_for_checked_in_sewadar_is_skipped() {
    let candidates = vec![cand("Ravi", Some("s1"), EventType::In, "10:00", None)];
    let records = vec![open_record("r1", "s1", day())];

    let plan = Reconciler::new("General").plan(&candidates, &all(1), &records, day());

    assert!(plan.is_empty());
    assert_eq!(
        plan.skipped[0].reason,
        SkipReason::AlreadyCheckedIn {
            record_id: "r1".into()
        }
    );
}

#[test]
fn test_only_selected_candidates_are_planned() {
    let candidates = vec![
        cand("Ravi", Some("s1"), EventType::In, "09:00", None),
        cand("Sunita", Some("s2"), EventType::In, "09:30", None),
    ];
    let selected: BTreeSet<usize> = [1].into_iter().collect();

    let plan = Reconciler::new("General").plan(&candidates, &selected, &[], day());

    assert_eq!(plan.mutations.len(), 1);
    assert_eq!(plan.mutations[0].sewadar_id(), "s2");
}

#[test]
fn test_default_selection_is_every_matched_candidate() {
    let candidates = vec![
        cand("Ravi", Some("s1"), EventType::In, "09:00", None),
        cand("Stranger", None, EventType::In, "09:00", None),
        cand("Sunita", Some("s2"), EventType::Out, "18:00", None),
    ];

    let selected = default_selection(&candidates);
    assert_eq!(selected.into_iter().collect::<Vec<_>>(), vec![0, 2]);
}
