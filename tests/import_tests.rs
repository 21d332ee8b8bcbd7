use chrono::NaiveDate;
use sewalogger::core::import::{ImportSession, parse_index_list};
use sewalogger::core::reconcile::Mutation;
use sewalogger::core::window::AttendanceWindow;
use sewalogger::errors::{AppError, AppResult};
use sewalogger::extract::{ExtractionRequest, Extractor, ReplayExtractor, tail_chars};
use sewalogger::models::sewadar::Sewadar;
use std::cell::RefCell;

fn window() -> AttendanceWindow {
    AttendanceWindow::for_date(NaiveDate::from_ymd_opt(2026, 2, 22).unwrap(), 4).unwrap()
}

fn sewadar(id: &str, name: &str) -> Sewadar {
    Sewadar {
        id: id.to_string(),
        name: name.to_string(),
        avatar: None,
        phone_number: None,
    }
}

fn roster() -> Vec<Sewadar> {
    vec![sewadar("s1", "Ravi Kumar"), sewadar("s2", "Sunita Devi")]
}

/// Keeps the request it was given, answers with a fixed body.
struct Recording {
    answer: String,
    seen: RefCell<Option<ExtractionRequest>>,
}

impl Extractor for Recording {
    fn extract(&self, request: &ExtractionRequest) -> AppResult<String> {
        *self.seen.borrow_mut() = Some(request.clone());
        Ok(self.answer.clone())
    }
}

const ANSWER: &str = r#"[
  {"rawName":"Ravi","matchedSewadarId":"s1","type":"IN","time":"9:05 AM","counter":"Tea","confidence":0.95},
  {"rawName":"Sunita Devi","matchedSewadarId":null,"type":"IN","time":"09:30","counter":null,"confidence":0.7},
  {"rawName":"Ghost","matchedSewadarId":"s9","type":"IN","time":"10:00","counter":null,"confidence":0.4},
  {"rawName":"Ravi","matchedSewadarId":"s1","type":"OUT","time":"5:30 PM","counter":null,"confidence":0.9},
  {"rawName":"Broken","type":"IN","confidence":0.9}
]"#;

#[test]
fn test_request_carries_window_roster_and_transcript() {
    let ex = Recording {
        answer: "[]".into(),
        seen: RefCell::new(None),
    };

    let session = ImportSession::prepare(&ex, "[22/02/26, 9:05 AM] Ravi: In", &roster(), window(), "Jalpan Sewa", 1000).unwrap();
    assert!(session.candidates.is_empty());
    assert!(!session.truncated);

    let req = ex.seen.borrow().clone().unwrap();
    assert_eq!(req.date, "2026-02-22");
    assert_eq!(req.window_start, "22/02/26 04:00 AM");
    assert_eq!(req.window_end, "23/02/26 04:00 AM");
    assert_eq!(req.roster[0], ("s1".to_string(), "Ravi Kumar".to_string()));

    let prompt = req.prompt();
    assert!(prompt.contains("ID: s2, Name: Sunita Devi"));
    assert!(prompt.contains("Ravi: In"));
    assert!(prompt.contains("Jalpan Sewa"));
}

#[test]
fn test_long_transcript_keeps_its_tail() {
    let (tail, cut) = tail_chars("abcdefghij", 4);
    assert_eq!((tail, cut), ("ghij", true));

    let (tail, cut) = tail_chars("नमस्ते", 100);
    assert_eq!((tail, cut), ("नमस्ते", false));

    let ex = Recording {
        answer: "[]".into(),
        seen: RefCell::new(None),
    };
    let session = ImportSession::prepare(&ex, "old old old NEW", &roster(), window(), "Team", 3).unwrap();
    assert!(session.truncated);
    assert_eq!(ex.seen.borrow().as_ref().unwrap().transcript, "NEW");
}

#[test]
fn test_candidates_are_resolved_against_roster() {
    let ex = ReplayExtractor::new(ANSWER);
    let session = ImportSession::prepare(&ex, "log", &roster(), window(), "Team", 1000).unwrap();

    assert_eq!(session.candidates.len(), 4);
    assert_eq!(session.rejected.len(), 1);
    assert_eq!(session.rejected[0].index, 4);

    // unknown id cleared, exact name matched locally
    assert_eq!(session.resolution.cleared, vec![2]);
    assert_eq!(session.resolution.matched_by_name, vec![1]);
    assert_eq!(session.candidates[1].matched_sewadar_id.as_deref(), Some("s2"));
    assert_eq!(session.candidates[2].matched_sewadar_id, None);

    // matched candidates are selected by default
    assert_eq!(session.selected().iter().copied().collect::<Vec<_>>(), vec![0, 1, 3]);
}

#[test]
fn test_plan_from_session() {
    let ex = ReplayExtractor::new(ANSWER);
    let session = ImportSession::prepare(&ex, "log", &roster(), window(), "Team", 1000).unwrap();

    let plan = session.plan(&[], "General");

    assert_eq!(
        plan.mutations,
        vec![
            Mutation::Create {
                sewadar_id: "s1".into(),
                counter: "Tea".into(),
                start_time: "09:05".into(),
                end_time: Some("17:30".into()),
            },
            Mutation::Create {
                sewadar_id: "s2".into(),
                counter: "General".into(),
                start_time: "09:30".into(),
                end_time: None,
            },
        ]
    );
}

#[test]
fn test_operator_selection() {
    let ex = ReplayExtractor::new(ANSWER);
    let mut session = ImportSession::prepare(&ex, "log", &roster(), window(), "Team", 1000).unwrap();

    session.exclude(&[1]).unwrap();
    assert!(!session.is_selected(1));
    assert_eq!(session.plan(&[], "General").mutations.len(), 1);

    session.select_only(&[1]).unwrap();
    assert_eq!(session.selected().len(), 1);

    // unmatched and out-of-range candidates cannot be picked
    assert!(matches!(
        session.select_only(&[2]),
        Err(AppError::InvalidCandidate(_))
    ));
    assert!(matches!(
        session.exclude(&[10]),
        Err(AppError::InvalidCandidate(_))
    ));
}

#[test]
fn test_index_lists() {
    assert_eq!(parse_index_list("1,3,5-7").unwrap(), vec![0, 2, 4, 5, 6]);
    assert_eq!(parse_index_list(" 2 , ").unwrap(), vec![1]);
    assert!(parse_index_list("0").is_err());
    assert!(parse_index_list("4-2").is_err());
    assert!(parse_index_list("a").is_err());
}

#[test]
fn test_extraction_failure_propagates() {
    let ex = ReplayExtractor::new(r#"{"error": "quota"}"#);
    let err = ImportSession::prepare(&ex, "log", &roster(), window(), "Team", 1000).unwrap_err();
    assert!(matches!(err, AppError::ExtractionFailure(_)));
}
