use chrono::{NaiveDate, NaiveTime};
use sewalogger::core::portal::Portal;
use sewalogger::core::reconcile::{Mutation, ReconcilePlan};
use sewalogger::db::pool::DbPool;
use sewalogger::db::store::Store;
use sewalogger::errors::{AppError, AppResult};
use sewalogger::models::record::{AttendanceRecord, NewRecord};
use sewalogger::models::sewadar::{NewSewadar, Sewadar, SewadarUpdate};

mod common;
use common::setup_test_db;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 22).unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn portal(name: &str) -> Portal<DbPool> {
    let db_path = setup_test_db(name);
    Portal::load(DbPool::open(&db_path).unwrap()).unwrap()
}

fn member(p: &mut Portal<impl Store>, name: &str) -> Sewadar {
    p.add_member(NewSewadar {
        name: name.to_string(),
        phone_number: None,
    })
    .unwrap()
}

fn create(sewadar_id: &str, start: &str, end: Option<&str>) -> Mutation {
    Mutation::Create {
        sewadar_id: sewadar_id.to_string(),
        counter: "Tea".to_string(),
        start_time: start.to_string(),
        end_time: end.map(str::to_string),
    }
}

/// Delegates to a real database but refuses record inserts after `allowed`
/// of them. With `log_fails` every audit entry is refused too.
struct FlakyStore {
    inner: DbPool,
    allowed: usize,
    log_fails: bool,
}

impl Store for FlakyStore {
    fn load_sewadars(&mut self) -> AppResult<Vec<Sewadar>> {
        self.inner.load_sewadars()
    }
    fn insert_sewadar(&mut self, new: &NewSewadar) -> AppResult<Sewadar> {
        self.inner.insert_sewadar(new)
    }
    fn update_sewadar(&mut self, id: &str, update: &SewadarUpdate) -> AppResult<()> {
        self.inner.update_sewadar(id, update)
    }
    fn delete_sewadar(&mut self, id: &str) -> AppResult<()> {
        self.inner.delete_sewadar(id)
    }
    fn load_records(&mut self) -> AppResult<Vec<AttendanceRecord>> {
        self.inner.load_records()
    }
    fn insert_record(&mut self, new: NewRecord) -> AppResult<AttendanceRecord> {
        if self.allowed == 0 {
            return Err(AppError::StoreFailure("disk full".into()));
        }
        self.allowed -= 1;
        self.inner.insert_record(new)
    }
    fn set_end_time(&mut self, record_id: &str, end: NaiveTime) -> AppResult<()> {
        self.inner.set_end_time(record_id, end)
    }
    fn delete_record(&mut self, record_id: &str) -> AppResult<()> {
        self.inner.delete_record(record_id)
    }
    fn delete_records_by_date(&mut self, date: NaiveDate) -> AppResult<usize> {
        self.inner.delete_records_by_date(date)
    }
    fn log(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        if self.log_fails {
            return Err(AppError::StoreFailure("log table locked".into()));
        }
        self.inner.log(operation, target, message)
    }
}

#[test]
fn test_roster_is_sorted_and_survives_reload() {
    let db_path = setup_test_db("portal_roster_reload");
    let mut p = Portal::load(DbPool::open(&db_path).unwrap()).unwrap();

    member(&mut p, "sunita Devi");
    member(&mut p, "Ravi Kumar");
    member(&mut p, "Amar");

    let names: Vec<&str> = p.sewadars().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Amar", "Ravi Kumar", "sunita Devi"]);

    let reloaded = Portal::load(DbPool::open(&db_path).unwrap()).unwrap();
    assert_eq!(reloaded.sewadars(), p.sewadars());
}

#[test]
fn test_empty_name_is_rejected() {
    let mut p = portal("portal_empty_name");
    let err = p
        .add_member(NewSewadar {
            name: "   ".into(),
            phone_number: None,
        })
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidName(_)));
    assert!(p.sewadars().is_empty());
}

#[test]
fn test_resolve_by_id_and_by_name() {
    let mut p = portal("portal_resolve");
    let ravi = member(&mut p, "Ravi Kumar");
    member(&mut p, "Mohan");
    member(&mut p, "mohan");

    assert_eq!(p.resolve_sewadar(&ravi.id).unwrap().id, ravi.id);
    assert_eq!(p.resolve_sewadar("  ravi   kumar ").unwrap().id, ravi.id);
    assert!(matches!(
        p.resolve_sewadar("Mohan"),
        Err(AppError::SewadarNotFound(_))
    ));
    assert!(matches!(
        p.resolve_sewadar("Nobody"),
        Err(AppError::SewadarNotFound(_))
    ));
}

#[test]
fn test_update_member_changes_only_given_fields() {
    let db_path = setup_test_db("portal_update_member");
    let mut p = Portal::load(DbPool::open(&db_path).unwrap()).unwrap();
    let ravi = p
        .add_member(NewSewadar {
            name: "Ravi".into(),
            phone_number: Some("+91 98765 43210".into()),
        })
        .unwrap();

    let updated = p
        .update_member(
            &ravi.id,
            SewadarUpdate {
                name: Some(" Ravi Kumar ".into()),
                ..SewadarUpdate::default()
            },
        )
        .unwrap();

    assert_eq!(updated.name, "Ravi Kumar");
    assert_eq!(updated.phone_number.as_deref(), Some("+91 98765 43210"));

    let reloaded = Portal::load(DbPool::open(&db_path).unwrap()).unwrap();
    assert_eq!(reloaded.sewadar(&ravi.id), Some(&updated));
}

#[test]
fn test_removing_member_keeps_history() {
    let mut p = portal("portal_remove_member");
    let ravi = member(&mut p, "Ravi");
    p.add_entry(&ravi.id, "Tea", day(), t("09:00"), Some(t("12:00")))
        .unwrap();

    p.remove_member(&ravi.id).unwrap();

    assert!(p.sewadars().is_empty());
    assert_eq!(p.records_for(day()).len(), 1);
    assert_eq!(p.records_for(day())[0].sewadar_name, "Ravi");
}

#[test]
fn test_mark_out_closes_once() {
    let mut p = portal("portal_mark_out");
    let ravi = member(&mut p, "Ravi");
    let rec = p.add_entry(&ravi.id, "Tea", day(), t("09:00"), None).unwrap();
    assert_eq!(p.active_count(day()), 1);

    let closed = p.mark_out(&rec.id, t("17:30")).unwrap();
    assert_eq!(closed.end_time, Some(t("17:30")));
    assert_eq!(p.active_count(day()), 0);

    let err = p.mark_out(&rec.id, t("18:00")).unwrap_err();
    assert!(matches!(err, AppError::RecordClosed(_)));
    assert_eq!(p.record(&rec.id).unwrap().end_time, Some(t("17:30")));
}

#[test]
fn test_delete_date_only_touches_that_day() {
    let mut p = portal("portal_delete_date");
    let ravi = member(&mut p, "Ravi");
    let other = NaiveDate::from_ymd_opt(2026, 2, 23).unwrap();
    p.add_entry(&ravi.id, "Tea", day(), t("09:00"), None).unwrap();
    p.add_entry(&ravi.id, "Tea", day(), t("14:00"), None).unwrap();
    p.add_entry(&ravi.id, "Tea", other, t("09:00"), None).unwrap();

    assert_eq!(p.delete_date(day()).unwrap(), 2);
    assert!(p.records_for(day()).is_empty());
    assert_eq!(p.records_for(other).len(), 1);
}

#[test]
fn test_apply_creates_and_closes() {
    let mut p = portal("portal_apply_ok");
    let ravi = member(&mut p, "Ravi");
    let sunita = member(&mut p, "Sunita");
    let open = p.add_entry(&sunita.id, "Tea", day(), t("08:00"), None).unwrap();

    let plan = ReconcilePlan {
        mutations: vec![
            create(&ravi.id, "09:05", Some("17:30")),
            Mutation::SetEndTime {
                record_id: open.id.clone(),
                sewadar_id: sunita.id.clone(),
                end_time: "16:00".into(),
            },
        ],
        skipped: vec![],
    };

    let report = p.apply(day(), &plan).unwrap();

    assert_eq!(report.total(), 2);
    assert_eq!(report.created[0].sewadar_name, "Ravi");
    assert_eq!(report.created[0].end_time, Some(t("17:30")));
    assert_eq!(p.record(&open.id).unwrap().end_time, Some(t("16:00")));
    assert_eq!(p.active_count(day()), 0);
}

#[test]
fn test_apply_checks_times_before_writing() {
    let mut p = portal("portal_apply_bad_time");
    let ravi = member(&mut p, "Ravi");
    let sunita = member(&mut p, "Sunita");

    let plan = ReconcilePlan {
        mutations: vec![
            create(&ravi.id, "09:05", None),
            create(&sunita.id, "morning", None),
        ],
        skipped: vec![],
    };

    let err = p.apply(day(), &plan).unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(_)));
    assert!(p.records().is_empty());
}

#[test]
fn test_first_failure_is_returned_as_is() {
    let db_path = setup_test_db("portal_apply_first_fail");
    let store = FlakyStore {
        inner: DbPool::open(&db_path).unwrap(),
        allowed: 0,
        log_fails: false,
    };
    let mut p = Portal::load(store).unwrap();
    let ravi = member(&mut p, "Ravi");

    let plan = ReconcilePlan {
        mutations: vec![create(&ravi.id, "09:00", None)],
        skipped: vec![],
    };

    let err = p.apply(day(), &plan).unwrap_err();
    assert!(err.is_store_failure());
    assert!(p.records().is_empty());
}

#[test]
fn test_partial_failure_keeps_applied_mutations() {
    let db_path = setup_test_db("portal_apply_partial");
    let store = FlakyStore {
        inner: DbPool::open(&db_path).unwrap(),
        allowed: 1,
        log_fails: false,
    };
    let mut p = Portal::load(store).unwrap();
    let ravi = member(&mut p, "Ravi");
    let sunita = member(&mut p, "Sunita");
    let mohan = member(&mut p, "Mohan");

    let plan = ReconcilePlan {
        mutations: vec![
            create(&ravi.id, "09:00", None),
            create(&sunita.id, "09:30", None),
            create(&mohan.id, "10:00", None),
        ],
        skipped: vec![],
    };

    let err = p.apply(day(), &plan).unwrap_err();
    match err {
        AppError::PartialImportFailure {
            applied,
            total,
            source,
        } => {
            assert_eq!((applied, total), (1, 3));
            assert!(source.is_store_failure());
        }
        other => panic!("unexpected error: {other}"),
    }

    // in-memory state and the database agree: only the first insert exists
    assert_eq!(p.records().len(), 1);
    let mut pool = p.into_store().inner;
    assert_eq!(pool.load_records().unwrap().len(), 1);
}

#[test]
fn test_failed_audit_log_keeps_confirmed_writes() {
    let db_path = setup_test_db("portal_audit_log_fails");
    let store = FlakyStore {
        inner: DbPool::open(&db_path).unwrap(),
        allowed: usize::MAX,
        log_fails: true,
    };
    let mut p = Portal::load(store).unwrap();
    let ravi = member(&mut p, "Ravi");

    let plan = ReconcilePlan {
        mutations: vec![create(&ravi.id, "09:00", Some("17:30"))],
        skipped: vec![],
    };

    let report = p.apply(day(), &plan).unwrap();
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.created[0].end_time, Some(t("17:30")));
    assert_eq!(p.records().len(), 1);

    let rec = p.records()[0].id.clone();
    p.delete_entry(&rec).unwrap();
    assert!(p.records().is_empty());

    let mut pool = p.into_store().inner;
    assert!(pool.load_records().unwrap().is_empty());
    assert_eq!(pool.load_sewadars().unwrap().len(), 1);
}
