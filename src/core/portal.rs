//! Coordinating state: the roster and the attendance records owned by one
//! component, changed only after the store has confirmed the write.

use crate::core::reconcile::{Mutation, ReconcilePlan};
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::record::{AttendanceRecord, NewRecord};
use crate::models::sewadar::{NewSewadar, Sewadar, SewadarUpdate};
use crate::ui::messages::warning;
use crate::utils::time::parse_time;
use chrono::{NaiveDate, NaiveTime};

/// Outcome of a fully applied import batch.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub created: Vec<AttendanceRecord>,
    pub closed: Vec<AttendanceRecord>,
}

impl ApplyReport {
    pub fn total(&self) -> usize {
        self.created.len() + self.closed.len()
    }
}

/// A mutation whose times have already been checked.
enum Checked<'a> {
    Create {
        sewadar: Sewadar,
        counter: &'a str,
        start: NaiveTime,
        end: Option<NaiveTime>,
    },
    Close {
        record_id: &'a str,
        end: NaiveTime,
    },
}

fn strict_time(s: &str) -> AppResult<NaiveTime> {
    parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

fn sort_roster(roster: &mut [Sewadar]) {
    roster.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
}

pub struct Portal<S: Store> {
    store: S,
    sewadars: Vec<Sewadar>,
    records: Vec<AttendanceRecord>,
}

impl<S: Store> Portal<S> {
    /// Load roster and records from the store.
    pub fn load(mut store: S) -> AppResult<Self> {
        let sewadars = store.load_sewadars()?;
        let records = store.load_records()?;
        Ok(Self {
            store,
            sewadars,
            records,
        })
    }

    // ------------------------------------------------------------------
    // Read-only views
    // ------------------------------------------------------------------

    pub fn sewadars(&self) -> &[Sewadar] {
        &self.sewadars
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn records_for(&self, date: NaiveDate) -> Vec<&AttendanceRecord> {
        self.records.iter().filter(|r| r.date == date).collect()
    }

    pub fn open_record_for(&self, sewadar_id: &str, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.records
            .iter()
            .find(|r| r.sewadar_id == sewadar_id && r.date == date && r.is_open())
    }

    /// Number of volunteers currently checked in on `date`.
    pub fn active_count(&self, date: NaiveDate) -> usize {
        self.records
            .iter()
            .filter(|r| r.date == date && r.is_open())
            .count()
    }

    pub fn sewadar(&self, id: &str) -> Option<&Sewadar> {
        self.sewadars.iter().find(|s| s.id == id)
    }

    pub fn record(&self, id: &str) -> Option<&AttendanceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Resolve a volunteer by id, or by exact (case/whitespace-insensitive) name.
    pub fn resolve_sewadar(&self, key: &str) -> AppResult<&Sewadar> {
        if let Some(s) = self.sewadar(key.trim()) {
            return Ok(s);
        }

        let wanted = Sewadar::name_key(key);
        let mut matches = self
            .sewadars
            .iter()
            .filter(|s| Sewadar::name_key(&s.name) == wanted);

        match (matches.next(), matches.next()) {
            (Some(s), None) => Ok(s),
            (Some(_), Some(_)) => Err(AppError::SewadarNotFound(format!(
                "{key} (ambiguous name, use the id)"
            ))),
            _ => Err(AppError::SewadarNotFound(key.to_string())),
        }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Audit trail entry for a write the store already confirmed.
    /// A failure here never turns that write into an error.
    fn audit(&mut self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.store.log(operation, target, message) {
            warning(format!("Audit log not written ({operation} {target}): {e}"));
        }
    }

    // ------------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------------

    pub fn add_member(&mut self, new: NewSewadar) -> AppResult<Sewadar> {
        if new.name.trim().is_empty() {
            return Err(AppError::InvalidName("name cannot be empty".into()));
        }

        let sewadar = self.store.insert_sewadar(&new)?;
        self.sewadars.push(sewadar.clone());
        sort_roster(&mut self.sewadars);

        self.audit("member_add", &sewadar.id, &format!("Added sewadar '{}'", sewadar.name));
        Ok(sewadar)
    }

    pub fn update_member(&mut self, id: &str, update: SewadarUpdate) -> AppResult<Sewadar> {
        if let Some(name) = &update.name
            && name.trim().is_empty()
        {
            return Err(AppError::InvalidName("name cannot be empty".into()));
        }

        let pos = self
            .sewadars
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AppError::SewadarNotFound(id.to_string()))?;

        let update = SewadarUpdate {
            name: update.name.map(|n| n.trim().to_string()),
            ..update
        };

        self.store.update_sewadar(id, &update)?;
        self.sewadars[pos].apply(&update);
        let updated = self.sewadars[pos].clone();
        sort_roster(&mut self.sewadars);

        self.audit("member_update", id, &format!("Updated sewadar '{}'", updated.name));
        Ok(updated)
    }

    /// Remove a volunteer from the roster. Their attendance records stay.
    pub fn remove_member(&mut self, id: &str) -> AppResult<Sewadar> {
        let pos = self
            .sewadars
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AppError::SewadarNotFound(id.to_string()))?;

        self.store.delete_sewadar(id)?;
        let removed = self.sewadars.remove(pos);

        self.audit("member_del", id, &format!("Removed sewadar '{}'", removed.name));
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Attendance records
    // ------------------------------------------------------------------

    /// Direct entry. A second open record for the same day is allowed here.
    pub fn add_entry(
        &mut self,
        sewadar_id: &str,
        counter: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: Option<NaiveTime>,
    ) -> AppResult<AttendanceRecord> {
        let sewadar = self
            .sewadar(sewadar_id)
            .cloned()
            .ok_or_else(|| AppError::SewadarNotFound(sewadar_id.to_string()))?;

        let rec = self.insert(&sewadar, counter, date, start, end)?;
        self.audit(
            "add",
            &rec.id,
            &format!("{} checked in at {} ({})", rec.sewadar_name, rec.start_str(), rec.date),
        );
        Ok(rec)
    }

    fn insert(
        &mut self,
        sewadar: &Sewadar,
        counter: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: Option<NaiveTime>,
    ) -> AppResult<AttendanceRecord> {
        let rec = self.store.insert_record(NewRecord {
            sewadar_id: sewadar.id.clone(),
            sewadar_name: sewadar.name.clone(),
            counter: counter.trim().to_string(),
            date,
            start_time: start,
            end_time: end,
        })?;
        self.records.push(rec.clone());
        Ok(rec)
    }

    /// Close an open record. OPEN → CLOSED only.
    pub fn mark_out(&mut self, record_id: &str, end: NaiveTime) -> AppResult<AttendanceRecord> {
        let rec = self.close(record_id, end)?;
        self.audit(
            "out",
            &rec.id,
            &format!("{} checked out at {}", rec.sewadar_name, end.format("%H:%M")),
        );
        Ok(rec)
    }

    fn close(&mut self, record_id: &str, end: NaiveTime) -> AppResult<AttendanceRecord> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == record_id)
            .ok_or_else(|| AppError::RecordNotFound(record_id.to_string()))?;

        if !self.records[pos].is_open() {
            return Err(AppError::RecordClosed(record_id.to_string()));
        }

        self.store.set_end_time(record_id, end)?;
        self.records[pos].end_time = Some(end);
        Ok(self.records[pos].clone())
    }

    pub fn delete_entry(&mut self, record_id: &str) -> AppResult<AttendanceRecord> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == record_id)
            .ok_or_else(|| AppError::RecordNotFound(record_id.to_string()))?;

        self.store.delete_record(record_id)?;
        let removed = self.records.remove(pos);

        self.audit(
            "del",
            record_id,
            &format!("Deleted record of {} ({})", removed.sewadar_name, removed.date),
        );
        Ok(removed)
    }

    /// Delete every record of `date`. Returns how many were removed.
    pub fn delete_date(&mut self, date: NaiveDate) -> AppResult<usize> {
        let removed = self.store.delete_records_by_date(date)?;
        self.records.retain(|r| r.date != date);

        self.audit(
            "del",
            &date.to_string(),
            &format!("Deleted {removed} record(s) of {date}"),
        );
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Import batches
    // ------------------------------------------------------------------

    /// Apply a reconciliation plan for `date`, one mutation at a time.
    ///
    /// Every time is checked before the first write; a bad one fails the
    /// whole batch with nothing applied. A store failure after at least one
    /// applied mutation yields `PartialImportFailure`; applied mutations are
    /// not rolled back.
    pub fn apply(&mut self, date: NaiveDate, plan: &ReconcilePlan) -> AppResult<ApplyReport> {
        let checked = self.preflight(plan)?;
        let total = checked.len();
        let mut report = ApplyReport::default();

        for step in checked {
            let result = match step {
                Checked::Create {
                    sewadar,
                    counter,
                    start,
                    end,
                } => self
                    .insert(&sewadar, counter, date, start, end)
                    .map(|r| report.created.push(r)),
                Checked::Close { record_id, end } => {
                    self.close(record_id, end).map(|r| report.closed.push(r))
                }
            };

            if let Err(e) = result {
                let applied = report.total();
                if applied == 0 {
                    return Err(e);
                }
                self.audit(
                    "import",
                    &date.to_string(),
                    &format!("Import stopped after {applied}/{total} mutation(s): {e}"),
                );
                return Err(AppError::PartialImportFailure {
                    applied,
                    total,
                    source: Box::new(e),
                });
            }
        }

        self.audit(
            "import",
            &date.to_string(),
            &format!(
                "Imported {} check-in(s) and {} check-out(s)",
                report.created.len(),
                report.closed.len()
            ),
        );
        Ok(report)
    }

    fn preflight<'p>(&self, plan: &'p ReconcilePlan) -> AppResult<Vec<Checked<'p>>> {
        let mut out = Vec::with_capacity(plan.mutations.len());

        for m in &plan.mutations {
            match m {
                Mutation::Create {
                    sewadar_id,
                    counter,
                    start_time,
                    end_time,
                } => {
                    let start = strict_time(start_time)?;
                    let end = end_time.as_deref().map(strict_time).transpose()?;
                    let sewadar = self
                        .sewadar(sewadar_id)
                        .cloned()
                        .ok_or_else(|| AppError::SewadarNotFound(sewadar_id.clone()))?;
                    out.push(Checked::Create {
                        sewadar,
                        counter,
                        start,
                        end,
                    });
                }
                Mutation::SetEndTime {
                    record_id,
                    end_time,
                    ..
                } => {
                    let end = strict_time(end_time)?;
                    out.push(Checked::Close { record_id, end });
                }
            }
        }

        Ok(out)
    }
}
