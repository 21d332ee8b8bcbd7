//! Persistence seam used by the coordinating portal.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::record::{AttendanceRecord, NewRecord};
use crate::models::sewadar::{NewSewadar, Sewadar, SewadarUpdate};
use chrono::{NaiveDate, NaiveTime};

/// Keyed select/insert/update/delete operations over the roster and the
/// attendance records. Every failure is a store-level error.
pub trait Store {
    /// Roster ordered by name.
    fn load_sewadars(&mut self) -> AppResult<Vec<Sewadar>>;
    fn insert_sewadar(&mut self, new: &NewSewadar) -> AppResult<Sewadar>;
    fn update_sewadar(&mut self, id: &str, update: &SewadarUpdate) -> AppResult<()>;
    fn delete_sewadar(&mut self, id: &str) -> AppResult<()>;

    /// Records in creation order.
    fn load_records(&mut self) -> AppResult<Vec<AttendanceRecord>>;
    fn insert_record(&mut self, new: NewRecord) -> AppResult<AttendanceRecord>;
    fn set_end_time(&mut self, record_id: &str, end: NaiveTime) -> AppResult<()>;
    fn delete_record(&mut self, record_id: &str) -> AppResult<()>;
    /// Returns the number of records removed.
    fn delete_records_by_date(&mut self, date: NaiveDate) -> AppResult<usize>;

    /// Audit trail entry.
    fn log(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()>;
}

fn expect_one(affected: usize, what: &str, id: &str) -> AppResult<()> {
    if affected == 0 {
        return Err(AppError::StoreFailure(format!("no {what} with id {id}")));
    }
    Ok(())
}

impl Store for DbPool {
    fn load_sewadars(&mut self) -> AppResult<Vec<Sewadar>> {
        queries::load_sewadars(&self.conn)
    }

    fn insert_sewadar(&mut self, new: &NewSewadar) -> AppResult<Sewadar> {
        queries::insert_sewadar(&self.conn, new)
    }

    fn update_sewadar(&mut self, id: &str, update: &SewadarUpdate) -> AppResult<()> {
        let n = queries::update_sewadar(&self.conn, id, update)?;
        if update.is_empty() {
            return Ok(());
        }
        expect_one(n, "sewadar", id)
    }

    fn delete_sewadar(&mut self, id: &str) -> AppResult<()> {
        let n = queries::delete_sewadar(&self.conn, id)?;
        expect_one(n, "sewadar", id)
    }

    fn load_records(&mut self) -> AppResult<Vec<AttendanceRecord>> {
        queries::load_records(&self.conn)
    }

    fn insert_record(&mut self, new: NewRecord) -> AppResult<AttendanceRecord> {
        queries::insert_record(&self.conn, new)
    }

    fn set_end_time(&mut self, record_id: &str, end: NaiveTime) -> AppResult<()> {
        let n = queries::update_record_end_time(&self.conn, record_id, end)?;
        expect_one(n, "attendance record", record_id)
    }

    fn delete_record(&mut self, record_id: &str) -> AppResult<()> {
        let n = queries::delete_record(&self.conn, record_id)?;
        expect_one(n, "attendance record", record_id)
    }

    fn delete_records_by_date(&mut self, date: NaiveDate) -> AppResult<usize> {
        queries::delete_records_by_date(&self.conn, date)
    }

    fn log(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.conn, operation, target, message)
    }
}
