use crate::core::portal::Portal;
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use chrono::NaiveDate;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete one record of `date`, or every record of the date.
    /// Returns the number of records removed.
    pub fn apply<S: Store>(
        portal: &mut Portal<S>,
        date: NaiveDate,
        record: Option<&str>,
    ) -> AppResult<usize> {
        if portal.records_for(date).is_empty() {
            return Err(AppError::RecordNotFound(format!("no records for {date}")));
        }

        if let Some(id) = record {
            let belongs = portal.record(id).is_some_and(|r| r.date == date);
            if !belongs {
                return Err(AppError::RecordNotFound(format!("{id} on {date}")));
            }

            let removed = portal.delete_entry(id)?;
            info(format!(
                "Deleted record of {} ({}) for {}",
                removed.sewadar_name,
                removed.start_str(),
                date
            ));
            return Ok(1);
        }

        let n = portal.delete_date(date)?;
        info(format!("Deleted {n} record(s) for {date}"));
        Ok(n)
    }
}
