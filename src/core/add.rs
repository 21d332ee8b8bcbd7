use crate::core::portal::Portal;
use crate::db::store::Store;
use crate::errors::AppResult;
use crate::models::record::AttendanceRecord;
use crate::ui::messages::{success, warning};
use chrono::{NaiveDate, NaiveTime};

/// Map a typed counter onto a known label when exactly one label contains it
/// (case-insensitive). Otherwise the text is kept as typed.
pub fn resolve_counter(input: &str, known: &[String]) -> String {
    let typed = input.trim();
    if typed.is_empty() {
        return String::new();
    }

    if let Some(exact) = known.iter().find(|k| k.eq_ignore_ascii_case(typed)) {
        return exact.clone();
    }

    let needle = typed.to_lowercase();
    let mut hits = known.iter().filter(|k| k.to_lowercase().contains(&needle));

    match (hits.next(), hits.next()) {
        (Some(one), None) => one.clone(),
        _ => typed.to_string(),
    }
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    #[allow(clippy::too_many_arguments)]
    pub fn apply<S: Store>(
        portal: &mut Portal<S>,
        date: NaiveDate,
        member: &str,
        start: NaiveTime,
        end: Option<NaiveTime>,
        counter: Option<&str>,
        known_counters: &[String],
        default_counter: &str,
    ) -> AppResult<AttendanceRecord> {
        let sewadar = portal.resolve_sewadar(member)?.clone();

        let counter = match counter {
            Some(c) => resolve_counter(c, known_counters),
            None => default_counter.to_string(),
        };

        if let Some(open) = portal.open_record_for(&sewadar.id, date) {
            warning(format!(
                "{} is already checked in since {} (record {}).",
                sewadar.name,
                open.start_str(),
                open.id
            ));
        }

        let rec = portal.add_entry(&sewadar.id, &counter, date, start, end)?;

        match rec.end_str() {
            Some(out) => success(format!(
                "Recorded {} at {}: {} → {}",
                rec.sewadar_name,
                rec.counter,
                rec.start_str(),
                out
            )),
            None => success(format!(
                "Checked in {} at {} ({})",
                rec.sewadar_name,
                rec.start_str(),
                rec.counter
            )),
        }

        Ok(rec)
    }

    /// Close an open record (`out` command).
    pub fn check_out<S: Store>(
        portal: &mut Portal<S>,
        record_id: &str,
        at: NaiveTime,
    ) -> AppResult<AttendanceRecord> {
        let rec = portal.mark_out(record_id, at)?;
        success(format!(
            "Checked out {} at {} ({})",
            rec.sewadar_name,
            at.format("%H:%M"),
            rec.counter
        ));
        Ok(rec)
    }
}
