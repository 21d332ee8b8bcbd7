// src/export/model.rs

use crate::models::record::AttendanceRecord;
use crate::utils::time::format_duration;
use serde::Serialize;

/// Flat attendance row for CSV / JSON / XLSX.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    pub id: String,
    pub date: String,
    pub sewadar_id: String,
    pub sewadar_name: String,
    pub counter: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
    pub status: String,
}

impl From<&AttendanceRecord> for RecordExport {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            id: r.id.clone(),
            date: r.date_str(),
            sewadar_id: r.sewadar_id.clone(),
            sewadar_name: r.sewadar_name.clone(),
            counter: r.counter.clone(),
            start_time: r.start_str(),
            end_time: r.end_str().unwrap_or_default(),
            duration: format_duration(r.start_time, r.end_time),
            status: if r.is_open() { "OPEN" } else { "CLOSED" }.to_string(),
        }
    }
}

pub(crate) fn records_to_export(records: &[&AttendanceRecord]) -> Vec<RecordExport> {
    records.iter().map(|r| RecordExport::from(*r)).collect()
}

/// Header for the tabular formats, same order as `record_to_row`.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "date",
        "sewadar_id",
        "sewadar_name",
        "counter",
        "start_time",
        "end_time",
        "duration",
        "status",
    ]
}

pub(crate) fn record_to_row(e: &RecordExport) -> Vec<String> {
    vec![
        e.id.clone(),
        e.date.clone(),
        e.sewadar_id.clone(),
        e.sewadar_name.clone(),
        e.counter.clone(),
        e.start_time.clone(),
        e.end_time.clone(),
        e.duration.clone(),
        e.status.clone(),
    ]
}
