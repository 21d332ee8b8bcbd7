use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;

/// Lifecycle of an attendance record. OPEN → CLOSED only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub sewadar_id: String,          // ⇔ attendance_records.sewadar_id (no FK)
    pub sewadar_name: String,        // copy taken at creation time
    pub counter: String,             // may be empty
    pub date: NaiveDate,             // attendance day, not a timestamp
    pub start_time: NaiveTime,       // ⇔ start_time (TEXT "HH:MM")
    pub end_time: Option<NaiveTime>, // None ⇔ currently checked in
    pub created_at: String,          // ISO8601
}

impl AttendanceRecord {
    pub fn state(&self) -> RecordState {
        if self.end_time.is_some() {
            RecordState::Closed
        } else {
            RecordState::Open
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == RecordState::Open
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn start_str(&self) -> String {
        self.start_time.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> Option<String> {
        self.end_time.map(|t| t.format("%H:%M").to_string())
    }
}

/// Payload for an attendance insert.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub sewadar_id: String,
    pub sewadar_name: String,
    pub counter: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
}

impl NewRecord {
    /// Materialize the insert into a full record with a fresh opaque id.
    pub fn into_record(self) -> AttendanceRecord {
        AttendanceRecord {
            id: uuid::Uuid::new_v4().to_string(),
            sewadar_id: self.sewadar_id,
            sewadar_name: self.sewadar_name,
            counter: self.counter,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            created_at: Local::now().to_rfc3339(),
        }
    }
}
