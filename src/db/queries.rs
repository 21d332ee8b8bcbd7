use crate::errors::{AppError, AppResult};
use crate::models::record::{AttendanceRecord, NewRecord};
use crate::models::sewadar::{NewSewadar, Sewadar, SewadarUpdate};
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::{Connection, Result, Row, params};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_sewadar(row: &Row) -> Result<Sewadar> {
    Ok(Sewadar {
        id: row.get("id")?,
        name: row.get("name")?,
        avatar: row.get("avatar")?,
        phone_number: row.get("phone_number")?,
    })
}

pub fn map_record(row: &Row) -> Result<AttendanceRecord> {
    let date_str: String = row.get("date")?;
    let start_str: String = row.get("start_time")?;
    let end_str: Option<String> = row.get("end_time")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(date_str.clone())))?;

    let start_time = NaiveTime::parse_from_str(&start_str, "%H:%M")
        .map_err(|_| conversion_error(0, AppError::InvalidTime(start_str.clone())))?;

    let end_time = match end_str {
        Some(s) if !s.trim().is_empty() => Some(
            NaiveTime::parse_from_str(&s, "%H:%M")
                .map_err(|_| conversion_error(0, AppError::InvalidTime(s.clone())))?,
        ),
        _ => None,
    };

    Ok(AttendanceRecord {
        id: row.get("id")?,
        sewadar_id: row.get("sewadar_id")?,
        sewadar_name: row.get("sewadar_name")?,
        counter: row.get("counter")?,
        date,
        start_time,
        end_time,
        created_at: row.get("created_at")?,
    })
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

pub fn load_sewadars(conn: &Connection) -> AppResult<Vec<Sewadar>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, avatar, phone_number FROM sewadars
         ORDER BY name COLLATE NOCASE ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_sewadar)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_sewadar(conn: &Connection, new: &NewSewadar) -> AppResult<Sewadar> {
    let sewadar = Sewadar {
        id: uuid::Uuid::new_v4().to_string(),
        name: new.name.trim().to_string(),
        avatar: None,
        phone_number: new.phone_number.clone(),
    };

    conn.execute(
        "INSERT INTO sewadars (id, name, avatar, phone_number, created_at)
         VALUES (?1, ?2, NULL, ?3, ?4)",
        params![
            sewadar.id,
            sewadar.name,
            sewadar.phone_number,
            Local::now().to_rfc3339()
        ],
    )?;

    Ok(sewadar)
}

/// Apply only the fields present in `update`. Returns the number of rows touched.
pub fn update_sewadar(conn: &Connection, id: &str, update: &SewadarUpdate) -> AppResult<usize> {
    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<&dyn rusqlite::ToSql> = Vec::new();

    if let Some(name) = &update.name {
        sets.push("name = ?");
        values.push(name);
    }
    if let Some(avatar) = &update.avatar {
        sets.push("avatar = ?");
        values.push(avatar);
    }
    if let Some(phone) = &update.phone_number {
        sets.push("phone_number = ?");
        values.push(phone);
    }

    if sets.is_empty() {
        return Ok(0);
    }

    values.push(&id);
    let sql = format!("UPDATE sewadars SET {} WHERE id = ?", sets.join(", "));

    Ok(conn.execute(&sql, values.as_slice())?)
}

pub fn delete_sewadar(conn: &Connection, id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM sewadars WHERE id = ?1", [id])?)
}

// ---------------------------------------------------------------------------
// Attendance records
// ---------------------------------------------------------------------------

/// Every record, in creation order.
pub fn load_records(conn: &Connection) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, sewadar_id, sewadar_name, counter, date, start_time, end_time, created_at
         FROM attendance_records
         ORDER BY seq ASC",
    )?;

    let rows = stmt.query_map([], map_record)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_record(conn: &Connection, new: NewRecord) -> AppResult<AttendanceRecord> {
    let rec = new.into_record();

    conn.execute(
        "INSERT INTO attendance_records
            (id, sewadar_id, sewadar_name, counter, date, start_time, end_time, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            rec.id,
            rec.sewadar_id,
            rec.sewadar_name,
            rec.counter,
            rec.date_str(),
            rec.start_str(),
            rec.end_str(),
            rec.created_at,
        ],
    )?;

    Ok(rec)
}

pub fn update_record_end_time(conn: &Connection, id: &str, end: NaiveTime) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE attendance_records SET end_time = ?1 WHERE id = ?2",
        params![end.format("%H:%M").to_string(), id],
    )?)
}

pub fn delete_record(conn: &Connection, id: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM attendance_records WHERE id = ?1", [id])?)
}

pub fn delete_records_by_date(conn: &Connection, date: NaiveDate) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM attendance_records WHERE date = ?1",
        [date.format("%Y-%m-%d").to_string()],
    )?)
}
