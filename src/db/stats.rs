use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) ROSTER / RECORDS
    //
    let sewadars: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM sewadars", [], |row| row.get(0))?;
    let records: i64 =
        pool.conn
            .query_row("SELECT COUNT(*) FROM attendance_records", [], |row| {
                row.get(0)
            })?;
    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM attendance_records WHERE end_time IS NULL OR end_time = ''",
        [],
        |row| row.get(0),
    )?;

    println!("{}• Sewadars:{} {}{}{}", CYAN, RESET, GREEN, sewadars, RESET);
    println!(
        "{}• Attendance records:{} {}{}{} ({} open)",
        CYAN, RESET, GREEN, records, RESET, open
    );

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM attendance_records ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM attendance_records ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt = |d: Option<String>| d.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Attendance days:{}", CYAN, RESET);
    println!("    from: {}", fmt(first_date));
    println!("    to:   {}", fmt(last_date));

    //
    // 4) SCHEMA
    //
    let versions = applied_versions(&pool.conn)?;
    println!(
        "{}• Schema:{} {} migration(s), latest {}",
        CYAN,
        RESET,
        versions.len(),
        versions.last().map(String::as_str).unwrap_or("--")
    );

    println!();
    Ok(())
}
