#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, with HOME pointed at a throw-away directory so the
/// operator's own configuration is never read.
pub fn sew() -> Command {
    let mut cmd = cargo_bin_cmd!("sewalogger");
    cmd.env("HOME", temp_home())
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY");
    cmd
}

pub fn temp_home() -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push("sewalogger_test_home");
    path
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sewalogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `content` to a temp file and return its path.
pub fn temp_file(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sewalogger.txt", name));
    fs::write(&path, content).expect("write temp file");
    path.to_string_lossy().to_string()
}

pub fn init_db(db_path: &str) {
    sew()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add a sewadar through the CLI and return the generated id.
pub fn add_member(db_path: &str, name: &str) -> String {
    sew()
        .args(["--db", db_path, "member", "add", name])
        .assert()
        .success();

    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(
        "SELECT id FROM sewadars WHERE name = ?1",
        [name],
        |row| row.get(0),
    )
    .expect("sewadar id")
}

/// Ids of the records of `date`, in creation order.
pub fn record_ids(db_path: &str, date: &str) -> Vec<String> {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let mut stmt = conn
        .prepare("SELECT id FROM attendance_records WHERE date = ?1 ORDER BY seq")
        .expect("prepare");
    stmt.query_map([date], |row| row.get(0))
        .expect("query")
        .map(|r| r.expect("row"))
        .collect()
}

/// Initialized DB with two sewadars: Ravi Kumar and Sunita Devi.
pub fn init_db_with_roster(db_path: &str) -> (String, String) {
    init_db(db_path);
    let ravi = add_member(db_path, "Ravi Kumar");
    let sunita = add_member(db_path, "Sunita Devi");
    (ravi, sunita)
}
