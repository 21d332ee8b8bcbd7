use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It doubles as the migration ledger.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Roster table (name only, profile columns come later).
fn create_sewadars_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sewadars (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sewadars_name ON sewadars(name COLLATE NOCASE);
        "#,
    )?;
    Ok(())
}

/// Attendance table. `seq` preserves creation order; `id` is the opaque key.
/// `sewadar_id` is deliberately not a foreign key: deleting a volunteer
/// keeps their historical rows.
fn create_attendance_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_records (
            seq           INTEGER PRIMARY KEY AUTOINCREMENT,
            id            TEXT NOT NULL UNIQUE,
            sewadar_id    TEXT NOT NULL,
            sewadar_name  TEXT NOT NULL,
            counter       TEXT NOT NULL DEFAULT '',
            date          TEXT NOT NULL,
            start_time    TEXT NOT NULL,
            end_time      TEXT,
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_date ON attendance_records(date);
        CREATE INDEX IF NOT EXISTS idx_records_sewadar_date ON attendance_records(sewadar_id, date);
        "#,
    )?;
    Ok(())
}

/// Add avatar / phone number to the roster.
fn add_sewadar_profile_columns(conn: &Connection) -> Result<()> {
    if !table_has_column(conn, "sewadars", "avatar")? {
        conn.execute("ALTER TABLE sewadars ADD COLUMN avatar TEXT;", [])?;
    }
    if !table_has_column(conn, "sewadars", "phone_number")? {
        conn.execute("ALTER TABLE sewadars ADD COLUMN phone_number TEXT;", [])?;
    }
    Ok(())
}

type Migration = (&'static str, &'static str, fn(&Connection) -> Result<()>);

const MIGRATIONS: [Migration; 3] = [
    (
        "20260110_0001_create_sewadars",
        "Created sewadars table",
        create_sewadars_table,
    ),
    (
        "20260110_0002_create_attendance_records",
        "Created attendance_records table",
        create_attendance_table,
    ),
    (
        "20260215_0003_add_sewadar_profile",
        "Added avatar and phone_number to sewadars",
        add_sewadar_profile_columns,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Invocata da db::init_db() e da DbPool::open().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, apply) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        apply(conn)?;
        mark_applied(conn, version, message)?;

        success(format!("Migration applied: {} → {}", version, message));
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
