use crate::db::log::{LogEntry, load_entries};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::truncate;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 60;

/// Colour per audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "member_add" => Colour::Green,
        "del" | "member_del" => Colour::Red,
        "out" | "member_update" => Colour::Yellow,
        "import" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)`, plain text, cut to `MAX_OP_WIDTH`.
fn op_target(e: &LogEntry) -> String {
    let raw = if e.target.is_empty() {
        e.operation.clone()
    } else {
        format!("{} ({})", e.operation, e.target)
    };
    truncate(&raw, MAX_OP_WIDTH)
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_entries(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rows: Vec<(String, String)> = entries
            .iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone());
                (date, op_target(e))
            })
            .collect();

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = rows.iter().map(|(d, _)| d.len()).max().unwrap_or(10);
        let op_w = rows.iter().map(|(_, o)| o.chars().count()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (e, (date, visible)) in entries.iter().zip(rows) {
            let color = color_for_operation(&e.operation);
            let padding = " ".repeat(op_w.saturating_sub(visible.chars().count()));

            // only the operation word is coloured
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                date,
                colored,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
