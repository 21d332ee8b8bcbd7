//! Operator feedback lines: one icon-prefixed line per message.

use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use std::fmt;
use unicode_width::UnicodeWidthStr;

const BOLD: &str = "\x1b[1m";

fn line(color: &str, icon: &str, msg: impl fmt::Display) {
    println!("{color}{BOLD}{icon}{RESET} {msg}");
}

pub fn info<T: fmt::Display>(msg: T) {
    line(CYAN, "ℹ️", msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    line(GREEN, "✅", msg);
}

/// Something the operator should look at; the command still goes on.
pub fn warning<T: fmt::Display>(msg: T) {
    line(YELLOW, "⚠️", msg);
}

/// Section banner, underlined to the width of its title:
///
/// ```text
/// 🙏 Import for 2026-02-22 (22/02/26 04:00 AM → 23/02/26 04:00 AM)
/// ────────────────────────────────────────────────────────────────
/// ```
pub fn header<T: fmt::Display>(msg: T) {
    let title = format!("🙏 {msg}");
    let rule = "─".repeat(UnicodeWidthStr::width(title.as_str()));
    println!("{CYAN}{BOLD}{title}{RESET}\n{CYAN}{rule}{RESET}");
}
