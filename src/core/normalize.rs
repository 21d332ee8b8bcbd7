//! Free-text time normalization for imported attendance events.
//!
//! Accepted shapes:
//! - `H:mm` / `HH:mm` (24h), optionally followed by `:ss`
//! - `H:mm AM` / `HH:mm pm`, period separated by spaces or fused (`11:45pm`);
//!   a single minute digit is read as-is (`9:5 PM` → `21:05`)
//! - compact digits with a period (`930PM`, `9 PM`)
//!
//! Anything that cannot be reduced to an hour/minute pair is returned
//! unchanged; validity is judged later, at review time.

use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;

static CANONICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid regex"));

static CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<h>\d{1,2})(?::(?P<m>\d{1,2})(?::\d{2})?)?\s*(?P<p>[AaPp][Mm])?$")
        .expect("valid regex")
});

static COMPACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<hm>\d{3,4})\s*(?P<p>[AaPp][Mm])?$").expect("valid regex")
});

/// Keep only digits, `:`, whitespace and the letters A/P/M.
fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| {
            c.is_ascii_digit()
                || *c == ':'
                || c.is_whitespace()
                || matches!(c.to_ascii_uppercase(), 'A' | 'P' | 'M')
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// 12h → 24h: 12 AM → 00, 12 PM stays 12, PM adds 12 to 1–11.
/// Hours outside 1–12 ignore the marker.
fn apply_period(hour: u32, period: Option<&str>) -> u32 {
    match period.map(|p| p.to_ascii_uppercase()) {
        Some(p) if (1..=12).contains(&hour) => match p.as_str() {
            "PM" if hour < 12 => hour + 12,
            "AM" if hour == 12 => 0,
            _ => hour,
        },
        _ => hour,
    }
}

fn render(hour: u32, minute: u32) -> Option<String> {
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(format!("{hour:02}:{minute:02}"))
}

fn try_normalize(raw: &str) -> Option<String> {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return None;
    }

    if let Some(c) = CANONICAL.captures(&cleaned) {
        let h: u32 = c[1].parse().ok()?;
        let m: u32 = c[2].parse().ok()?;
        return render(h, m);
    }

    // collapse internal runs of whitespace ("9:30   PM")
    let compacted = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(c) = CLOCK.captures(&compacted) {
        let h: u32 = c.name("h")?.as_str().parse().ok()?;
        let m: u32 = match c.name("m") {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        let hour = apply_period(h, c.name("p").map(|p| p.as_str()));
        return render(hour, m);
    }

    if let Some(c) = COMPACT.captures(&compacted) {
        let digits = c.name("hm")?.as_str();
        let split = digits.len() - 2;
        let h: u32 = digits[..split].parse().ok()?;
        let m: u32 = digits[split..].parse().ok()?;
        let hour = apply_period(h, c.name("p").map(|p| p.as_str()));
        return render(hour, m);
    }

    None
}

/// Normalize a free-text time to canonical `HH:mm`, or return the input
/// unchanged when it cannot be interpreted.
pub fn normalize_time(raw: &str) -> String {
    try_normalize(raw).unwrap_or_else(|| raw.to_string())
}

/// Normalize and parse in one step; `None` when the result is not a valid time.
pub fn parse_normalized(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(&normalize_time(raw), "%H:%M").ok()
}

/// True when `s` is already in canonical zero-padded `HH:mm` form.
pub fn is_canonical(s: &str) -> bool {
    s.len() == 5 && NaiveTime::parse_from_str(s, "%H:%M").is_ok()
}
