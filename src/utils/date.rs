use chrono::NaiveDate;

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// `dd/mm/yyyy`, used in report tables.
pub fn short_display(d: &NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

/// `14 October 2026`, used in report titles.
pub fn long_display(d: &NaiveDate) -> String {
    d.format("%d %B %Y").to_string()
}
