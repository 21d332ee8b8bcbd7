use chrono::NaiveTime;

/// Aggregates shown at the top of a daily report.
#[derive(Debug, Default, Clone)]
pub struct DaySummary {
    pub total_records: usize,
    pub total_sewadars: usize,
    pub active_count: usize,
    /// Distinct counters, in first-seen order.
    pub counters: Vec<String>,
    /// Manpower per counter, same order as `counters`.
    pub counter_counts: Vec<(String, usize)>,
    pub duty_start: Option<NaiveTime>,
    /// `None` while records exist but none is closed yet.
    pub duty_end: Option<NaiveTime>,
}
