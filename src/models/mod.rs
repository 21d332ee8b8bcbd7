pub mod candidate;
pub mod day_summary;
pub mod event_type;
pub mod record;
pub mod sewadar;
