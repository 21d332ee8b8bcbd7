//! Chat-log extraction: request building, the service seam and response
//! parsing. The language model itself is a black box behind `Extractor`.

pub mod gemini;
pub mod prompt;
pub mod response;

use crate::core::window::AttendanceWindow;
use crate::errors::{AppError, AppResult};
use crate::models::sewadar::Sewadar;
use std::fs;
use std::path::Path;

/// Everything the extraction service receives.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Transcript tail actually sent.
    pub transcript: String,
    /// True when the head of the transcript was cut to fit the budget.
    pub truncated: bool,
    /// `(id, name)` pairs.
    pub roster: Vec<(String, String)>,
    pub team_name: String,
    pub date: String,
    pub window_start: String,
    pub window_end: String,
}

/// Keep the last `max_chars` characters, cutting on a char boundary.
pub fn tail_chars(text: &str, max_chars: usize) -> (&str, bool) {
    let total = text.chars().count();
    if total <= max_chars {
        return (text, false);
    }

    let skip = total - max_chars;
    let cut = text
        .char_indices()
        .nth(skip)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    (&text[cut..], true)
}

impl ExtractionRequest {
    pub fn new(
        transcript: &str,
        roster: &[Sewadar],
        window: &AttendanceWindow,
        team_name: &str,
        max_chars: usize,
    ) -> Self {
        let (tail, truncated) = tail_chars(transcript, max_chars);

        Self {
            transcript: tail.to_string(),
            truncated,
            roster: roster
                .iter()
                .map(|s| (s.id.clone(), s.name.clone()))
                .collect(),
            team_name: team_name.to_string(),
            date: window.date.format("%Y-%m-%d").to_string(),
            window_start: window.start_label(),
            window_end: window.end_label(),
        }
    }

    pub fn prompt(&self) -> String {
        prompt::build_prompt(self)
    }
}

/// Black-box extraction service: returns the raw text of the model answer.
pub trait Extractor {
    fn extract(&self, request: &ExtractionRequest) -> AppResult<String>;
}

/// Replays a previously saved model answer instead of calling the service.
pub struct ReplayExtractor {
    body: String,
}

impl ReplayExtractor {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let body = fs::read_to_string(path).map_err(|e| {
            AppError::ExtractionFailure(format!("cannot read {}: {e}", path.display()))
        })?;
        Ok(Self::new(body))
    }
}

impl Extractor for ReplayExtractor {
    fn extract(&self, _request: &ExtractionRequest) -> AppResult<String> {
        Ok(self.body.clone())
    }
}
