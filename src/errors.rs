//! Unified application error type.
//! All modules (db, core, extract, export, cli) return AppError to keep the
//! error handling consistent and easy to surface to the operator.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Store operation failed: {0}")]
    StoreFailure(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid day start hour: {0} (expected 0-23)")]
    InvalidHour(u32),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Invalid avatar: {0}")]
    InvalidAvatar(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Sewadar not found: {0}")]
    SewadarNotFound(String),

    #[error("Attendance record not found: {0}")]
    RecordNotFound(String),

    #[error("Attendance record {0} is already checked out")]
    RecordClosed(String),

    // ---------------------------
    // Extraction errors
    // ---------------------------
    #[error(
        "Extraction service credential is missing. Set `api_key` in the configuration file \
         (sewalogger config --print shows its location) or export GEMINI_API_KEY."
    )]
    MissingCredential,

    #[error("Failed to extract attendance from the chat log: {0}")]
    ExtractionFailure(String),

    #[error("Invalid candidate: {0}")]
    InvalidCandidate(String),

    // ---------------------------
    // Import errors
    // ---------------------------
    #[error("Some records failed to import ({applied}/{total} applied): {source}")]
    PartialImportFailure {
        applied: usize,
        total: usize,
        source: Box<AppError>,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    /// True for every failure reported by the persistence layer.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, AppError::Db(_) | AppError::StoreFailure(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
