// src/export/logic.rs

use crate::core::summary::build_day_summary;
use crate::core::window::AttendanceWindow;
use crate::errors::AppResult;
use crate::export::ReportFormat;
use crate::export::fs_utils::{ensure_writable, resolve_output};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::records_to_export;
use crate::export::notify_export_success;
use crate::export::pdf_export::export_report_pdf;
use crate::export::share::build_share_text;
use crate::export::xlsx::export_xlsx;
use crate::models::record::AttendanceRecord;
use crate::ui::messages::warning;
use std::fs;
use std::path::PathBuf;

/// Report generation for one attendance day.
pub struct ReportLogic;

impl ReportLogic {
    /// Render the records of `window.date` in `format`.
    ///
    /// `text` without `--file` is printed to stdout and returns `None`;
    /// every other case returns the written path.
    pub fn generate(
        records: &[&AttendanceRecord],
        window: &AttendanceWindow,
        team_name: &str,
        format: ReportFormat,
        file: Option<&str>,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        if records.is_empty() {
            warning(format!("No attendance recorded for {}.", window.date));
        }

        let summary = build_day_summary(records, window);

        if format == ReportFormat::Text && file.is_none() {
            println!("{}", build_share_text(window.date, records, &summary, team_name));
            return Ok(None);
        }

        let path = resolve_output(file, window.date, format.as_str())?;
        ensure_writable(&path, force)?;

        match format {
            ReportFormat::Pdf => export_report_pdf(records, &summary, window, team_name, &path)?,
            ReportFormat::Text => {
                fs::write(
                    &path,
                    build_share_text(window.date, records, &summary, team_name),
                )?;
                notify_export_success("Text", &path);
            }
            ReportFormat::Csv => export_csv(&records_to_export(records), &path)?,
            ReportFormat::Json => export_json(&records_to_export(records), &path)?,
            ReportFormat::Xlsx => {
                let sheet = window.date.format("%Y-%m-%d").to_string();
                export_xlsx(&records_to_export(records), &sheet, &path)?
            }
        }

        Ok(Some(path))
    }
}
