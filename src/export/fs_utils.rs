// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use chrono::NaiveDate;
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Output path of a report: `--file` must be absolute; without it the
/// report lands in the working directory as `sewa_report_<date>.<ext>`.
pub(crate) fn resolve_output(file: Option<&str>, date: NaiveDate, ext: &str) -> AppResult<PathBuf> {
    match file {
        Some(f) => {
            let p = PathBuf::from(f);
            if !p.is_absolute() {
                return Err(AppError::Export(format!(
                    "Output file path must be absolute: {f}"
                )));
            }
            Ok(p)
        }
        None => Ok(env::current_dir()?.join(format!("sewa_report_{date}.{ext}"))),
    }
}

/// Check whether a file can be created or overwritten.
///
/// - missing file → Ok
/// - existing file with `force` → Ok
/// - existing file without `force` → ask the operator.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "report cancelled: existing file not overwritten".into(),
        ))
    }
}
