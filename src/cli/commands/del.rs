use crate::cli::commands::{confirm, open_portal};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { date, record, yes } = cmd {
        let d = date::parse_date(date.trim())
            .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;

        let mut portal = open_portal(cfg)?;

        if !*yes {
            let question = match record {
                Some(id) => format!("Delete record {id} of {d}?"),
                None => format!(
                    "Delete ALL {} record(s) of {d}?",
                    portal.records_for(d).len()
                ),
            };
            if !confirm(&question)? {
                info("Nothing deleted.");
                return Ok(());
            }
        }

        DeleteLogic::apply(&mut portal, d, record.as_deref())?;
    }

    Ok(())
}
