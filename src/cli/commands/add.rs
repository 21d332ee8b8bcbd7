use crate::cli::commands::open_portal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use crate::utils::time::{parse_optional_time, parse_time_input};

/// Record an attendance entry.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        member,
        start,
        end,
        counter,
    } = cmd
    {
        //
        // 1. Parse date and times before touching the database
        //
        let d = date::parse_date(date.trim())
            .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
        let start_time = parse_time_input(start)?;
        let end_time = parse_optional_time(end.as_ref())?;

        //
        // 2. Apply
        //
        let mut portal = open_portal(cfg)?;
        AddLogic::apply(
            &mut portal,
            d,
            member,
            start_time,
            end_time,
            counter.as_deref(),
            &cfg.counters,
            &cfg.default_counter,
        )?;
    }

    Ok(())
}
