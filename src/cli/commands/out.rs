use crate::cli::commands::open_portal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::errors::AppResult;
use crate::utils::time::parse_time_input;
use chrono::Timelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Out { record, at } = cmd {
        let at = match at {
            Some(t) => parse_time_input(t)?,
            None => {
                let now = chrono::Local::now().time();
                now.with_second(0)
                    .and_then(|t| t.with_nanosecond(0))
                    .unwrap_or(now)
            }
        };

        let mut portal = open_portal(cfg)?;
        AddLogic::check_out(&mut portal, record.trim(), at)?;
    }

    Ok(())
}
