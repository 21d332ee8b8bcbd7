use crate::cli::commands::open_portal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::window::AttendanceWindow;
use crate::errors::AppResult;
use crate::export::ReportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        date,
        format,
        file,
        force,
    } = cmd
    {
        let window = AttendanceWindow::from_arg(date.as_deref(), cfg.day_start_hour)?;
        let portal = open_portal(cfg)?;
        let records = portal.records_for(window.date);

        ReportLogic::generate(
            &records,
            &window,
            &cfg.team_name,
            *format,
            file.as_deref(),
            *force,
        )?;
    }

    Ok(())
}
