use crate::cli::commands::open_portal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::window::AttendanceWindow;
use crate::errors::AppResult;
use crate::models::record::AttendanceRecord;
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::formatting::{bold, counter_label};
use crate::utils::table::Table;
use crate::utils::time::{format_duration, to_ampm};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { date, all } = cmd {
        let portal = open_portal(cfg)?;

        if *all {
            print_history(portal.records());
            return Ok(());
        }

        let window = AttendanceWindow::from_arg(date.as_deref(), cfg.day_start_hour)?;
        let records = portal.records_for(window.date);

        println!(
            "{} {}",
            bold(&format!("📅 {}", window.date.format("%A %d %B %Y"))),
            format_args!("{GREY}({} → {}){RESET}", window.start_label(), window.end_label())
        );

        if records.is_empty() {
            println!("No attendance recorded for {}.", window.date);
            return Ok(());
        }

        print_records(&records);
        println!(
            "\n{GREEN}● {} active{RESET} / {} record(s)",
            portal.active_count(window.date),
            records.len()
        );
    }

    Ok(())
}

fn print_records(records: &[&AttendanceRecord]) {
    let mut table = Table::new(&["#", "Id", "Name", "Counter", "In", "Out", "Dur"]);

    for (i, r) in records.iter().enumerate() {
        let out = r.end_time.map(to_ampm).unwrap_or_else(|| "Active".into());
        table.add_row(vec![
            (i + 1).to_string(),
            r.id.clone(),
            r.sewadar_name.clone(),
            counter_label(&r.counter),
            to_ampm(r.start_time),
            out,
            format_duration(r.start_time, r.end_time),
        ]);
    }

    print!("{}", table.render());
}

fn print_history(records: &[AttendanceRecord]) {
    // (records, open)
    let mut per_day: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for r in records {
        let e = per_day.entry(r.date).or_default();
        e.0 += 1;
        if r.is_open() {
            e.1 += 1;
        }
    }

    if per_day.is_empty() {
        println!("No attendance recorded yet.");
        return;
    }

    let mut table = Table::new(&["Date", "Records", "Active"]);
    for (d, (n, open)) in per_day.iter().rev() {
        table.add_row(vec![d.to_string(), n.to_string(), open.to_string()]);
    }
    print!("{}", table.render());
}
