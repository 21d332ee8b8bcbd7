// src/export/pdf_export.rs

use crate::core::window::AttendanceWindow;
use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::export::pdf::{BLACK, FontStyle, GREY, PdfManager, TableStyle};
use crate::models::day_summary::DaySummary;
use crate::models::record::AttendanceRecord;
use crate::ui::messages::info;
use crate::utils::date::short_display;
use crate::utils::formatting::counter_label;
use crate::utils::time::{format_duration, to_ampm};
use chrono::NaiveTime;
use std::path::Path;

const OVERVIEW: TableStyle = TableStyle {
    head_fill: (0.118, 0.227, 0.541),
    striped: false,
};
const DEPLOYMENT: TableStyle = TableStyle {
    head_fill: (0.063, 0.725, 0.506),
    striped: false,
};
const ATTENDANCE: TableStyle = TableStyle {
    head_fill: (0.157, 0.196, 0.392),
    striped: true,
};

const TITLE_BLUE: (f32, f32, f32) = (0.145, 0.388, 0.922);

/// More than this many counters are summarised as "N Counters".
const MAX_LISTED_COUNTERS: usize = 3;

pub(crate) fn locations_covered(summary: &DaySummary) -> String {
    if summary.counters.len() > MAX_LISTED_COUNTERS {
        format!("{} Counters", summary.counters.len())
    } else {
        summary
            .counters
            .iter()
            .map(|c| counter_label(c))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `dd/mm/yyyy hh:mm AM`, dated inside the attendance window.
fn duty_instant(window: &AttendanceWindow, t: NaiveTime) -> String {
    let at = window.instant_for(t);
    format!("{} {}", short_display(&at.date()), to_ampm(t))
}

pub(crate) fn overview_rows(
    summary: &DaySummary,
    window: &AttendanceWindow,
    team_name: &str,
) -> Vec<Vec<String>> {
    let day = short_display(&window.date);

    let duty_start = match summary.duty_start {
        Some(t) => duty_instant(window, t),
        None => format!("{day} --"),
    };

    let duty_end = match (summary.duty_end, summary.total_records) {
        (Some(t), _) => duty_instant(window, t),
        (None, 0) => format!("{day} --"),
        (None, _) => format!("{day} Active"),
    };

    vec![
        vec!["Reporting Group".into(), format!("{team_name} Team")],
        vec!["Total Sewadars".into(), summary.total_sewadars.to_string()],
        vec!["Locations Covered".into(), locations_covered(summary)],
        vec!["Duty Start".into(), duty_start],
        vec!["Duty End".into(), duty_end],
    ]
}

pub(crate) fn attendance_rows(records: &[&AttendanceRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                (i + 1).to_string(),
                r.sewadar_name.clone(),
                to_ampm(r.start_time),
                r.end_time.map(to_ampm).unwrap_or_else(|| "Active".into()),
                format_duration(r.start_time, r.end_time),
                counter_label(&r.counter),
            ]
        })
        .collect()
}

/// Daily duty report: overview, deployment per counter, and the detailed
/// attendance log on its own page.
pub(crate) fn export_report_pdf(
    records: &[&AttendanceRecord],
    summary: &DaySummary,
    window: &AttendanceWindow,
    team_name: &str,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let mut pdf = PdfManager::new();
    pdf.page_break();

    pdf.text(
        &format!(
            "{team_name} group presents the duty report for {}",
            short_display(&window.date)
        ),
        9.0,
        FontStyle::Italic,
        GREY,
    );
    pdf.gap(4.0);
    pdf.text(&format!("{team_name} Report"), 22.0, FontStyle::Bold, TITLE_BLUE);
    pdf.text("Duty Report Summary", 12.0, FontStyle::Regular, GREY);
    pdf.rule();
    pdf.gap(10.0);

    pdf.text("1. Duty Overview", 11.0, FontStyle::Bold, BLACK);
    pdf.gap(4.0);
    pdf.table(
        &["Metric", "Details"],
        &overview_rows(summary, window, team_name),
        OVERVIEW,
    );
    pdf.gap(18.0);

    pdf.text("2. Sewa Point Deployment", 11.0, FontStyle::Bold, BLACK);
    pdf.gap(4.0);
    let deployment: Vec<Vec<String>> = summary
        .counter_counts
        .iter()
        .map(|(c, n)| vec![counter_label(c), n.to_string()])
        .collect();
    pdf.table(&["Sewa Point / Spot", "Manpower Count"], &deployment, DEPLOYMENT);

    pdf.page_break();
    pdf.text("Detailed Attendance Log", 18.0, FontStyle::Bold, BLACK);
    pdf.gap(8.0);
    pdf.table(
        &["#", "Name", "In", "Out", "Dur", "Spot"],
        &attendance_rows(records),
        ATTENDANCE,
    );

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
