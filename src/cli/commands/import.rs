use crate::cli::commands::{confirm, open_portal};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::{ImportSession, parse_index_list};
use crate::core::normalize::normalize_time;
use crate::core::portal::Portal;
use crate::core::reconcile::{Mutation, ReconcilePlan, SkipReason};
use crate::core::window::AttendanceWindow;
use crate::db::store::Store;
use crate::errors::AppResult;
use crate::extract::gemini::GeminiExtractor;
use crate::extract::{Extractor, ReplayExtractor};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{RESET, color_for_confidence};
use crate::utils::formatting::{counter_label, pad_right, truncate};
use std::fs;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Import {
        file,
        date,
        day_start,
        response,
        select,
        exclude,
        dry_run,
        yes,
    } = cmd
    else {
        return Ok(());
    };

    //
    // 1. Attendance window: invalid dates / hours stop here
    //
    let hour = day_start.unwrap_or(cfg.day_start_hour);
    let window = AttendanceWindow::from_arg(date.as_deref(), hour)?;

    let transcript = fs::read_to_string(file)?;

    //
    // 2. Extraction service (or a saved answer)
    //
    let extractor: Box<dyn Extractor> = match response {
        Some(path) => Box::new(ReplayExtractor::from_file(Path::new(path))?),
        None => Box::new(GeminiExtractor::from_config(cfg)?),
    };

    let mut portal = open_portal(cfg)?;

    header(format!(
        "Import for {} ({} → {})",
        window.date,
        window.start_label(),
        window.end_label()
    ));

    let mut session = ImportSession::prepare(
        extractor.as_ref(),
        &transcript,
        portal.sewadars(),
        window,
        &cfg.team_name,
        cfg.max_transcript_chars,
    )?;

    if session.truncated {
        warning(format!(
            "Transcript longer than {} characters: only its most recent part was analysed.",
            cfg.max_transcript_chars
        ));
    }
    for r in &session.rejected {
        warning(format!("Ignored answer entry #{}: {}", r.index + 1, r.reason));
    }
    for &i in &session.resolution.cleared {
        warning(format!(
            "#{}: '{}' was matched to an id not on the roster, left unmatched.",
            i + 1,
            session.candidates[i].raw_name
        ));
    }

    if session.candidates.is_empty() {
        info("No attendance messages found for this day.");
        return Ok(());
    }

    //
    // 3. Operator selection
    //
    if let Some(list) = select {
        session.select_only(&parse_index_list(list)?)?;
    }
    if let Some(list) = exclude {
        session.exclude(&parse_index_list(list)?)?;
    }

    print_candidates(&session, &portal);

    //
    // 4. Plan
    //
    let plan = session.plan(portal.records(), &cfg.default_counter);
    print_plan(&plan, &portal);

    if plan.is_empty() {
        info("Nothing to import.");
        return Ok(());
    }

    if *dry_run {
        info("Dry run: nothing written.");
        return Ok(());
    }

    if !*yes && !confirm(&format!("Apply {} change(s)?", plan.mutations.len()))? {
        info("Import cancelled.");
        return Ok(());
    }

    //
    // 5. Apply, one mutation at a time
    //
    let report = portal.apply(session.window.date, &plan)?;
    success(format!(
        "Imported {} check-in(s) and {} check-out(s) for {}.",
        report.created.len(),
        report.closed.len(),
        session.window.date
    ));

    Ok(())
}

fn sewadar_name<S: Store>(portal: &Portal<S>, id: &str) -> String {
    portal
        .sewadar(id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn print_candidates<S: Store>(session: &ImportSession, portal: &Portal<S>) {
    println!(
        "{}  {}  {}  {}  {}  {}  Conf",
        pad_right("#", 3),
        pad_right("Sel", 3),
        pad_right("Name (chat)", 22),
        pad_right("Sewadar", 22),
        pad_right("Type", 4),
        pad_right("Time", 15),
    );

    for (i, c) in session.candidates.iter().enumerate() {
        let matched = c
            .matched_sewadar_id
            .as_deref()
            .map(|id| sewadar_name(portal, id))
            .unwrap_or_else(|| "-- unmatched".into());
        let local = if session.resolution.matched_by_name.contains(&i) {
            "*"
        } else {
            ""
        };

        let normalized = normalize_time(&c.time);
        let time = if normalized == c.time {
            normalized
        } else {
            format!("{} ({})", normalized, truncate(&c.time, 8))
        };

        println!(
            "{}  {}  {}  {}  {}  {}  {}{:.2}{}{}",
            pad_right(&(i + 1).to_string(), 3),
            pad_right(if session.is_selected(i) { "[x]" } else { "[ ]" }, 3),
            pad_right(&truncate(&c.raw_name, 22), 22),
            pad_right(&truncate(&format!("{matched}{local}"), 22), 22),
            pad_right(c.event_type.as_label(), 4),
            pad_right(&time, 15),
            color_for_confidence(c.confidence),
            c.confidence,
            RESET,
            c.counter
                .as_deref()
                .map(|k| format!("  @ {k}"))
                .unwrap_or_default(),
        );
    }

    if !session.resolution.matched_by_name.is_empty() {
        println!("(* matched by exact name)");
    }
    println!();
}

fn print_plan<S: Store>(plan: &ReconcilePlan, portal: &Portal<S>) {
    for m in &plan.mutations {
        match m {
            Mutation::Create {
                sewadar_id,
                counter,
                start_time,
                end_time,
            } => println!(
                "  + {} at {}: IN {}{}",
                sewadar_name(portal, sewadar_id),
                counter_label(counter),
                start_time,
                end_time
                    .as_deref()
                    .map(|e| format!(", OUT {e}"))
                    .unwrap_or_default()
            ),
            Mutation::SetEndTime {
                sewadar_id,
                end_time,
                ..
            } => println!(
                "  ~ {}: OUT {} (closes open record)",
                sewadar_name(portal, sewadar_id),
                end_time
            ),
        }
    }

    for s in &plan.skipped {
        let why = match &s.reason {
            SkipReason::Unmatched => "not matched to a sewadar".to_string(),
            SkipReason::NoOpenRecord => "OUT without an open record, nothing to close".to_string(),
            SkipReason::AlreadyCheckedIn { record_id } => {
                format!("already checked in (record {record_id})")
            }
        };
        println!("  - #{} {}: {}", s.candidate_index + 1, s.raw_name, why);
    }
    println!();
}
