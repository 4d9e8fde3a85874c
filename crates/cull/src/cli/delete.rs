use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;
use cull_lib::util::{advance, deletion_progress, format_elapsed};
use cull_lib::{Cleaner, DeleteOutcome, Result, RunStatus, SessionReport, SqliteCatalog};
use dialoguer::{theme::ColorfulTheme, Confirm};
use serde_json::json;
use std::time::Instant;

pub fn handle_delete_command(
    cleaner: &Cleaner,
    catalog: &mut SqliteCatalog,
    yes: bool,
    json: bool,
    quiet: bool,
) -> Result<RunStatus> {
    delete_with_prompt(
        cleaner,
        catalog,
        yes,
        json,
        quiet,
        console::user_attended_stderr(),
        |rejected| {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!(
                    "Permanently delete {} rejected images and their sidecar files? This cannot be undone",
                    rejected
                ))
                .default(false)
                .interact_opt()
        },
    )
}

fn delete_with_prompt<A>(
    cleaner: &Cleaner,
    catalog: &mut SqliteCatalog,
    yes: bool,
    json: bool,
    quiet: bool,
    attended: bool,
    ask: A,
) -> Result<RunStatus>
where
    A: FnOnce(usize) -> dialoguer::Result<Option<bool>>,
{
    let info = cleaner.info(catalog)?;

    if info.rejected > 0 && operator_confirmed(yes, attended, || ask(info.rejected)) {
        cleaner.confirm();
    }

    let started = Instant::now();
    let pb = (!quiet && !json && info.rejected > 0).then(|| deletion_progress(info.rejected));

    let outcome = cleaner.delete_permanently(catalog, |progress| {
        if let Some(pb) = &pb {
            advance(pb, progress);
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let status = outcome.status();

    if json {
        let value = json!({
            "status": status.as_str(),
            "report": outcome.report(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(status);
    }

    match &outcome {
        DeleteOutcome::NoCandidates => {
            println!("{} No rejected images to delete", style("i").blue());
        }
        DeleteOutcome::NotConfirmed => {
            eprintln!(
                "{} Deletion not confirmed; nothing was deleted",
                style("✗").red()
            );
        }
        DeleteOutcome::AlreadyRunning => {
            eprintln!(
                "{} A deletion is already in progress",
                style("✗").red()
            );
        }
        DeleteOutcome::Completed(report) => {
            if !quiet || report.has_warnings() {
                print_report(report);
                println!(
                    "  {}",
                    style(format!("Finished in {}", format_elapsed(started.elapsed()))).dim()
                );
            }
        }
    }

    Ok(status)
}

/// Without `--yes`, only an attended terminal can confirm. A detached
/// terminal, a dismissed prompt or a prompt error all count as a refusal.
fn operator_confirmed<A>(yes: bool, attended: bool, ask: A) -> bool
where
    A: FnOnce() -> dialoguer::Result<Option<bool>>,
{
    if yes {
        return true;
    }
    if !attended {
        log::warn!("No terminal to confirm on; pass --yes to delete non-interactively");
        return false;
    }
    match ask() {
        Ok(answer) => answer.unwrap_or(false),
        Err(err) => {
            log::warn!("Confirmation prompt failed: {}", err);
            false
        }
    }
}

fn print_report(report: &SessionReport) {
    let mark = if report.has_warnings() {
        style("!").yellow()
    } else {
        style("✓").green()
    };
    println!("\n{} Deletion complete", mark);

    for line in report.lines() {
        if line.starts_with("WARNING:") {
            println!("  {}", style(line).yellow());
        } else {
            println!("  {}", line);
        }
    }

    if !report.has_warnings() {
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Failure").fg(Color::Cyan),
        Cell::new("Path").fg(Color::Cyan),
        Cell::new("Reason").fg(Color::Cyan),
    ]);

    let groups = [
        ("image", &report.failed_deletions),
        ("sidecar", &report.failed_sidecars),
        ("database", &report.failed_record_removals),
    ];
    for (kind, failures) in groups {
        for failure in failures {
            table.add_row(vec![
                Cell::new(kind).fg(Color::Yellow),
                Cell::new(failure.path.display()),
                Cell::new(&failure.reason),
            ]);
        }
    }

    println!("\n{}", table);
}
