use console::style;
use cull_lib::{Cleaner, Result, RunStatus, SqliteCatalog};

pub fn handle_dry_run_command(
    cleaner: &Cleaner,
    catalog: &SqliteCatalog,
    json: bool,
    quiet: bool,
) -> Result<RunStatus> {
    let report = cleaner.dry_run(catalog)?;
    let status = if report.is_empty() {
        RunStatus::NoCandidates
    } else {
        RunStatus::Succeeded
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(status);
    }

    if !quiet {
        let marker = if report.is_empty() {
            style("i").blue()
        } else {
            style(">>>").cyan()
        };
        println!("{} {}", marker, report.summary());
    }

    Ok(status)
}
