use console::style;
use cull_lib::{Cleaner, Result, RunStatus};

pub fn handle_log_command(cleaner: &Cleaner, lines: usize) -> Result<RunStatus> {
    let entries = cleaner.audit_log().tail(lines)?;

    if entries.is_empty() {
        println!("{}", style("Audit log is empty").yellow());
        return Ok(RunStatus::Succeeded);
    }

    for entry in entries {
        if entry.contains("ERROR:") || entry.contains("WARNING:") {
            println!("{}", style(entry).red());
        } else if entry.contains("Session blocked") {
            println!("{}", style(entry).yellow());
        } else {
            println!("{}", entry);
        }
    }

    Ok(RunStatus::Succeeded)
}
