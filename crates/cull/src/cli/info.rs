use console::style;
use cull_lib::{Cleaner, Result, RunStatus, SqliteCatalog};

pub fn handle_info_command(cleaner: &Cleaner, catalog: &SqliteCatalog) -> Result<RunStatus> {
    let info = cleaner.info(catalog)?;

    println!("\n{}", style("Collection").bold().cyan());
    println!("{}", style("─".repeat(40)).dim());
    println!("  Images: {}", style(info.total).cyan());
    if info.rejected > 0 {
        println!("  Rejected: {}", style(info.rejected).red());
    } else {
        println!("  Rejected: {}", style(info.rejected).green());
    }
    println!("  Audit log: {}", cleaner.audit_log().path().display());
    println!();

    Ok(RunStatus::Succeeded)
}
