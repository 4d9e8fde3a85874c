use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;
use cull_lib::util::{format_bytes, import_spinner};
use cull_lib::{
    import_directory, probe_size, Cleaner, CullError, ImportOptions, Result, RunStatus,
    SqliteCatalog, REJECTED_RATING,
};
use std::path::PathBuf;

pub fn handle_import_command(
    cleaner: &Cleaner,
    catalog: &mut SqliteCatalog,
    path: PathBuf,
    options: ImportOptions,
    quiet: bool,
) -> Result<RunStatus> {
    let path = std::path::absolute(&path)?;

    let spinner = (!quiet).then(|| import_spinner(&path));

    let result = import_directory(catalog, &path, cleaner.sidecars(), &options);

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let stats = result?;

    if !quiet {
        println!(
            "{} Imported {} new images from {}",
            style("✓").green(),
            style(stats.assets_added).cyan(),
            path.display()
        );
        println!("  Files seen: {}", stats.files_seen);
        if stats.already_known > 0 {
            println!("  Already catalogued: {}", stats.already_known);
        }
        if stats.skipped > 0 {
            println!("  Skipped: {}", style(stats.skipped).dim());
        }
    }
    if stats.errors > 0 {
        eprintln!("  Errors: {}", style(stats.errors).red());
    }

    Ok(RunStatus::Succeeded)
}

pub fn handle_rate_command(
    catalog: &mut SqliteCatalog,
    paths: Vec<PathBuf>,
    rating: i32,
    quiet: bool,
) -> Result<RunStatus> {
    if !(REJECTED_RATING..=5).contains(&rating) {
        return Err(CullError::UserInput(format!(
            "Rating must be between {} and 5, got {}",
            REJECTED_RATING, rating
        )));
    }

    for path in &paths {
        let path = std::path::absolute(path)?;
        catalog.set_rating(&path, rating)?;
        if !quiet {
            let label = if rating == REJECTED_RATING {
                style("rejected".to_string()).red()
            } else {
                style(format!("rated {}", rating)).cyan()
            };
            println!("{} {} {}", style("✓").green(), path.display(), label);
        }
    }

    Ok(RunStatus::Succeeded)
}

pub fn handle_list_command(catalog: &SqliteCatalog, rejected_only: bool) -> Result<RunStatus> {
    let assets = catalog.list_assets(rejected_only)?;

    if assets.is_empty() {
        let what = if rejected_only { "rejected images" } else { "images" };
        println!("{}", style(format!("No {} in catalog", what)).yellow());
        return Ok(RunStatus::Succeeded);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Path").fg(Color::Cyan),
        Cell::new("Rating").fg(Color::Cyan),
        Cell::new("Size").fg(Color::Cyan),
    ]);

    for asset in &assets {
        let path = asset.path();
        let rating = if asset.is_rejected() {
            Cell::new("rejected").fg(Color::Red)
        } else {
            Cell::new(asset.rating)
        };
        table.add_row(vec![
            Cell::new(asset.id),
            Cell::new(path.display()),
            rating,
            Cell::new(format_bytes(probe_size(&path))),
        ]);
    }

    println!("{}", table);
    println!("{} images", assets.len());

    Ok(RunStatus::Succeeded)
}
