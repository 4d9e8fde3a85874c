mod cli;

use anyhow::Context;
use clap::Parser;
use console::style;
use cull_lib::{AuditLog, Cleaner, Config, ImportOptions, Overrides, RunStatus};

/// Exit code for configuration, catalog and other unexpected errors.
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(status) => std::process::exit(status.exit_code()),
        Err(e) => {
            eprintln!("{} {:#}", style("error:").red().bold(), e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();
}

fn run(cli: cli::Cli) -> anyhow::Result<RunStatus> {
    let config = Config::load(Overrides {
        db: cli.db,
        audit_log: cli.audit_log,
        config: cli.config,
    })
    .context("Failed to load configuration")?;
    config
        .ensure_directories()
        .context("Failed to create data directories")?;

    log::info!("Catalog: {}", config.db_path.display());
    log::info!("Audit log: {}", config.audit_log_path.display());

    let folder = cli
        .folder
        .map(|f| std::path::absolute(&f))
        .transpose()
        .context("Invalid --folder path")?;
    let mut catalog = cli::open_catalog(&config, folder)
        .with_context(|| format!("Failed to open catalog {}", config.db_path.display()))?;
    let cleaner = Cleaner::new(
        config.sidecar_resolver(),
        AuditLog::new(&config.audit_log_path),
    );

    let status = match cli.command {
        cli::Commands::Info => cli::info::handle_info_command(&cleaner, &catalog)?,

        cli::Commands::DryRun { json } => {
            cli::dry_run::handle_dry_run_command(&cleaner, &catalog, json, cli.quiet)?
        }

        cli::Commands::Delete { yes, json } => {
            cli::delete::handle_delete_command(&cleaner, &mut catalog, yes, json, cli.quiet)?
        }

        cli::Commands::Import {
            path,
            patterns,
            no_recursive,
            hidden,
        } => {
            let options = ImportOptions {
                patterns: if patterns.is_empty() {
                    config.import_patterns.clone()
                } else {
                    patterns
                },
                recursive: !no_recursive,
                include_hidden: hidden,
            };
            cli::catalog::handle_import_command(&cleaner, &mut catalog, path, options, cli.quiet)?
        }

        cli::Commands::Rate { paths, rating } => {
            cli::catalog::handle_rate_command(&mut catalog, paths, rating, cli.quiet)?
        }

        cli::Commands::Reject { paths } => cli::catalog::handle_rate_command(
            &mut catalog,
            paths,
            cull_lib::REJECTED_RATING,
            cli.quiet,
        )?,

        cli::Commands::List { rejected } => {
            cli::catalog::handle_list_command(&catalog, rejected)?
        }

        cli::Commands::Log { lines } => cli::history::handle_log_command(&cleaner, lines)?,
    };

    Ok(status)
}
