pub mod catalog;
pub mod delete;
pub mod dry_run;
pub mod history;
pub mod info;

use clap::{Parser, Subcommand};
use cull_lib::{Config, Result, SqliteCatalog};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cull")]
#[command(about = "Permanently delete rejected photos and their sidecar files", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to catalog database file")]
    pub db: Option<PathBuf>,

    #[arg(long, global = true, help = "Path to audit log file")]
    pub audit_log: Option<PathBuf>,

    #[arg(long, global = true, help = "Path to cull.toml config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Only consider assets at or below this folder")]
    pub folder: Option<PathBuf>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, short = 'q', global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show collection and rejected image counts")]
    Info,

    #[command(about = "Estimate the space deleting rejected images would free")]
    DryRun {
        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },

    #[command(about = "Permanently delete rejected images and their sidecars")]
    Delete {
        #[arg(long, short = 'y', help = "Confirm deletion without prompting")]
        yes: bool,

        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },

    #[command(about = "Register media files of a directory in the catalog")]
    Import {
        #[arg(help = "Directory to import")]
        path: PathBuf,

        #[arg(long = "pattern", help = "Glob of file names to import (repeatable)")]
        patterns: Vec<String>,

        #[arg(long, help = "Do not descend into subdirectories")]
        no_recursive: bool,

        #[arg(long, help = "Include hidden files and directories")]
        hidden: bool,
    },

    #[command(about = "Set the rating of catalogued images")]
    Rate {
        #[arg(required = true, help = "Image paths")]
        paths: Vec<PathBuf>,

        #[arg(long, short = 'r', allow_negative_numbers = true, help = "Rating (-1 rejects)")]
        rating: i32,
    },

    #[command(about = "Mark catalogued images as rejected")]
    Reject {
        #[arg(required = true, help = "Image paths")]
        paths: Vec<PathBuf>,
    },

    #[command(about = "List catalogued images")]
    List {
        #[arg(long, help = "Only list rejected images")]
        rejected: bool,
    },

    #[command(about = "Show the end of the audit log")]
    Log {
        #[arg(long, short = 'n', default_value_t = 20, help = "Number of lines to show")]
        lines: usize,
    },
}

pub fn open_catalog(config: &Config, folder: Option<PathBuf>) -> Result<SqliteCatalog> {
    let mut catalog = SqliteCatalog::open(&config.db_path)?;
    catalog.initialize()?;
    Ok(catalog.with_folder(folder))
}
