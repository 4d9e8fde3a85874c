use super::SqliteCatalog;
use crate::error::{CullError, Result};
use crate::fs::SidecarResolver;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Media files picked up by `cull import` when no patterns are configured.
pub const DEFAULT_IMPORT_PATTERNS: &[&str] = &[
    "*.{jpg,jpeg,png,tif,tiff,heic,heif,webp}",
    "*.{raw,dng,cr2,cr3,nef,nrw,arw,srf,sr2,orf,rw2,raf,pef,srw,x3f,3fr,iiq}",
];

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub patterns: Vec<String>,
    pub recursive: bool,
    pub include_hidden: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_IMPORT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            recursive: true,
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportStats {
    pub files_seen: usize,
    pub assets_added: usize,
    pub already_known: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Walks `root` and registers every matching media file in the catalog.
///
/// Sidecar files are never registered as assets, even if a pattern matches
/// them. New assets start unrated.
pub fn import_directory<P: AsRef<Path>>(
    catalog: &mut SqliteCatalog,
    root: P,
    sidecars: &SidecarResolver,
    options: &ImportOptions,
) -> Result<ImportStats> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(CullError::DirectoryNotFound(root.to_path_buf()));
    }

    let matcher = build_matcher(&options.patterns)?;
    let mut stats = ImportStats::default();

    let mut walker = WalkDir::new(root).sort_by_file_name();
    if !options.recursive {
        walker = walker.max_depth(1);
    }

    let entries = walker
        .into_iter()
        .filter_entry(|e| options.include_hidden || e.depth() == 0 || !is_hidden(e));

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Walk error: {}", e);
                stats.errors += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        stats.files_seen += 1;

        let path = entry.path();
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            stats.skipped += 1;
            continue;
        };

        if sidecars.is_sidecar(path) || !matcher.is_match(&name) {
            stats.skipped += 1;
            continue;
        }

        let directory = path.parent().unwrap_or(root);
        match catalog.add_asset(directory, &name, 0) {
            Ok(Some(_)) => {
                log::debug!("Imported {}", path.display());
                stats.assets_added += 1;
            }
            Ok(None) => stats.already_known += 1,
            Err(e) => {
                log::warn!("Failed to import {}: {}", path.display(), e);
                stats.errors += 1;
            }
        }
    }

    Ok(stats)
}

fn build_matcher(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
