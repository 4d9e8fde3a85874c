//! Sequential deletion of rejected assets with per-file failure isolation.
//!
//! Order of work for one asset: primary file, then its sidecars, then the
//! host record. A primary that cannot be deleted stops the work for that
//! asset only; every later asset is still attempted.

use crate::audit::AuditLog;
use crate::catalog::{Asset, RecordStore};
use crate::fs::{Filesystem, SidecarResolver};
use crate::util::format_bytes;
use serde::Serialize;
use std::path::PathBuf;

const PROGRESS_INTERVAL: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDeletion {
    pub path: PathBuf,
    pub reason: String,
}

/// What happened to one candidate.
#[derive(Debug, Clone, Default)]
pub struct DeletionOutcome {
    pub primary: PathBuf,
    pub primary_deleted: bool,
    pub primary_error: Option<String>,
    pub bytes_reclaimed: u64,
    pub sidecars_deleted: Vec<PathBuf>,
    pub sidecars_failed: Vec<FailedDeletion>,
    pub record_removed: bool,
    pub record_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    /// True on every tenth processed candidate.
    pub fn is_checkpoint(&self) -> bool {
        self.processed % PROGRESS_INTERVAL == 0
    }

    pub fn message(&self) -> String {
        format!("Progress: {}/{} images processed...", self.processed, self.total)
    }
}

/// Aggregate of one deletion session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub total_images: usize,
    pub deleted_files: Vec<PathBuf>,
    pub deleted_sidecars: Vec<PathBuf>,
    pub failed_deletions: Vec<FailedDeletion>,
    pub failed_sidecars: Vec<FailedDeletion>,
    pub failed_record_removals: Vec<FailedDeletion>,
    pub total_bytes: u64,
}

impl SessionReport {
    pub fn from_outcomes(total_images: usize, outcomes: Vec<DeletionOutcome>) -> Self {
        let mut report = Self {
            total_images,
            ..Self::default()
        };

        for outcome in outcomes {
            report.total_bytes += outcome.bytes_reclaimed;

            if !outcome.primary_deleted {
                report.failed_deletions.push(FailedDeletion {
                    path: outcome.primary,
                    reason: outcome.primary_error.unwrap_or_default(),
                });
                continue;
            }

            report.deleted_sidecars.extend(outcome.sidecars_deleted);
            report.failed_sidecars.extend(outcome.sidecars_failed);
            if let Some(reason) = outcome.record_error {
                report.failed_record_removals.push(FailedDeletion {
                    path: outcome.primary.clone(),
                    reason,
                });
            }
            report.deleted_files.push(outcome.primary);
        }

        report
    }

    pub fn images_deleted(&self) -> usize {
        self.deleted_files.len()
    }

    pub fn sidecars_deleted(&self) -> usize {
        self.deleted_sidecars.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.failed_deletions.is_empty()
            || !self.failed_sidecars.is_empty()
            || !self.failed_record_removals.is_empty()
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Deleted {}/{} rejected images.",
                self.images_deleted(),
                self.total_images
            ),
            format!("Deleted {} sidecar files.", self.sidecars_deleted()),
            format!("Reclaimed {} of disk space.", format_bytes(self.total_bytes)),
        ];

        if !self.failed_deletions.is_empty() {
            lines.push(format!(
                "WARNING: Failed to delete {} images.",
                self.failed_deletions.len()
            ));
        }
        if !self.failed_sidecars.is_empty() {
            lines.push(format!(
                "WARNING: Failed to delete {} sidecar files.",
                self.failed_sidecars.len()
            ));
        }
        if !self.failed_record_removals.is_empty() {
            lines.push(format!(
                "WARNING: Failed to remove {} images from the database.",
                self.failed_record_removals.len()
            ));
        }

        lines
    }

    pub fn render(&self) -> String {
        self.lines().join("\n")
    }

    /// The report collapsed onto one audit log line.
    pub fn log_line(&self) -> String {
        format!("End of session. {}", self.render().replace('\n', " "))
    }
}

/// Stateless deletion pass over a candidate list.
///
/// The engine does not check confirmation or guard against concurrent runs;
/// `session::Cleaner` owns both.
pub struct DeletionEngine<'a, F: Filesystem + ?Sized> {
    fs: &'a F,
    sidecars: &'a SidecarResolver,
    audit: &'a AuditLog,
}

impl<'a, F: Filesystem + ?Sized> DeletionEngine<'a, F> {
    pub fn new(fs: &'a F, sidecars: &'a SidecarResolver, audit: &'a AuditLog) -> Self {
        Self { fs, sidecars, audit }
    }

    pub fn run<S, P>(&self, candidates: &[Asset], store: &mut S, mut on_progress: P) -> SessionReport
    where
        S: RecordStore + ?Sized,
        P: FnMut(Progress),
    {
        let total = candidates.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, asset) in candidates.iter().enumerate() {
            outcomes.push(self.delete_asset(asset, store));

            let progress = Progress {
                processed: index + 1,
                total,
            };
            if progress.is_checkpoint() {
                log::info!("{}", progress.message());
            }
            on_progress(progress);
        }

        let report = SessionReport::from_outcomes(total, outcomes);
        self.audit.append(&report.log_line());
        report
    }

    fn delete_asset<S: RecordStore + ?Sized>(&self, asset: &Asset, store: &mut S) -> DeletionOutcome {
        let primary = asset.path();
        let size = self.fs.size(&primary);

        let mut outcome = DeletionOutcome {
            primary: primary.clone(),
            ..DeletionOutcome::default()
        };

        if let Err(e) = self.fs.remove_file(&primary) {
            log::warn!("Failed to delete {}: {}", primary.display(), e);
            self.audit.append(&format!(
                "ERROR: Failed to delete {} - {}",
                primary.display(),
                e
            ));
            outcome.primary_error = Some(e.to_string());
            return outcome;
        }

        outcome.primary_deleted = true;
        outcome.bytes_reclaimed += size;
        self.audit.append(&format!("Deleted: {}", primary.display()));

        for sidecar in self.sidecars.sidecars(self.fs, &primary) {
            let sidecar_size = self.fs.size(&sidecar);
            match self.fs.remove_file(&sidecar) {
                Ok(()) => {
                    outcome.bytes_reclaimed += sidecar_size;
                    self.audit
                        .append(&format!("Deleted sidecar: {}", sidecar.display()));
                    outcome.sidecars_deleted.push(sidecar);
                }
                Err(e) => {
                    log::warn!("Failed to delete sidecar {}: {}", sidecar.display(), e);
                    self.audit.append(&format!(
                        "ERROR: Failed to delete sidecar: {} - {}",
                        sidecar.display(),
                        e
                    ));
                    outcome.sidecars_failed.push(FailedDeletion {
                        path: sidecar,
                        reason: e.to_string(),
                    });
                }
            }
        }

        match store.remove_asset(asset) {
            Ok(()) => outcome.record_removed = true,
            Err(e) => {
                log::warn!("Failed to remove {} from database: {}", primary.display(), e);
                self.audit.append(&format!(
                    "ERROR: Failed to remove {} from database - {}",
                    primary.display(),
                    e
                ));
                outcome.record_error = Some(e.to_string());
            }
        }

        outcome
    }
}
