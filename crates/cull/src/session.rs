//! Operator-facing boundary around the dry run and the deletion engine.
//!
//! [`Cleaner`] owns the two pieces of guarded state: the in-progress flag,
//! which rejects a second run instead of queueing it, and the confirmation
//! flag, which must be re-armed before every run and is consumed by it.

use crate::audit::AuditLog;
use crate::catalog::{AssetSource, RecordStore};
use crate::engine::{DeletionEngine, Progress, SessionReport};
use crate::error::Result;
use crate::fs::{Filesystem, LocalFs, SidecarResolver};
use crate::select::select_rejected;
use crate::space::{self, DryRunReport};
use serde::Serialize;
use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionInfo {
    pub total: usize,
    pub rejected: usize,
}

/// Result of asking for a permanent deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    NoCandidates,
    NotConfirmed,
    AlreadyRunning,
    Completed(SessionReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Succeeded,
    NoCandidates,
    PartialFailure,
    BlockedNotConfirmed,
    BlockedAlreadyRunning,
}

impl RunStatus {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::Succeeded => 0,
            RunStatus::NoCandidates => 3,
            RunStatus::PartialFailure => 4,
            RunStatus::BlockedNotConfirmed => 5,
            RunStatus::BlockedAlreadyRunning => 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Succeeded => "succeeded",
            RunStatus::NoCandidates => "no_candidates",
            RunStatus::PartialFailure => "partial_failure",
            RunStatus::BlockedNotConfirmed => "blocked_not_confirmed",
            RunStatus::BlockedAlreadyRunning => "blocked_already_running",
        }
    }
}

impl DeleteOutcome {
    pub fn status(&self) -> RunStatus {
        match self {
            DeleteOutcome::NoCandidates => RunStatus::NoCandidates,
            DeleteOutcome::NotConfirmed => RunStatus::BlockedNotConfirmed,
            DeleteOutcome::AlreadyRunning => RunStatus::BlockedAlreadyRunning,
            DeleteOutcome::Completed(report) if report.has_warnings() => RunStatus::PartialFailure,
            DeleteOutcome::Completed(_) => RunStatus::Succeeded,
        }
    }

    pub fn report(&self) -> Option<&SessionReport> {
        match self {
            DeleteOutcome::Completed(report) => Some(report),
            _ => None,
        }
    }
}

/// Held while a deletion runs; clears the in-progress flag on drop.
pub struct RunGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

pub struct Cleaner<F: Filesystem = LocalFs> {
    fs: F,
    sidecars: SidecarResolver,
    audit: AuditLog,
    in_progress: Cell<bool>,
    confirmed: Cell<bool>,
}

impl Cleaner<LocalFs> {
    pub fn new(sidecars: SidecarResolver, audit: AuditLog) -> Self {
        Self::with_filesystem(LocalFs, sidecars, audit)
    }
}

impl<F: Filesystem> Cleaner<F> {
    pub fn with_filesystem(fs: F, sidecars: SidecarResolver, audit: AuditLog) -> Self {
        Self {
            fs,
            sidecars,
            audit,
            in_progress: Cell::new(false),
            confirmed: Cell::new(false),
        }
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    pub fn sidecars(&self) -> &SidecarResolver {
        &self.sidecars
    }

    /// Arms the confirmation for the next deletion run.
    pub fn confirm(&self) {
        self.confirmed.set(true);
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed.get()
    }

    pub fn is_running(&self) -> bool {
        self.in_progress.get()
    }

    /// Claims the in-progress flag, or `None` if a run already holds it.
    pub fn begin_run(&self) -> Option<RunGuard<'_>> {
        if self.in_progress.replace(true) {
            return None;
        }
        Some(RunGuard {
            flag: &self.in_progress,
        })
    }

    pub fn info<S: AssetSource + ?Sized>(&self, source: &S) -> Result<CollectionInfo> {
        let snapshot = source.snapshot()?;
        let total = snapshot
            .as_ref()
            .map_or(0, |s| s.iter().flatten().filter(|a| a.is_valid()).count());
        let rejected = select_rejected(snapshot.as_deref()).len();
        Ok(CollectionInfo { total, rejected })
    }

    pub fn dry_run<S: AssetSource + ?Sized>(&self, source: &S) -> Result<DryRunReport> {
        let snapshot = source.snapshot()?;
        let candidates = select_rejected(snapshot.as_deref());

        let report = space::audit(&self.fs, &self.sidecars, &candidates);
        self.audit.append(&format!("Dry run: {}", report.summary()));
        Ok(report)
    }

    /// Permanently deletes every rejected asset of `catalog`.
    ///
    /// Refused without side effects when a run is in progress, when there is
    /// nothing to delete, or when confirmation was not armed. Zero candidates
    /// leaves an armed confirmation in place. A completed run always leaves
    /// it cleared, even if it was re-armed while the run was going.
    pub fn delete_permanently<C, P>(&self, catalog: &mut C, on_progress: P) -> Result<DeleteOutcome>
    where
        C: AssetSource + RecordStore + ?Sized,
        P: FnMut(Progress),
    {
        if self.is_running() {
            log::warn!("A deletion is already in progress");
            self.audit
                .append("Session blocked: a deletion is already in progress.");
            return Ok(DeleteOutcome::AlreadyRunning);
        }

        let snapshot = catalog.snapshot()?;
        let candidates = select_rejected(snapshot.as_deref());
        if candidates.is_empty() {
            log::warn!("No rejected images to delete");
            self.audit
                .append("Session blocked: no rejected images to delete.");
            return Ok(DeleteOutcome::NoCandidates);
        }

        if !self.confirmed.replace(false) {
            log::warn!("Deletion not confirmed");
            self.audit
                .append("Session blocked: deletion was not confirmed.");
            return Ok(DeleteOutcome::NotConfirmed);
        }

        let Some(_guard) = self.begin_run() else {
            return Ok(DeleteOutcome::AlreadyRunning);
        };

        self.audit.append(&format!(
            "Start of session. Permanently deleting {} rejected images.",
            candidates.len()
        ));
        log::info!("Deleting {} rejected images", candidates.len());

        let engine = DeletionEngine::new(&self.fs, &self.sidecars, &self.audit);
        let report = engine.run(&candidates, catalog, on_progress);
        self.confirmed.set(false);

        Ok(DeleteOutcome::Completed(report))
    }
}
