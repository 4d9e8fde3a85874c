//! Dry-run accounting of the space a deletion would reclaim.

use crate::catalog::Asset;
use crate::fs::{Filesystem, SidecarResolver};
use crate::util::format_bytes;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DryRunReport {
    pub file_count: usize,
    pub sidecar_count: usize,
    pub total_bytes: u64,
}

impl DryRunReport {
    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }

    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "No rejected images found.".to_string();
        }
        format!(
            "Found {} rejected images with {} sidecar files. Deleting them would free {}.",
            self.file_count,
            self.sidecar_count,
            format_bytes(self.total_bytes)
        )
    }
}

/// Measures candidates and their sidecars without touching anything.
pub fn audit<F: Filesystem + ?Sized>(
    fs: &F,
    sidecars: &SidecarResolver,
    candidates: &[Asset],
) -> DryRunReport {
    let mut report = DryRunReport {
        file_count: candidates.len(),
        ..DryRunReport::default()
    };

    if report.is_empty() {
        return report;
    }

    for asset in candidates {
        let path = asset.path();
        report.total_bytes += fs.size(&path);

        for sidecar in sidecars.sidecars(fs, &path) {
            report.total_bytes += fs.size(&sidecar);
            report.sidecar_count += 1;
        }
    }

    report
}
