//! Terminal feedback for deletion runs and imports.

use crate::engine::Progress;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

const DELETION_TEMPLATE: &str = "{prefix:.bold.red} [{bar:40.red/white}] {pos}/{len} {msg}";
const IMPORT_TEMPLATE: &str = "{spinner:.cyan} Importing {msg} [{elapsed}]";

/// Bar sized to the number of deletion candidates.
pub fn deletion_progress(total: usize) -> ProgressBar {
    let style = ProgressStyle::with_template(DELETION_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    ProgressBar::new(total as u64)
        .with_style(style)
        .with_prefix("Deleting")
}

/// Moves `bar` to `progress`. The message only changes on checkpoints.
pub fn advance(bar: &ProgressBar, progress: Progress) {
    bar.set_position(progress.processed as u64);
    if progress.is_checkpoint() {
        bar.set_message(progress.message());
    }
}

/// Ticking spinner shown while `root` is walked.
pub fn import_spinner(root: &Path) -> ProgressBar {
    let style = ProgressStyle::with_template(IMPORT_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let spinner = ProgressBar::new_spinner()
        .with_style(style)
        .with_message(root.display().to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
