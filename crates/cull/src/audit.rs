//! Append-only, timestamped text log of every cleanup session.

use crate::util::format_timestamp;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `[YYYY-MM-DD HH:MM:SS] message` and syncs it to disk.
    ///
    /// Failures are reported through the diagnostic logger and swallowed so
    /// an unwritable log never interrupts a deletion.
    pub fn append(&self, message: &str) {
        if let Err(e) = self.try_append(message) {
            log::error!(
                "Failed to write audit log {}: {}",
                self.path.display(),
                e
            );
        }
    }

    fn try_append(&self, message: &str) -> io::Result<()> {
        let line = format!("[{}] {}\n", format_timestamp(&Local::now()), message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.sync_all()
    }

    pub fn read_lines(&self) -> io::Result<Vec<String>> {
        let file = match fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        BufReader::new(file).lines().collect()
    }

    /// The last `n` lines of the log, oldest first.
    pub fn tail(&self, n: usize) -> io::Result<Vec<String>> {
        let mut lines = self.read_lines()?;
        let skip = lines.len().saturating_sub(n);
        Ok(lines.split_off(skip))
    }
}
