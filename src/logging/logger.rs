//! Structured logger with dry-run awareness and summary collection.
use std::sync::Mutex;

use super::types::{FileEntry, FileStatus};

/// Structured logger with dry-run awareness and summary collection.
///
/// Messages are emitted as [`tracing`] events and rendered by the subscriber
/// installed with [`init_subscriber`](super::init_subscriber).
#[derive(Debug, Default)]
pub struct Logger {
    files: Mutex<Vec<FileEntry>>,
}

impl Logger {
    /// Create a new logger with no recorded files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a clone of all recorded file entries.
    #[must_use]
    pub fn file_entries(&self) -> Vec<FileEntry> {
        self.files.lock().map_or_else(|_| vec![], |g| g.clone())
    }
}

#[allow(clippy::unused_self)]
impl Logger {
    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "confpatch::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "confpatch::dry_run", "{msg}");
    }
}

impl Logger {
    /// Record a file result for the summary.
    pub fn record_file(&self, path: &str, status: FileStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.files.lock() {
            guard.push(FileEntry {
                path: path.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return `true` if any recorded file has failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Count the number of failed files.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.files.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|f| f.status == FileStatus::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded files.
    pub fn print_summary(&self) {
        let files = self.file_entries();
        if files.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        for file in &files {
            let (icon, color) = file.status.style();
            let suffix = file
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", file.path));
        }

        println!();
        self.info(&summary_line(&files));
    }
}

/// `"<n> files: <ok> ok, <changed> changed, ..."` with ANSI colours.
fn summary_line(files: &[FileEntry]) -> String {
    let count = |status: FileStatus| files.iter().filter(|f| f.status == status).count();
    format!(
        "{} files: \x1b[32m{} ok\x1b[0m, \x1b[36m{} changed\x1b[0m, \x1b[37m{} dry-run\x1b[0m, \x1b[33m{} skipped\x1b[0m, \x1b[31m{} failed\x1b[0m",
        files.len(),
        count(FileStatus::Ok),
        count(FileStatus::Changed),
        count(FileStatus::DryRun),
        count(FileStatus::Skipped),
        count(FileStatus::Failed),
    )
}
