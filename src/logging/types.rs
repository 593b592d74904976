//! Per-file result types for summary reporting.

/// Result of processing one file, for summary reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path of the file as given on the command line or in the plan.
    pub path: String,
    /// Final status of the file.
    pub status: FileStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The file already had the desired contents, or passed a check.
    Ok,
    /// The file was written.
    Changed,
    /// The file would have been written, but dry-run mode was on.
    DryRun,
    /// The file was not processed (e.g., target is a directory).
    Skipped,
    /// Processing the file failed.
    Failed,
}

impl FileStatus {
    /// Summary icon and ANSI colour for this status.
    #[must_use]
    pub const fn style(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::Changed => ("+", "\x1b[36m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn file_status_equality() {
        assert_eq!(FileStatus::Ok, FileStatus::Ok);
        assert_ne!(FileStatus::Ok, FileStatus::Failed);
        assert_ne!(FileStatus::Changed, FileStatus::DryRun);
    }

    #[test]
    fn every_status_has_distinct_icon() {
        let icons: Vec<&str> = [
            FileStatus::Ok,
            FileStatus::Changed,
            FileStatus::DryRun,
            FileStatus::Skipped,
            FileStatus::Failed,
        ]
        .iter()
        .map(|s| s.style().0)
        .collect();
        let mut unique = icons.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), icons.len());
    }
}
