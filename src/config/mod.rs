//! Patch plan configuration.
pub mod plan;
pub mod toml_loader;

pub use plan::{FilePatch, PatchPlan, SectionPatch};

/// Shared helpers for config unit tests.
#[cfg(test)]
pub mod test_helpers {
    use std::path::PathBuf;

    /// Write `content` to `plan.toml` in a fresh temporary directory.
    ///
    /// The directory is returned so it lives as long as the test needs the
    /// file.
    #[allow(clippy::expect_used)]
    pub fn write_temp_toml(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("plan.toml");
        std::fs::write(&path, content).expect("write temp toml");
        (dir, path)
    }
}
