// Shared helpers for integration tests.
//
// Provides a temporary directory that holds copies of the fixture files and
// any plan written by the test, so each test edits its own files.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use confpatch::config::PatchPlan;

/// Directory holding the checked-in fixture files.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Contents of a fixture file.
pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_dir().join(name)).expect("read fixture")
}

/// An isolated working directory backed by a [`tempfile::TempDir`].
///
/// The directory is deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory holding target files and plans.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path of `name` inside the context.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Current contents of `name`.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).expect("read target file")
    }

    /// Write `plan.toml` and load it, resolving targets against the context.
    pub fn load_plan(&self, content: &str) -> PatchPlan {
        let path = self.path("plan.toml");
        std::fs::write(&path, content).expect("write plan.toml");
        PatchPlan::load(&path).expect("load plan")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building an empty context.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Copy fixture `name` into the context under the same name.
    pub fn with_fixture(self, name: &str) -> Self {
        let content = fixture(name);
        self.with_file(name, &content)
    }

    /// Write `content` to `name` inside the context.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        std::fs::write(self.ctx.path(name), content).expect("write target file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
