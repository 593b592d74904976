//! Patch plan loading and validation.
//!
//! A plan lists target files and, for each, the section edits to apply:
//!
//! ```toml
//! [[file]]
//! path = "wg0.conf"
//! create = true
//!
//! [[file.section]]
//! title = "Peer"
//! match = ["PublicKey", "YYYY"]
//! set = [["Endpoint", "vpn.example.com:51820"]]
//! add = [["AllowedIPs", "10.0.0.2/32"]]
//! ```
//!
//! Relative `path` values are resolved against the directory holding the
//! plan.
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::toml_loader;
use crate::error::{BuildError, PlanError};
use crate::ini::{Directive, validate_key, validate_title};

/// A set of file patches loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchPlan {
    /// Target files, applied in order.
    #[serde(default, rename = "file")]
    pub files: Vec<FilePatch>,
}

/// Edits for one target file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilePatch {
    /// Path of the target file.
    pub path: PathBuf,
    /// Start from an empty document when the file does not exist.
    #[serde(default)]
    pub create: bool,
    /// Section edits, applied in order.
    #[serde(default, rename = "section")]
    pub sections: Vec<SectionPatch>,
}

/// Edits for one section of a target file.
///
/// Edits run in field order: `remove`, `set`, `add`, then `append`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionPatch {
    /// Title of the section to edit.
    pub title: String,
    /// Select the section holding this exact directive instead of by title
    /// alone.
    #[serde(default, rename = "match")]
    pub matching: Option<(String, String)>,
    /// Append the section when nothing matches.
    #[serde(default = "default_true")]
    pub create: bool,
    /// Keys whose directives are removed.
    #[serde(default)]
    pub remove: Vec<String>,
    /// Directives that replace every existing value of their key.
    #[serde(default)]
    pub set: Vec<(String, String)>,
    /// Directives appended unless already present.
    #[serde(default)]
    pub add: Vec<(String, String)>,
    /// Directives appended unconditionally.
    #[serde(default)]
    pub append: Vec<(String, String)>,
}

const fn default_true() -> bool {
    true
}

/// A `[key, value]` plan entry as a directive.
#[must_use]
pub fn pair_directive((key, value): &(String, String)) -> Directive {
    Directive::new(key.as_str(), value.as_str())
}

impl PatchPlan {
    /// Load a plan from `path` and resolve relative target paths against
    /// the plan's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let mut plan: Self = toml_loader::load_config(path)?;
        if let Some(base) = path.parent() {
            for file in &mut plan.files {
                if file.path.is_relative() {
                    file.path = base.join(&file.path);
                }
            }
        }
        Ok(plan)
    }

    /// Check every entry of every file.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanError::InvalidEntry`] found.
    pub fn validate(&self) -> Result<(), PlanError> {
        self.files.iter().try_for_each(FilePatch::validate)
    }
}

impl FilePatch {
    /// Check that every title and directive in this patch round-trips.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidEntry`] for the first malformed entry.
    pub fn validate(&self) -> Result<(), PlanError> {
        self.sections
            .iter()
            .try_for_each(SectionPatch::validate)
            .map_err(|source| PlanError::InvalidEntry {
                path: self.path.display().to_string(),
                source,
            })
    }
}

impl SectionPatch {
    /// A patch for `title` that creates the section when missing and
    /// carries no edits yet.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            matching: None,
            create: true,
            remove: Vec::new(),
            set: Vec::new(),
            add: Vec::new(),
            append: Vec::new(),
        }
    }

    /// The `match` entry as a directive.
    #[must_use]
    pub fn match_directive(&self) -> Option<Directive> {
        self.matching.as_ref().map(pair_directive)
    }

    /// Check the title, the match directive and every edit.
    ///
    /// # Errors
    ///
    /// Returns the first [`BuildError`] found.
    pub fn validate(&self) -> Result<(), BuildError> {
        validate_title(&self.title)?;
        if let Some(directive) = self.match_directive() {
            directive.validate()?;
        }
        for key in &self.remove {
            validate_key(key)?;
        }
        self.set
            .iter()
            .chain(&self.add)
            .chain(&self.append)
            .try_for_each(|pair| pair_directive(pair).validate())
    }
}
