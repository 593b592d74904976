//! Section/directive file resource.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::fs::{read_text, write_atomic};
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::config::plan::pair_directive;
use crate::config::{FilePatch, SectionPatch};
use crate::error::PlanError;
use crate::ini::{Document, Section, SectionId, parse};

/// Text of a target before and after its patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Current file contents, `None` when the file does not exist.
    pub current: Option<String>,
    /// Contents after applying the patch.
    pub desired: String,
}

impl Rendered {
    /// Whether the patch leaves an existing file byte-identical.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.current.as_deref() == Some(self.desired.as_str())
    }
}

/// A local section/directive file that should contain a set of edits.
#[derive(Debug)]
pub struct IniFileResource<'a> {
    patch: &'a FilePatch,
}

impl<'a> IniFileResource<'a> {
    /// Create a resource for one file patch.
    #[must_use]
    pub const fn new(patch: &'a FilePatch) -> Self {
        Self { patch }
    }

    /// Path of the target file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.patch.path
    }

    /// Read the target and apply the patch in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be read or parsed, is missing
    /// while `create` is off, or the patch cannot be applied.
    pub fn render(&self) -> Result<Rendered> {
        let path = self.path();
        let current = read_text(path)?;
        let mut doc = match &current {
            Some(text) => parse(text).with_context(|| format!("parsing {}", path.display()))?,
            None if self.patch.create => Document::new(),
            None => {
                return Err(PlanError::MissingFile {
                    path: path.display().to_string(),
                }
                .into());
            }
        };
        apply_patch(&mut doc, self.patch)?;
        Ok(Rendered {
            current,
            desired: doc.serialize(),
        })
    }
}

impl Applicable for IniFileResource<'_> {
    fn description(&self) -> String {
        self.path().display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.path().is_dir() {
            return Ok(ResourceChange::Skipped {
                reason: "target is a directory".to_string(),
            });
        }
        let rendered = self.render()?;
        if rendered.is_unchanged() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        write_atomic(self.path(), rendered.desired.as_bytes())?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for IniFileResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if self.path().is_dir() {
            return Ok(ResourceState::Invalid {
                reason: "target is a directory".to_string(),
            });
        }
        let rendered = self.render()?;
        Ok(match rendered.current {
            None => ResourceState::Missing,
            Some(_) if rendered.is_unchanged() => ResourceState::Correct,
            Some(current) => ResourceState::Incorrect {
                current: changed_lines_summary(&current, &rendered.desired),
            },
        })
    }
}

/// Apply every section edit of `patch` to `doc`, in order.
///
/// Re-applying the same patch is a no-op unless it uses `append`.
///
/// # Errors
///
/// Returns [`PlanError::InvalidEntry`] when an entry does not round-trip,
/// [`PlanError::Ambiguous`] when a lookup matches several sections, and
/// [`PlanError::MissingSection`] when nothing matches and `create` is off.
/// `doc` is left untouched if validation fails.
pub fn apply_patch(doc: &mut Document, patch: &FilePatch) -> Result<(), PlanError> {
    patch.validate()?;
    let path = patch.path.display().to_string();
    for section_patch in &patch.sections {
        let id = locate(doc, section_patch, &path)?;
        if let Some(section) = doc.section_mut(id) {
            edit_section(section, section_patch);
        }
    }
    Ok(())
}

/// Find the section a patch targets, appending it when allowed.
fn locate(doc: &mut Document, patch: &SectionPatch, path: &str) -> Result<SectionId, PlanError> {
    let matching = patch.match_directive();
    let found = match &matching {
        Some(directive) => doc.single_section_by_directive(&patch.title, directive),
        None => doc.single_section_by_title(&patch.title),
    }
    .map_err(|source| PlanError::Ambiguous {
        path: path.to_string(),
        source,
    })?;

    if let Some(id) = found {
        return Ok(id);
    }
    if !patch.create {
        return Err(PlanError::MissingSection {
            path: path.to_string(),
            title: patch.title.clone(),
        });
    }

    tracing::debug!("adding section [{}] to {path}", patch.title);
    let section = Section::from_directives(patch.title.as_str(), matching);
    let separate = !doc.sections().is_empty();
    Ok(doc.add_section(section, separate))
}

fn edit_section(section: &mut Section, patch: &SectionPatch) {
    for key in &patch.remove {
        let removed = section.remove_key(key);
        tracing::debug!("[{}] removed {removed} '{key}' directive(s)", patch.title);
    }
    // A key already holding exactly this one value is left in place, so
    // re-applying `set` does not move the line to the end.
    for pair in &patch.set {
        let directive = pair_directive(pair);
        if !section.values(directive.key()).eq([directive.value()]) {
            section.add_or_replace(directive);
        }
    }
    for pair in &patch.add {
        section.add_if_not_present(pair_directive(pair));
    }
    for pair in &patch.append {
        section.add_directive(pair_directive(pair));
    }
}

/// Count of lines that differ between two texts, for state reporting.
fn changed_lines_summary(current: &str, desired: &str) -> String {
    let before: Vec<&str> = current.lines().collect();
    let after: Vec<&str> = desired.lines().collect();
    let differing = before
        .iter()
        .zip(&after)
        .filter(|(a, b)| a != b)
        .count()
        + before.len().abs_diff(after.len());
    format!("{differing} line(s) differ")
}
