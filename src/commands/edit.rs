//! Commands: `set` and `add` directives on the command line.
use anyhow::Result;

use crate::cli::{EditOpts, GlobalOpts};
use crate::config::{FilePatch, SectionPatch};
use crate::ini::{Directive, parse_assignment};
use crate::logging::Logger;

/// How `set`/`add` write each directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Replace every value of the key.
    Set,
    /// Append unless the exact directive exists.
    Add,
}

/// Run the set or add command.
///
/// # Errors
///
/// Returns an error if an argument is not a valid `KEY=VALUE`, or if the
/// file could not be patched.
pub fn run(mode: EditMode, opts: &EditOpts, global: &GlobalOpts, log: &Logger) -> Result<()> {
    let patch = build_patch(mode, opts)?;
    log.stage(&format!("Editing [{}] in {}", opts.section, opts.file.display()));
    super::process_file(&patch, global, log);
    super::finish(log)
}

/// Translate command-line arguments into a one-section file patch.
fn build_patch(mode: EditMode, opts: &EditOpts) -> Result<FilePatch> {
    let mut section = SectionPatch::new(opts.section.as_str());
    section.create = opts.create;
    section.matching = opts
        .matching
        .as_deref()
        .map(parse_assignment)
        .transpose()?
        .map(Directive::into_parts);

    let directives = opts
        .directives
        .iter()
        .map(|arg| parse_assignment(arg).map(Directive::into_parts))
        .collect::<Result<Vec<_>, _>>()?;
    match mode {
        EditMode::Set => section.set = directives,
        EditMode::Add => section.add = directives,
    }

    Ok(FilePatch {
        path: opts.file.clone(),
        create: opts.create,
        sections: vec![section],
    })
}
