//! Command: verify that files parse and serialize back unchanged.
use anyhow::Result;
use std::path::Path;

use crate::cli::CheckOpts;
use crate::ini::parse;
use crate::logging::{FileStatus, Logger};
use crate::resources::fs::read_text;

/// Run the check command.
///
/// # Errors
///
/// Returns an error if any file is missing, malformed, or does not
/// round-trip.
pub fn run(opts: &CheckOpts, log: &Logger) -> Result<()> {
    log.stage("Checking files");
    for path in &opts.files {
        let name = path.display().to_string();
        match check_file(path) {
            Ok(summary) => {
                log.info(&format!("{name}: {summary}"));
                log.record_file(&name, FileStatus::Ok, None);
            }
            Err(e) => {
                log.error(&format!("{name}: {e:#}"));
                log.record_file(&name, FileStatus::Failed, Some(&e.to_string()));
            }
        }
    }
    super::finish(log)
}

/// Parse `path` and confirm serialization reproduces it byte for byte.
fn check_file(path: &Path) -> Result<String> {
    let Some(text) = read_text(path)? else {
        anyhow::bail!("file does not exist");
    };
    let doc = parse(&text)?;
    let rendered = doc.serialize();
    if rendered != text {
        let line = first_difference(&text, &rendered);
        anyhow::bail!("serialization differs from input at line {line}");
    }
    let directives: usize = doc.sections().iter().map(|s| s.directives().count()).sum();
    Ok(format!(
        "{} section(s), {directives} directive(s)",
        doc.sections().len()
    ))
}

/// 1-based number of the first line where `a` and `b` differ.
fn first_difference(a: &str, b: &str) -> usize {
    a.split('\n')
        .zip(b.split('\n'))
        .take_while(|(x, y)| x == y)
        .count()
        + 1
}
