//! Top-level subcommand orchestration.
pub mod apply;
pub mod check;
pub mod edit;
pub mod get;
pub mod show;
pub mod version;

use anyhow::{Context as _, Result};
use std::path::Path;

use crate::cli::GlobalOpts;
use crate::config::FilePatch;
use crate::ini::{Directive, Document, SectionId, parse};
use crate::logging::{FileStatus, Logger};
use crate::resources::fs::read_text;
use crate::resources::ini_file::IniFileResource;
use crate::resources::{Applicable, Resource, ResourceChange, ResourceState};

/// Read and parse an existing file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or malformed.
pub fn load_document(path: &Path) -> Result<Document> {
    let text = read_text(path)?
        .with_context(|| format!("{} does not exist", path.display()))?;
    parse(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Resolve the single section a `--match`-aware lookup targets.
///
/// # Errors
///
/// Returns an error if several sections match.
pub fn find_section(
    doc: &Document,
    title: &str,
    matching: Option<&Directive>,
) -> Result<Option<SectionId>> {
    let found = match matching {
        Some(directive) => doc.single_section_by_directive(title, directive)?,
        None => doc.single_section_by_title(title)?,
    };
    Ok(found)
}

/// Check one file patch, apply it unless in dry-run mode, and record the
/// outcome on `log`.
///
/// Failures are logged and recorded rather than returned so that the
/// remaining files are still processed.
pub fn process_file(patch: &FilePatch, global: &GlobalOpts, log: &Logger) {
    let resource = IniFileResource::new(patch);
    let name = resource.description();
    match reconcile(&resource, global, log) {
        Ok((status, message)) => log.record_file(&name, status, message.as_deref()),
        Err(e) => {
            log.error(&format!("{name}: {e:#}"));
            log.record_file(&name, FileStatus::Failed, Some(&e.to_string()));
        }
    }
}

fn reconcile(
    resource: &IniFileResource<'_>,
    global: &GlobalOpts,
    log: &Logger,
) -> Result<(FileStatus, Option<String>)> {
    let name = resource.description();
    let detail = match resource.current_state()? {
        ResourceState::Correct => {
            log.debug(&format!("{name} is up to date"));
            return Ok((FileStatus::Ok, None));
        }
        ResourceState::Invalid { reason } => {
            log.warn(&format!("skipping {name}: {reason}"));
            return Ok((FileStatus::Skipped, Some(reason)));
        }
        ResourceState::Missing => "create".to_string(),
        ResourceState::Incorrect { current } => current,
    };

    if global.dry_run {
        log.dry_run(&format!("would update {name} ({detail})"));
        return Ok((FileStatus::DryRun, Some(detail)));
    }

    Ok(match resource.apply()? {
        ResourceChange::Applied => {
            log.info(&format!("updated {name} ({detail})"));
            (FileStatus::Changed, Some(detail))
        }
        ResourceChange::AlreadyCorrect => (FileStatus::Ok, None),
        ResourceChange::Skipped { reason } => (FileStatus::Skipped, Some(reason)),
    })
}

/// Print the summary and bail if any file failed.
///
/// # Errors
///
/// Returns an error if one or more files recorded a failure.
pub fn finish(log: &Logger) -> Result<()> {
    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} file(s) failed");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::SectionPatch;

    const PEERS: &str = "[Peer]\nPublicKey=A\nAllowedIPs=10.0.0.2/32\n\n[Peer]\nPublicKey=B\n";

    fn global(dry_run: bool) -> GlobalOpts {
        GlobalOpts { dry_run }
    }

    fn add_patch(path: &Path, key: &str, value: &str) -> FilePatch {
        let mut section = SectionPatch::new("Interface");
        section.add.push((key.to_string(), value.to_string()));
        FilePatch {
            path: path.to_path_buf(),
            create: false,
            sections: vec![section],
        }
    }

    #[test]
    fn load_document_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("wg9.conf")).unwrap_err();
        assert!(err.to_string().contains("wg9.conf does not exist"));
    }

    #[test]
    fn find_section_by_match() {
        let doc = parse(PEERS).unwrap();
        let b = Directive::new("PublicKey", "B");
        let id = find_section(&doc, "Peer", Some(&b)).unwrap().unwrap();
        assert_eq!(id.index(), 1);
    }

    #[test]
    fn find_section_ambiguous_title_is_error() {
        let doc = parse(PEERS).unwrap();
        assert!(find_section(&doc, "Peer", None).is_err());
        assert_eq!(find_section(&doc, "Interface", None).unwrap(), None);
    }

    #[test]
    fn process_file_records_changed_then_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wg0.conf");
        std::fs::write(&path, "[Interface]\nPrivateKey=X\n").unwrap();
        let patch = add_patch(&path, "Address", "10.0.0.1/24");

        let log = Logger::new();
        process_file(&patch, &global(false), &log);
        process_file(&patch, &global(false), &log);

        let entries = log.file_entries();
        assert_eq!(entries[0].status, FileStatus::Changed);
        assert_eq!(entries[1].status, FileStatus::Ok);
        assert!(finish(&log).is_ok());
    }

    #[test]
    fn process_file_dry_run_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wg0.conf");
        std::fs::write(&path, "[Interface]\nPrivateKey=X\n").unwrap();

        let log = Logger::new();
        process_file(&add_patch(&path, "Address", "10.0.0.1/24"), &global(true), &log);

        assert_eq!(log.file_entries()[0].status, FileStatus::DryRun);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[Interface]\nPrivateKey=X\n"
        );
    }

    #[test]
    fn process_file_records_failure_and_finish_bails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.conf");
        std::fs::write(&path, "Address=1\n").unwrap();

        let log = Logger::new();
        process_file(&add_patch(&path, "k", "v"), &global(false), &log);

        assert_eq!(log.failure_count(), 1);
        let err = finish(&log).unwrap_err();
        assert_eq!(err.to_string(), "1 file(s) failed");
    }
}
