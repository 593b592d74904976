//! Command: apply a TOML patch plan.
use anyhow::{Context as _, Result};

use crate::cli::{ApplyOpts, GlobalOpts};
use crate::config::PatchPlan;
use crate::logging::Logger;

/// Run the apply command.
///
/// The whole plan is validated before any file is touched.
///
/// # Errors
///
/// Returns an error if the plan cannot be loaded or is invalid, or if any
/// file fails.
pub fn run(opts: &ApplyOpts, global: &GlobalOpts, log: &Logger) -> Result<()> {
    log.stage("Loading plan");
    let plan = PatchPlan::load(&opts.plan)?;
    plan.validate()
        .with_context(|| format!("validating {}", opts.plan.display()))?;
    log.info(&format!(
        "{} file(s) in {}",
        plan.files.len(),
        opts.plan.display()
    ));

    log.stage(if global.dry_run {
        "Checking files"
    } else {
        "Applying patches"
    });
    for file in &plan.files {
        log.debug(&format!(
            "{}: {} section patch(es)",
            file.path.display(),
            file.sections.len()
        ));
        super::process_file(file, global, log);
    }

    super::finish(log)
}
