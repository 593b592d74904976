//! Command: print the values of a key in one section.
use anyhow::Result;

use crate::cli::GetOpts;
use crate::ini::{Document, parse_assignment};

/// Run the get command.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, the section is missing or
/// ambiguous, or the key is absent.
pub fn run(opts: &GetOpts) -> Result<()> {
    let doc = super::load_document(&opts.file)?;
    for value in lookup(&doc, opts)? {
        println!("{value}");
    }
    Ok(())
}

fn lookup<'a>(doc: &'a Document, opts: &GetOpts) -> Result<Vec<&'a str>> {
    let matching = opts.matching.as_deref().map(parse_assignment).transpose()?;
    let section = super::find_section(doc, &opts.section, matching.as_ref())?
        .and_then(|id| doc.section(id))
        .ok_or_else(|| anyhow::anyhow!("no matching [{}] section", opts.section))?;

    let values: Vec<&str> = section.values(&opts.key).collect();
    if values.is_empty() {
        anyhow::bail!("[{}] has no '{}' directive", opts.section, opts.key);
    }
    Ok(values)
}
