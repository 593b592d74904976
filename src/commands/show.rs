//! Command: list the sections and directives of a file.
use anyhow::Result;
use serde::Serialize;

use crate::cli::ShowOpts;
use crate::ini::{Directive, Document, LineEnding};

/// JSON view of a document.
#[derive(Debug, Serialize)]
struct DocumentView<'a> {
    path: String,
    line_ending: &'static str,
    final_newline: bool,
    bom: bool,
    sections: Vec<SectionView<'a>>,
}

/// JSON view of one section.
#[derive(Debug, Serialize)]
struct SectionView<'a> {
    index: usize,
    title: &'a str,
    directives: Vec<&'a Directive>,
}

/// Run the show command.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded.
pub fn run(opts: &ShowOpts) -> Result<()> {
    let doc = super::load_document(&opts.file)?;
    if opts.json {
        let view = view(&opts.file.display().to_string(), &doc);
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_text(&doc));
    }
    Ok(())
}

fn view<'a>(path: &str, doc: &'a Document) -> DocumentView<'a> {
    DocumentView {
        path: path.to_string(),
        line_ending: match doc.line_ending() {
            LineEnding::Lf => "lf",
            LineEnding::CrLf => "crlf",
        },
        final_newline: doc.has_final_newline(),
        bom: doc.has_bom(),
        sections: doc
            .sections()
            .iter()
            .enumerate()
            .map(|(index, section)| SectionView {
                index,
                title: section.title(),
                directives: section.directives().collect(),
            })
            .collect(),
    }
}

/// Sections and directives only, one per line, comments dropped.
fn render_text(doc: &Document) -> String {
    let mut out = String::new();
    for section in doc.sections() {
        out.push_str(&format!("[{}]\n", section.title()));
        for directive in section.directives() {
            out.push_str(&format!("  {} = {}\n", directive.key(), directive.value()));
        }
    }
    out
}
