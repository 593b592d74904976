//! Whole-document parsing.
use super::classify::classify_line;
use super::document::{Document, LineEnding, Section};
use super::line::Line;
use crate::error::{ParseError, ParseErrorKind};

const BOM: char = '\u{feff}';

/// Parse section/directive text into a [`Document`].
///
/// Serializing the result without changes reproduces `text` exactly.
///
/// # Examples
///
/// ```
/// use confpatch::ini::parse;
///
/// let text = "# wg0\n[Interface]\nPrivateKey = XXXX  # secret\n";
/// let doc = parse(text).unwrap();
/// assert_eq!(doc.sections().len(), 1);
/// assert_eq!(doc.serialize(), text);
/// ```
///
/// # Errors
///
/// Returns the first [`ParseError`], tagged with its 1-based line number.
/// A directive before the first section title is an error.
pub fn parse(text: &str) -> Result<Document, ParseError> {
    let (bom, body) = text
        .strip_prefix(BOM)
        .map_or((false, text), |rest| (true, rest));

    let line_ending = detect_line_ending(body);
    let terminator = line_ending.as_str();

    let mut leading = Vec::new();
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;
    let mut final_newline = true;

    if !body.is_empty() {
        let content = body.strip_suffix(terminator).unwrap_or_else(|| {
            final_newline = false;
            body
        });

        for (index, raw) in content.split(terminator).enumerate() {
            let number = index + 1;
            if line_ending == LineEnding::CrLf && raw.contains('\n') {
                return Err(error(number, raw, ParseErrorKind::MixedLineEndings));
            }

            match classify_line(raw, number)? {
                Line::Title(title) => {
                    if let Some(section) = current.take() {
                        sections.push(section);
                    }
                    current = Some(Section::with_title_line(title));
                }
                line => match current {
                    Some(ref mut section) => section.push_parsed(line),
                    None if line.as_directive().is_some() => {
                        return Err(error(number, raw, ParseErrorKind::DirectiveBeforeSection));
                    }
                    None => leading.push(line),
                },
            }
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    tracing::debug!(
        sections = sections.len(),
        leading = leading.len(),
        crlf = line_ending == LineEnding::CrLf,
        "parsed document"
    );

    Ok(Document::from_parts(
        leading,
        sections,
        line_ending,
        final_newline,
        bom,
    ))
}

/// `\r\n` when the first line break is preceded by `\r`, `\n` otherwise.
fn detect_line_ending(text: &str) -> LineEnding {
    match text.split_once('\n') {
        Some((first, _)) if first.ends_with('\r') => LineEnding::CrLf,
        _ => LineEnding::Lf,
    }
}

fn error(line: usize, text: &str, kind: ParseErrorKind) -> ParseError {
    ParseError {
        line,
        text: text.to_string(),
        kind,
    }
}
