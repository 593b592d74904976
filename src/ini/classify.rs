//! Single-line classification.
//!
//! A physical line is one of four kinds. The markers are checked in a fixed
//! order, because real files contain lines that hold both a `[` and a `=`:
//!
//! 1. the first unescaped `#` splits content from comment;
//! 2. within the content, whichever of `[` and `=` comes first decides
//!    between a section title and a directive;
//! 3. a line with neither marker is a comment-only or blank line, and any
//!    other text on it is an error.
use super::directive::Directive;
use super::line::{BlankLine, CommentLine, DirectiveLine, Line, TitleLine};
use crate::error::{ParseError, ParseErrorKind};

/// Classify one line of text (without its terminator).
///
/// `line` is the 1-based line number reported in errors.
///
/// # Examples
///
/// ```
/// use confpatch::ini::{Line, classify_line};
///
/// let Ok(Line::Directive(line)) = classify_line("key = value # note", 1) else {
///     panic!("expected a directive line");
/// };
/// assert_eq!(line.directive().key(), "key");
/// assert_eq!(line.delimiter(), " = ");
/// assert_eq!(line.comment(), Some(" note"));
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] carrying `line` and `text` when the line is not
/// a valid title, directive, comment or blank line.
pub fn classify_line(text: &str, line: usize) -> Result<Line, ParseError> {
    let (content, comment) = match find_comment_start(text) {
        Some(at) => {
            let (content, rest) = text.split_at(at);
            (content, rest.strip_prefix('#'))
        }
        None => (text, None),
    };

    let bracket = content.find('[');
    let equals = content.find('=');

    let classified = match (bracket, equals) {
        (Some(open), _) if equals.is_none_or(|eq| open < eq) => title_line(content, comment),
        (_, Some(_)) => directive_line(content, comment),
        _ => plain_line(content, comment),
    };

    classified.map_err(|kind| ParseError {
        line,
        text: text.to_string(),
        kind,
    })
}

/// Byte offset of the first unescaped `#`.
///
/// A backslash escapes the character after it, so `\#` is content while
/// `\\#` is an escaped backslash followed by a comment marker.
pub(super) fn find_comment_start(text: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if c == '#' && !escaped {
            return Some(i);
        }
        escaped = c == '\\' && !escaped;
    }
    None
}

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

fn title_line(content: &str, comment: Option<&str>) -> Result<Line, ParseErrorKind> {
    let inner = content
        .strip_prefix('[')
        .ok_or(ParseErrorKind::TitleNotAtLineStart)?;
    let (title, spacing) = inner
        .split_once(']')
        .ok_or(ParseErrorKind::UnclosedTitle)?;
    if !is_blank(spacing) {
        return Err(ParseErrorKind::TextAfterTitle);
    }
    Ok(Line::Title(TitleLine::from_parts(
        title,
        spacing,
        comment.map(str::to_string),
    )))
}

fn directive_line(content: &str, comment: Option<&str>) -> Result<Line, ParseErrorKind> {
    let Some((left, right)) = content.split_once('=') else {
        return Err(ParseErrorKind::StrayText);
    };

    let (key, pre) = left.split_at(left.trim_end().len());
    if key.is_empty() {
        return Err(ParseErrorKind::MissingKey);
    }
    if key.starts_with(char::is_whitespace) {
        return Err(ParseErrorKind::KeyLeadingWhitespace);
    }

    let (post, rest) = right.split_at(right.len() - right.trim_start().len());
    let (value, trailing) = rest.split_at(rest.trim_end().len());
    if value.is_empty() {
        return Err(ParseErrorKind::MissingValue);
    }

    Ok(Line::Directive(DirectiveLine::from_parts(
        Directive::new(key, value),
        format!("{pre}={post}"),
        trailing,
        comment.map(str::to_string),
    )))
}

fn plain_line(content: &str, comment: Option<&str>) -> Result<Line, ParseErrorKind> {
    match comment {
        Some(text) if is_blank(content) => Ok(Line::Comment(CommentLine::from_parts(content, text))),
        Some(_) => Err(ParseErrorKind::TextBeforeComment),
        None if is_blank(content) => Ok(Line::Blank(BlankLine::new(content))),
        None => Err(ParseErrorKind::StrayText),
    }
}
