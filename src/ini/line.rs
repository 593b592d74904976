//! The four line kinds and their serialization.
use std::fmt;

use super::directive::{Directive, validate_title};
use crate::error::EditError;

/// One physical line of a document.
///
/// The set of kinds is closed; [`fmt::Display`] is the single serializer
/// and reproduces the parsed text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `[title]` with optional spacing and comment.
    Title(TitleLine),
    /// `key<delimiter>value` with optional trailing whitespace and comment.
    Directive(DirectiveLine),
    /// Indented `#comment`.
    Comment(CommentLine),
    /// Whitespace only.
    Blank(BlankLine),
}

impl Line {
    /// A new `key=value` line with no comment.
    #[must_use]
    pub fn directive(directive: impl Into<Directive>) -> Self {
        Self::Directive(DirectiveLine::new(directive))
    }

    /// A new unindented comment line; `text` follows the `#` verbatim.
    ///
    /// `text` must not contain a line break.
    #[must_use]
    pub fn comment(text: impl Into<String>) -> Self {
        let text = text.into();
        debug_assert!(
            !text.contains(['\n', '\r']),
            "comment text contains a line break: {text:?}"
        );
        Self::Comment(CommentLine::from_parts("", text))
    }

    /// A new empty line.
    #[must_use]
    pub fn blank() -> Self {
        Self::Blank(BlankLine::new(""))
    }

    /// The directive carried by this line, if any.
    #[must_use]
    pub const fn as_directive(&self) -> Option<&Directive> {
        match self {
            Self::Directive(line) => Some(&line.directive),
            Self::Title(_) | Self::Comment(_) | Self::Blank(_) => None,
        }
    }

    /// The comment text after the `#`, if any.
    #[must_use]
    pub fn comment_text(&self) -> Option<&str> {
        match self {
            Self::Title(line) => line.comment(),
            Self::Directive(line) => line.comment(),
            Self::Comment(line) => Some(&line.text),
            Self::Blank(_) => None,
        }
    }

    /// Short name of the line kind, used in messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Directive(_) => "directive",
            Self::Comment(_) => "comment",
            Self::Blank(_) => "blank",
        }
    }

    /// Attach `text` as a comment, written as ` # text` after the content.
    ///
    /// A blank line turns into a comment line that keeps its whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::CommentAlreadySet`] when the line has a comment.
    pub fn add_comment(&mut self, text: &str) -> Result<(), EditError> {
        let comment = format!(" {text}");
        match self {
            Self::Title(line) => line.add_comment(text),
            Self::Directive(line) => {
                let content = line.directive.to_string();
                attach(&mut line.comment, &mut line.trailing, comment, &content)
            }
            Self::Comment(line) => Err(EditError::CommentAlreadySet {
                line: line.to_string(),
            }),
            Self::Blank(line) => {
                let indent = std::mem::take(&mut line.whitespace);
                *self = Self::Comment(CommentLine::from_parts(indent, comment));
                Ok(())
            }
        }
    }
}

fn attach(
    slot: &mut Option<String>,
    spacing: &mut String,
    comment: String,
    content: &str,
) -> Result<(), EditError> {
    if slot.is_some() {
        return Err(EditError::CommentAlreadySet {
            line: content.to_string(),
        });
    }
    if spacing.is_empty() {
        spacing.push(' ');
    }
    *slot = Some(comment);
    Ok(())
}

fn write_comment(f: &mut fmt::Formatter<'_>, comment: Option<&str>) -> fmt::Result {
    match comment {
        Some(text) => write!(f, "#{text}"),
        None => Ok(()),
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(line) => line.fmt(f),
            Self::Directive(line) => {
                write!(
                    f,
                    "{}{}{}{}",
                    line.directive.key(),
                    line.delimiter,
                    line.directive.value(),
                    line.trailing
                )?;
                write_comment(f, line.comment.as_deref())
            }
            Self::Comment(line) => line.fmt(f),
            Self::Blank(line) => f.write_str(&line.whitespace),
        }
    }
}

/// A `[title]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLine {
    title: String,
    spacing: String,
    comment: Option<String>,
}

impl TitleLine {
    /// A bare `[title]` line.
    ///
    /// The title must pass [`validate_title`]; anything else would not parse
    /// back as the same title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        debug_assert!(
            validate_title(&title).is_ok(),
            "invalid section title: {title:?}"
        );
        Self::from_parts(title, "", None)
    }

    pub(super) fn from_parts(
        title: impl Into<String>,
        spacing: impl Into<String>,
        comment: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            spacing: spacing.into(),
            comment,
        }
    }

    /// Text between the brackets.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whitespace between `]` and the comment marker or end of line.
    #[must_use]
    pub fn spacing(&self) -> &str {
        &self.spacing
    }

    /// Comment text after the `#`, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Attach a comment; see [`Line::add_comment`].
    ///
    /// # Errors
    ///
    /// Returns [`EditError::CommentAlreadySet`] when the line has a comment.
    pub fn add_comment(&mut self, text: &str) -> Result<(), EditError> {
        let content = format!("[{}]", self.title);
        attach(
            &mut self.comment,
            &mut self.spacing,
            format!(" {text}"),
            &content,
        )
    }
}

impl fmt::Display for TitleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}", self.title, self.spacing)?;
        write_comment(f, self.comment.as_deref())
    }
}

/// A `key=value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLine {
    directive: Directive,
    delimiter: String,
    trailing: String,
    comment: Option<String>,
}

impl DirectiveLine {
    /// A `key=value` line with a bare `=` and no comment.
    ///
    /// The directive must pass [`Directive::validate`]; plans and command-line
    /// input are validated before they reach here.
    #[must_use]
    pub fn new(directive: impl Into<Directive>) -> Self {
        let directive = directive.into();
        debug_assert!(
            directive.validate().is_ok(),
            "invalid directive: {directive:?}"
        );
        Self::from_parts(directive, "=", "", None)
    }

    pub(super) fn from_parts(
        directive: Directive,
        delimiter: impl Into<String>,
        trailing: impl Into<String>,
        comment: Option<String>,
    ) -> Self {
        Self {
            directive,
            delimiter: delimiter.into(),
            trailing: trailing.into(),
            comment,
        }
    }

    /// The key/value pair.
    #[must_use]
    pub const fn directive(&self) -> &Directive {
        &self.directive
    }

    /// The `=` with its surrounding whitespace, as written.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Whitespace between the value and the comment marker or end of line.
    #[must_use]
    pub fn trailing(&self) -> &str {
        &self.trailing
    }

    /// Comment text after the `#`, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// A line holding only a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine {
    indent: String,
    text: String,
}

impl CommentLine {
    pub(super) fn from_parts(indent: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            text: text.into(),
        }
    }

    /// Whitespace before the `#`.
    #[must_use]
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Text after the `#`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for CommentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.indent, self.text)
    }
}

/// A whitespace-only line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankLine {
    whitespace: String,
}

impl BlankLine {
    /// A blank line holding `whitespace` verbatim.
    ///
    /// Outside this module blank lines are made with [`Line::blank`], so the
    /// text is always whitespace only.
    pub(super) fn new(whitespace: impl Into<String>) -> Self {
        let whitespace = whitespace.into();
        debug_assert!(
            whitespace.chars().all(char::is_whitespace),
            "blank line holds non-whitespace: {whitespace:?}"
        );
        Self { whitespace }
    }

    /// The preserved whitespace.
    #[must_use]
    pub fn whitespace(&self) -> &str {
        &self.whitespace
    }
}
