//! Domain-specific error types for confpatch.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! The document core returns typed errors (e.g., [`ParseError`],
//! [`LookupError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ConfpatchError
//! ├── Parse(ParseError)     - malformed line, aborts the parse
//! ├── Lookup(LookupError)   - a "single" lookup matched several sections
//! ├── Edit(EditError)       - invalid structural edit on a line
//! ├── Build(BuildError)     - builder input that cannot round-trip
//! ├── Plan(PlanError)       - patch plan cannot be applied
//! └── Io                    - reading or writing a target file
//! ```

use thiserror::Error;

use crate::ini::Directive;

/// Top-level error type for confpatch.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum ConfpatchError {
    /// The input text is not a valid section/directive file.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A lookup expected at most one section but found several.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// A line edit was rejected.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// A directive or title supplied by a caller is malformed.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// A patch plan could not be applied to its target.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// An I/O error occurred while reading or writing a file.
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path to the file that could not be read or written.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A malformed line, tagged with its position.
///
/// Parsing aborts on the first error; no partial document is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}: {text:?}")]
pub struct ParseError {
    /// 1-based line number of the offending line.
    pub line: usize,
    /// The offending line, exactly as it appeared (without terminator).
    pub text: String,
    /// What is wrong with the line.
    pub kind: ParseErrorKind,
}

/// The reason a line was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// `[` appears after other characters on a title line.
    #[error("invalid section title: opening square bracket is not the first character")]
    TitleNotAtLineStart,

    /// No `]` before the comment marker or end of line.
    #[error("invalid section title: no closing square bracket")]
    UnclosedTitle,

    /// Something other than whitespace follows the closing `]`.
    #[error("invalid section title: non-space characters after closing square bracket")]
    TextAfterTitle,

    /// Nothing but whitespace left of `=`.
    #[error("invalid directive: no key")]
    MissingKey,

    /// The key is indented.
    #[error("invalid directive: key has leading space")]
    KeyLeadingWhitespace,

    /// Nothing but whitespace right of `=`.
    #[error("invalid directive: no value")]
    MissingValue,

    /// A directive appears before the first section title.
    #[error("invalid directive: directive before section title")]
    DirectiveBeforeSection,

    /// Non-whitespace text precedes a comment on a comment-only line.
    #[error("invalid stand-alone comment: non-space characters before comment")]
    TextBeforeComment,

    /// Non-whitespace text that is neither a title nor a directive.
    #[error("invalid line: non-space characters that are not a title or directive")]
    StrayText,

    /// A bare `\n` inside a document that uses `\r\n` terminators.
    #[error("inconsistent line terminators: bare \\n in a \\r\\n document")]
    MixedLineEndings,
}

/// A lookup that must match at most one section matched several.
///
/// Zero matches is not an error; lookups return `Ok(None)` for that case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// More than one section carries the title.
    #[error("found {count} sections titled [{title}], expected at most one")]
    AmbiguousTitle {
        /// Title that was looked up.
        title: String,
        /// Number of matching sections.
        count: usize,
    },

    /// More than one section with the title contains the directive.
    #[error("found {count} [{title}] sections containing {directive}, expected at most one")]
    AmbiguousDirective {
        /// Title that was looked up.
        title: String,
        /// Directive the sections were filtered by.
        directive: Directive,
        /// Number of matching sections.
        count: usize,
    },
}

/// A rejected edit on a single line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The line already carries a comment.
    #[error("comment already set on line {line:?}")]
    CommentAlreadySet {
        /// Serialized form of the line.
        line: String,
    },

    /// The line kind cannot live where it was placed.
    #[error("a {kind} line cannot be placed in {owner}")]
    Misplaced {
        /// Kind of the rejected line (e.g. `"title"`).
        kind: &'static str,
        /// Where the line was to be placed.
        owner: &'static str,
    },
}

/// Caller-supplied text that would not parse back to the same structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The directive key is empty.
    #[error("directive key is empty")]
    EmptyKey,

    /// The directive value is empty.
    #[error("directive '{key}' has an empty value")]
    EmptyValue {
        /// Key of the directive.
        key: String,
    },

    /// Leading or trailing whitespace would be absorbed by the delimiter.
    #[error("'{text}' has leading or trailing whitespace")]
    SurroundingWhitespace {
        /// The offending key, value or title.
        text: String,
    },

    /// A line break would split the line.
    #[error("'{text}' contains a line break")]
    LineBreak {
        /// The offending key, value or title.
        text: String,
    },

    /// An unescaped `#` would start a comment.
    #[error("'{text}' contains an unescaped '#'")]
    CommentMarker {
        /// The offending key, value or title.
        text: String,
    },

    /// A key containing `=` or `[` would be split or read as a title.
    #[error("directive key '{key}' contains '{marker}'")]
    KeyMarker {
        /// The offending key.
        key: String,
        /// The marker character found in the key.
        marker: char,
    },

    /// A section title containing `]` would close early.
    #[error("section title '{title}' contains ']'")]
    TitleBracket {
        /// The offending title.
        title: String,
    },

    /// Text given as `KEY=VALUE` has no `=`.
    #[error("expected KEY=VALUE, got '{0}'")]
    MissingDelimiter(String),
}

/// Errors that arise while applying a patch plan.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The target file is absent and the plan does not allow creating it.
    #[error("{path} does not exist and create is disabled")]
    MissingFile {
        /// Path of the target file.
        path: String,
    },

    /// No section matched and the plan does not allow creating one.
    #[error("no matching [{title}] section in {path} and create is disabled")]
    MissingSection {
        /// Path of the target file.
        path: String,
        /// Title of the section that was looked up.
        title: String,
    },

    /// Several sections match a plan entry that must select one.
    #[error("{path}: {source}")]
    Ambiguous {
        /// Path of the target file.
        path: String,
        /// Underlying lookup error.
        source: LookupError,
    },

    /// A directive or title in the plan is malformed.
    #[error("invalid entry in plan for {path}: {source}")]
    InvalidEntry {
        /// Path of the target file.
        path: String,
        /// Underlying validation error.
        source: BuildError,
    },
}
