//! Sections, documents and the mutation API.
use std::fmt;
use std::io;

use super::directive::Directive;
use super::line::{BlankLine, Line, TitleLine};
use crate::error::{EditError, LookupError};

/// Positional handle to a section inside a [`Document`].
///
/// Sections may share a title, so a handle, not the title, identifies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(usize);

impl SectionId {
    /// Zero-based position of the section in its document.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Line terminator used when serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The terminator text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// A title line and the directive, comment and blank lines below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    title: TitleLine,
    lines: Vec<Line>,
}

impl Section {
    /// An empty section titled `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_title_line(TitleLine::new(title))
    }

    /// A section holding `directives` in order, one per line.
    ///
    /// # Examples
    ///
    /// ```
    /// use confpatch::ini::Section;
    ///
    /// let peer = Section::from_directives("Peer", [("PublicKey", "YYYY"), ("AllowedIPs", "10.0.0.2/32")]);
    /// assert_eq!(peer.to_string(), "[Peer]\nPublicKey=YYYY\nAllowedIPs=10.0.0.2/32");
    /// ```
    #[must_use]
    pub fn from_directives<I, D>(title: impl Into<String>, directives: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Directive>,
    {
        let mut section = Self::new(title);
        section
            .lines
            .extend(directives.into_iter().map(Line::directive));
        section
    }

    pub(super) const fn with_title_line(title: TitleLine) -> Self {
        Self {
            title,
            lines: Vec::new(),
        }
    }

    /// Append a parsed line without placement checks.
    pub(super) fn push_parsed(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Text between the title brackets.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.title()
    }

    /// The title line.
    #[must_use]
    pub const fn title_line(&self) -> &TitleLine {
        &self.title
    }

    /// The title line, for attaching a comment.
    pub const fn title_line_mut(&mut self) -> &mut TitleLine {
        &mut self.title
    }

    /// Lines below the title, in order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The line at `index`, if it exists.
    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    /// Append a line.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Misplaced`] for a title line, which would start a
    /// new section when the text is parsed again.
    pub fn push_line(&mut self, line: Line) -> Result<(), EditError> {
        let index = self.lines.len();
        self.insert_line(index, line)
    }

    /// Insert a line before `index`; an index past the end appends.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Misplaced`] for a title line.
    pub fn insert_line(&mut self, index: usize, line: Line) -> Result<(), EditError> {
        if let Line::Title(_) = line {
            return Err(EditError::Misplaced {
                kind: line.kind_name(),
                owner: "a section body",
            });
        }
        let index = index.min(self.lines.len());
        self.lines.insert(index, line);
        Ok(())
    }

    /// The section's directives in document order.
    ///
    /// The iterator is lazy and cloneable; calling this again starts over.
    pub fn directives(&self) -> impl Iterator<Item = &Directive> + Clone + '_ {
        self.lines.iter().filter_map(Line::as_directive)
    }

    /// Values of every directive named `key`, in order.
    pub fn values<'a, 'k>(
        &'a self,
        key: &'k str,
    ) -> impl Iterator<Item = &'a str> + Clone + use<'a, 'k> {
        self.directives()
            .filter(move |d| d.key() == key)
            .map(Directive::value)
    }

    /// Value of the first directive named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values(key).next()
    }

    /// Whether a directive with this exact key and value exists.
    #[must_use]
    pub fn contains(&self, directive: &Directive) -> bool {
        self.directives().any(|d| d == directive)
    }

    /// Append a directive unconditionally.
    pub fn add_directive(&mut self, directive: impl Into<Directive>) {
        self.lines.push(Line::directive(directive));
    }

    /// Append a directive unless an identical key/value pair exists.
    ///
    /// Returns `true` when the directive was appended.
    pub fn add_if_not_present(&mut self, directive: impl Into<Directive>) -> bool {
        let directive = directive.into();
        if self.contains(&directive) {
            return false;
        }
        self.add_directive(directive);
        true
    }

    /// Remove every directive with the same key, then append this one.
    pub fn add_or_replace(&mut self, directive: impl Into<Directive>) {
        let directive = directive.into();
        self.remove_key(directive.key());
        self.add_directive(directive);
    }

    /// [`add_if_not_present`](Self::add_if_not_present) for each directive, in order.
    ///
    /// Returns how many directives were appended.
    pub fn add_all_if_not_present<I, D>(&mut self, directives: I) -> usize
    where
        I: IntoIterator<Item = D>,
        D: Into<Directive>,
    {
        let mut added = 0;
        for directive in directives {
            if self.add_if_not_present(directive) {
                added += 1;
            }
        }
        added
    }

    /// Remove every directive named `key`; returns how many were removed.
    pub fn remove_key(&mut self, key: &str) -> usize {
        let before = self.lines.len();
        self.lines
            .retain(|line| line.as_directive().is_none_or(|d| d.key() != key));
        before - self.lines.len()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.title.fmt(f)?;
        for line in &self.lines {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

/// A whole configuration file.
///
/// Leading comment and blank lines that precede the first title belong to
/// the document; everything after a title belongs to that title's section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    leading: Vec<Line>,
    sections: Vec<Section>,
    line_ending: LineEnding,
    final_newline: bool,
    bom: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document with `\n` terminators and a final newline.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            leading: Vec::new(),
            sections: Vec::new(),
            line_ending: LineEnding::Lf,
            final_newline: true,
            bom: false,
        }
    }

    /// Build a document from `(title, directives)` pairs, one section each.
    ///
    /// # Examples
    ///
    /// ```
    /// use confpatch::ini::Document;
    ///
    /// let doc = Document::from_section_directives([("Interface", [("PrivateKey", "XXXX")])]);
    /// assert_eq!(doc.serialize(), "[Interface]\nPrivateKey=XXXX\n");
    /// ```
    #[must_use]
    pub fn from_section_directives<S, T, I, D>(sections: S) -> Self
    where
        S: IntoIterator<Item = (T, I)>,
        T: Into<String>,
        I: IntoIterator<Item = D>,
        D: Into<Directive>,
    {
        let mut doc = Self::new();
        doc.sections = sections
            .into_iter()
            .map(|(title, directives)| Section::from_directives(title, directives))
            .collect();
        doc
    }

    pub(super) const fn from_parts(
        leading: Vec<Line>,
        sections: Vec<Section>,
        line_ending: LineEnding,
        final_newline: bool,
        bom: bool,
    ) -> Self {
        Self {
            leading,
            sections,
            line_ending,
            final_newline,
            bom,
        }
    }

    /// Comment and blank lines before the first section.
    #[must_use]
    pub fn leading_lines(&self) -> &[Line] {
        &self.leading
    }

    /// Append a line before the first section.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Misplaced`] for title and directive lines.
    pub fn push_leading_line(&mut self, line: Line) -> Result<(), EditError> {
        match line {
            Line::Comment(_) | Line::Blank(_) => {
                self.leading.push(line);
                Ok(())
            }
            Line::Title(_) | Line::Directive(_) => Err(EditError::Misplaced {
                kind: line.kind_name(),
                owner: "the document header",
            }),
        }
    }

    /// All sections in order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The section behind `id`.
    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.0)
    }

    /// The section behind `id`, for editing.
    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.get_mut(id.0)
    }

    /// Sections titled `title`, in order.
    pub fn sections_by_title<'a>(&'a self, title: &'a str) -> impl Iterator<Item = SectionId> + 'a {
        self.sections
            .iter()
            .enumerate()
            .filter(move |(_, section)| section.title() == title)
            .map(|(index, _)| SectionId(index))
    }

    /// The only section titled `title`.
    ///
    /// Returns `Ok(None)` when no section matches.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::AmbiguousTitle`] when several sections match.
    pub fn single_section_by_title(&self, title: &str) -> Result<Option<SectionId>, LookupError> {
        single(self.sections_by_title(title)).map_err(|count| LookupError::AmbiguousTitle {
            title: title.to_string(),
            count,
        })
    }

    /// Sections titled `title` that contain `directive`, in order.
    pub fn sections_by_directive<'a>(
        &'a self,
        title: &'a str,
        directive: &'a Directive,
    ) -> impl Iterator<Item = SectionId> + 'a {
        self.sections_by_title(title).filter(move |id| {
            self.section(*id)
                .is_some_and(|section| section.contains(directive))
        })
    }

    /// The only section titled `title` that contains `directive`.
    ///
    /// Returns `Ok(None)` when no section matches.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::AmbiguousDirective`] when several sections match.
    pub fn single_section_by_directive(
        &self,
        title: &str,
        directive: impl Into<Directive>,
    ) -> Result<Option<SectionId>, LookupError> {
        let directive = directive.into();
        single(self.sections_by_directive(title, &directive)).map_err(|count| {
            LookupError::AmbiguousDirective {
                title: title.to_string(),
                directive: directive.clone(),
                count,
            }
        })
    }

    /// Append a section and return its handle.
    ///
    /// With `separate`, a blank line is first appended to the current last
    /// section so the new block stands apart; nothing else changes.
    pub fn add_section(&mut self, section: Section, separate: bool) -> SectionId {
        if separate && let Some(last) = self.sections.last_mut() {
            last.lines.push(Line::Blank(BlankLine::new("")));
        }
        self.sections.push(section);
        SectionId(self.sections.len() - 1)
    }

    /// Terminator written between lines.
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Change the terminator written between lines.
    pub const fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Whether the last line is followed by a terminator.
    #[must_use]
    pub const fn has_final_newline(&self) -> bool {
        self.final_newline
    }

    /// Whether the text starts with a UTF-8 byte-order mark.
    #[must_use]
    pub const fn has_bom(&self) -> bool {
        self.bom
    }

    /// Serialize to text.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Serialize into `writer`.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.serialize().as_bytes())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bom {
            f.write_str("\u{feff}")?;
        }
        let terminator = self.line_ending.as_str();
        let mut separator = "";
        for line in &self.leading {
            write!(f, "{separator}{line}")?;
            separator = terminator;
        }
        for section in &self.sections {
            write!(f, "{separator}{}", section.title)?;
            separator = terminator;
            for line in &section.lines {
                write!(f, "{separator}{line}")?;
            }
        }
        if self.final_newline && !separator.is_empty() {
            f.write_str(terminator)?;
        }
        Ok(())
    }
}

/// The only item of `ids`, or the match count when there are several.
fn single(mut ids: impl Iterator<Item = SectionId>) -> Result<Option<SectionId>, usize> {
    let first = ids.next();
    match ids.next() {
        None => Ok(first),
        Some(_) => Err(2 + ids.count()),
    }
}
