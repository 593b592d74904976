//! Lossless section/directive document model.
//!
//! Text flows one way on reads ([`parse`] → [`Document`]) and one way on
//! writes ([`Document::serialize`] → text). Edits happen on the parsed
//! structure through [`Section`] and [`Document`] methods; raw text is never
//! patched in place.
//!
//! ```
//! use confpatch::ini::parse;
//!
//! let mut doc = parse("[Interface]\nPrivateKey=XXXX\n").unwrap();
//! let id = doc.single_section_by_title("Interface").unwrap().unwrap();
//! if let Some(interface) = doc.section_mut(id) {
//!     interface.add_if_not_present(("Address", "10.0.0.1/24"));
//! }
//! assert_eq!(doc.serialize(), "[Interface]\nPrivateKey=XXXX\nAddress=10.0.0.1/24\n");
//! ```
mod classify;
mod directive;
mod document;
mod line;
mod parser;

pub use classify::classify_line;
pub use directive::{Directive, parse_assignment, validate_key, validate_title};
pub use document::{Document, LineEnding, Section, SectionId};
pub use line::{BlankLine, CommentLine, DirectiveLine, Line, TitleLine};
pub use parser::parse;
