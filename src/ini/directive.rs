//! Key/value directives and their normalization.
use std::fmt;

use serde::Serialize;

use super::classify::find_comment_start;
use crate::error::BuildError;

/// A `key=value` pair inside a section.
///
/// Keys and values are opaque strings. Two directives are equal when both
/// key and value are equal; key-only matching is done through
/// [`Directive::key`].
///
/// # Examples
///
/// ```
/// use confpatch::ini::Directive;
///
/// let port: Directive = ("ListenPort", 51820).into();
/// assert_eq!(port, Directive::new("ListenPort", "51820"));
/// assert_eq!(port.to_string(), "ListenPort=51820");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Directive {
    key: String,
    value: String,
}

impl Directive {
    /// Create a directive from a key and a value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The directive key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The directive value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Split into `(key, value)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.key, self.value)
    }

    /// Check that this directive serializes to a line that parses back to
    /// the same key and value.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] naming the first problem found.
    pub fn validate(&self) -> Result<(), BuildError> {
        validate_key(&self.key)?;
        if self.value.is_empty() {
            return Err(BuildError::EmptyValue {
                key: self.key.clone(),
            });
        }
        check_fragment(&self.value)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// The one normalization point for "directive-or-pair" inputs.
///
/// Anything displayable is accepted, so numeric values such as ports or
/// keepalive intervals need no manual formatting.
impl<K: fmt::Display, V: fmt::Display> From<(K, V)> for Directive {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key.to_string(), value.to_string())
    }
}

impl From<&Directive> for Directive {
    fn from(directive: &Directive) -> Self {
        directive.clone()
    }
}

/// Parse `KEY=VALUE` as typed on a command line.
///
/// The key and value are split at the first `=` and trimmed, then validated.
///
/// # Errors
///
/// Returns [`BuildError::MissingDelimiter`] when there is no `=`, or the
/// validation error of the resulting directive.
pub fn parse_assignment(text: &str) -> Result<Directive, BuildError> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| BuildError::MissingDelimiter(text.to_string()))?;
    let directive = Directive::new(key.trim(), value.trim());
    directive.validate()?;
    Ok(directive)
}

/// Check that `key` can start a directive line and be read back unchanged.
///
/// # Errors
///
/// Returns a [`BuildError`] naming the first problem found.
pub fn validate_key(key: &str) -> Result<(), BuildError> {
    if key.is_empty() {
        return Err(BuildError::EmptyKey);
    }
    check_fragment(key)?;
    if let Some(marker) = key.chars().find(|c| matches!(c, '=' | '[')) {
        return Err(BuildError::KeyMarker {
            key: key.to_string(),
            marker,
        });
    }
    Ok(())
}

/// Check that a section title serializes inside `[...]` unchanged.
///
/// # Errors
///
/// Returns a [`BuildError`] naming the first problem found.
pub fn validate_title(title: &str) -> Result<(), BuildError> {
    if title.contains(['\n', '\r']) {
        return Err(BuildError::LineBreak {
            text: title.to_string(),
        });
    }
    if find_comment_start(title).is_some() {
        return Err(BuildError::CommentMarker {
            text: title.to_string(),
        });
    }
    if title.contains(']') {
        return Err(BuildError::TitleBracket {
            title: title.to_string(),
        });
    }
    Ok(())
}

fn check_fragment(text: &str) -> Result<(), BuildError> {
    if text.contains(['\n', '\r']) {
        return Err(BuildError::LineBreak {
            text: text.to_string(),
        });
    }
    if text.trim() != text {
        return Err(BuildError::SurroundingWhitespace {
            text: text.to_string(),
        });
    }
    if find_comment_start(text).is_some() {
        return Err(BuildError::CommentMarker {
            text: text.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pair_and_directive_normalize_to_same_value() {
        let from_pair: Directive = ("Address", "10.0.0.1/24").into();
        let from_ref: Directive = (&Directive::new("Address", "10.0.0.1/24")).into();
        assert_eq!(from_pair, from_ref);
    }

    #[test]
    fn numeric_values_are_stringified() {
        let d: Directive = ("PersistentKeepalive", 60).into();
        assert_eq!(d.value(), "60");
    }

    #[test]
    fn equality_requires_key_and_value() {
        assert_ne!(Directive::new("a", "1"), Directive::new("a", "2"));
        assert_ne!(Directive::new("a", "1"), Directive::new("b", "1"));
    }

    #[test]
    fn validate_accepts_ordinary_directive() {
        assert!(Directive::new("AllowedIPs", "0.0.0.0/0, ::/0").validate().is_ok());
    }

    #[test]
    fn validate_accepts_escaped_hash() {
        assert!(Directive::new("PostUp", r"echo \#1").validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_parts() {
        assert_eq!(Directive::new("", "x").validate(), Err(BuildError::EmptyKey));
        assert_eq!(
            Directive::new("k", "").validate(),
            Err(BuildError::EmptyValue {
                key: "k".to_string()
            })
        );
    }

    #[test]
    fn validate_rejects_comment_marker_in_value() {
        assert!(matches!(
            Directive::new("k", "a # b").validate(),
            Err(BuildError::CommentMarker { .. })
        ));
    }

    #[test]
    fn validate_rejects_bracket_in_key() {
        assert_eq!(
            Directive::new("a[0]", "x").validate(),
            Err(BuildError::KeyMarker {
                key: "a[0]".to_string(),
                marker: '['
            })
        );
    }

    #[test]
    fn validate_rejects_surrounding_whitespace() {
        assert!(matches!(
            Directive::new("k", " v").validate(),
            Err(BuildError::SurroundingWhitespace { .. })
        ));
    }

    #[test]
    fn parse_assignment_splits_at_first_equals() {
        let d = parse_assignment("ExecStart = /bin/app --opt=1").unwrap();
        assert_eq!(d.key(), "ExecStart");
        assert_eq!(d.value(), "/bin/app --opt=1");
    }

    #[test]
    fn parse_assignment_requires_delimiter() {
        assert_eq!(
            parse_assignment("novalue"),
            Err(BuildError::MissingDelimiter("novalue".to_string()))
        );
    }

    #[test]
    fn validate_title_rejects_closing_bracket() {
        assert!(validate_title("Peer").is_ok());
        assert!(matches!(
            validate_title("a]b"),
            Err(BuildError::TitleBracket { .. })
        ));
    }
}
