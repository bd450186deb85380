use std::fmt;
use thiserror::Error;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause carried by [`Error::Handler`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while parsing, validating or formatting header values.
///
/// Every parse and format entry point of this crate returns this single error type.
/// Positioned variants carry the 0-based character offset of the problem together with
/// the complete header text so the caller can both recover the offset and show context.
#[derive(Error, Debug)]
pub enum Error {
    /// A character the grammar does not allow at this point.
    #[error("Invalid character {character:?} at {position} in {}", Snippet(.text, *.position))]
    InvalidCharacter {
        character: char,
        position: usize,
        text: String,
    },

    /// A quoted string or comment that never closes.
    #[error("Missing closing {what} at {position} in {}", Snippet(.text, *.position))]
    Unterminated {
        what: &'static str,
        position: usize,
        text: String,
    },

    /// A required token was empty or absent.
    #[error("Missing {what} at {position} in {}", Snippet(.text, *.position))]
    MissingValue {
        what: String,
        position: usize,
        text: String,
    },

    /// A parameter value whose runtime type does not match its name's handler.
    #[error("Parameter {name:?} expected {expected} but got {found}")]
    InvalidParameterType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A value outside of its permitted range, e.g. a quality factor above 1.0.
    #[error("{0}")]
    OutOfRange(String),

    /// A value that is syntactically fine but not acceptable for the header.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A list header that requires at least one value.
    #[error("{0} requires at least one value")]
    EmptyList(&'static str),

    /// Content negotiation failure, e.g. a content type the Accept header does not allow.
    #[error("{0}")]
    NotCompatible(String),

    /// A failure from a foreign parser rewrapped so callers only see this type.
    #[error("{message}")]
    Handler {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl Error {
    pub(crate) fn invalid_character(text: &str, position: usize) -> Self {
        let character = text.chars().nth(position).unwrap_or('\u{0}');
        Error::InvalidCharacter {
            character,
            position,
            text: text.to_string(),
        }
    }

    pub(crate) fn missing_value(what: impl Into<String>, text: &str, position: usize) -> Self {
        Error::MissingValue {
            what: what.into(),
            position,
            text: text.to_string(),
        }
    }

    pub(crate) fn unterminated(what: &'static str, text: &str, position: usize) -> Self {
        Error::Unterminated {
            what,
            position,
            text: text.to_string(),
        }
    }

    /// Rewraps a foreign error, keeping its message and the error itself as the source.
    pub(crate) fn wrap<E>(context: impl fmt::Display, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Handler {
            message: format!("{context}: {cause}"),
            source: Some(Box::new(cause)),
        }
    }

    /// The 0-based character offset for syntax errors.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::InvalidCharacter { position, .. }
            | Error::Unterminated { position, .. }
            | Error::MissingValue { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// True for the three positioned syntax variants.
    pub fn is_syntax(&self) -> bool {
        self.position().is_some()
    }
}

/// Renders at most a few characters either side of a position, with `...` for elided text.
struct Snippet<'a>(&'a str, usize);

impl fmt::Display for Snippet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CONTEXT: usize = 12;

        let Snippet(text, position) = *self;
        let length = text.chars().count();
        let start = position.saturating_sub(CONTEXT);
        let end = (position + CONTEXT).min(length);
        let snippet: String = text.chars().skip(start).take(end.saturating_sub(start)).collect();

        write!(
            f,
            "\"{}{}{}\"",
            if start > 0 { "..." } else { "" },
            snippet,
            if end < length { "..." } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_character_message() {
        let err = Error::invalid_character("text/h?ml", 6);
        assert_eq!(err.position(), Some(6));
        assert_eq!(
            err.to_string(),
            "Invalid character '?' at 6 in \"text/h?ml\""
        );
    }

    #[test]
    fn test_snippet_elides_long_text() {
        let text = "abcdefghijklmnopqrstuvwxyz0123456789";
        let err = Error::missing_value("value", text, 18);
        assert_eq!(
            err.to_string(),
            "Missing value at 18 in \"...ghijklmnopqrstuvwxyz0123...\""
        );
    }

    #[test]
    fn test_wrap_keeps_source() {
        let cause = "x".parse::<u64>().unwrap_err();
        let err = Error::wrap("Invalid number \"x\"", cause);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Invalid number \"x\": "));
        assert_eq!(err.position(), None);
    }
}
