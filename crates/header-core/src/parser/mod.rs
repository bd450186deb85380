//! Header text parsing.
//!
//! - [`chars`]: named character classes
//! - [`cursor`]: the [`HeaderParser`] cursor, [`HeaderGrammar`] hooks and [`parse_with`]
//! - [`parameters`]: the state machine shared by `value;name=value` headers
//! - [`range`]: nom parsers for `Range` and `Content-Range`

pub mod chars;
pub mod cursor;
pub mod parameters;
pub mod range;

pub use chars::CharPredicate;
pub use cursor::{parse_with, HeaderGrammar, HeaderParser};
pub use parameters::{ParameterizedGrammar, ParametersParser};

use nom::error::Error as NomError;
use nom::Err as NomErr;

use crate::error::Error;

/// Converts a nom failure on `text` into a positioned error.
pub(crate) fn nom_error(text: &str, err: NomErr<NomError<&str>>, what: &str) -> Error {
    match err {
        NomErr::Error(e) | NomErr::Failure(e) => {
            let consumed = text.len() - e.input.len();
            let position = text[..consumed].chars().count();
            if e.input.is_empty() {
                Error::missing_value(what, text, position)
            } else {
                Error::invalid_character(text, position)
            }
        }
        NomErr::Incomplete(_) => Error::missing_value(what, text, text.chars().count()),
    }
}
