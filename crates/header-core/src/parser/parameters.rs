//! Grammar for headers of the shape `value *( ";" name "=" value )` with an optional
//! comma separated list of such values.
//!
//! [`ParametersParser`] owns the state machine and drives it through the
//! [`HeaderGrammar`] hooks; the per-header part is a [`ParameterizedGrammar`] which only has
//! to read the leading value and resolve parameter names to their handlers.

use std::collections::BTreeMap;
use std::mem;

use crate::error::{Error, Result};
use crate::parser::chars::{self, CharPredicate};
use crate::parser::cursor::{parse_with, HeaderGrammar, HeaderParser};
use crate::types::header_value::HeaderValueWithParameters;
use crate::types::param::{ParameterMap, ParameterName};
use crate::handler::ParameterValue;

/// The header specific part of a parameterised header grammar.
pub trait ParameterizedGrammar {
    type Value: HeaderValueWithParameters;

    /// Whether `,` may separate several values.
    fn allow_multiple_values(&self) -> bool;

    /// Reads the leading value. Called with the cursor on its first character.
    fn value(&mut self, parser: &mut HeaderParser<'_>) -> Result<Self::Value>;

    /// Reads a leading value that starts with `*`.
    fn wildcard(&mut self, parser: &mut HeaderParser<'_>) -> Result<Self::Value> {
        Err(parser.invalid_character())
    }

    /// Resolves a parameter name as written in the header to its registered definition.
    fn parameter_name(&self, name: &str) -> ParameterName;

    fn parameter_name_predicate(&self) -> CharPredicate {
        chars::RFC2045_TOKEN
    }

    /// Characters allowed in an unquoted parameter value.
    fn parameter_value_predicate(&self) -> CharPredicate {
        chars::RFC2045_TOKEN
    }

    /// Used in the error raised when the header has no value at all.
    fn value_name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Value,
    AfterValue,
    ParameterName,
    AfterParameterName,
    ParameterValue,
    AfterParameterValue,
}

/// Runs a [`ParameterizedGrammar`] over header text.
pub struct ParametersParser<G: ParameterizedGrammar> {
    grammar: G,
    mode: Mode,
    value: Option<G::Value>,
    name: Option<ParameterName>,
    parameters: BTreeMap<ParameterName, ParameterValue>,
    values: Vec<G::Value>,
}

impl<G: ParameterizedGrammar> ParametersParser<G> {
    fn new(grammar: G) -> Self {
        ParametersParser {
            grammar,
            mode: Mode::Value,
            value: None,
            name: None,
            parameters: BTreeMap::new(),
            values: Vec::new(),
        }
    }

    /// Parses every value in `text`, in header order.
    pub fn parse(text: &str, grammar: G) -> Result<Vec<G::Value>> {
        let mut parser = Self::new(grammar);
        parse_with(text, &mut parser)?;
        Ok(parser.values)
    }

    /// Parses a header that holds exactly one value.
    pub fn parse_one(text: &str, grammar: G) -> Result<G::Value> {
        let value_name = grammar.value_name();
        Self::parse(text, grammar)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::missing_value(value_name, text, 0))
    }

    fn start_value(&mut self, value: G::Value) {
        self.value = Some(value);
        self.mode = Mode::AfterValue;
    }

    fn parameter_value(&mut self, parser: &HeaderParser<'_>, raw: &str) -> Result<()> {
        let name = match self.name.take() {
            Some(name) => name,
            None => return Err(parser.invalid_character()),
        };
        let value = name.parse_value(raw)?;
        self.parameters.insert(name, value);
        self.mode = Mode::AfterParameterValue;
        Ok(())
    }

    fn unquoted_parameter_value(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        let encoded = self.name.as_ref().map_or(false, ParameterName::is_encoded);
        let predicate = if encoded {
            chars::RFC5987_EXT_VALUE
        } else {
            self.grammar.parameter_value_predicate()
        };
        let raw = parser.token(predicate);
        if raw.is_empty() {
            return Err(parser.invalid_character());
        }
        self.parameter_value(parser, raw)
    }

    fn value_complete(&mut self) {
        if let Some(value) = self.value.take() {
            let parameters = ParameterMap::from(mem::take(&mut self.parameters));
            self.values.push(value.replace_parameters(parameters));
        }
    }

    fn pending_parameter_error(&self, parser: &HeaderParser<'_>) -> Error {
        match &self.name {
            Some(name) => parser.missing_value(format!("value for parameter {:?}", name.value())),
            None => parser.missing_value("parameter value"),
        }
    }
}

impl<G: ParameterizedGrammar> HeaderGrammar for ParametersParser<G> {
    fn quoted_text(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::ParameterValue if !self.name.as_ref().map_or(false, ParameterName::is_encoded) => {
                let raw = parser.quoted_text(chars::QUOTED_TEXT, true)?;
                self.parameter_value(parser, raw)
            }
            _ => Err(parser.invalid_character()),
        }
    }

    fn wildcard(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::Value => {
                let value = self.grammar.wildcard(parser)?;
                self.start_value(value);
                Ok(())
            }
            Mode::ParameterValue => self.unquoted_parameter_value(parser),
            _ => Err(parser.invalid_character()),
        }
    }

    fn key_value_separator(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::AfterParameterName => {
                parser.advance();
                self.mode = Mode::ParameterValue;
                Ok(())
            }
            _ => Err(parser.invalid_character()),
        }
    }

    fn parameter_separator(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::AfterValue | Mode::AfterParameterValue => {
                parser.advance();
                self.mode = Mode::ParameterName;
                Ok(())
            }
            Mode::ParameterValue => Err(self.pending_parameter_error(parser)),
            _ => Err(parser.invalid_character()),
        }
    }

    fn multi_value_separator(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::AfterValue | Mode::AfterParameterValue if self.grammar.allow_multiple_values() => {
                parser.advance();
                self.value_complete();
                self.mode = Mode::Value;
                Ok(())
            }
            Mode::ParameterValue => Err(self.pending_parameter_error(parser)),
            _ => Err(parser.invalid_character()),
        }
    }

    fn token(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::Value => {
                let value = self.grammar.value(parser)?;
                self.start_value(value);
                Ok(())
            }
            Mode::ParameterName => {
                let name = parser.token(self.grammar.parameter_name_predicate());
                if name.is_empty() {
                    return Err(parser.invalid_character());
                }
                self.name = Some(self.grammar.parameter_name(name));
                self.mode = Mode::AfterParameterName;
                Ok(())
            }
            Mode::ParameterValue => self.unquoted_parameter_value(parser),
            _ => Err(parser.invalid_character()),
        }
    }

    fn end_of_text(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::AfterValue | Mode::AfterParameterValue => {
                self.value_complete();
                Ok(())
            }
            Mode::Value => Err(self.missing_value(parser)),
            Mode::ParameterName => Err(parser.missing_value("parameter name")),
            Mode::AfterParameterName | Mode::ParameterValue => Err(self.pending_parameter_error(parser)),
        }
    }

    fn missing_value(&self, parser: &HeaderParser<'_>) -> Error {
        parser.missing_value(self.grammar.value_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::media_type::MediaType;

    #[test]
    fn test_trailing_parameter_separator() {
        let err = MediaType::parse("text/html;").unwrap_err();
        assert!(matches!(err, Error::MissingValue { position: 10, .. }), "{err:?}");
    }

    #[test]
    fn test_parameter_without_value() {
        let err = MediaType::parse("text/html;charset").unwrap_err();
        assert!(matches!(err, Error::MissingValue { position: 17, .. }), "{err:?}");

        let err = MediaType::parse("text/html;charset=").unwrap_err();
        assert!(matches!(err, Error::MissingValue { position: 18, .. }), "{err:?}");
    }

    #[test]
    fn test_empty_text() {
        let err = MediaType::parse("").unwrap_err();
        assert!(matches!(err, Error::MissingValue { position: 0, .. }), "{err:?}");

        let err = MediaType::parse("   ").unwrap_err();
        assert!(matches!(err, Error::MissingValue { position: 3, .. }), "{err:?}");
    }

    #[test]
    fn test_single_value_rejects_comma() {
        let err = MediaType::parse("text/html, text/plain").unwrap_err();
        assert!(matches!(err, Error::InvalidCharacter { character: ',', position: 9, .. }), "{err:?}");
    }

    #[test]
    fn test_whitespace_between_tokens() {
        let media_type = MediaType::parse(" text/html ; charset = utf-8 ").unwrap();
        assert_eq!(media_type.to_string(), "text/html;charset=UTF-8");
    }

    #[test]
    fn test_multiple_values_keep_own_parameters() {
        let values = MediaType::parse_list("text/html;level=1, text/plain").unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].parameters().len(), 1);
        assert!(values[1].parameters().is_empty());
    }

    #[test]
    fn test_encoded_parameter_rejects_quotes() {
        let err = MediaType::parse("text/plain;title*=\"x\"").unwrap_err();
        assert!(matches!(err, Error::InvalidCharacter { character: '"', .. }), "{err:?}");
    }
}
