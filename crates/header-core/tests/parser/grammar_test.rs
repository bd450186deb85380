// Tests for custom grammars built on the tokenizer and the parameter parser

use hval_header_core::handler::{LongHandler, ParameterValue};
use hval_header_core::parser::{chars, parse_with, HeaderGrammar, HeaderParser, ParameterizedGrammar, ParametersParser};
use hval_header_core::types::{HeaderParameterName, HeaderValue, HeaderValueWithParameters, ParameterMap, ParameterName, ParameterRegistry};
use hval_header_core::{Error, Result};

use crate::common::init_tracing;

/// Collects a comma separated token list such as `Allow: GET, HEAD`.
#[derive(Default)]
struct TokenList {
    tokens: Vec<String>,
    expecting_token: bool,
}

impl HeaderGrammar for TokenList {
    fn token(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        if !self.expecting_token && !self.tokens.is_empty() {
            return Err(parser.invalid_character());
        }
        let token = parser.required_token(chars::RFC7230_TOKEN, "method")?;
        self.tokens.push(token.to_string());
        self.expecting_token = false;
        Ok(())
    }

    fn multi_value_separator(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        if self.expecting_token || self.tokens.is_empty() {
            return Err(parser.invalid_character());
        }
        parser.advance();
        self.expecting_token = true;
        Ok(())
    }

    fn end_of_text(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        if self.expecting_token || self.tokens.is_empty() {
            return Err(parser.missing_value("method"));
        }
        Ok(())
    }
}

fn token_list(text: &str) -> Result<Vec<String>> {
    let mut grammar = TokenList::default();
    parse_with(text, &mut grammar)?;
    Ok(grammar.tokens)
}

#[test]
fn test_custom_grammar_tokens() {
    init_tracing();
    assert_eq!(token_list("GET, HEAD,OPTIONS").unwrap(), vec!["GET", "HEAD", "OPTIONS"]);
}

#[test]
fn test_custom_grammar_defaults_reject_other_characters() {
    let err = token_list("GET; HEAD").unwrap_err();
    assert!(matches!(err, Error::InvalidCharacter { character: ';', position: 3, .. }), "{err:?}");

    let err = token_list("GET \"HEAD\"").unwrap_err();
    assert!(matches!(err, Error::InvalidCharacter { character: '"', position: 4, .. }), "{err:?}");
}

#[test]
fn test_custom_grammar_missing_values() {
    assert!(matches!(token_list(""), Err(Error::MissingValue { position: 0, .. })));
    assert!(matches!(token_list("GET,"), Err(Error::MissingValue { position: 4, .. })));
    assert!(matches!(token_list("GET HEAD"), Err(Error::InvalidCharacter { position: 4, .. })));
}

// A `Prefer`-like header: a token with typed parameters.

const WAIT: HeaderParameterName<u64> = HeaderParameterName::new("wait", &LongHandler);

#[derive(Debug, Clone, PartialEq)]
struct Preference {
    token: String,
    parameters: ParameterMap,
}

impl HeaderValue for Preference {
    fn to_header_text(&self) -> String {
        format!("{}{}", self.token, self.parameters)
    }

    fn is_request(&self) -> bool {
        true
    }

    fn is_response(&self) -> bool {
        false
    }
}

impl HeaderValueWithParameters for Preference {
    fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    fn replace_parameters(mut self, parameters: ParameterMap) -> Self {
        self.parameters = parameters;
        self
    }

    fn equals_ignoring_parameters(&self, other: &Self) -> bool {
        self.token.eq_ignore_ascii_case(&other.token)
    }
}

struct PreferenceGrammar {
    registry: ParameterRegistry,
}

impl PreferenceGrammar {
    fn new() -> Self {
        PreferenceGrammar {
            registry: ParameterRegistry::new("Prefer", [WAIT.name().clone()]),
        }
    }
}

impl ParameterizedGrammar for PreferenceGrammar {
    type Value = Preference;

    fn allow_multiple_values(&self) -> bool {
        true
    }

    fn value(&mut self, parser: &mut HeaderParser<'_>) -> Result<Preference> {
        let token = parser.required_token(chars::RFC7230_TOKEN, "preference")?;
        Ok(Preference {
            token: token.to_string(),
            parameters: ParameterMap::new(),
        })
    }

    fn parameter_name(&self, name: &str) -> ParameterName {
        self.registry.resolve(name)
    }

    fn value_name(&self) -> &'static str {
        "preference"
    }
}

#[test]
fn test_parameterized_grammar_typed_parameters() {
    init_tracing();
    let values = ParametersParser::parse(
        "respond-async; wait=100, handling;Note=\"a b\"",
        PreferenceGrammar::new(),
    )
    .unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0].parameter(&WAIT), Some(&100));
    assert_eq!(
        values[1].parameters().get_by_name("note"),
        Some(&ParameterValue::Text("a b".to_string()))
    );
    assert_eq!(values[1].to_header_text(), "handling;note=\"a b\"");
}

#[test]
fn test_parameterized_grammar_handler_errors() {
    assert!(ParametersParser::parse("respond-async; wait=soon", PreferenceGrammar::new()).is_err());
    let err = ParametersParser::parse("respond-async;", PreferenceGrammar::new()).unwrap_err();
    assert!(matches!(err, Error::MissingValue { position: 14, .. }), "{err:?}");
    let err = ParametersParser::parse_one("", PreferenceGrammar::new()).unwrap_err();
    assert!(matches!(err, Error::MissingValue { ref what, .. } if what == "preference"), "{err:?}");
}

#[test]
fn test_parameter_setters_check_values() {
    let value = ParametersParser::parse_one("respond-async", PreferenceGrammar::new()).unwrap();
    let waiting = value.set_parameter(&WAIT, 5).unwrap().into_owned();
    assert_eq!(waiting.to_header_text(), "respond-async;wait=5");
    assert!(value.equals_only_present_parameters(&waiting));

    let wrong = ParameterMap::new().with_value(WAIT.name().clone(), ParameterValue::Text("x".to_string()));
    assert!(matches!(
        value.set_parameters(wrong),
        Err(Error::InvalidParameterType { expected: "long", .. })
    ));
}
