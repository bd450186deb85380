//! # Accept-Charset Header
//!
//! Character sets acceptable in the response
//! ([RFC 7231 §5.3.3](https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.3)).
//! A charset that is not listed is acceptable only through a `*` entry.

use crate::error::{Error, Result};
use crate::parser::chars;
use crate::types::accept::WeightedTokenGrammar;
use crate::types::charset::CharsetName;
use crate::types::header_value::{HeaderValue, HeaderValueWithParameters};
use crate::types::param::ParameterMap;
use crate::types::quality::{sort_by_quality_factor, HasQualityFactor, QualityFactor, Q};

/// One entry of an Accept-Charset header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptCharsetValue {
    Wildcard { parameters: ParameterMap },
    Charset { charset: CharsetName, parameters: ParameterMap },
}

impl AcceptCharsetValue {
    pub const WILDCARD: AcceptCharsetValue = AcceptCharsetValue::Wildcard {
        parameters: ParameterMap::new(),
    };

    pub fn new(charset: CharsetName) -> Self {
        if charset.is_wildcard() {
            return Self::WILDCARD;
        }
        AcceptCharsetValue::Charset {
            charset,
            parameters: ParameterMap::new(),
        }
    }

    pub fn charset(&self) -> Option<&CharsetName> {
        match self {
            AcceptCharsetValue::Wildcard { .. } => None,
            AcceptCharsetValue::Charset { charset, .. } => Some(charset),
        }
    }

    pub fn test(&self, charset: &CharsetName) -> bool {
        match self {
            AcceptCharsetValue::Wildcard { .. } => true,
            AcceptCharsetValue::Charset { charset: accepted, .. } => accepted == charset,
        }
    }
}

impl HeaderValue for AcceptCharsetValue {
    fn to_header_text(&self) -> String {
        match self {
            AcceptCharsetValue::Wildcard { parameters } => format!("*{parameters}"),
            AcceptCharsetValue::Charset { charset, parameters } => format!("{charset}{parameters}"),
        }
    }

    fn is_wildcard(&self) -> bool {
        matches!(self, AcceptCharsetValue::Wildcard { .. })
    }

    fn is_request(&self) -> bool {
        true
    }

    fn is_response(&self) -> bool {
        false
    }
}

impl HeaderValueWithParameters for AcceptCharsetValue {
    fn parameters(&self) -> &ParameterMap {
        match self {
            AcceptCharsetValue::Wildcard { parameters } | AcceptCharsetValue::Charset { parameters, .. } => {
                parameters
            }
        }
    }

    fn replace_parameters(self, parameters: ParameterMap) -> Self {
        match self {
            AcceptCharsetValue::Wildcard { .. } => AcceptCharsetValue::Wildcard { parameters },
            AcceptCharsetValue::Charset { charset, .. } => AcceptCharsetValue::Charset { charset, parameters },
        }
    }

    fn equals_ignoring_parameters(&self, other: &Self) -> bool {
        self.charset() == other.charset()
    }
}

impl HasQualityFactor for AcceptCharsetValue {
    fn quality_factor(&self) -> Option<QualityFactor> {
        self.parameter(&Q).copied()
    }
}

impl AcceptCharsetValue {
    pub fn parse(text: &str) -> Result<Self> {
        let mut values = grammar().parse_sorted(text)?;
        match values.len() {
            1 => Ok(values.remove(0)),
            _ => Err(Error::InvalidValue(format!("Expected a single charset in {text:?}"))),
        }
    }
}

header_value_impls!(AcceptCharsetValue);

fn grammar() -> WeightedTokenGrammar<AcceptCharsetValue> {
    WeightedTokenGrammar {
        header: "charset",
        predicate: chars::RFC7230_TOKEN,
        wildcard: || AcceptCharsetValue::WILDCARD,
        token: |token| CharsetName::parse(token).map(AcceptCharsetValue::new),
    }
}

/// A non-empty, quality ordered list of charsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptCharset(Vec<AcceptCharsetValue>);

impl AcceptCharset {
    pub fn new(values: Vec<AcceptCharsetValue>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyList("Accept-Charset"));
        }
        for value in &values {
            value.parameters().check()?;
        }
        Ok(AcceptCharset(values))
    }

    pub fn parse(text: &str) -> Result<Self> {
        grammar().parse_sorted(text).map(AcceptCharset)
    }

    pub fn values(&self) -> &[AcceptCharsetValue] {
        &self.0
    }

    pub fn quality_factor_sorted_values(&self) -> Vec<AcceptCharsetValue> {
        sort_by_quality_factor(&self.0)
    }

    /// The weight of `charset`: its own entry if listed, else the `*` entry, else zero.
    pub fn quality_factor(&self, charset: &CharsetName) -> QualityFactor {
        let listed = self.0.iter().find(|value| value.charset() == Some(charset));
        let wildcard = || self.0.iter().find(|value| value.is_wildcard());
        listed
            .or_else(wildcard)
            .map_or_else(QualityFactor::zero, HasQualityFactor::quality_factor_or_default)
    }

    pub fn test(&self, charset: &CharsetName) -> bool {
        self.quality_factor(charset).is_acceptable()
    }

    /// The most preferred known charset with a non-zero weight.
    pub fn charset(&self) -> Option<&CharsetName> {
        self.0
            .iter()
            .filter(|value| value.quality_factor_or_default().is_acceptable())
            .filter_map(AcceptCharsetValue::charset)
            .find(|charset| charset.is_known())
    }
}

impl HeaderValue for AcceptCharset {
    fn to_header_text(&self) -> String {
        self.0
            .iter()
            .map(HeaderValue::to_header_text)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn is_wildcard(&self) -> bool {
        self.0.iter().any(HeaderValue::is_wildcard)
    }

    fn is_request(&self) -> bool {
        true
    }

    fn is_response(&self) -> bool {
        false
    }
}

header_value_impls!(AcceptCharset);
