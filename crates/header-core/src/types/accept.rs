//! # Accept Header
//!
//! The `Accept` request header ([RFC 7231 §5.3.2](https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.2))
//! lists the media types a client is willing to receive, each optionally weighted with a
//! `q` parameter.
//!
//! Parsing orders the media types by descending quality factor. Media types with equal
//! weight keep the order in which they appeared in the header.
//!
//! ## Example
//!
//! ```rust
//! use hval_header_core::prelude::*;
//!
//! let accept = Accept::parse("text/html;q=0.7, text/plain;q=0.3, */*;q=0.5").unwrap();
//! let order: Vec<String> = accept.values().iter().map(|v| v.to_string()).collect();
//! assert_eq!(order, ["text/html;q=0.7", "*/*;q=0.5", "text/plain;q=0.3"]);
//! assert!(accept.test(&MediaType::IMAGE_PNG));
//! ```

use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::parser::chars::CharPredicate;
use crate::parser::cursor::HeaderParser;
use crate::parser::parameters::{ParameterizedGrammar, ParametersParser};
use crate::types::header_value::{HeaderValue, HeaderValueWithParameters};
use crate::types::media_type::{MediaType, MediaTypeGrammar};
use crate::types::param::{ParameterName, ParameterRegistry};
use crate::types::quality::{sort_by_quality_factor, HasQualityFactor, Q};

static WEIGHT_PARAMETERS: Lazy<ParameterRegistry> =
    Lazy::new(|| ParameterRegistry::new("Accept-*", [Q.name().clone()]));

/// Grammar of the token lists in Accept-Charset, Accept-Encoding and Accept-Language:
/// `( token / "*" ) [ ";q=" qvalue ]`, comma separated.
pub(crate) struct WeightedTokenGrammar<V> {
    pub(crate) header: &'static str,
    pub(crate) predicate: CharPredicate,
    pub(crate) wildcard: fn() -> V,
    pub(crate) token: fn(&str) -> Result<V>,
}

impl<V: HeaderValueWithParameters> WeightedTokenGrammar<V> {
    /// Parses `text` and orders the values by descending quality factor.
    pub(crate) fn parse_sorted(self, text: &str) -> Result<Vec<V>>
    where
        V: HasQualityFactor,
    {
        let values = ParametersParser::parse(text, self)?;
        Ok(sort_by_quality_factor(&values))
    }
}

impl<V: HeaderValueWithParameters> ParameterizedGrammar for WeightedTokenGrammar<V> {
    type Value = V;

    fn allow_multiple_values(&self) -> bool {
        true
    }

    fn value(&mut self, parser: &mut HeaderParser<'_>) -> Result<V> {
        let token = parser.required_token(self.predicate, self.header)?;
        (self.token)(token)
    }

    fn wildcard(&mut self, parser: &mut HeaderParser<'_>) -> Result<V> {
        parser.advance();
        Ok((self.wildcard)())
    }

    fn parameter_name(&self, name: &str) -> ParameterName {
        WEIGHT_PARAMETERS.resolve(name)
    }

    fn value_name(&self) -> &'static str {
        self.header
    }
}

/// A non-empty list of acceptable media types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accept(Vec<MediaType>);

impl Accept {
    /// Builds an Accept header from media types, keeping their order.
    pub fn new(values: Vec<MediaType>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyList("Accept"));
        }
        for value in &values {
            value.parameters().check()?;
        }
        Ok(Accept(values))
    }

    /// `Accept: */*`.
    pub fn any() -> Self {
        Accept(vec![MediaType::WILDCARD])
    }

    pub fn parse(text: &str) -> Result<Self> {
        let values = ParametersParser::parse(text, MediaTypeGrammar { multiple: true })?;
        Ok(Accept(sort_by_quality_factor(&values)))
    }

    pub fn values(&self) -> &[MediaType] {
        &self.0
    }

    /// The media types in descending quality factor order.
    pub fn quality_factor_sorted_values(&self) -> Vec<MediaType> {
        sort_by_quality_factor(&self.0)
    }

    /// True when some media type with a non-zero quality factor matches `content_type`.
    pub fn test(&self, content_type: &MediaType) -> bool {
        self.0
            .iter()
            .any(|value| value.quality_factor_or_default().is_acceptable() && value.test(content_type))
    }

    pub fn test_or_fail(&self, content_type: &MediaType) -> Result<()> {
        if self.test(content_type) {
            Ok(())
        } else {
            Err(Error::NotCompatible(format!(
                "Got \"{}\" require {}",
                content_type.to_header_text(),
                self.to_header_text()
            )))
        }
    }

    /// The first of `offered` acceptable to the most preferred media type that accepts any.
    pub fn select<'a>(&self, offered: &'a [MediaType]) -> Option<&'a MediaType> {
        self.quality_factor_sorted_values()
            .iter()
            .filter(|value| value.quality_factor_or_default().is_acceptable())
            .find_map(|value| offered.iter().find(|candidate| value.test(candidate)))
    }
}

impl HeaderValue for Accept {
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

header_value_impls!(Accept);
