//! # Accept-Encoding Header
//!
//! Content codings acceptable in the response
//! ([RFC 7231 §5.3.4](https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.4)).
//!
//! Unlike the other Accept headers, `identity` stays acceptable when it is not listed,
//! unless it is refused with `identity;q=0` or a `*;q=0` entry.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::parser::chars;
use crate::types::accept::WeightedTokenGrammar;
use crate::types::header_value::{HeaderValue, HeaderValueWithParameters};
use crate::types::param::ParameterMap;
use crate::types::quality::{sort_by_quality_factor, HasQualityFactor, QualityFactor, Q};

/// One entry of an Accept-Encoding header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptEncodingValue {
    Wildcard {
        parameters: ParameterMap,
    },
    Encoding {
        name: Cow<'static, str>,
        parameters: ParameterMap,
    },
}

impl AcceptEncodingValue {
    pub const WILDCARD: AcceptEncodingValue = AcceptEncodingValue::Wildcard {
        parameters: ParameterMap::new(),
    };
    pub const GZIP: AcceptEncodingValue = AcceptEncodingValue::constant("gzip");
    pub const DEFLATE: AcceptEncodingValue = AcceptEncodingValue::constant("deflate");
    pub const BR: AcceptEncodingValue = AcceptEncodingValue::constant("br");
    pub const COMPRESS: AcceptEncodingValue = AcceptEncodingValue::constant("compress");
    pub const IDENTITY: AcceptEncodingValue = AcceptEncodingValue::constant("identity");

    const fn constant(name: &'static str) -> Self {
        AcceptEncodingValue::Encoding {
            name: Cow::Borrowed(name),
            parameters: ParameterMap::new(),
        }
    }

    /// An encoding by name; names are case-insensitive and stored lowercase.
    pub fn new(name: &str) -> Result<Self> {
        if name == "*" {
            return Ok(Self::WILDCARD);
        }
        if let Some(position) = chars::RFC7230_TOKEN.first_invalid(name) {
            return Err(Error::invalid_character(name, position));
        }
        if name.is_empty() {
            return Err(Error::missing_value("content coding", name, 0));
        }
        let name = name.to_ascii_lowercase();
        let known = [Self::GZIP, Self::DEFLATE, Self::BR, Self::COMPRESS, Self::IDENTITY]
            .into_iter()
            .find(|constant| constant.encoding() == Some(name.as_str()));
        Ok(known.unwrap_or(AcceptEncodingValue::Encoding {
            name: Cow::Owned(name),
            parameters: ParameterMap::new(),
        }))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut values = grammar().parse_sorted(text)?;
        match values.len() {
            1 => Ok(values.remove(0)),
            _ => Err(Error::InvalidValue(format!("Expected a single content coding in {text:?}"))),
        }
    }

    pub fn encoding(&self) -> Option<&str> {
        match self {
            AcceptEncodingValue::Wildcard { .. } => None,
            AcceptEncodingValue::Encoding { name, .. } => Some(name),
        }
    }

    pub fn test(&self, encoding: &str) -> bool {
        match self {
            AcceptEncodingValue::Wildcard { .. } => true,
            AcceptEncodingValue::Encoding { name, .. } => name.eq_ignore_ascii_case(encoding),
        }
    }
}

impl HeaderValue for AcceptEncodingValue {
    fn to_header_text(&self) -> String {
        match self {
            AcceptEncodingValue::Wildcard { parameters } => format!("*{parameters}"),
            AcceptEncodingValue::Encoding { name, parameters } => format!("{name}{parameters}"),
        }
    }

    fn is_wildcard(&self) -> bool {
        matches!(self, AcceptEncodingValue::Wildcard { .. })
    }

    fn is_request(&self) -> bool {
        true
    }

    fn is_response(&self) -> bool {
        false
    }
}

impl HeaderValueWithParameters for AcceptEncodingValue {
    fn parameters(&self) -> &ParameterMap {
        match self {
            AcceptEncodingValue::Wildcard { parameters } | AcceptEncodingValue::Encoding { parameters, .. } => {
                parameters
            }
        }
    }

    fn replace_parameters(self, parameters: ParameterMap) -> Self {
        match self {
            AcceptEncodingValue::Wildcard { .. } => AcceptEncodingValue::Wildcard { parameters },
            AcceptEncodingValue::Encoding { name, .. } => AcceptEncodingValue::Encoding { name, parameters },
        }
    }

    fn equals_ignoring_parameters(&self, other: &Self) -> bool {
        self.encoding() == other.encoding()
    }
}

impl HasQualityFactor for AcceptEncodingValue {
    fn quality_factor(&self) -> Option<QualityFactor> {
        self.parameter(&Q).copied()
    }
}

header_value_impls!(AcceptEncodingValue);

fn grammar() -> WeightedTokenGrammar<AcceptEncodingValue> {
    WeightedTokenGrammar {
        header: "content coding",
        predicate: chars::RFC7230_TOKEN,
        wildcard: || AcceptEncodingValue::WILDCARD,
        token: AcceptEncodingValue::new,
    }
}

/// A non-empty, quality ordered list of content codings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptEncoding(Vec<AcceptEncodingValue>);

impl AcceptEncoding {
    pub fn new(values: Vec<AcceptEncodingValue>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyList("Accept-Encoding"));
        }
        for value in &values {
            value.parameters().check()?;
        }
        Ok(AcceptEncoding(values))
    }

    pub fn parse(text: &str) -> Result<Self> {
        grammar().parse_sorted(text).map(AcceptEncoding)
    }

    pub fn values(&self) -> &[AcceptEncodingValue] {
        &self.0
    }

    pub fn quality_factor_sorted_values(&self) -> Vec<AcceptEncodingValue> {
        sort_by_quality_factor(&self.0)
    }

    /// The weight of `encoding`: its own entry, else `*`, else one for `identity` and
    /// zero for everything else.
    pub fn quality_factor(&self, encoding: &str) -> QualityFactor {
        let listed = self
            .0
            .iter()
            .find(|value| value.encoding().map_or(false, |name| name.eq_ignore_ascii_case(encoding)));
        match listed.or_else(|| self.0.iter().find(|value| value.is_wildcard())) {
            Some(value) => value.quality_factor_or_default(),
            None if encoding.eq_ignore_ascii_case("identity") => QualityFactor::one(),
            None => QualityFactor::zero(),
        }
    }

    pub fn test(&self, encoding: &str) -> bool {
        self.quality_factor(encoding).is_acceptable()
    }

    /// The first of `supported` with the highest non-zero weight.
    pub fn select<'a>(&self, supported: &[&'a str]) -> Option<&'a str> {
        let mut best: Option<(&'a str, QualityFactor)> = None;
        for &encoding in supported {
            let weight = self.quality_factor(encoding);
            if weight.is_acceptable() && best.map_or(true, |(_, current)| weight > current) {
                best = Some((encoding, weight));
            }
        }
        best.map(|(encoding, _)| encoding)
    }
}

impl HeaderValue for AcceptEncoding {
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

header_value_impls!(AcceptEncoding);
