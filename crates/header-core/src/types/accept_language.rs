//! # Accept-Language Header
//!
//! Natural languages preferred in the response
//! ([RFC 7231 §5.3.5](https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.5)).
//! Each entry is a language range matched with RFC 4647 basic filtering: `en` matches
//! `en` and `en-GB` but not `eng`.

use crate::error::{Error, Result};
use crate::parser::chars;
use crate::types::accept::WeightedTokenGrammar;
use crate::types::header_value::{HeaderValue, HeaderValueWithParameters};
use crate::types::language::LanguageTag;
use crate::types::param::ParameterMap;
use crate::types::quality::{sort_by_quality_factor, HasQualityFactor, QualityFactor, Q};

/// One entry of an Accept-Language header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptLanguageValue {
    Wildcard { parameters: ParameterMap },
    Language { range: LanguageTag, parameters: ParameterMap },
}

impl AcceptLanguageValue {
    pub const WILDCARD: AcceptLanguageValue = AcceptLanguageValue::Wildcard {
        parameters: ParameterMap::new(),
    };

    pub fn new(range: LanguageTag) -> Self {
        AcceptLanguageValue::Language {
            range,
            parameters: ParameterMap::new(),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut values = grammar().parse_sorted(text)?;
        match values.len() {
            1 => Ok(values.remove(0)),
            _ => Err(Error::InvalidValue(format!("Expected a single language range in {text:?}"))),
        }
    }

    pub fn range(&self) -> Option<&LanguageTag> {
        match self {
            AcceptLanguageValue::Wildcard { .. } => None,
            AcceptLanguageValue::Language { range, .. } => Some(range),
        }
    }

    pub fn test(&self, tag: &LanguageTag) -> bool {
        match self {
            AcceptLanguageValue::Wildcard { .. } => true,
            AcceptLanguageValue::Language { range, .. } => range.matches(tag),
        }
    }
}

impl HeaderValue for AcceptLanguageValue {
    fn to_header_text(&self) -> String {
        match self {
            AcceptLanguageValue::Wildcard { parameters } => format!("*{parameters}"),
            AcceptLanguageValue::Language { range, parameters } => format!("{range}{parameters}"),
        }
    }

    fn is_wildcard(&self) -> bool {
        matches!(self, AcceptLanguageValue::Wildcard { .. })
    }

    fn is_request(&self) -> bool {
        true
    }

    fn is_response(&self) -> bool {
        false
    }
}

impl HeaderValueWithParameters for AcceptLanguageValue {
    fn parameters(&self) -> &ParameterMap {
        match self {
            AcceptLanguageValue::Wildcard { parameters } | AcceptLanguageValue::Language { parameters, .. } => {
                parameters
            }
        }
    }

    fn replace_parameters(self, parameters: ParameterMap) -> Self {
        match self {
            AcceptLanguageValue::Wildcard { .. } => AcceptLanguageValue::Wildcard { parameters },
            AcceptLanguageValue::Language { range, .. } => AcceptLanguageValue::Language { range, parameters },
        }
    }

    fn equals_ignoring_parameters(&self, other: &Self) -> bool {
        self.range() == other.range()
    }
}

impl HasQualityFactor for AcceptLanguageValue {
    fn quality_factor(&self) -> Option<QualityFactor> {
        self.parameter(&Q).copied()
    }
}

header_value_impls!(AcceptLanguageValue);

fn grammar() -> WeightedTokenGrammar<AcceptLanguageValue> {
    WeightedTokenGrammar {
        header: "language range",
        predicate: chars::LANGUAGE_TAG,
        wildcard: || AcceptLanguageValue::WILDCARD,
        token: |token| LanguageTag::parse(token).map(AcceptLanguageValue::new),
    }
}

/// A non-empty, quality ordered list of language ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptLanguage(Vec<AcceptLanguageValue>);

impl AcceptLanguage {
    pub fn new(values: Vec<AcceptLanguageValue>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyList("Accept-Language"));
        }
        for value in &values {
            value.parameters().check()?;
        }
        Ok(AcceptLanguage(values))
    }

    pub fn parse(text: &str) -> Result<Self> {
        grammar().parse_sorted(text).map(AcceptLanguage)
    }

    pub fn values(&self) -> &[AcceptLanguageValue] {
        &self.0
    }

    pub fn quality_factor_sorted_values(&self) -> Vec<AcceptLanguageValue> {
        sort_by_quality_factor(&self.0)
    }

    /// The weight of `tag` from the longest matching range, else `*`, else zero.
    pub fn quality_factor(&self, tag: &LanguageTag) -> QualityFactor {
        let most_specific = self
            .0
            .iter()
            .filter_map(|value| value.range().filter(|range| range.matches(tag)).map(|range| (range, value)))
            .max_by_key(|(range, _)| range.value().len())
            .map(|(_, value)| value);
        most_specific
            .or_else(|| self.0.iter().find(|value| value.is_wildcard()))
            .map_or_else(QualityFactor::zero, HasQualityFactor::quality_factor_or_default)
    }

    pub fn test(&self, tag: &LanguageTag) -> bool {
        self.quality_factor(tag).is_acceptable()
    }

    /// The first of `available` with the highest non-zero weight.
    pub fn select<'a>(&self, available: &'a [LanguageTag]) -> Option<&'a LanguageTag> {
        let mut best: Option<(&'a LanguageTag, QualityFactor)> = None;
        for tag in available {
            let weight = self.quality_factor(tag);
            if weight.is_acceptable() && best.map_or(true, |(_, current)| weight > current) {
                best = Some((tag, weight));
            }
        }
        best.map(|(tag, _)| tag)
    }
}

impl HeaderValue for AcceptLanguage {
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

header_value_impls!(AcceptLanguage);
