//! # ETag, If-Match and If-None-Match
//!
//! Entity tags ([RFC 9110 §8.8.3](https://datatracker.ietf.org/doc/html/rfc9110#section-8.8.3))
//! identify a representation. A `W/` prefix marks a weak validator.
//!
//! ```text
//! entity-tag = [ "W/" ] DQUOTE *etagc DQUOTE
//! If-Match   = "*" / #entity-tag
//! ```
//!
//! Strong comparison requires both tags to be strong and equal; weak comparison only
//! compares the opaque values. If-Match uses strong comparison, If-None-Match weak.

use std::fmt;

use crate::error::{Error, Result};
use crate::parser::chars;
use crate::parser::cursor::{parse_with, HeaderGrammar, HeaderParser};
use crate::types::header_value::HeaderValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validator {
    Strong,
    Weak,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ETag {
    /// `*`, any current representation. Only valid in If-Match and If-None-Match.
    Wildcard,
    Tag { value: String, validator: Validator },
}

impl ETag {
    pub fn strong(value: &str) -> Result<Self> {
        Self::new(value, Validator::Strong)
    }

    pub fn weak(value: &str) -> Result<Self> {
        Self::new(value, Validator::Weak)
    }

    /// Builds a tag from its opaque value, without quotes.
    pub fn new(value: &str, validator: Validator) -> Result<Self> {
        if let Some(position) = chars::ETAG_CHAR.first_invalid(value) {
            return Err(Error::invalid_character(value, position));
        }
        Ok(ETag::Tag {
            value: value.to_string(),
            validator,
        })
    }

    /// Parses a single entity tag or `*`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut tags = parse_tags(text, false)?;
        Ok(tags.remove(0))
    }

    /// Parses the value of If-Match or If-None-Match.
    pub fn parse_list(text: &str) -> Result<Vec<Self>> {
        parse_tags(text, true)
    }

    /// The opaque value, `None` for the wildcard.
    pub fn value(&self) -> Option<&str> {
        match self {
            ETag::Wildcard => None,
            ETag::Tag { value, .. } => Some(value),
        }
    }

    pub fn is_weak(&self) -> bool {
        matches!(self, ETag::Tag { validator: Validator::Weak, .. })
    }

    pub fn strong_eq(&self, other: &ETag) -> bool {
        match (self, other) {
            (
                ETag::Tag { value, validator: Validator::Strong },
                ETag::Tag { value: other, validator: Validator::Strong },
            ) => value == other,
            _ => false,
        }
    }

    pub fn weak_eq(&self, other: &ETag) -> bool {
        match (self.value(), other.value()) {
            (Some(value), Some(other)) => value == other,
            _ => false,
        }
    }

    /// True when this tag, taken from a request, selects `current`: `*` selects everything,
    /// otherwise the tags must compare equal.
    pub fn test(&self, current: &ETag, validator: Validator) -> bool {
        match (self, validator) {
            (ETag::Wildcard, _) => true,
            (_, Validator::Strong) => self.strong_eq(current),
            (_, Validator::Weak) => self.weak_eq(current),
        }
    }
}

impl HeaderValue for ETag {
    fn to_header_text(&self) -> String {
        match self {
            ETag::Wildcard => "*".to_string(),
            ETag::Tag { value, validator: Validator::Strong } => format!("\"{value}\""),
            ETag::Tag { value, validator: Validator::Weak } => format!("W/\"{value}\""),
        }
    }

    fn is_wildcard(&self) -> bool {
        matches!(self, ETag::Wildcard)
    }

    fn is_request(&self) -> bool {
        true
    }

    fn is_response(&self) -> bool {
        !self.is_wildcard()
    }
}

header_value_impls!(ETag);

/// The entity tags of an If-Match or If-None-Match header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ETagList(Vec<ETag>);

impl ETagList {
    pub fn new(tags: Vec<ETag>) -> Result<Self> {
        if tags.is_empty() {
            return Err(Error::EmptyList("If-Match"));
        }
        if tags.len() > 1 && tags.iter().any(ETag::is_wildcard) {
            return Err(Error::InvalidValue("\"*\" cannot be combined with entity tags".to_string()));
        }
        Ok(ETagList(tags))
    }

    pub fn parse(text: &str) -> Result<Self> {
        ETag::parse_list(text).map(ETagList)
    }

    pub fn tags(&self) -> &[ETag] {
        &self.0
    }

    /// If-Match evaluation: some tag strongly matches `current`.
    pub fn test_strong(&self, current: &ETag) -> bool {
        self.0.iter().any(|tag| tag.test(current, Validator::Strong))
    }

    /// If-None-Match evaluation: some tag weakly matches `current`.
    pub fn test_weak(&self, current: &ETag) -> bool {
        self.0.iter().any(|tag| tag.test(current, Validator::Weak))
    }
}

impl HeaderValue for ETagList {
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

header_value_impls!(ETagList);

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Strong => f.write_str("strong"),
            Validator::Weak => f.write_str("weak"),
        }
    }
}

fn parse_tags(text: &str, multiple: bool) -> Result<Vec<ETag>> {
    let mut grammar = ETagGrammar {
        multiple,
        mode: Mode::Tag,
        weak: false,
        tags: Vec::new(),
    };
    parse_with(text, &mut grammar)?;
    Ok(grammar.tags)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Tag,
    Quoted,
    AfterTag,
    AfterWildcard,
}

struct ETagGrammar {
    multiple: bool,
    mode: Mode,
    weak: bool,
    tags: Vec<ETag>,
}

impl HeaderGrammar for ETagGrammar {
    fn quoted_text(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::Tag | Mode::Quoted => {
                let raw = parser.quoted_text(chars::ETAG_CHAR, false)?;
                let validator = if self.weak { Validator::Weak } else { Validator::Strong };
                self.tags.push(ETag::Tag {
                    value: raw[1..raw.len() - 1].to_string(),
                    validator,
                });
                self.weak = false;
                self.mode = Mode::AfterTag;
                Ok(())
            }
            _ => Err(parser.invalid_character()),
        }
    }

    fn wildcard(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::Tag if self.tags.is_empty() => {
                parser.advance();
                self.tags.push(ETag::Wildcard);
                self.mode = Mode::AfterWildcard;
                Ok(())
            }
            _ => Err(parser.invalid_character()),
        }
    }

    fn multi_value_separator(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::AfterTag if self.multiple => {
                parser.advance();
                self.mode = Mode::Tag;
                Ok(())
            }
            _ => Err(parser.invalid_character()),
        }
    }

    fn token(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        if self.mode == Mode::Tag && parser.remaining().starts_with("W/") {
            parser.advance();
            parser.advance();
            self.weak = true;
            self.mode = Mode::Quoted;
            if parser.character() != Some('"') {
                return Err(parser.invalid_character());
            }
            return Ok(());
        }
        Err(parser.invalid_character())
    }

    fn whitespace(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        if self.mode == Mode::Quoted {
            return Err(parser.invalid_character());
        }
        parser.skip_whitespace();
        Ok(())
    }

    fn end_of_text(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::AfterTag | Mode::AfterWildcard => Ok(()),
            Mode::Tag | Mode::Quoted => Err(parser.missing_value("entity tag")),
        }
    }
}
