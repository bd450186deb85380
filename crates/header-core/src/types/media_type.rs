//! # Media Types
//!
//! Media types as used in `Content-Type` and `Accept` ([RFC 2045](https://datatracker.ietf.org/doc/html/rfc2045),
//! [RFC 6838](https://datatracker.ietf.org/doc/html/rfc6838)).
//!
//! A media type is `type/subtype`, optionally followed by a structured syntax suffix
//! (`application/hal+json`) and `;name=value` parameters. Type, subtype and suffix are
//! stored lowercase. Well known media types are available as constants and parsing a
//! parameterless, suffix-free media type returns the interned constant text.
//!
//! ## Example
//!
//! ```rust
//! use hval_header_core::prelude::*;
//!
//! let html = MediaType::parse("text/html; charset=utf-8").unwrap();
//! assert!(MediaType::TEXT_WILDCARD.test(&html));
//! assert_eq!(html.charset(), Some(&CharsetName::UTF_8));
//! assert_eq!(html.to_string(), "text/html;charset=UTF-8");
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::handler::{BoundaryHandler, CharsetNameHandler};
use crate::parser::chars;
use crate::parser::cursor::HeaderParser;
use crate::parser::parameters::{ParameterizedGrammar, ParametersParser};
use crate::types::boundary::MediaTypeBoundary;
use crate::types::charset::CharsetName;
use crate::types::header_value::{HeaderValue, HeaderValueWithParameters};
use crate::types::param::{HeaderParameterName, ParameterMap, ParameterName, ParameterRegistry};
use crate::types::quality::{HasQualityFactor, QualityFactor, Q};

/// `charset` parameter.
pub const CHARSET: HeaderParameterName<CharsetName> =
    HeaderParameterName::new("charset", &CharsetNameHandler);

/// `boundary` parameter of multipart types.
pub const BOUNDARY: HeaderParameterName<MediaTypeBoundary> =
    HeaderParameterName::new("boundary", &BoundaryHandler);

static PARAMETERS: Lazy<ParameterRegistry> = Lazy::new(|| {
    ParameterRegistry::new(
        "Content-Type",
        [CHARSET.name().clone(), BOUNDARY.name().clone(), Q.name().clone()],
    )
});

/// A media type with optional suffix and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    type_: Cow<'static, str>,
    subtype: Cow<'static, str>,
    suffix: Option<Cow<'static, str>>,
    parameters: ParameterMap,
}

impl MediaType {
    pub const WILDCARD: MediaType = MediaType::constant("*", "*");

    pub const TEXT_WILDCARD: MediaType = MediaType::constant("text", "*");
    pub const TEXT_PLAIN: MediaType = MediaType::constant("text", "plain");
    pub const TEXT_HTML: MediaType = MediaType::constant("text", "html");
    pub const TEXT_CSS: MediaType = MediaType::constant("text", "css");
    pub const TEXT_CSV: MediaType = MediaType::constant("text", "csv");
    pub const TEXT_XML: MediaType = MediaType::constant("text", "xml");
    pub const TEXT_EVENT_STREAM: MediaType = MediaType::constant("text", "event-stream");

    pub const APPLICATION_WILDCARD: MediaType = MediaType::constant("application", "*");
    pub const APPLICATION_JSON: MediaType = MediaType::constant("application", "json");
    pub const APPLICATION_XML: MediaType = MediaType::constant("application", "xml");
    pub const APPLICATION_OCTET_STREAM: MediaType = MediaType::constant("application", "octet-stream");
    pub const APPLICATION_FORM_URLENCODED: MediaType =
        MediaType::constant("application", "x-www-form-urlencoded");
    pub const APPLICATION_JAVASCRIPT: MediaType = MediaType::constant("application", "javascript");
    pub const APPLICATION_PDF: MediaType = MediaType::constant("application", "pdf");
    pub const APPLICATION_ZIP: MediaType = MediaType::constant("application", "zip");
    pub const APPLICATION_PROBLEM_JSON: MediaType =
        MediaType::constant_with_suffix("application", "problem", "json");
    pub const APPLICATION_HAL_JSON: MediaType = MediaType::constant_with_suffix("application", "hal", "json");

    pub const MULTIPART_WILDCARD: MediaType = MediaType::constant("multipart", "*");
    pub const MULTIPART_FORM_DATA: MediaType = MediaType::constant("multipart", "form-data");
    pub const MULTIPART_MIXED: MediaType = MediaType::constant("multipart", "mixed");
    pub const MULTIPART_ALTERNATIVE: MediaType = MediaType::constant("multipart", "alternative");
    pub const MULTIPART_BYTERANGES: MediaType = MediaType::constant("multipart", "byteranges");

    pub const IMAGE_WILDCARD: MediaType = MediaType::constant("image", "*");
    pub const IMAGE_PNG: MediaType = MediaType::constant("image", "png");
    pub const IMAGE_JPEG: MediaType = MediaType::constant("image", "jpeg");
    pub const IMAGE_GIF: MediaType = MediaType::constant("image", "gif");
    pub const IMAGE_SVG_XML: MediaType = MediaType::constant_with_suffix("image", "svg", "xml");

    pub const AUDIO_WILDCARD: MediaType = MediaType::constant("audio", "*");
    pub const VIDEO_WILDCARD: MediaType = MediaType::constant("video", "*");
    pub const MESSAGE_HTTP: MediaType = MediaType::constant("message", "http");

    const fn constant(type_: &'static str, subtype: &'static str) -> Self {
        MediaType {
            type_: Cow::Borrowed(type_),
            subtype: Cow::Borrowed(subtype),
            suffix: None,
            parameters: ParameterMap::new(),
        }
    }

    const fn constant_with_suffix(type_: &'static str, subtype: &'static str, suffix: &'static str) -> Self {
        MediaType {
            type_: Cow::Borrowed(type_),
            subtype: Cow::Borrowed(subtype),
            suffix: Some(Cow::Borrowed(suffix)),
            parameters: ParameterMap::new(),
        }
    }

    /// Builds a media type from its components, checking each against its character set.
    pub fn new(type_: &str, subtype: &str) -> Result<Self> {
        Self::with_suffix(type_, subtype, None)
    }

    pub fn with_suffix(type_: &str, subtype: &str, suffix: Option<&str>) -> Result<Self> {
        check_component(chars::MEDIA_TYPE_TYPE, type_)?;
        check_component(chars::MEDIA_TYPE_SUBTYPE, subtype)?;
        if let Some(suffix) = suffix {
            check_component(chars::MEDIA_TYPE_SUFFIX, suffix)?;
        }
        Ok(Self::interned(type_, subtype, suffix))
    }

    // Components must already be valid
    fn interned(type_: &str, subtype: &str, suffix: Option<&str>) -> Self {
        let type_ = type_.to_ascii_lowercase();
        let subtype = subtype.to_ascii_lowercase();
        if suffix.is_none() {
            if let Some(constant) = CONSTANTS.get(format!("{type_}/{subtype}").as_str()) {
                return constant.clone();
            }
        }
        MediaType {
            type_: Cow::Owned(type_),
            subtype: Cow::Owned(subtype),
            suffix: suffix.map(|suffix| Cow::Owned(suffix.to_ascii_lowercase())),
            parameters: ParameterMap::new(),
        }
    }

    /// Parses a single media type such as a `Content-Type` value.
    pub fn parse(text: &str) -> Result<Self> {
        ParametersParser::parse_one(text, MediaTypeGrammar { multiple: false })
    }

    /// Parses a comma separated list of media types, in header order.
    pub fn parse_list(text: &str) -> Result<Vec<Self>> {
        ParametersParser::parse(text, MediaTypeGrammar { multiple: true })
    }

    pub fn type_(&self) -> &str {
        &self.type_
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// `type/subtype[+suffix]` without parameters.
    pub fn value(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}/{}+{}", self.type_, self.subtype, suffix),
            None => format!("{}/{}", self.type_, self.subtype),
        }
    }

    pub fn set_type(&self, type_: &str) -> Result<Cow<'_, Self>> {
        if self.type_.eq_ignore_ascii_case(type_) {
            return Ok(Cow::Borrowed(self));
        }
        let changed = Self::with_suffix(type_, &self.subtype, self.suffix())?;
        Ok(Cow::Owned(changed.replace_parameters(self.parameters.clone())))
    }

    pub fn set_subtype(&self, subtype: &str) -> Result<Cow<'_, Self>> {
        if self.subtype.eq_ignore_ascii_case(subtype) {
            return Ok(Cow::Borrowed(self));
        }
        let changed = Self::with_suffix(&self.type_, subtype, self.suffix())?;
        Ok(Cow::Owned(changed.replace_parameters(self.parameters.clone())))
    }

    pub fn set_suffix(&self, suffix: Option<&str>) -> Result<Cow<'_, Self>> {
        let unchanged = match (self.suffix(), suffix) {
            (Some(current), Some(suffix)) => current.eq_ignore_ascii_case(suffix),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return Ok(Cow::Borrowed(self));
        }
        let changed = Self::with_suffix(&self.type_, &self.subtype, suffix)?;
        Ok(Cow::Owned(changed.replace_parameters(self.parameters.clone())))
    }

    pub fn charset(&self) -> Option<&CharsetName> {
        self.parameter(&CHARSET)
    }

    pub fn set_charset(&self, charset: CharsetName) -> Result<Cow<'_, Self>> {
        self.set_parameter(&CHARSET, charset)
    }

    pub fn boundary(&self) -> Option<&MediaTypeBoundary> {
        self.parameter(&BOUNDARY)
    }

    pub fn set_boundary(&self, boundary: MediaTypeBoundary) -> Result<Cow<'_, Self>> {
        self.set_parameter(&BOUNDARY, boundary)
    }

    /// True when every component of `self` is `*` or equal, ignoring case, to the one in
    /// `other`. Wildcards in `other` only match wildcards. A suffix on `self` requires a
    /// matching suffix on `other`, so `application/*+json` does not match `application/xml`.
    /// Parameters are not compared.
    pub fn test(&self, other: &MediaType) -> bool {
        fn component(mine: &str, theirs: &str) -> bool {
            mine == "*" || mine.eq_ignore_ascii_case(theirs)
        }

        let suffix_matches = match &self.suffix {
            Some(suffix) => other
                .suffix
                .as_deref()
                .map_or(false, |theirs| component(suffix, theirs)),
            _ => true,
        };
        component(&self.type_, &other.type_) && component(&self.subtype, &other.subtype) && suffix_matches
    }

    /// Fails unless `content_type` is compatible with `self`.
    pub fn require_content_type(&self, content_type: &MediaType) -> Result<()> {
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
}

fn check_component(predicate: chars::CharPredicate, text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(Error::missing_value(predicate.name(), text, 0));
    }
    match predicate.first_invalid(text) {
        Some(position) => Err(Error::invalid_character(text, position)),
        None => Ok(()),
    }
}

static CONSTANTS: Lazy<HashMap<&'static str, MediaType>> = Lazy::new(|| {
    [
        ("*/*", MediaType::WILDCARD),
        ("text/*", MediaType::TEXT_WILDCARD),
        ("text/plain", MediaType::TEXT_PLAIN),
        ("text/html", MediaType::TEXT_HTML),
        ("text/css", MediaType::TEXT_CSS),
        ("text/csv", MediaType::TEXT_CSV),
        ("text/xml", MediaType::TEXT_XML),
        ("text/event-stream", MediaType::TEXT_EVENT_STREAM),
        ("application/*", MediaType::APPLICATION_WILDCARD),
        ("application/json", MediaType::APPLICATION_JSON),
        ("application/xml", MediaType::APPLICATION_XML),
        ("application/octet-stream", MediaType::APPLICATION_OCTET_STREAM),
        ("application/x-www-form-urlencoded", MediaType::APPLICATION_FORM_URLENCODED),
        ("application/javascript", MediaType::APPLICATION_JAVASCRIPT),
        ("application/pdf", MediaType::APPLICATION_PDF),
        ("application/zip", MediaType::APPLICATION_ZIP),
        ("multipart/*", MediaType::MULTIPART_WILDCARD),
        ("multipart/form-data", MediaType::MULTIPART_FORM_DATA),
        ("multipart/mixed", MediaType::MULTIPART_MIXED),
        ("multipart/alternative", MediaType::MULTIPART_ALTERNATIVE),
        ("multipart/byteranges", MediaType::MULTIPART_BYTERANGES),
        ("image/*", MediaType::IMAGE_WILDCARD),
        ("image/png", MediaType::IMAGE_PNG),
        ("image/jpeg", MediaType::IMAGE_JPEG),
        ("image/gif", MediaType::IMAGE_GIF),
        ("audio/*", MediaType::AUDIO_WILDCARD),
        ("video/*", MediaType::VIDEO_WILDCARD),
        ("message/http", MediaType::MESSAGE_HTTP),
    ]
    .into_iter()
    .collect()
});

impl HeaderValue for MediaType {
    fn to_header_text(&self) -> String {
        format!("{}{}", self.value(), self.parameters)
    }

    fn is_wildcard(&self) -> bool {
        self.type_ == "*" && self.subtype == "*"
    }

    fn is_request(&self) -> bool {
        true
    }

    fn is_response(&self) -> bool {
        true
    }

    fn is_multipart(&self) -> bool {
        self.type_ == "multipart"
    }
}

impl HeaderValueWithParameters for MediaType {
    fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    fn replace_parameters(mut self, parameters: ParameterMap) -> Self {
        self.parameters = parameters;
        self
    }

    fn equals_ignoring_parameters(&self, other: &Self) -> bool {
        self.type_ == other.type_ && self.subtype == other.subtype && self.suffix == other.suffix
    }
}

impl HasQualityFactor for MediaType {
    fn quality_factor(&self) -> Option<QualityFactor> {
        self.parameter(&Q).copied()
    }
}

header_value_impls!(MediaType);

/// Reads `type "/" subtype [ "+" suffix ]` at the cursor.
fn read_media_type(parser: &mut HeaderParser<'_>) -> Result<MediaType> {
    let type_ = parser.required_token(chars::MEDIA_TYPE_TYPE, "media type")?;
    parser.expect('/')?;
    let subtype = parser.required_token(chars::MEDIA_TYPE_SUBTYPE, "media subtype")?;
    let suffix = if parser.character() == Some('+') {
        parser.advance();
        Some(parser.required_token(chars::MEDIA_TYPE_SUFFIX, "media type suffix")?)
    } else {
        None
    };
    Ok(MediaType::interned(type_, subtype, suffix))
}

pub(crate) struct MediaTypeGrammar {
    pub(crate) multiple: bool,
}

impl ParameterizedGrammar for MediaTypeGrammar {
    type Value = MediaType;

    fn allow_multiple_values(&self) -> bool {
        self.multiple
    }

    fn value(&mut self, parser: &mut HeaderParser<'_>) -> Result<MediaType> {
        read_media_type(parser)
    }

    fn wildcard(&mut self, parser: &mut HeaderParser<'_>) -> Result<MediaType> {
        read_media_type(parser)
    }

    fn parameter_name(&self, name: &str) -> ParameterName {
        PARAMETERS.resolve(name)
    }

    fn value_name(&self) -> &'static str {
        "media type"
    }
}
