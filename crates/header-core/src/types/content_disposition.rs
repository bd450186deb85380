//! # Content-Disposition Header
//!
//! How a body part should be presented and the file name to use when it is saved
//! ([RFC 6266](https://datatracker.ietf.org/doc/html/rfc6266),
//! [RFC 7578 §4.2](https://datatracker.ietf.org/doc/html/rfc7578#section-4.2) for
//! `form-data`).
//!
//! Non-ASCII file names travel in `filename*` with RFC 5987 encoding. When both forms are
//! present [`ContentDisposition::file_name`] prefers the encoded one.
//!
//! ## Example
//!
//! ```rust
//! use hval_header_core::types::content_disposition::{ContentDisposition, ContentDispositionType};
//!
//! let header = ContentDisposition::parse(
//!     "attachment; filename=\"EURO rates.txt\"; filename*=UTF-8''%e2%82%ac%20rates.txt",
//! )
//! .unwrap();
//! assert_eq!(header.disposition_type(), &ContentDispositionType::Attachment);
//! assert_eq!(header.file_name().unwrap().value(), "€ rates.txt");
//! ```

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::handler::string::QUOTED_UNQUOTED_STRING;
use crate::handler::{DateHandler, EncodedTextHandler, LongHandler};
use crate::parser::chars;
use crate::parser::cursor::HeaderParser;
use crate::parser::parameters::{ParameterizedGrammar, ParametersParser};
use crate::types::encoded_text::EncodedText;
use crate::types::header_value::{HeaderValue, HeaderValueWithParameters};
use crate::types::param::{HeaderParameterName, ParameterMap, ParameterName, ParameterRegistry};

const QUOTED_DATE: DateHandler = DateHandler { quoted: true };

pub const FILENAME: HeaderParameterName<String> = HeaderParameterName::new("filename", &QUOTED_UNQUOTED_STRING);
pub const FILENAME_ENCODED: HeaderParameterName<EncodedText> =
    HeaderParameterName::new("filename*", &EncodedTextHandler);
pub const NAME: HeaderParameterName<String> = HeaderParameterName::new("name", &QUOTED_UNQUOTED_STRING);
pub const CREATION_DATE: HeaderParameterName<DateTime<Utc>> =
    HeaderParameterName::new("creation-date", &QUOTED_DATE);
pub const MODIFICATION_DATE: HeaderParameterName<DateTime<Utc>> =
    HeaderParameterName::new("modification-date", &QUOTED_DATE);
pub const READ_DATE: HeaderParameterName<DateTime<Utc>> = HeaderParameterName::new("read-date", &QUOTED_DATE);
pub const SIZE: HeaderParameterName<u64> = HeaderParameterName::new("size", &LongHandler);

static PARAMETERS: Lazy<ParameterRegistry> = Lazy::new(|| {
    ParameterRegistry::new(
        "Content-Disposition",
        [
            FILENAME.name().clone(),
            FILENAME_ENCODED.name().clone(),
            NAME.name().clone(),
            CREATION_DATE.name().clone(),
            MODIFICATION_DATE.name().clone(),
            READ_DATE.name().clone(),
            SIZE.name().clone(),
        ],
    )
});

/// The disposition type; unknown types are kept as written, compared ignoring case.
#[derive(Debug, Clone)]
pub enum ContentDispositionType {
    Inline,
    Attachment,
    FormData,
    Extension(String),
}

impl ContentDispositionType {
    pub fn parse(text: &str) -> Result<Self> {
        if let Some(position) = chars::RFC2045_TOKEN.first_invalid(text) {
            return Err(Error::invalid_character(text, position));
        }
        Ok(match text.to_ascii_lowercase().as_str() {
            "" => return Err(Error::missing_value("disposition type", text, 0)),
            "inline" => ContentDispositionType::Inline,
            "attachment" => ContentDispositionType::Attachment,
            "form-data" => ContentDispositionType::FormData,
            _ => ContentDispositionType::Extension(text.to_string()),
        })
    }

    pub fn value(&self) -> &str {
        match self {
            ContentDispositionType::Inline => "inline",
            ContentDispositionType::Attachment => "attachment",
            ContentDispositionType::FormData => "form-data",
            ContentDispositionType::Extension(value) => value,
        }
    }
}

impl PartialEq for ContentDispositionType {
    fn eq(&self, other: &Self) -> bool {
        self.value().eq_ignore_ascii_case(other.value())
    }
}

impl Eq for ContentDispositionType {}

impl fmt::Display for ContentDispositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// A file name from `filename*` or `filename`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentDispositionFileName {
    NotEncoded(String),
    Encoded(EncodedText),
}

impl ContentDispositionFileName {
    pub fn value(&self) -> &str {
        match self {
            ContentDispositionFileName::NotEncoded(value) => value,
            ContentDispositionFileName::Encoded(text) => text.value(),
        }
    }

    /// The name after the last `/` or `\`. Senders are not supposed to include a path
    /// but some do.
    pub fn without_path(&self) -> Cow<'_, ContentDispositionFileName> {
        let value = self.value();
        let start = match value.rfind(|c| c == '/' || c == '\\') {
            Some(index) => index + 1,
            None => return Cow::Borrowed(self),
        };
        Cow::Owned(match self {
            ContentDispositionFileName::NotEncoded(_) => {
                ContentDispositionFileName::NotEncoded(value[start..].to_string())
            }
            ContentDispositionFileName::Encoded(text) => {
                ContentDispositionFileName::Encoded(text.with_substring(&value[start..]))
            }
        })
    }
}

impl fmt::Display for ContentDispositionFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisposition {
    type_: ContentDispositionType,
    parameters: ParameterMap,
}

impl ContentDisposition {
    pub const INLINE: ContentDisposition = ContentDisposition::constant(ContentDispositionType::Inline);
    pub const ATTACHMENT: ContentDisposition = ContentDisposition::constant(ContentDispositionType::Attachment);
    pub const FORM_DATA: ContentDisposition = ContentDisposition::constant(ContentDispositionType::FormData);

    const fn constant(type_: ContentDispositionType) -> Self {
        ContentDisposition {
            type_,
            parameters: ParameterMap::new(),
        }
    }

    pub fn new(type_: ContentDispositionType) -> Self {
        Self::constant(type_)
    }

    /// `attachment` with `filename`, adding `filename*` when the name is not plain ASCII.
    pub fn attachment(file_name: &str) -> Result<Self> {
        let mut parameters = ParameterMap::new().with(&FILENAME, ascii_fallback(file_name));
        if !file_name.is_ascii() {
            parameters = parameters.with(&FILENAME_ENCODED, EncodedText::new(file_name));
        }
        parameters.check()?;
        Ok(Self::ATTACHMENT.replace_parameters(parameters))
    }

    /// `form-data; name="field"` as used by multipart/form-data bodies.
    pub fn form_data(name: &str) -> Result<Self> {
        let parameters = ParameterMap::new().with(&NAME, name.to_string());
        parameters.check()?;
        Ok(Self::FORM_DATA.replace_parameters(parameters))
    }

    pub fn parse(text: &str) -> Result<Self> {
        ParametersParser::parse_one(text, ContentDispositionGrammar)
    }

    pub fn disposition_type(&self) -> &ContentDispositionType {
        &self.type_
    }

    pub fn is_inline(&self) -> bool {
        self.type_ == ContentDispositionType::Inline
    }

    pub fn is_attachment(&self) -> bool {
        self.type_ == ContentDispositionType::Attachment
    }

    pub fn is_form_data(&self) -> bool {
        self.type_ == ContentDispositionType::FormData
    }

    /// `filename*` when present, `filename` otherwise.
    pub fn file_name(&self) -> Option<ContentDispositionFileName> {
        self.parameter(&FILENAME_ENCODED)
            .cloned()
            .map(ContentDispositionFileName::Encoded)
            .or_else(|| {
                self.parameter(&FILENAME)
                    .cloned()
                    .map(ContentDispositionFileName::NotEncoded)
            })
    }

    pub fn name(&self) -> Option<&str> {
        self.parameter(&NAME).map(String::as_str)
    }

    pub fn size(&self) -> Option<u64> {
        self.parameter(&SIZE).copied()
    }

    pub fn creation_date(&self) -> Option<&DateTime<Utc>> {
        self.parameter(&CREATION_DATE)
    }

    pub fn modification_date(&self) -> Option<&DateTime<Utc>> {
        self.parameter(&MODIFICATION_DATE)
    }

    pub fn read_date(&self) -> Option<&DateTime<Utc>> {
        self.parameter(&READ_DATE)
    }
}

// `filename` for recipients that ignore `filename*`
fn ascii_fallback(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '_' })
        .collect()
}

impl HeaderValue for ContentDisposition {
    fn to_header_text(&self) -> String {
        format!("{}{}", self.type_, self.parameters)
    }

    fn is_request(&self) -> bool {
        true
    }

    fn is_response(&self) -> bool {
        true
    }
}

impl HeaderValueWithParameters for ContentDisposition {
    fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    fn replace_parameters(self, parameters: ParameterMap) -> Self {
        ContentDisposition {
            type_: self.type_,
            parameters,
        }
    }

    fn equals_ignoring_parameters(&self, other: &Self) -> bool {
        self.type_ == other.type_
    }
}

header_value_impls!(ContentDisposition);

struct ContentDispositionGrammar;

impl ParameterizedGrammar for ContentDispositionGrammar {
    type Value = ContentDisposition;

    fn allow_multiple_values(&self) -> bool {
        false
    }

    fn value(&mut self, parser: &mut HeaderParser<'_>) -> Result<ContentDisposition> {
        let token = parser.required_token(chars::RFC2045_TOKEN, "disposition type")?;
        ContentDispositionType::parse(token).map(ContentDisposition::new)
    }

    fn parameter_name(&self, name: &str) -> ParameterName {
        PARAMETERS.resolve(name)
    }

    fn value_name(&self) -> &'static str {
        "disposition type"
    }
}
