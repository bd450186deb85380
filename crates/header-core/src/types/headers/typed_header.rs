use std::fmt;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::types::accept::Accept;
use crate::types::accept_charset::AcceptCharset;
use crate::types::accept_encoding::AcceptEncoding;
use crate::types::accept_language::AcceptLanguage;
use crate::types::cache_control::CacheControl;
use crate::types::content_disposition::ContentDisposition;
use crate::types::cookie::{ClientCookies, ServerCookie};
use crate::types::etag::{ETag, ETagList};
use crate::types::header_value::HeaderValue;
use crate::types::headers::header_name::HeaderName;
use crate::types::link::Link;
use crate::types::media_type::MediaType;
use crate::types::range::{ContentRange, Range};

/// A header field as received: name and unparsed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: HeaderName,
    pub value: String,
}

impl Header {
    pub fn new(name: HeaderName, value: impl Into<String>) -> Self {
        Header {
            name,
            value: value.into(),
        }
    }

    /// Splits a `Name: value` field line. Surrounding whitespace of the value is dropped.
    pub fn parse_line(line: &str) -> Result<Self> {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| Error::missing_value("':'", line, line.chars().count()))?;
        Ok(Header::new(name.parse()?, value.trim()))
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// A header whose value has been parsed into its typed form.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedHeader {
    Accept(Accept),
    AcceptCharset(AcceptCharset),
    AcceptEncoding(AcceptEncoding),
    AcceptLanguage(AcceptLanguage),
    CacheControl(CacheControl),
    ContentDisposition(ContentDisposition),
    ContentRange(ContentRange),
    ContentType(MediaType),
    Cookie(ClientCookies),
    ETag(ETag),
    IfMatch(ETagList),
    IfNoneMatch(ETagList),
    Link(Vec<Link>),
    Range(Range),
    SetCookie(ServerCookie),
    /// A header without a typed form, kept as text.
    Other(HeaderName, String),
}

impl TypedHeader {
    /// Parses `text` as the value of header `name`.
    pub fn parse(name: &HeaderName, text: &str) -> Result<Self> {
        trace!(header = %name, value = text, "parsing header value");
        let parsed = match name {
            HeaderName::Accept => Accept::parse(text).map(TypedHeader::Accept),
            HeaderName::AcceptCharset => AcceptCharset::parse(text).map(TypedHeader::AcceptCharset),
            HeaderName::AcceptEncoding => AcceptEncoding::parse(text).map(TypedHeader::AcceptEncoding),
            HeaderName::AcceptLanguage => AcceptLanguage::parse(text).map(TypedHeader::AcceptLanguage),
            HeaderName::CacheControl => CacheControl::parse(text).map(TypedHeader::CacheControl),
            HeaderName::ContentDisposition => ContentDisposition::parse(text).map(TypedHeader::ContentDisposition),
            HeaderName::ContentRange => ContentRange::parse(text).map(TypedHeader::ContentRange),
            HeaderName::ContentType => MediaType::parse(text).map(TypedHeader::ContentType),
            HeaderName::Cookie => ClientCookies::parse(text).map(TypedHeader::Cookie),
            HeaderName::ETag => ETag::parse(text).and_then(|etag| {
                if etag.is_wildcard() {
                    Err(Error::InvalidValue("ETag cannot be \"*\"".to_string()))
                } else {
                    Ok(TypedHeader::ETag(etag))
                }
            }),
            HeaderName::IfMatch => ETagList::parse(text).map(TypedHeader::IfMatch),
            HeaderName::IfNoneMatch => ETagList::parse(text).map(TypedHeader::IfNoneMatch),
            HeaderName::Link => Link::parse_list(text).map(TypedHeader::Link),
            HeaderName::Range => Range::parse(text).map(TypedHeader::Range),
            HeaderName::SetCookie => ServerCookie::parse(text).map(TypedHeader::SetCookie),
            HeaderName::Other(_) => Ok(TypedHeader::Other(name.clone(), text.to_string())),
        };
        if let Err(err) = &parsed {
            debug!(header = %name, error = %err, "header value rejected");
        }
        parsed
    }

    pub fn name(&self) -> HeaderName {
        match self {
            TypedHeader::Accept(_) => HeaderName::Accept,
            TypedHeader::AcceptCharset(_) => HeaderName::AcceptCharset,
            TypedHeader::AcceptEncoding(_) => HeaderName::AcceptEncoding,
            TypedHeader::AcceptLanguage(_) => HeaderName::AcceptLanguage,
            TypedHeader::CacheControl(_) => HeaderName::CacheControl,
            TypedHeader::ContentDisposition(_) => HeaderName::ContentDisposition,
            TypedHeader::ContentRange(_) => HeaderName::ContentRange,
            TypedHeader::ContentType(_) => HeaderName::ContentType,
            TypedHeader::Cookie(_) => HeaderName::Cookie,
            TypedHeader::ETag(_) => HeaderName::ETag,
            TypedHeader::IfMatch(_) => HeaderName::IfMatch,
            TypedHeader::IfNoneMatch(_) => HeaderName::IfNoneMatch,
            TypedHeader::Link(_) => HeaderName::Link,
            TypedHeader::Range(_) => HeaderName::Range,
            TypedHeader::SetCookie(_) => HeaderName::SetCookie,
            TypedHeader::Other(name, _) => name.clone(),
        }
    }

    /// The value as it would be written after `Name: `.
    pub fn to_header_text(&self) -> String {
        match self {
            TypedHeader::Accept(value) => value.to_header_text(),
            TypedHeader::AcceptCharset(value) => value.to_header_text(),
            TypedHeader::AcceptEncoding(value) => value.to_header_text(),
            TypedHeader::AcceptLanguage(value) => value.to_header_text(),
            TypedHeader::CacheControl(value) => value.to_header_text(),
            TypedHeader::ContentDisposition(value) => value.to_header_text(),
            TypedHeader::ContentRange(value) => value.to_header_text(),
            TypedHeader::ContentType(value) => value.to_header_text(),
            TypedHeader::Cookie(value) => value.to_header_text(),
            TypedHeader::ETag(value) => value.to_header_text(),
            TypedHeader::IfMatch(value) | TypedHeader::IfNoneMatch(value) => value.to_header_text(),
            TypedHeader::Link(links) => links
                .iter()
                .map(HeaderValue::to_header_text)
                .collect::<Vec<_>>()
                .join(", "),
            TypedHeader::Range(value) => value.to_header_text(),
            TypedHeader::SetCookie(value) => value.to_header_text(),
            TypedHeader::Other(_, text) => text.clone(),
        }
    }
}

impl fmt::Display for TypedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.to_header_text())
    }
}

impl TryFrom<Header> for TypedHeader {
    type Error = Error;

    fn try_from(header: Header) -> Result<Self> {
        TypedHeader::parse(&header.name, &header.value)
    }
}

impl From<TypedHeader> for Header {
    fn from(typed: TypedHeader) -> Self {
        Header::new(typed.name(), typed.to_header_text())
    }
}
