use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::parser::chars;

/// HTTP header names with a typed value in this crate.
///
/// Parsing ignores case; every other valid field name becomes [`HeaderName::Other`]
/// with its original spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeaderName {
    /// Accept: media types acceptable in the response
    Accept,
    /// Accept-Charset: charsets acceptable in the response
    AcceptCharset,
    /// Accept-Encoding: content codings acceptable in the response
    AcceptEncoding,
    /// Accept-Language: natural languages preferred in the response
    AcceptLanguage,
    /// Cache-Control: caching directives
    CacheControl,
    /// Content-Disposition: presentation and file name of a body part
    ContentDisposition,
    /// Content-Range: the part of the representation enclosed
    ContentRange,
    /// Content-Type: media type of the body
    ContentType,
    /// Cookie: cookies sent by the client
    Cookie,
    /// ETag: entity tag of the selected representation
    ETag,
    /// If-Match: precondition on current entity tags
    IfMatch,
    /// If-None-Match: precondition on absent entity tags
    IfNoneMatch,
    /// Link: typed links to related resources
    Link,
    /// Range: requested byte ranges
    Range,
    /// Set-Cookie: a cookie set by the server
    SetCookie,
    /// Any other header
    Other(String),
}

impl HeaderName {
    /// Returns the canonical name of the header
    pub fn as_str(&self) -> &str {
        match self {
            HeaderName::Accept => "Accept",
            HeaderName::AcceptCharset => "Accept-Charset",
            HeaderName::AcceptEncoding => "Accept-Encoding",
            HeaderName::AcceptLanguage => "Accept-Language",
            HeaderName::CacheControl => "Cache-Control",
            HeaderName::ContentDisposition => "Content-Disposition",
            HeaderName::ContentRange => "Content-Range",
            HeaderName::ContentType => "Content-Type",
            HeaderName::Cookie => "Cookie",
            HeaderName::ETag => "ETag",
            HeaderName::IfMatch => "If-Match",
            HeaderName::IfNoneMatch => "If-None-Match",
            HeaderName::Link => "Link",
            HeaderName::Range => "Range",
            HeaderName::SetCookie => "Set-Cookie",
            HeaderName::Other(name) => name,
        }
    }

    /// Whether the header is defined for requests. Unknown headers may appear anywhere.
    pub fn is_request(&self) -> bool {
        !matches!(
            self,
            HeaderName::ContentRange | HeaderName::ETag | HeaderName::SetCookie
        )
    }

    /// Whether the header is defined for responses.
    pub fn is_response(&self) -> bool {
        !matches!(
            self,
            HeaderName::Accept
                | HeaderName::AcceptCharset
                | HeaderName::AcceptEncoding
                | HeaderName::AcceptLanguage
                | HeaderName::Cookie
                | HeaderName::IfMatch
                | HeaderName::IfNoneMatch
                | HeaderName::Range
        )
    }

    /// Whether several field lines of this header may be combined into one with commas.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            HeaderName::Accept
                | HeaderName::AcceptCharset
                | HeaderName::AcceptEncoding
                | HeaderName::AcceptLanguage
                | HeaderName::CacheControl
                | HeaderName::IfMatch
                | HeaderName::IfNoneMatch
                | HeaderName::Link
        )
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "accept" => Ok(HeaderName::Accept),
            "accept-charset" => Ok(HeaderName::AcceptCharset),
            "accept-encoding" => Ok(HeaderName::AcceptEncoding),
            "accept-language" => Ok(HeaderName::AcceptLanguage),
            "cache-control" => Ok(HeaderName::CacheControl),
            "content-disposition" => Ok(HeaderName::ContentDisposition),
            "content-range" => Ok(HeaderName::ContentRange),
            "content-type" => Ok(HeaderName::ContentType),
            "cookie" => Ok(HeaderName::Cookie),
            "etag" => Ok(HeaderName::ETag),
            "if-match" => Ok(HeaderName::IfMatch),
            "if-none-match" => Ok(HeaderName::IfNoneMatch),
            "link" => Ok(HeaderName::Link),
            "range" => Ok(HeaderName::Range),
            "set-cookie" => Ok(HeaderName::SetCookie),
            "" => Err(Error::missing_value("header name", s, 0)),
            _ => match chars::RFC7230_TOKEN.first_invalid(s) {
                Some(position) => Err(Error::invalid_character(s, position)),
                None => Ok(HeaderName::Other(s.to_string())),
            },
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for HeaderName {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for HeaderName {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = <std::borrow::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
