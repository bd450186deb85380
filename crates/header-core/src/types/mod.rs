//! # HTTP Header Value Types
//!
//! Typed values for HTTP headers, each parsed from and formatted back to header text.
//!
//! ## Module Structure
//!
//! ### Shared building blocks
//!
//! - [`HeaderValue`] / [`HeaderValueWithParameters`] - traits every header value implements
//! - [`ParameterName`], [`HeaderParameterName`], [`ParameterMap`] - `;name=value` parameters
//! - [`QualityFactor`] - `q` weights and the stable quality sort
//! - [`CharsetName`], [`LanguageTag`], [`EncodedText`] - values carried inside parameters
//!
//! ### Content negotiation
//!
//! - [`MediaType`] - Content-Type, with wildcard and suffix matching
//! - [`Accept`], [`AcceptCharset`], [`AcceptEncoding`], [`AcceptLanguage`]
//!
//! ### Other headers
//!
//! - [`CacheControl`] - Cache-Control directives
//! - [`ContentDisposition`] - inline/attachment/form-data and file names
//! - [`ETag`] / [`ETagList`] - ETag, If-Match, If-None-Match
//! - [`Link`] - typed links
//! - [`ClientCookies`] / [`ServerCookie`] - Cookie and Set-Cookie
//! - [`Range`] / [`ContentRange`] - partial content
//! - [`MediaTypeBoundary`] - multipart boundaries
//!
//! ### Dispatch
//!
//! - [`HeaderName`] and [`TypedHeader`] - parse a value by header name

pub mod accept;
pub mod accept_charset;
pub mod accept_encoding;
pub mod accept_language;
pub mod boundary;
pub mod cache_control;
pub mod charset;
pub mod content_disposition;
pub mod cookie;
pub mod encoded_text;
pub mod etag;
pub mod header_value;
pub mod headers;
pub mod language;
pub mod link;
pub mod media_type;
pub mod param;
pub mod quality;
pub mod range;

pub use accept::Accept;
pub use accept_charset::{AcceptCharset, AcceptCharsetValue};
pub use accept_encoding::{AcceptEncoding, AcceptEncodingValue};
pub use accept_language::{AcceptLanguage, AcceptLanguageValue};
pub use boundary::MediaTypeBoundary;
pub use cache_control::{CacheControl, CacheControlDirective, CacheControlDirectiveName, DirectiveArgument};
pub use charset::CharsetName;
pub use content_disposition::{ContentDisposition, ContentDispositionFileName, ContentDispositionType};
pub use cookie::{ClientCookie, ClientCookies, SameSite, ServerCookie};
pub use encoded_text::EncodedText;
pub use etag::{ETag, ETagList, Validator};
pub use header_value::{HeaderValue, HeaderValueWithParameters};
pub use headers::{Header, HeaderName, TypedHeader};
pub use language::LanguageTag;
pub use link::Link;
pub use media_type::MediaType;
pub use param::{HeaderParameterName, ParameterMap, ParameterName, ParameterRegistry};
pub use quality::{compare_quality_factors, sort_by_quality_factor, HasQualityFactor, QualityFactor};
pub use range::{ContentRange, Range, RangeSpec};
