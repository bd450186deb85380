//! Typed HTTP header values
//!
//! This crate parses HTTP header text into typed values and formats them back: media
//! types with their parameters, the Accept family with quality factor ordering,
//! Cache-Control, Content-Disposition, ETag, Link, cookies and byte ranges.
//!
//! - [`parser`] holds the character-level tokenizer and the parameter-aware parser
//! - [`handler`] holds the codecs that turn parameter text into typed values
//! - [`types`] holds one module per header
//!
//! ```rust
//! use hval_header_core::prelude::*;
//!
//! let content_type = MediaType::parse("text/html; charset=utf-8").unwrap();
//! assert_eq!(content_type.charset(), Some(&CharsetName::UTF_8));
//!
//! let accept = Accept::parse("application/json, text/*;q=0.5").unwrap();
//! assert!(accept.test(&content_type));
//! ```

#[macro_use]
mod macros;

pub mod error;
pub mod handler;
pub mod parser;
pub mod types;

// Re-export key public items
pub use error::{Error, Result};
pub use types::{
    Accept, AcceptCharset, AcceptEncoding, AcceptLanguage, CacheControl, CharsetName, ClientCookies,
    ContentDisposition, ContentRange, ETag, Header, HeaderName, HeaderValue, HeaderValueWithParameters,
    Link, MediaType, MediaTypeBoundary, QualityFactor, Range, ServerCookie, TypedHeader,
};

/// Re-export of common types and functions
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        Accept, AcceptCharset, AcceptEncoding, AcceptLanguage, CacheControl, CharsetName, ClientCookies,
        ContentDisposition, ContentRange, ETag, HasQualityFactor, Header, HeaderName, HeaderParameterName,
        HeaderValue, HeaderValueWithParameters, LanguageTag, Link, MediaType, MediaTypeBoundary, ParameterMap,
        QualityFactor, Range, ServerCookie, TypedHeader,
    };
}
