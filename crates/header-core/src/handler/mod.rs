//! Value handlers: bidirectional codecs between header text and typed values.
//!
//! A [`HeaderHandler`] parses text into a value, checks values built in code and formats
//! them back. Parameter names hold their handler as a `&'static dyn ParameterValueHandler`,
//! the type erased view that works on [`ParameterValue`] and reports a type error when a
//! value of the wrong kind is handed to it.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::types::boundary::MediaTypeBoundary;
use crate::types::charset::CharsetName;
use crate::types::encoded_text::EncodedText;
use crate::types::language::LanguageTag;
use crate::types::media_type::MediaType;
use crate::types::quality::QualityFactor;

pub mod date;
pub mod extension;
pub mod numeric;
pub mod string;

pub use date::DateHandler;
pub use extension::FirstOfHandler;
pub use numeric::{LongHandler, QualityFactorHandler};
pub use string::{
    BoundaryHandler, CharsetNameHandler, EncodedTextHandler, LanguageTagHandler, MediaTypeHandler,
    QuotedStringHandler, QuotedUnquotedStringHandler, UnquotedStringHandler,
};

/// Parses, validates and formats one kind of value.
pub trait HeaderHandler: fmt::Debug + Send + Sync {
    type Value;

    /// Parses raw header text. Parameter values arrive exactly as written, quotes included.
    fn parse(&self, text: &str) -> Result<Self::Value>;

    /// Validates a value that did not come from [`parse`](Self::parse).
    fn check(&self, value: &Self::Value) -> Result<()> {
        let _ = value;
        Ok(())
    }

    /// Formats a value as header text.
    fn to_text(&self, value: &Self::Value) -> Result<String>;
}

/// The value of a header parameter or Cache-Control directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    Text(String),
    Long(u64),
    QualityFactor(QualityFactor),
    Charset(CharsetName),
    EncodedText(EncodedText),
    Date(DateTime<Utc>),
    MediaType(MediaType),
    Boundary(MediaTypeBoundary),
    LanguageTag(LanguageTag),
}

impl ParameterValue {
    /// Name of the variant, used in type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ParameterValue::Text(_) => String::KIND,
            ParameterValue::Long(_) => u64::KIND,
            ParameterValue::QualityFactor(_) => QualityFactor::KIND,
            ParameterValue::Charset(_) => CharsetName::KIND,
            ParameterValue::EncodedText(_) => EncodedText::KIND,
            ParameterValue::Date(_) => <DateTime<Utc> as ParameterKind>::KIND,
            ParameterValue::MediaType(_) => MediaType::KIND,
            ParameterValue::Boundary(_) => MediaTypeBoundary::KIND,
            ParameterValue::LanguageTag(_) => LanguageTag::KIND,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParameterValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<u64> {
        match self {
            ParameterValue::Long(value) => Some(*value),
            _ => None,
        }
    }
}

/// A Rust type that is stored in one [`ParameterValue`] variant.
pub trait ParameterKind: Clone + Sized {
    const KIND: &'static str;

    fn into_parameter_value(self) -> ParameterValue;

    fn from_parameter_value(value: &ParameterValue) -> Option<&Self>;
}

macro_rules! parameter_kind {
    ($type:ty, $variant:ident, $kind:expr) => {
        impl ParameterKind for $type {
            const KIND: &'static str = $kind;

            fn into_parameter_value(self) -> ParameterValue {
                ParameterValue::$variant(self)
            }

            fn from_parameter_value(value: &ParameterValue) -> Option<&Self> {
                match value {
                    ParameterValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

parameter_kind!(String, Text, "text");
parameter_kind!(u64, Long, "long");
parameter_kind!(QualityFactor, QualityFactor, "quality factor");
parameter_kind!(CharsetName, Charset, "charset");
parameter_kind!(EncodedText, EncodedText, "encoded text");
parameter_kind!(DateTime<Utc>, Date, "date");
parameter_kind!(MediaType, MediaType, "media type");
parameter_kind!(MediaTypeBoundary, Boundary, "boundary");
parameter_kind!(LanguageTag, LanguageTag, "language tag");

/// Any parameter value; used by handlers that accept several kinds.
impl ParameterKind for ParameterValue {
    const KIND: &'static str = "any";

    fn into_parameter_value(self) -> ParameterValue {
        self
    }

    fn from_parameter_value(value: &ParameterValue) -> Option<&Self> {
        Some(value)
    }
}

/// Object safe view of a [`HeaderHandler`] over [`ParameterValue`].
pub trait ParameterValueHandler: fmt::Debug + Send + Sync {
    /// The kind of value this handler produces.
    fn kind(&self) -> &'static str;

    fn parse_value(&self, text: &str) -> Result<ParameterValue>;

    /// Checks both the variant and the value itself. `name` is only used in errors.
    fn check_value(&self, name: &str, value: &ParameterValue) -> Result<()>;

    fn value_to_text(&self, name: &str, value: &ParameterValue) -> Result<String>;
}

impl<H> ParameterValueHandler for H
where
    H: HeaderHandler,
    H::Value: ParameterKind,
{
    fn kind(&self) -> &'static str {
        H::Value::KIND
    }

    fn parse_value(&self, text: &str) -> Result<ParameterValue> {
        self.parse(text).map(ParameterKind::into_parameter_value)
    }

    fn check_value(&self, name: &str, value: &ParameterValue) -> Result<()> {
        self.check(downcast::<H::Value>(name, value)?)
    }

    fn value_to_text(&self, name: &str, value: &ParameterValue) -> Result<String> {
        self.to_text(downcast::<H::Value>(name, value)?)
    }
}

fn downcast<'a, V: ParameterKind>(name: &str, value: &'a ParameterValue) -> Result<&'a V> {
    V::from_parameter_value(value).ok_or_else(|| Error::InvalidParameterType {
        name: name.to_string(),
        expected: V::KIND,
        found: value.kind(),
    })
}
