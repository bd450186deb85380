//! RFC 5987 extended parameter values: `charset'language'percent-encoded-value`.

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, satisfy},
    combinator::{all_consuming, recognize},
    multi::many0,
    sequence::{terminated, tuple},
    IResult,
};
use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{Error, Result};
use crate::parser::{chars, nom_error};
use crate::types::charset::CharsetName;
use crate::types::language::LanguageTag;

// Everything outside attr-char is percent-encoded
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Text carried in a `name*=` parameter, stored decoded.
///
/// Only the charsets every recipient must support are accepted: UTF-8, ISO-8859-1 and
/// US-ASCII.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedText {
    charset: CharsetName,
    language: Option<LanguageTag>,
    value: String,
}

fn mime_charset(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || "!#$%&+-^_`{}~".contains(c))(input)
}

fn pct_encoded(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        char('%'),
        satisfy(|c| c.is_ascii_hexdigit()),
        satisfy(|c| c.is_ascii_hexdigit()),
    )))(input)
}

fn value_chars(input: &str) -> IResult<&str, &str> {
    recognize(many0(alt((
        take_while1(|c| chars::RFC5987_ATTR_CHAR.test(c)),
        pct_encoded,
    ))))(input)
}

fn ext_value(input: &str) -> IResult<&str, (&str, &str, &str)> {
    all_consuming(tuple((
        terminated(mime_charset, char('\'')),
        terminated(take_while(|c| chars::LANGUAGE_TAG.test(c)), char('\'')),
        value_chars,
    )))(input)
}

impl EncodedText {
    /// UTF-8 text without a language.
    pub fn new(value: impl Into<String>) -> Self {
        EncodedText {
            charset: CharsetName::UTF_8,
            language: None,
            value: value.into(),
        }
    }

    pub fn with_charset(
        charset: CharsetName,
        language: Option<LanguageTag>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let value = value.into();
        let representable = match Supported::of(&charset)? {
            Supported::Utf8 => true,
            Supported::Latin1 => value.chars().all(|c| (c as u32) <= 0xFF),
            Supported::Ascii => value.is_ascii(),
        };
        if !representable {
            return Err(Error::InvalidValue(format!("{value:?} cannot be encoded as {charset}")));
        }
        Ok(EncodedText {
            charset,
            language,
            value,
        })
    }

    /// Same charset and language with another value taken from this one, so it stays
    /// representable.
    pub(crate) fn with_substring(&self, value: &str) -> Self {
        EncodedText {
            charset: self.charset.clone(),
            language: self.language.clone(),
            value: value.to_string(),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let (_, (charset, language, encoded)) =
            ext_value(text).map_err(|e| nom_error(text, e, "encoded text"))?;

        let charset = CharsetName::parse(charset)?;
        let language = match language {
            "" => None,
            language => Some(LanguageTag::parse(language)?),
        };
        let decoded = percent_decode_str(encoded);
        let value = match Supported::of(&charset)? {
            Supported::Utf8 => decoded
                .decode_utf8()
                .map_err(|e| Error::wrap(format!("Invalid UTF-8 in {text:?}"), e))?
                .into_owned(),
            Supported::Latin1 => decoded.map(char::from).collect(),
            Supported::Ascii => {
                let bytes: Vec<u8> = decoded.collect();
                if !bytes.is_ascii() {
                    return Err(Error::InvalidValue(format!("Non ASCII byte in {text:?}")));
                }
                bytes.into_iter().map(char::from).collect()
            }
        };

        Ok(EncodedText {
            charset,
            language,
            value,
        })
    }

    /// The header form, `charset'language'percent-encoded`.
    pub fn encode(&self) -> String {
        let bytes: Vec<u8> = if self.charset == CharsetName::UTF_8 {
            self.value.as_bytes().to_vec()
        } else {
            // ISO-8859-1 and US-ASCII were range checked on construction
            self.value.chars().map(|c| c as u32 as u8).collect()
        };
        format!(
            "{}'{}'{}",
            self.charset,
            self.language.as_ref().map(LanguageTag::value).unwrap_or(""),
            percent_encode(&bytes, ATTR_CHAR)
        )
    }

    /// The decoded text.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn charset(&self) -> &CharsetName {
        &self.charset
    }

    pub fn language(&self) -> Option<&LanguageTag> {
        self.language.as_ref()
    }
}

enum Supported {
    Utf8,
    Latin1,
    Ascii,
}

impl Supported {
    fn of(charset: &CharsetName) -> Result<Supported> {
        if *charset == CharsetName::UTF_8 {
            Ok(Supported::Utf8)
        } else if *charset == CharsetName::ISO_8859_1 {
            Ok(Supported::Latin1)
        } else if *charset == CharsetName::US_ASCII {
            Ok(Supported::Ascii)
        } else {
            Err(Error::InvalidValue(format!("Unsupported charset {charset} for encoded text")))
        }
    }
}

impl fmt::Display for EncodedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

text_value_impls!(EncodedText);
