//! Text handlers: quoted strings, tokens, and the text based value types.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::handler::HeaderHandler;
use crate::parser::chars::{self, CharPredicate};
use crate::parser::cursor::HeaderParser;
use crate::types::boundary::MediaTypeBoundary;
use crate::types::charset::CharsetName;
use crate::types::encoded_text::EncodedText;
use crate::types::language::LanguageTag;
use crate::types::media_type::MediaType;

/// Quoted string with backslash escapes.
pub const QUOTED_STRING: QuotedStringHandler = QuotedStringHandler { escaping: true };

/// An RFC 2045 token.
pub const TOKEN: UnquotedStringHandler = UnquotedStringHandler {
    predicate: chars::RFC2045_TOKEN,
};

/// A token, or a quoted string when the value needs it.
pub const QUOTED_UNQUOTED_STRING: QuotedUnquotedStringHandler = QuotedUnquotedStringHandler {
    predicate: chars::RFC2045_TOKEN,
};

/// A `"`-delimited string. Parsing strips the quotes and resolves escapes.
#[derive(Debug, Clone, Copy)]
pub struct QuotedStringHandler {
    pub escaping: bool,
}

impl HeaderHandler for QuotedStringHandler {
    type Value = String;

    fn parse(&self, text: &str) -> Result<String> {
        let mut parser = HeaderParser::new(text);
        if parser.character() != Some('"') {
            return Err(parser.invalid_character());
        }
        let raw = parser.quoted_text(chars::QUOTED_TEXT, self.escaping)?;
        if parser.has_more_characters() {
            return Err(parser.invalid_character());
        }
        Ok(unescape(&raw[1..raw.len() - 1]))
    }

    fn check(&self, value: &String) -> Result<()> {
        for c in value.chars() {
            let allowed = if c == '"' || c == '\\' {
                self.escaping
            } else {
                chars::QUOTED_TEXT.test(c)
            };
            if !allowed {
                return Err(Error::InvalidValue(format!(
                    "{c:?} is not allowed in quoted string {value:?}"
                )));
            }
        }
        Ok(())
    }

    fn to_text(&self, value: &String) -> Result<String> {
        self.check(value)?;
        let mut text = String::with_capacity(value.len() + 2);
        text.push('"');
        for c in value.chars() {
            if c == '"' || c == '\\' {
                text.push('\\');
            }
            text.push(c);
        }
        text.push('"');
        Ok(text)
    }
}

/// Text restricted to one character class, written without quotes.
#[derive(Debug, Clone, Copy)]
pub struct UnquotedStringHandler {
    pub predicate: CharPredicate,
}

impl HeaderHandler for UnquotedStringHandler {
    type Value = String;

    fn parse(&self, text: &str) -> Result<String> {
        check_chars(self.predicate, text)?;
        Ok(text.to_string())
    }

    fn check(&self, value: &String) -> Result<()> {
        check_chars(self.predicate, value)
    }

    fn to_text(&self, value: &String) -> Result<String> {
        self.check(value)?;
        Ok(value.clone())
    }
}

/// Accepts either form; writes a token when possible and a quoted string otherwise.
#[derive(Debug, Clone, Copy)]
pub struct QuotedUnquotedStringHandler {
    pub predicate: CharPredicate,
}

impl HeaderHandler for QuotedUnquotedStringHandler {
    type Value = String;

    fn parse(&self, text: &str) -> Result<String> {
        if text.starts_with('"') {
            QUOTED_STRING.parse(text)
        } else {
            check_chars(self.predicate, text)?;
            Ok(text.to_string())
        }
    }

    fn check(&self, value: &String) -> Result<()> {
        if self.predicate.test_all(value) {
            Ok(())
        } else {
            QUOTED_STRING.check(value)
        }
    }

    fn to_text(&self, value: &String) -> Result<String> {
        if self.predicate.test_all(value) {
            Ok(value.clone())
        } else {
            QUOTED_STRING.to_text(value)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CharsetNameHandler;

impl HeaderHandler for CharsetNameHandler {
    type Value = CharsetName;

    fn parse(&self, text: &str) -> Result<CharsetName> {
        CharsetName::parse(&unquote_or_raw(text)?)
    }

    fn to_text(&self, value: &CharsetName) -> Result<String> {
        Ok(value.to_string())
    }
}

/// A media type as a parameter value, always written quoted.
#[derive(Debug, Clone, Copy)]
pub struct MediaTypeHandler;

impl HeaderHandler for MediaTypeHandler {
    type Value = MediaType;

    fn parse(&self, text: &str) -> Result<MediaType> {
        MediaType::parse(&unquote_or_raw(text)?)
    }

    fn to_text(&self, value: &MediaType) -> Result<String> {
        QUOTED_STRING.to_text(&value.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoundaryHandler;

impl HeaderHandler for BoundaryHandler {
    type Value = MediaTypeBoundary;

    fn parse(&self, text: &str) -> Result<MediaTypeBoundary> {
        MediaTypeBoundary::new(&unquote_or_raw(text)?)
    }

    fn check(&self, value: &MediaTypeBoundary) -> Result<()> {
        MediaTypeBoundary::new(value.value()).map(|_| ())
    }

    fn to_text(&self, value: &MediaTypeBoundary) -> Result<String> {
        QUOTED_UNQUOTED_STRING.to_text(&value.value().to_string())
    }
}

/// RFC 5987 `charset'language'value`, never quoted.
#[derive(Debug, Clone, Copy)]
pub struct EncodedTextHandler;

impl HeaderHandler for EncodedTextHandler {
    type Value = EncodedText;

    fn parse(&self, text: &str) -> Result<EncodedText> {
        EncodedText::parse(text)
    }

    fn to_text(&self, value: &EncodedText) -> Result<String> {
        Ok(value.encode())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LanguageTagHandler;

impl HeaderHandler for LanguageTagHandler {
    type Value = LanguageTag;

    fn parse(&self, text: &str) -> Result<LanguageTag> {
        LanguageTag::parse(&unquote_or_raw(text)?)
    }

    fn to_text(&self, value: &LanguageTag) -> Result<String> {
        Ok(value.to_string())
    }
}

/// Strips quotes and escapes when `text` is quoted; otherwise returns it unchanged.
pub(crate) fn unquote_or_raw(text: &str) -> Result<Cow<'_, str>> {
    if text.starts_with('"') {
        QUOTED_STRING.parse(text).map(Cow::Owned)
    } else {
        Ok(Cow::Borrowed(text))
    }
}

fn unescape(quoted: &str) -> String {
    let mut value = String::with_capacity(quoted.len());
    let mut escaped = false;
    for c in quoted.chars() {
        if escaped || c != '\\' {
            value.push(c);
            escaped = false;
        } else {
            escaped = true;
        }
    }
    value
}

fn check_chars(predicate: CharPredicate, text: &str) -> Result<()> {
    match predicate.first_invalid(text) {
        _ if text.is_empty() => Err(Error::missing_value(predicate.name(), text, 0)),
        Some(position) => Err(Error::invalid_character(text, position)),
        None => Ok(()),
    }
}
