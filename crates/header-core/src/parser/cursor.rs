//! Character cursor and hook-driven tokenizer shared by every header grammar.
//!
//! [`parse_with`] walks the complete header text and classifies the character under the
//! cursor. Each class is handed to a [`HeaderGrammar`] hook which consumes what it
//! recognises and updates its own state. Grammars override only the hooks their header
//! allows; the default for everything except whitespace is an invalid character error.
//!
//! | character            | hook                    |
//! |----------------------|-------------------------|
//! | SP, HTAB, CR, LF     | `whitespace`            |
//! | `(`                  | `comment`               |
//! | `"`                  | `quoted_text`           |
//! | `*`                  | `wildcard`              |
//! | `/`                  | `slash`                 |
//! | `=`                  | `key_value_separator`   |
//! | `;`                  | `parameter_separator`   |
//! | `,`                  | `multi_value_separator` |
//! | anything else        | `token`                 |

use crate::error::{Error, Result};
use crate::parser::chars::{self, CharPredicate};

/// A cursor over a complete header value.
///
/// Positions reported to callers are 0-based character offsets. Internally the cursor
/// keeps a byte offset so slicing stays cheap.
#[derive(Debug, Clone)]
pub struct HeaderParser<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> HeaderParser<'a> {
    pub fn new(text: &'a str) -> Self {
        HeaderParser { text, offset: 0 }
    }

    /// The complete text being parsed.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The 0-based character position of the cursor.
    pub fn position(&self) -> usize {
        self.text[..self.offset].chars().count()
    }

    pub(crate) fn byte_offset(&self) -> usize {
        self.offset
    }

    pub fn has_more_characters(&self) -> bool {
        self.offset < self.text.len()
    }

    /// Peeks at the character under the cursor.
    pub fn character(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    /// Moves past the character under the cursor, if any.
    pub fn advance(&mut self) {
        if let Some(c) = self.character() {
            self.offset += c.len_utf8();
        }
    }

    /// Text from the cursor to the end.
    pub fn remaining(&self) -> &'a str {
        &self.text[self.offset..]
    }

    /// Greedily consumes characters matching `predicate`.
    ///
    /// The returned slice may be empty; the cursor is left on the first character that
    /// did not match.
    pub fn token(&mut self, predicate: CharPredicate) -> &'a str {
        let start = self.offset;
        while let Some(c) = self.character() {
            if !predicate.test(c) {
                break;
            }
            self.offset += c.len_utf8();
        }
        &self.text[start..self.offset]
    }

    /// Like [`token`](Self::token) but an empty result is an error: an invalid character
    /// when something else sits under the cursor, or a missing value at the end of text.
    pub fn required_token(&mut self, predicate: CharPredicate, what: &str) -> Result<&'a str> {
        let token = self.token(predicate);
        if token.is_empty() {
            return Err(if self.has_more_characters() {
                self.invalid_character()
            } else {
                self.missing_value(what)
            });
        }
        Ok(token)
    }

    pub fn skip_whitespace(&mut self) {
        self.token(chars::WHITESPACE);
    }

    /// Consumes `expected` or fails at the cursor.
    pub fn expect(&mut self, expected: char) -> Result<()> {
        match self.character() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(_) => Err(self.invalid_character()),
            None => Err(self.missing_value(format!("{expected:?}"))),
        }
    }

    /// Consumes a quoted string starting at the `"` under the cursor and returns it raw,
    /// including both quotes and any escapes.
    ///
    /// Unescaped characters must satisfy `predicate`. When `escaping` is set a backslash
    /// escapes the following character.
    pub fn quoted_text(&mut self, predicate: CharPredicate, escaping: bool) -> Result<&'a str> {
        let start = self.offset;
        self.expect('"')?;

        loop {
            let c = match self.character() {
                Some(c) => c,
                None => return Err(self.unterminated("'\"'")),
            };
            match c {
                '"' => {
                    self.advance();
                    return Ok(&self.text[start..self.offset]);
                }
                '\\' if escaping => {
                    self.advance();
                    match self.character() {
                        Some(escaped) if escaped == '\t' || !escaped.is_control() => self.advance(),
                        Some(_) => return Err(self.invalid_character()),
                        None => return Err(self.unterminated("'\"'")),
                    }
                }
                c if predicate.test(c) => self.advance(),
                _ => return Err(self.invalid_character()),
            }
        }
    }

    /// Consumes a possibly nested comment starting at the `(` under the cursor and returns
    /// it raw, including the outer parentheses.
    pub fn comment(&mut self) -> Result<&'a str> {
        let start = self.offset;
        self.expect('(')?;
        let mut depth = 1usize;

        while depth > 0 {
            let c = match self.character() {
                Some(c) => c,
                None => return Err(self.unterminated("')'")),
            };
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                '\\' => {
                    self.advance();
                    if !self.has_more_characters() {
                        return Err(self.unterminated("')'"));
                    }
                }
                c if c == '\t' || !c.is_control() => {}
                _ => return Err(self.invalid_character()),
            }
            self.advance();
        }
        Ok(&self.text[start..self.offset])
    }

    /// An invalid character error for the character under the cursor.
    pub fn invalid_character(&self) -> Error {
        if self.has_more_characters() {
            Error::invalid_character(self.text, self.position())
        } else {
            self.missing_value("value")
        }
    }

    /// A missing value error positioned at the cursor.
    pub fn missing_value(&self, what: impl Into<String>) -> Error {
        Error::missing_value(what, self.text, self.position())
    }

    fn unterminated(&self, what: &'static str) -> Error {
        Error::unterminated(what, self.text, self.position())
    }
}

/// Hooks invoked by [`parse_with`] for each recognised construct.
///
/// Every hook receives the cursor positioned on the character that selected it and must
/// consume at least one character or return an error.
pub trait HeaderGrammar {
    fn whitespace(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        parser.skip_whitespace();
        Ok(())
    }

    fn comment(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        Err(parser.invalid_character())
    }

    fn quoted_text(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        Err(parser.invalid_character())
    }

    fn wildcard(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        Err(parser.invalid_character())
    }

    fn slash(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        Err(parser.invalid_character())
    }

    fn key_value_separator(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        Err(parser.invalid_character())
    }

    fn parameter_separator(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        Err(parser.invalid_character())
    }

    fn multi_value_separator(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        Err(parser.invalid_character())
    }

    fn token(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        Err(parser.invalid_character())
    }

    /// Called once after the last character; completes or rejects pending state.
    fn end_of_text(&mut self, parser: &mut HeaderParser<'_>) -> Result<()>;

    /// The error raised when the grammar's primary value is absent.
    fn missing_value(&self, parser: &HeaderParser<'_>) -> Error {
        parser.missing_value("value")
    }
}

/// Runs `grammar` over the whole of `text`.
pub fn parse_with<G>(text: &str, grammar: &mut G) -> Result<()>
where
    G: HeaderGrammar + ?Sized,
{
    let mut parser = HeaderParser::new(text);

    while let Some(c) = parser.character() {
        let before = parser.byte_offset();
        match c {
            ' ' | '\t' | '\r' | '\n' => grammar.whitespace(&mut parser)?,
            '(' => grammar.comment(&mut parser)?,
            '"' => grammar.quoted_text(&mut parser)?,
            '*' => grammar.wildcard(&mut parser)?,
            '/' => grammar.slash(&mut parser)?,
            '=' => grammar.key_value_separator(&mut parser)?,
            ';' => grammar.parameter_separator(&mut parser)?,
            ',' => grammar.multi_value_separator(&mut parser)?,
            _ => grammar.token(&mut parser)?,
        }
        // a hook that consumed nothing would loop forever
        if parser.byte_offset() == before {
            return Err(parser.invalid_character());
        }
    }

    grammar.end_of_text(&mut parser)
}
