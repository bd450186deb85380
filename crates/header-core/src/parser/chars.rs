//! Character classes used by the header grammars.
//!
//! Each class is a named [`CharPredicate`] so that error messages and debug output can say
//! which set a character failed to match. The sets follow RFC 2045, RFC 2046, RFC 5987,
//! RFC 6265 and RFC 7230/7232.

use std::fmt;

/// A named test over single characters.
#[derive(Clone, Copy)]
pub struct CharPredicate {
    name: &'static str,
    matcher: fn(char) -> bool,
}

impl CharPredicate {
    pub const fn new(name: &'static str, matcher: fn(char) -> bool) -> Self {
        CharPredicate { name, matcher }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn test(&self, c: char) -> bool {
        (self.matcher)(c)
    }

    /// True when `text` is non-empty and every character matches.
    pub fn test_all(&self, text: &str) -> bool {
        !text.is_empty() && text.chars().all(self.matcher)
    }

    /// Index (in characters) of the first character that does not match.
    pub fn first_invalid(&self, text: &str) -> Option<usize> {
        text.chars().position(|c| !self.test(c))
    }
}

impl fmt::Debug for CharPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for CharPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[inline]
fn is_ctl(c: char) -> bool {
    c < ' ' || c == '\u{7f}'
}

#[inline]
fn is_obs_text(c: char) -> bool {
    c >= '\u{80}'
}

fn is_rfc2045_token(c: char) -> bool {
    c.is_ascii()
        && !is_ctl(c)
        && !matches!(
            c,
            ' ' | '(' | ')' | '<' | '>' | '@' | ',' | ';' | ':' | '\\' | '"' | '/' | '[' | ']' | '?' | '='
        )
}

fn is_rfc7230_token(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~'
        )
}

fn is_ascii_printable(c: char) -> bool {
    (' '..='~').contains(&c)
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

// qdtext = HTAB / SP / %x21 / %x23-5B / %x5D-7E / obs-text
fn is_quoted_text(c: char) -> bool {
    c == '\t' || c == ' ' || c == '!' || ('#'..='[').contains(&c) || (']'..='~').contains(&c) || is_obs_text(c)
}

fn is_media_type_subtype(c: char) -> bool {
    c != '+' && is_rfc2045_token(c)
}

// attr-char = ALPHA / DIGIT / "!" / "#" / "$" / "&" / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
fn is_rfc5987_attr_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#' | '$' | '&' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~'
        )
}

fn is_rfc5987_ext_value_char(c: char) -> bool {
    is_rfc5987_attr_char(c) || c == '%' || c == '\''
}

// etagc = %x21 / %x23-7E / obs-text
fn is_etag_char(c: char) -> bool {
    c == '!' || ('#'..='~').contains(&c) || is_obs_text(c)
}

// bcharsnospace := DIGIT / ALPHA / "'" / "(" / ")" / "+" / "_" / "," / "-" / "." / "/" / ":" / "=" / "?"
fn is_boundary_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '\'' | '(' | ')' | '+' | '_' | ',' | '-' | '.' | '/' | ':' | '=' | '?' | ' '
        )
}

// cookie-octet = %x21 / %x23-2B / %x2D-3A / %x3C-5B / %x5D-7E
fn is_cookie_octet(c: char) -> bool {
    c == '!'
        || ('#'..='+').contains(&c)
        || ('-'..=':').contains(&c)
        || ('<'..='[').contains(&c)
        || (']'..='~').contains(&c)
}

fn is_link_url(c: char) -> bool {
    is_ascii_printable(c) && !matches!(c, ' ' | '<' | '>' | '"')
}

fn is_language_tag(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// RFC 2045 token: any ASCII except SPACE, CTLs and tspecials.
pub const RFC2045_TOKEN: CharPredicate = CharPredicate::new("RFC2045 token", is_rfc2045_token);

/// RFC 7230 `tchar`.
pub const RFC7230_TOKEN: CharPredicate = CharPredicate::new("RFC7230 token", is_rfc7230_token);

pub const ASCII_PRINTABLE: CharPredicate = CharPredicate::new("ASCII printable", is_ascii_printable);

pub const WHITESPACE: CharPredicate = CharPredicate::new("whitespace", is_whitespace);

pub const DIGIT: CharPredicate = CharPredicate::new("digit", is_digit);

/// Characters allowed unescaped inside a quoted string.
pub const QUOTED_TEXT: CharPredicate = CharPredicate::new("quoted text", is_quoted_text);

pub const MEDIA_TYPE_TYPE: CharPredicate = CharPredicate::new("media type type", is_rfc2045_token);

/// Subtype characters: a token without `+`, which starts the suffix.
pub const MEDIA_TYPE_SUBTYPE: CharPredicate = CharPredicate::new("media type subtype", is_media_type_subtype);

pub const MEDIA_TYPE_SUFFIX: CharPredicate = CharPredicate::new("media type suffix", is_rfc2045_token);

pub const RFC5987_ATTR_CHAR: CharPredicate = CharPredicate::new("RFC5987 attr-char", is_rfc5987_attr_char);

/// Everything that may appear in an unquoted RFC 5987 `ext-value`.
pub const RFC5987_EXT_VALUE: CharPredicate = CharPredicate::new("RFC5987 ext-value", is_rfc5987_ext_value_char);

pub const ETAG_CHAR: CharPredicate = CharPredicate::new("etag", is_etag_char);

pub const BOUNDARY_CHAR: CharPredicate = CharPredicate::new("boundary", is_boundary_char);

pub const COOKIE_OCTET: CharPredicate = CharPredicate::new("cookie-octet", is_cookie_octet);

pub const LINK_URL: CharPredicate = CharPredicate::new("link url", is_link_url);

pub const LANGUAGE_TAG: CharPredicate = CharPredicate::new("language tag", is_language_tag);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc2045_token() {
        assert!(RFC2045_TOKEN.test_all("text"));
        assert!(RFC2045_TOKEN.test_all("filename*"));
        assert!(RFC2045_TOKEN.test_all("vnd.api+json"));
        assert!(!RFC2045_TOKEN.test_all("a b"));
        assert!(!RFC2045_TOKEN.test_all("a/b"));
        assert!(!RFC2045_TOKEN.test_all(""));
    }

    #[test]
    fn test_subtype_excludes_plus() {
        assert!(!MEDIA_TYPE_SUBTYPE.test('+'));
        assert!(MEDIA_TYPE_SUFFIX.test('+'));
        assert!(!MEDIA_TYPE_SUFFIX.test(';'));
    }

    #[test]
    fn test_first_invalid() {
        assert_eq!(RFC7230_TOKEN.first_invalid("gzip"), None);
        assert_eq!(RFC7230_TOKEN.first_invalid("gz{p"), Some(2));
    }

    #[test]
    fn test_quoted_text_excludes_quote_and_backslash() {
        assert!(QUOTED_TEXT.test(' '));
        assert!(!QUOTED_TEXT.test('"'));
        assert!(!QUOTED_TEXT.test('\\'));
        assert!(QUOTED_TEXT.test('é'));
    }

    #[test]
    fn test_cookie_octet() {
        assert!(COOKIE_OCTET.test_all("abc123-_!"));
        assert!(!COOKIE_OCTET.test(';'));
        assert!(!COOKIE_OCTET.test(','));
        assert!(!COOKIE_OCTET.test(' '));
    }
}
