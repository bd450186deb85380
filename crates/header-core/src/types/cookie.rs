//! # Cookie and Set-Cookie
//!
//! HTTP state management ([RFC 6265](https://datatracker.ietf.org/doc/html/rfc6265)).
//!
//! - [`ClientCookies`] is the `Cookie` request header: `name=value` pairs separated by `; `.
//! - [`ServerCookie`] is one `Set-Cookie` response header with its attributes.
//!
//! Cookie values are kept exactly as sent, including surrounding double quotes, since
//! RFC 6265 treats the quotes as part of the value. Attribute names are case-insensitive;
//! unknown attributes are kept verbatim as extensions.
//!
//! ## Example
//!
//! ```rust
//! use hval_header_core::types::cookie::{SameSite, ServerCookie};
//!
//! let cookie = ServerCookie::parse("id=a3fWa; Max-Age=2592000; Secure; HttpOnly; SameSite=Lax").unwrap();
//! assert_eq!(cookie.name(), "id");
//! assert_eq!(cookie.max_age(), Some(2592000));
//! assert!(cookie.is_secure() && cookie.is_http_only());
//! assert_eq!(cookie.same_site(), Some(SameSite::Lax));
//! ```

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{Error, Result};
use crate::handler::date::{format_http_date, parse_http_date};
use crate::parser::chars::{self, CharPredicate};
use crate::parser::cursor::HeaderParser;
use crate::types::header_value::HeaderValue;

// av-octet = %x20-3A / %x3C-7E
fn is_attribute_value(c: char) -> bool {
    c != ';' && (c == '\t' || !c.is_control())
}

const ATTRIBUTE_VALUE: CharPredicate = CharPredicate::new("cookie attribute value", is_attribute_value);

/// Reads a cookie value, either bare cookie-octets or the same enclosed in quotes.
fn cookie_value<'a>(parser: &mut HeaderParser<'a>) -> Result<&'a str> {
    if parser.character() == Some('"') {
        parser.quoted_text(chars::COOKIE_OCTET, false)
    } else {
        Ok(parser.token(chars::COOKIE_OCTET))
    }
}

fn read_pair<'a>(parser: &mut HeaderParser<'a>) -> Result<(&'a str, &'a str)> {
    parser.skip_whitespace();
    let name = parser.required_token(chars::RFC7230_TOKEN, "cookie name")?;
    parser.expect('=')?;
    let value = cookie_value(parser)?;
    parser.skip_whitespace();
    Ok((name, value))
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::missing_value("cookie name", name, 0));
    }
    match chars::RFC7230_TOKEN.first_invalid(name) {
        Some(position) => Err(Error::invalid_character(name, position)),
        None => Ok(()),
    }
}

fn check_value(value: &str) -> Result<()> {
    let inner = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value);
    match chars::COOKIE_OCTET.first_invalid(inner) {
        Some(position) => {
            let offset = if inner.len() == value.len() { 0 } else { 1 };
            Err(Error::invalid_character(value, position + offset))
        }
        None => Ok(()),
    }
}

/// One `name=value` pair sent by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCookie {
    name: String,
    value: String,
}

impl ClientCookie {
    pub fn new(name: &str, value: &str) -> Result<Self> {
        check_name(name)?;
        check_value(value)?;
        Ok(ClientCookie {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = HeaderParser::new(text);
        let (name, value) = read_pair(&mut parser)?;
        if parser.has_more_characters() {
            return Err(parser.invalid_character());
        }
        Ok(ClientCookie {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl HeaderValue for ClientCookie {
    fn to_header_text(&self) -> String {
        format!("{}={}", self.name, self.value)
    }

    fn is_request(&self) -> bool {
        true
    }

    fn is_response(&self) -> bool {
        false
    }
}

header_value_impls!(ClientCookie);

/// The `Cookie` request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCookies(Vec<ClientCookie>);

impl ClientCookies {
    pub fn new(cookies: Vec<ClientCookie>) -> Result<Self> {
        if cookies.is_empty() {
            return Err(Error::EmptyList("Cookie"));
        }
        Ok(ClientCookies(cookies))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = HeaderParser::new(text);
        let mut cookies = Vec::new();
        loop {
            let (name, value) = read_pair(&mut parser)?;
            cookies.push(ClientCookie {
                name: name.to_string(),
                value: value.to_string(),
            });
            if !parser.has_more_characters() {
                return Ok(ClientCookies(cookies));
            }
            parser.expect(';')?;
        }
    }

    pub fn cookies(&self) -> &[ClientCookie] {
        &self.0
    }

    /// The value of the first cookie called `name`; names are case-sensitive.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|cookie| cookie.name == name)
            .map(ClientCookie::value)
    }
}

impl HeaderValue for ClientCookies {
    fn to_header_text(&self) -> String {
        self.0
            .iter()
            .map(HeaderValue::to_header_text)
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn is_request(&self) -> bool {
        true
    }

    fn is_response(&self) -> bool {
        false
    }
}

header_value_impls!(ClientCookies);

/// The `SameSite` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn parse(text: &str) -> Result<Self> {
        match text.to_ascii_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" => Ok(SameSite::None),
            _ => Err(Error::InvalidValue(format!("Unknown SameSite value {text:?}"))),
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        })
    }
}

text_value_impls!(SameSite);

/// A cookie set by a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCookie {
    name: String,
    value: String,
    expires: Option<DateTime<Utc>>,
    max_age: Option<i64>,
    domain: Option<String>,
    path: Option<String>,
    secure: bool,
    http_only: bool,
    same_site: Option<SameSite>,
    extensions: Vec<String>,
}

impl ServerCookie {
    pub fn new(name: &str, value: &str) -> Result<Self> {
        check_name(name)?;
        check_value(value)?;
        Ok(Self::unchecked(name, value))
    }

    fn unchecked(name: &str, value: &str) -> Self {
        ServerCookie {
            name: name.to_string(),
            value: value.to_string(),
            expires: None,
            max_age: None,
            domain: None,
            path: None,
            secure: false,
            http_only: false,
            same_site: None,
            extensions: Vec::new(),
        }
    }

    /// A cookie that makes the client drop `name` right away.
    pub fn removal(name: &str) -> Result<Self> {
        Ok(Self::new(name, "")?.with_max_age(0))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = HeaderParser::new(text);
        let (name, value) = read_pair(&mut parser)?;
        let mut cookie = Self::unchecked(name, value);

        while parser.has_more_characters() {
            parser.expect(';')?;
            parser.skip_whitespace();
            let attribute = parser.required_token(chars::RFC7230_TOKEN, "cookie attribute")?;
            parser.skip_whitespace();
            let value = if parser.character() == Some('=') {
                parser.advance();
                parser.skip_whitespace();
                Some(parser.token(ATTRIBUTE_VALUE).trim_end())
            } else {
                None
            };
            cookie.apply_attribute(attribute, value)?;
        }
        Ok(cookie)
    }

    fn apply_attribute(&mut self, attribute: &str, value: Option<&str>) -> Result<()> {
        let text = value.unwrap_or_default();
        match attribute.to_ascii_lowercase().as_str() {
            "expires" => self.expires = Some(parse_http_date(text)?),
            "max-age" => self.max_age = Some(parse_max_age(text)?),
            "domain" => {
                let domain = text.trim_start_matches('.').to_ascii_lowercase();
                self.domain = (!domain.is_empty()).then_some(domain);
            }
            "path" => self.path = text.starts_with('/').then(|| text.to_string()),
            "secure" => self.secure = true,
            "httponly" => self.http_only = true,
            "samesite" => self.same_site = Some(SameSite::parse(text)?),
            _ => self.extensions.push(match value {
                Some(value) => format!("{attribute}={value}"),
                None => attribute.to_string(),
            }),
        }
        Ok(())
    }

    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn with_domain(mut self, domain: &str) -> Result<Self> {
        let domain = domain.trim_start_matches('.');
        if let Some(position) = ATTRIBUTE_VALUE.first_invalid(domain) {
            return Err(Error::invalid_character(domain, position));
        }
        self.domain = Some(domain.to_ascii_lowercase());
        Ok(self)
    }

    pub fn with_path(mut self, path: &str) -> Result<Self> {
        if !path.starts_with('/') {
            return Err(Error::InvalidValue(format!("Cookie path {path:?} must start with '/'")));
        }
        if let Some(position) = ATTRIBUTE_VALUE.first_invalid(path) {
            return Err(Error::invalid_character(path, position));
        }
        self.path = Some(path.to_string());
        Ok(self)
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires(&self) -> Option<&DateTime<Utc>> {
        self.expires.as_ref()
    }

    pub fn max_age(&self) -> Option<i64> {
        self.max_age
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn is_http_only(&self) -> bool {
        self.http_only
    }

    pub fn same_site(&self) -> Option<SameSite> {
        self.same_site
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// When the cookie expires for a client that received it at `received`. `Max-Age`
    /// wins over `Expires`; `None` means a session cookie.
    pub fn expires_at(&self, received: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.max_age {
            Some(seconds) if seconds <= 0 => Some(DateTime::<Utc>::MIN_UTC),
            Some(seconds) => Some(
                TimeDelta::try_seconds(seconds)
                    .and_then(|delta| received.checked_add_signed(delta))
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            ),
            None => self.expires,
        }
    }
}

// max-age-av = "Max-Age=" [ "-" ] non-zero-digit *DIGIT
fn parse_max_age(text: &str) -> Result<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() {
        return Err(Error::missing_value("Max-Age seconds", text, text.len()));
    }
    if let Some(position) = chars::DIGIT.first_invalid(digits) {
        return Err(Error::invalid_character(text, position + text.len() - digits.len()));
    }
    text.parse()
        .map_err(|e| Error::wrap(format!("Invalid Max-Age {text:?}"), e))
}

impl HeaderValue for ServerCookie {
    fn to_header_text(&self) -> String {
        let mut text = format!("{}={}", self.name, self.value);
        if let Some(path) = &self.path {
            text.push_str(&format!("; Path={path}"));
        }
        if let Some(domain) = &self.domain {
            text.push_str(&format!("; Domain={domain}"));
        }
        if let Some(expires) = &self.expires {
            text.push_str(&format!("; Expires={}", format_http_date(expires)));
        }
        if let Some(max_age) = self.max_age {
            text.push_str(&format!("; Max-Age={max_age}"));
        }
        if self.secure {
            text.push_str("; Secure");
        }
        if self.http_only {
            text.push_str("; HttpOnly");
        }
        if let Some(same_site) = self.same_site {
            text.push_str(&format!("; SameSite={same_site}"));
        }
        for extension in &self.extensions {
            text.push_str("; ");
            text.push_str(extension);
        }
        text
    }

    fn is_request(&self) -> bool {
        false
    }

    fn is_response(&self) -> bool {
        true
    }
}

header_value_impls!(ServerCookie);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_client_cookies() {
        let cookies = ClientCookies::parse("PHPSESSID=298zf09hf012fh2; csrftoken=u32t4o3tb3gg43; _gat=1").unwrap();
        assert_eq!(cookies.cookies().len(), 3);
        assert_eq!(cookies.get("csrftoken"), Some("u32t4o3tb3gg43"));
        assert_eq!(cookies.get("CSRFTOKEN"), None);
        assert_eq!(
            cookies.to_string(),
            "PHPSESSID=298zf09hf012fh2; csrftoken=u32t4o3tb3gg43; _gat=1"
        );
    }

    #[test]
    fn test_quoted_and_empty_values() {
        let cookies = ClientCookies::parse("a=\"quoted\";b=").unwrap();
        assert_eq!(cookies.get("a"), Some("\"quoted\""));
        assert_eq!(cookies.get("b"), Some(""));
    }

    #[test]
    fn test_client_cookie_errors() {
        assert!(matches!(ClientCookies::parse("a=1;"), Err(Error::MissingValue { position: 4, .. })));
        assert!(matches!(ClientCookies::parse("a"), Err(Error::MissingValue { position: 1, .. })));
        assert!(matches!(
            ClientCookies::parse("a=b c"),
            Err(Error::InvalidCharacter { character: 'c', position: 4, .. })
        ));
        assert!(ClientCookie::new("a b", "1").is_err());
        assert!(ClientCookie::new("a", "x;y").is_err());
    }

    #[test]
    fn test_server_cookie_attributes() {
        let cookie = ServerCookie::parse(
            "sessionId=38afes7a8; Domain=.Example.com; Path=/docs; Expires=Wed, 21 Oct 2015 07:28:00 GMT; \
             Secure; HttpOnly; SameSite=Strict; Partitioned",
        )
        .unwrap();
        assert_eq!(cookie.domain(), Some("example.com"));
        assert_eq!(cookie.path(), Some("/docs"));
        assert_eq!(
            cookie.expires(),
            Some(&Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap())
        );
        assert!(cookie.is_secure());
        assert!(cookie.is_http_only());
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.extensions(), &["Partitioned".to_string()]);
    }

    #[test]
    fn test_cookie_style_expires() {
        let cookie = ServerCookie::parse("lang=en; expires=Wed, 21-Oct-2015 07:28:00 GMT").unwrap();
        assert_eq!(cookie.expires().map(|d| d.timestamp()), Some(1445412480));
    }

    #[test]
    fn test_server_cookie_text() {
        let cookie = ServerCookie::new("id", "a3fWa")
            .unwrap()
            .with_path("/")
            .unwrap()
            .with_max_age(60)
            .with_secure(true)
            .with_same_site(SameSite::Lax);
        assert_eq!(cookie.to_string(), "id=a3fWa; Path=/; Max-Age=60; Secure; SameSite=Lax");
        assert_eq!(ServerCookie::parse(&cookie.to_string()).unwrap(), cookie);
    }

    #[test]
    fn test_expires_at() {
        let received = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let cookie = ServerCookie::parse("a=1; Max-Age=3600; Expires=Wed, 21 Oct 2015 07:28:00 GMT").unwrap();
        assert_eq!(
            cookie.expires_at(received),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap())
        );
        let removal = ServerCookie::removal("a").unwrap();
        assert!(removal.expires_at(received).unwrap() < received);
        assert_eq!(ServerCookie::parse("a=1").unwrap().expires_at(received), None);
    }

    #[test]
    fn test_server_cookie_errors() {
        assert!(ServerCookie::parse("a=1; Max-Age=soon").is_err());
        assert!(ServerCookie::parse("a=1; Max-Age=").is_err());
        assert!(ServerCookie::parse("a=1; SameSite=sometimes").is_err());
        assert!(ServerCookie::parse("a=1; Expires=tomorrow").is_err());
        assert!(ServerCookie::parse("a=1; ").is_err());
        assert_eq!(ServerCookie::parse("a=1; Path=relative").unwrap().path(), None);
        assert_eq!(ServerCookie::parse("a=1; Max-Age=-1").unwrap().max_age(), Some(-1));
    }
}
