//! # Cache-Control Header
//!
//! Caching directives for requests and responses
//! ([RFC 9111 §5.2](https://datatracker.ietf.org/doc/html/rfc9111#section-5.2)).
//!
//! ```text
//! Cache-Control   = #cache-directive
//! cache-directive = token [ "=" ( token / quoted-string ) ]
//! ```
//!
//! Every registered directive knows whether it takes an argument, in which messages it
//! may appear and which handler reads its argument. Unknown directives are kept, with a
//! numeric argument when the text is a number and a text argument otherwise.
//!
//! ## Example
//!
//! ```rust
//! use hval_header_core::types::cache_control::{CacheControl, MAX_AGE};
//!
//! let header = CacheControl::parse("public, max-age=3600, must-revalidate").unwrap();
//! assert_eq!(header.max_age(), Some(3600));
//! assert!(header.contains(&MAX_AGE));
//! assert!(header.is_public());
//! ```

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{Error, Result};
use crate::handler::string::QUOTED_UNQUOTED_STRING;
use crate::handler::{LongHandler, ParameterValue, ParameterValueHandler};
use crate::parser::chars;
use crate::parser::cursor::{parse_with, HeaderGrammar, HeaderParser};
use crate::types::header_value::HeaderValue;
use crate::types::param::ParameterName;

/// Whether a directive takes an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveArgument {
    None,
    Optional,
    Required,
}

/// A directive name with its argument rule, scope and argument handler.
#[derive(Debug, Clone)]
pub struct CacheControlDirectiveName {
    name: ParameterName,
    argument: DirectiveArgument,
    request: bool,
    response: bool,
}

impl CacheControlDirectiveName {
    const fn constant(
        name: &'static str,
        handler: &'static dyn ParameterValueHandler,
        argument: DirectiveArgument,
        request: bool,
        response: bool,
    ) -> Self {
        CacheControlDirectiveName {
            name: ParameterName::constant(name, handler),
            argument,
            request,
            response,
        }
    }

    /// The registered directive called `name`, or an extension directive.
    pub fn resolve(name: &str) -> Self {
        match DIRECTIVES.get(name.to_ascii_lowercase().as_str()) {
            Some(known) => known.clone(),
            None => CacheControlDirectiveName {
                name: ParameterName::directive_extension(name),
                argument: DirectiveArgument::Optional,
                request: true,
                response: true,
            },
        }
    }

    pub fn value(&self) -> &str {
        self.name.value()
    }

    pub fn argument(&self) -> DirectiveArgument {
        self.argument
    }

    pub fn is_request(&self) -> bool {
        self.request
    }

    pub fn is_response(&self) -> bool {
        self.response
    }

    pub fn is_extension(&self) -> bool {
        !DIRECTIVES.contains_key(self.value())
    }

    fn check(&self, value: Option<&ParameterValue>) -> Result<()> {
        match (self.argument, value) {
            (DirectiveArgument::None, Some(_)) => Err(Error::InvalidValue(format!(
                "Cache-Control directive \"{}\" does not take a value",
                self.value()
            ))),
            (DirectiveArgument::Required, None) => Err(Error::InvalidValue(format!(
                "Cache-Control directive \"{}\" requires a value",
                self.value()
            ))),
            (_, Some(value)) => self.name.check_value(value),
            (_, None) => Ok(()),
        }
    }
}

impl PartialEq for CacheControlDirectiveName {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CacheControlDirectiveName {}

impl fmt::Display for CacheControlDirectiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)
    }
}

use DirectiveArgument::{None as NoArgument, Optional, Required};

pub const MAX_AGE: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("max-age", &LongHandler, Required, true, true);
pub const MAX_STALE: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("max-stale", &LongHandler, Optional, true, false);
pub const MIN_FRESH: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("min-fresh", &LongHandler, Required, true, false);
pub const NO_CACHE: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("no-cache", &QUOTED_UNQUOTED_STRING, Optional, true, true);
pub const NO_STORE: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("no-store", &QUOTED_UNQUOTED_STRING, NoArgument, true, true);
pub const NO_TRANSFORM: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("no-transform", &QUOTED_UNQUOTED_STRING, NoArgument, true, true);
pub const ONLY_IF_CACHED: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("only-if-cached", &QUOTED_UNQUOTED_STRING, NoArgument, true, false);
pub const MUST_REVALIDATE: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("must-revalidate", &QUOTED_UNQUOTED_STRING, NoArgument, false, true);
pub const MUST_UNDERSTAND: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("must-understand", &QUOTED_UNQUOTED_STRING, NoArgument, false, true);
pub const PROXY_REVALIDATE: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("proxy-revalidate", &QUOTED_UNQUOTED_STRING, NoArgument, false, true);
pub const PUBLIC: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("public", &QUOTED_UNQUOTED_STRING, NoArgument, false, true);
pub const PRIVATE: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("private", &QUOTED_UNQUOTED_STRING, Optional, false, true);
pub const S_MAXAGE: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("s-maxage", &LongHandler, Required, false, true);
pub const IMMUTABLE: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("immutable", &QUOTED_UNQUOTED_STRING, NoArgument, false, true);
pub const STALE_WHILE_REVALIDATE: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("stale-while-revalidate", &LongHandler, Required, false, true);
pub const STALE_IF_ERROR: CacheControlDirectiveName =
    CacheControlDirectiveName::constant("stale-if-error", &LongHandler, Required, true, true);

static DIRECTIVES: Lazy<HashMap<String, CacheControlDirectiveName>> = Lazy::new(|| {
    let directives: HashMap<_, _> = [
        MAX_AGE,
        MAX_STALE,
        MIN_FRESH,
        NO_CACHE,
        NO_STORE,
        NO_TRANSFORM,
        ONLY_IF_CACHED,
        MUST_REVALIDATE,
        MUST_UNDERSTAND,
        PROXY_REVALIDATE,
        PUBLIC,
        PRIVATE,
        S_MAXAGE,
        IMMUTABLE,
        STALE_WHILE_REVALIDATE,
        STALE_IF_ERROR,
    ]
    .into_iter()
    .map(|directive| (directive.value().to_string(), directive))
    .collect();
    debug!(directives = directives.len(), "cache directive registry built");
    directives
});

/// One directive with its optional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheControlDirective {
    name: CacheControlDirectiveName,
    value: Option<ParameterValue>,
}

impl CacheControlDirective {
    /// Builds a directive, checking the argument against the directive's rules.
    pub fn new(name: CacheControlDirectiveName, value: Option<ParameterValue>) -> Result<Self> {
        name.check(value.as_ref())?;
        Ok(CacheControlDirective { name, value })
    }

    /// A directive without argument, e.g. `no-store`.
    pub fn flag(name: CacheControlDirectiveName) -> Result<Self> {
        Self::new(name, None)
    }

    /// A directive with a number of seconds, e.g. `max-age=60`.
    pub fn seconds(name: CacheControlDirectiveName, seconds: u64) -> Result<Self> {
        Self::new(name, Some(ParameterValue::Long(seconds)))
    }

    pub fn name(&self) -> &CacheControlDirectiveName {
        &self.name
    }

    pub fn value(&self) -> Option<&ParameterValue> {
        self.value.as_ref()
    }
}

impl fmt::Display for CacheControlDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            None => write!(f, "{}", self.name),
            Some(value) => {
                let text = self.name.name.value_text(value).map_err(|_| fmt::Error)?;
                write!(f, "{}={}", self.name, text)
            }
        }
    }
}

/// A non-empty list of cache directives in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheControl(Vec<CacheControlDirective>);

impl CacheControl {
    pub fn new(directives: Vec<CacheControlDirective>) -> Result<Self> {
        if directives.is_empty() {
            return Err(Error::EmptyList("Cache-Control"));
        }
        Ok(CacheControl(directives))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut grammar = CacheControlGrammar::default();
        parse_with(text, &mut grammar)?;
        Ok(CacheControl(grammar.directives))
    }

    pub fn directives(&self) -> &[CacheControlDirective] {
        &self.0
    }

    /// The first directive called `name`.
    pub fn directive(&self, name: &CacheControlDirectiveName) -> Option<&CacheControlDirective> {
        self.0.iter().find(|directive| directive.name == *name)
    }

    pub fn contains(&self, name: &CacheControlDirectiveName) -> bool {
        self.directive(name).is_some()
    }

    fn seconds(&self, name: &CacheControlDirectiveName) -> Option<u64> {
        self.directive(name)
            .and_then(CacheControlDirective::value)
            .and_then(ParameterValue::as_long)
    }

    pub fn max_age(&self) -> Option<u64> {
        self.seconds(&MAX_AGE)
    }

    pub fn s_maxage(&self) -> Option<u64> {
        self.seconds(&S_MAXAGE)
    }

    /// `Some(None)` for a bare `max-stale`, which accepts any staleness.
    pub fn max_stale(&self) -> Option<Option<u64>> {
        self.directive(&MAX_STALE)
            .map(|directive| directive.value().and_then(ParameterValue::as_long))
    }

    pub fn min_fresh(&self) -> Option<u64> {
        self.seconds(&MIN_FRESH)
    }

    pub fn stale_while_revalidate(&self) -> Option<u64> {
        self.seconds(&STALE_WHILE_REVALIDATE)
    }

    pub fn stale_if_error(&self) -> Option<u64> {
        self.seconds(&STALE_IF_ERROR)
    }

    pub fn no_cache(&self) -> bool {
        self.contains(&NO_CACHE)
    }

    pub fn no_store(&self) -> bool {
        self.contains(&NO_STORE)
    }

    pub fn is_public(&self) -> bool {
        self.contains(&PUBLIC)
    }

    pub fn is_private(&self) -> bool {
        self.contains(&PRIVATE)
    }

    pub fn must_revalidate(&self) -> bool {
        self.contains(&MUST_REVALIDATE)
    }

    pub fn is_immutable(&self) -> bool {
        self.contains(&IMMUTABLE)
    }
}

impl HeaderValue for CacheControl {
    fn to_header_text(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn is_request(&self) -> bool {
        self.0.iter().all(|directive| directive.name.request)
    }

    fn is_response(&self) -> bool {
        self.0.iter().all(|directive| directive.name.response)
    }
}

header_value_impls!(CacheControl);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Name,
    AfterName,
    Value,
    AfterValue,
}

struct CacheControlGrammar {
    mode: Mode,
    name: Option<CacheControlDirectiveName>,
    value: Option<ParameterValue>,
    directives: Vec<CacheControlDirective>,
}

impl Default for CacheControlGrammar {
    fn default() -> Self {
        CacheControlGrammar {
            mode: Mode::Name,
            name: None,
            value: None,
            directives: Vec::new(),
        }
    }
}

impl CacheControlGrammar {
    fn pending_name(&self, parser: &HeaderParser<'_>) -> Result<&CacheControlDirectiveName> {
        self.name.as_ref().ok_or_else(|| parser.invalid_character())
    }

    fn read_value(&mut self, parser: &mut HeaderParser<'_>, raw: &str) -> Result<()> {
        let value = self.pending_name(parser)?.name.parse_value(raw)?;
        self.value = Some(value);
        self.mode = Mode::AfterValue;
        Ok(())
    }

    fn missing_directive_value(&self, parser: &HeaderParser<'_>) -> Error {
        match &self.name {
            Some(name) => parser.missing_value(format!("value for directive {:?}", name.value())),
            None => parser.missing_value("directive value"),
        }
    }

    fn directive_complete(&mut self, parser: &HeaderParser<'_>) -> Result<()> {
        let name = match self.name.take() {
            Some(name) => name,
            None => return Err(parser.invalid_character()),
        };
        if name.argument == DirectiveArgument::Required && self.value.is_none() {
            self.name = Some(name);
            return Err(self.missing_directive_value(parser));
        }
        self.directives.push(CacheControlDirective {
            name,
            value: self.value.take(),
        });
        Ok(())
    }
}

impl HeaderGrammar for CacheControlGrammar {
    fn quoted_text(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::Value => {
                let raw = parser.quoted_text(chars::QUOTED_TEXT, true)?;
                self.read_value(parser, raw)
            }
            _ => Err(parser.invalid_character()),
        }
    }

    fn key_value_separator(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::AfterName => {
                let name = self.pending_name(parser)?;
                if name.argument == DirectiveArgument::None {
                    return Err(Error::InvalidValue(format!(
                        "Cache-Control directive \"{}\" does not take a value",
                        name.value()
                    )));
                }
                parser.advance();
                self.mode = Mode::Value;
                Ok(())
            }
            _ => Err(parser.invalid_character()),
        }
    }

    fn multi_value_separator(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::AfterName | Mode::AfterValue => {
                self.directive_complete(parser)?;
                parser.advance();
                self.mode = Mode::Name;
                Ok(())
            }
            Mode::Value => Err(self.missing_directive_value(parser)),
            Mode::Name => Err(parser.invalid_character()),
        }
    }

    fn token(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::Name => {
                let name = parser.required_token(chars::RFC7230_TOKEN, "cache directive")?;
                self.name = Some(CacheControlDirectiveName::resolve(name));
                self.mode = Mode::AfterName;
                Ok(())
            }
            Mode::Value => {
                let raw = parser.required_token(chars::RFC7230_TOKEN, "directive value")?;
                self.read_value(parser, raw)
            }
            _ => Err(parser.invalid_character()),
        }
    }

    fn end_of_text(&mut self, parser: &mut HeaderParser<'_>) -> Result<()> {
        match self.mode {
            Mode::AfterName | Mode::AfterValue => self.directive_complete(parser),
            Mode::Name => Err(parser.missing_value("cache directive")),
            Mode::Value => Err(self.missing_directive_value(parser)),
        }
    }
}
