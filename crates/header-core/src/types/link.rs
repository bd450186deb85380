//! # Link Header
//!
//! Typed links between resources ([RFC 8288](https://datatracker.ietf.org/doc/html/rfc8288),
//! formerly RFC 5988).
//!
//! ```text
//! Link       = #link-value
//! link-value = "<" URI-Reference ">" *( OWS ";" OWS link-param )
//! ```
//!
//! The target is kept as written; resolving it against the request URI is up to the
//! caller. `rel` may hold several space separated relation types, see
//! [`Link::relations`].
//!
//! ## Example
//!
//! ```rust
//! use hval_header_core::types::link::{find_relation, Link};
//!
//! let links = Link::parse_list("<https://api.example.com/items?page=2>; rel=\"next\", \
//!                               <https://api.example.com/items?page=9>; rel=\"last\"").unwrap();
//! let next = find_relation(&links, "next").unwrap();
//! assert_eq!(next.href(), "https://api.example.com/items?page=2");
//! ```

use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::handler::string::{QUOTED_STRING, QUOTED_UNQUOTED_STRING};
use crate::handler::{EncodedTextHandler, LanguageTagHandler, MediaTypeHandler};
use crate::parser::chars;
use crate::parser::cursor::HeaderParser;
use crate::parser::parameters::{ParameterizedGrammar, ParametersParser};
use crate::types::encoded_text::EncodedText;
use crate::types::header_value::{HeaderValue, HeaderValueWithParameters};
use crate::types::language::LanguageTag;
use crate::types::media_type::MediaType;
use crate::types::param::{HeaderParameterName, ParameterMap, ParameterName, ParameterRegistry};

pub const REL: HeaderParameterName<String> = HeaderParameterName::new("rel", &QUOTED_UNQUOTED_STRING);
pub const REV: HeaderParameterName<String> = HeaderParameterName::new("rev", &QUOTED_UNQUOTED_STRING);
pub const ANCHOR: HeaderParameterName<String> = HeaderParameterName::new("anchor", &QUOTED_STRING);
pub const HREFLANG: HeaderParameterName<LanguageTag> = HeaderParameterName::new("hreflang", &LanguageTagHandler);
pub const MEDIA: HeaderParameterName<String> = HeaderParameterName::new("media", &QUOTED_UNQUOTED_STRING);
pub const TITLE: HeaderParameterName<String> = HeaderParameterName::new("title", &QUOTED_UNQUOTED_STRING);
pub const TITLE_ENCODED: HeaderParameterName<EncodedText> = HeaderParameterName::new("title*", &EncodedTextHandler);
pub const TYPE: HeaderParameterName<MediaType> = HeaderParameterName::new("type", &MediaTypeHandler);

static PARAMETERS: Lazy<ParameterRegistry> = Lazy::new(|| {
    ParameterRegistry::new(
        "Link",
        [
            REL.name().clone(),
            REV.name().clone(),
            ANCHOR.name().clone(),
            HREFLANG.name().clone(),
            MEDIA.name().clone(),
            TITLE.name().clone(),
            TITLE_ENCODED.name().clone(),
            TYPE.name().clone(),
        ],
    )
});

/// One link value: a target URI reference and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    href: String,
    parameters: ParameterMap,
}

impl Link {
    pub fn new(href: &str) -> Result<Self> {
        if let Some(position) = chars::LINK_URL.first_invalid(href) {
            return Err(Error::invalid_character(href, position));
        }
        Ok(Link {
            href: href.to_string(),
            parameters: ParameterMap::new(),
        })
    }

    /// A link with a `rel` parameter.
    pub fn with_relation(href: &str, rel: &str) -> Result<Self> {
        let link = Self::new(href)?;
        let parameters = ParameterMap::new().with(&REL, rel.to_string());
        parameters.check()?;
        Ok(link.replace_parameters(parameters))
    }

    pub fn parse(text: &str) -> Result<Self> {
        ParametersParser::parse_one(text, LinkGrammar { multiple: false })
    }

    pub fn parse_list(text: &str) -> Result<Vec<Self>> {
        ParametersParser::parse(text, LinkGrammar { multiple: true })
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    /// The relation types in `rel`, lowercased.
    pub fn relations(&self) -> Vec<String> {
        self.parameter(&REL)
            .map(|rel| rel.split_ascii_whitespace().map(str::to_ascii_lowercase).collect())
            .unwrap_or_default()
    }

    pub fn has_relation(&self, relation: &str) -> bool {
        self.parameter(&REL).map_or(false, |rel| {
            rel.split_ascii_whitespace()
                .any(|candidate| candidate.eq_ignore_ascii_case(relation))
        })
    }

    /// `title*` when present, `title` otherwise.
    pub fn title(&self) -> Option<&str> {
        self.parameter(&TITLE_ENCODED)
            .map(EncodedText::value)
            .or_else(|| self.parameter(&TITLE).map(String::as_str))
    }

    pub fn anchor(&self) -> Option<&str> {
        self.parameter(&ANCHOR).map(String::as_str)
    }

    pub fn hreflang(&self) -> Option<&LanguageTag> {
        self.parameter(&HREFLANG)
    }

    pub fn media_type(&self) -> Option<&MediaType> {
        self.parameter(&TYPE)
    }
}

/// The first link in `links` with relation type `relation`.
pub fn find_relation<'a>(links: &'a [Link], relation: &str) -> Option<&'a Link> {
    links.iter().find(|link| link.has_relation(relation))
}

impl HeaderValue for Link {
    fn to_header_text(&self) -> String {
        format!("<{}>{}", self.href, self.parameters)
    }

    fn is_request(&self) -> bool {
        true
    }

    fn is_response(&self) -> bool {
        true
    }
}

impl HeaderValueWithParameters for Link {
    fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    fn replace_parameters(self, parameters: ParameterMap) -> Self {
        Link {
            href: self.href,
            parameters,
        }
    }

    fn equals_ignoring_parameters(&self, other: &Self) -> bool {
        self.href == other.href
    }
}

header_value_impls!(Link);

struct LinkGrammar {
    multiple: bool,
}

impl ParameterizedGrammar for LinkGrammar {
    type Value = Link;

    fn allow_multiple_values(&self) -> bool {
        self.multiple
    }

    fn value(&mut self, parser: &mut HeaderParser<'_>) -> Result<Link> {
        parser.expect('<')?;
        let href = parser.token(chars::LINK_URL);
        parser.expect('>')?;
        Ok(Link {
            href: href.to_string(),
            parameters: ParameterMap::new(),
        })
    }

    fn parameter_name(&self, name: &str) -> ParameterName {
        PARAMETERS.resolve(name)
    }

    fn value_name(&self) -> &'static str {
        "link"
    }
}
