//! Character set names as used in `charset` parameters and Accept-Charset.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;

use crate::error::Result;
use crate::handler::string::TOKEN;
use crate::handler::HeaderHandler;

/// A case-insensitive character set name.
///
/// Well known names and their common aliases parse to the canonical constant, so
/// `utf8` and `UTF-8` compare and print the same.
#[derive(Debug, Clone)]
pub struct CharsetName(Cow<'static, str>);

static ALIASES: Lazy<HashMap<&'static str, CharsetName>> = Lazy::new(|| {
    let mut aliases = HashMap::new();
    for (canonical, names) in [
        (CharsetName::UTF_8, &["utf-8", "utf8"][..]),
        (CharsetName::ISO_8859_1, &["iso-8859-1", "iso8859-1", "latin1", "l1", "iso_8859-1", "cp819"][..]),
        (CharsetName::US_ASCII, &["us-ascii", "ascii", "iso646-us", "ansi_x3.4-1968"][..]),
        (CharsetName::UTF_16, &["utf-16", "utf16"][..]),
        (CharsetName::UTF_16BE, &["utf-16be"][..]),
        (CharsetName::UTF_16LE, &["utf-16le"][..]),
        (CharsetName::WINDOWS_1252, &["windows-1252", "cp1252"][..]),
    ] {
        for name in names {
            aliases.insert(*name, canonical.clone());
        }
    }
    aliases
});

impl CharsetName {
    pub const UTF_8: CharsetName = CharsetName(Cow::Borrowed("UTF-8"));
    pub const ISO_8859_1: CharsetName = CharsetName(Cow::Borrowed("ISO-8859-1"));
    pub const US_ASCII: CharsetName = CharsetName(Cow::Borrowed("US-ASCII"));
    pub const UTF_16: CharsetName = CharsetName(Cow::Borrowed("UTF-16"));
    pub const UTF_16BE: CharsetName = CharsetName(Cow::Borrowed("UTF-16BE"));
    pub const UTF_16LE: CharsetName = CharsetName(Cow::Borrowed("UTF-16LE"));
    pub const WINDOWS_1252: CharsetName = CharsetName(Cow::Borrowed("windows-1252"));
    pub const WILDCARD: CharsetName = CharsetName(Cow::Borrowed("*"));

    pub fn parse(text: &str) -> Result<CharsetName> {
        if text == "*" {
            return Ok(Self::WILDCARD);
        }
        TOKEN.parse(text)?;
        Ok(Self::canonical(text).unwrap_or_else(|| CharsetName(Cow::Owned(text.to_string()))))
    }

    /// The canonical constant for a known name or alias.
    pub fn canonical(name: &str) -> Option<CharsetName> {
        ALIASES.get(name.to_ascii_lowercase().as_str()).cloned()
    }

    /// This name's canonical spelling, `None` when it is not a known charset.
    pub fn canonical_name(&self) -> Option<CharsetName> {
        Self::canonical(&self.0)
    }

    pub fn is_known(&self) -> bool {
        self.canonical_name().is_some()
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == "*"
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl PartialEq for CharsetName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for CharsetName {}

impl Hash for CharsetName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for CharsetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

text_value_impls!(CharsetName);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve_to_canonical() {
        assert_eq!(CharsetName::parse("utf8").unwrap().to_string(), "UTF-8");
        assert_eq!(CharsetName::parse("Latin1").unwrap(), CharsetName::ISO_8859_1);
        let owned = CharsetName(Cow::Owned("CP1252".to_string()));
        assert_eq!(owned.canonical_name().map(|name| name.to_string()), Some("windows-1252".to_string()));
    }

    #[test]
    fn test_unknown_names_kept() {
        let charset = CharsetName::parse("x-custom").unwrap();
        assert_eq!(charset.to_string(), "x-custom");
        assert!(!charset.is_known());
        assert_eq!(charset, CharsetName::parse("X-CUSTOM").unwrap());
    }

    #[test]
    fn test_invalid_names() {
        assert!(CharsetName::parse("").is_err());
        assert!(CharsetName::parse("utf 8").is_err());
        assert!(CharsetName::parse("*").unwrap().is_wildcard());
    }
}
