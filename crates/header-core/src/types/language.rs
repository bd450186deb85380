use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};
use crate::parser::chars;

/// A BCP 47 language tag such as `en`, `en-US` or `zh-Hant-TW`.
///
/// Only the basic syntax is checked: 1 to 8 alphanumerics per subtag, the first one
/// alphabetic. Comparison ignores case; the original spelling is kept for output.
#[derive(Debug, Clone)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn parse(text: &str) -> Result<LanguageTag> {
        if let Some(position) = chars::LANGUAGE_TAG.first_invalid(text) {
            return Err(Error::invalid_character(text, position));
        }
        let valid = text.split('-').enumerate().all(|(index, subtag)| {
            (1..=8).contains(&subtag.len())
                && (index > 0 || subtag.chars().all(|c| c.is_ascii_alphabetic()))
        });
        if !valid {
            return Err(Error::InvalidValue(format!("Invalid language tag {text:?}")));
        }
        Ok(LanguageTag(text.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// The primary language subtag, e.g. `en` for `en-US`.
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// RFC 4647 basic filtering: `self` as a language range matches `tag` when it equals
    /// the tag or a prefix of it ending at a subtag boundary.
    pub fn matches(&self, tag: &LanguageTag) -> bool {
        let range = self.0.as_bytes();
        let tag = tag.0.as_bytes();
        tag.len() >= range.len()
            && tag[..range.len()].eq_ignore_ascii_case(range)
            && (tag.len() == range.len() || tag[range.len()] == b'-')
    }
}

impl PartialEq for LanguageTag {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for LanguageTag {}

impl Hash for LanguageTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

text_value_impls!(LanguageTag);
