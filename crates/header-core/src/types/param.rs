//! Header parameter names, typed accessors and the parameter map.
//!
//! A [`ParameterName`] pairs a lowercase name with the handler for its values. Headers
//! publish their known names as constants and resolve everything else through a
//! [`ParameterRegistry`], which falls back to free text (or RFC 5987 encoded text for
//! names ending in `*`).

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{btree_map, BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use tracing::debug;

use crate::error::Result;
use crate::handler::extension::LONG_OR_STRING;
use crate::handler::string::QUOTED_UNQUOTED_STRING;
use crate::handler::{EncodedTextHandler, ParameterKind, ParameterValue, ParameterValueHandler};

/// A parameter name together with the handler for its values.
///
/// Equality, ordering and hashing use the name only.
#[derive(Clone)]
pub struct ParameterName {
    name: Cow<'static, str>,
    handler: &'static dyn ParameterValueHandler,
}

impl ParameterName {
    /// Builds a name constant. `name` must already be lowercase.
    pub const fn constant(name: &'static str, handler: &'static dyn ParameterValueHandler) -> Self {
        ParameterName {
            name: Cow::Borrowed(name),
            handler,
        }
    }

    pub fn new(name: &str, handler: &'static dyn ParameterValueHandler) -> Self {
        ParameterName {
            name: Cow::Owned(name.to_ascii_lowercase()),
            handler,
        }
    }

    /// A name with no registered definition.
    pub fn extension(name: &str) -> Self {
        let handler: &'static dyn ParameterValueHandler = if name.ends_with('*') {
            &EncodedTextHandler
        } else {
            &QUOTED_UNQUOTED_STRING
        };
        Self::new(name, handler)
    }

    /// An unregistered Cache-Control directive value: a number or text.
    pub(crate) fn directive_extension(name: &str) -> Self {
        Self::new(name, &LONG_OR_STRING)
    }

    pub fn value(&self) -> &str {
        &self.name
    }

    /// True for RFC 5987 names such as `filename*`.
    pub fn is_encoded(&self) -> bool {
        self.name.ends_with('*')
    }

    pub fn handler(&self) -> &'static dyn ParameterValueHandler {
        self.handler
    }

    pub fn parse_value(&self, text: &str) -> Result<ParameterValue> {
        self.handler.parse_value(text)
    }

    pub fn check_value(&self, value: &ParameterValue) -> Result<()> {
        self.handler.check_value(&self.name, value)
    }

    pub fn value_text(&self, value: &ParameterValue) -> Result<String> {
        self.handler.value_to_text(&self.name, value)
    }
}

impl PartialEq for ParameterName {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ParameterName {}

impl PartialOrd for ParameterName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ParameterName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for ParameterName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.handler.kind())
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A [`ParameterName`] that also fixes the Rust type of its value.
pub struct HeaderParameterName<V> {
    name: ParameterName,
    kind: PhantomData<fn() -> V>,
}

impl<V> HeaderParameterName<V> {
    pub const fn new(name: &'static str, handler: &'static dyn ParameterValueHandler) -> Self {
        HeaderParameterName {
            name: ParameterName::constant(name, handler),
            kind: PhantomData,
        }
    }

    pub fn name(&self) -> &ParameterName {
        &self.name
    }
}

impl<V: ParameterKind> HeaderParameterName<V> {
    pub fn get<'a>(&self, parameters: &'a ParameterMap) -> Option<&'a V> {
        parameters.get(&self.name).and_then(V::from_parameter_value)
    }
}

impl<V> Clone for HeaderParameterName<V> {
    fn clone(&self) -> Self {
        HeaderParameterName {
            name: self.name.clone(),
            kind: PhantomData,
        }
    }
}

impl<V> fmt::Debug for HeaderParameterName<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.name, f)
    }
}

/// Parameters of a header value, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap(BTreeMap<ParameterName, ParameterValue>);

impl ParameterMap {
    pub const fn new() -> Self {
        ParameterMap(BTreeMap::new())
    }

    /// Adds a typed parameter, replacing any previous value.
    pub fn with<V: ParameterKind>(self, name: &HeaderParameterName<V>, value: V) -> Self {
        self.with_value(name.name().clone(), value.into_parameter_value())
    }

    pub fn with_value(mut self, name: ParameterName, value: ParameterValue) -> Self {
        self.0.insert(name, value);
        self
    }

    pub fn without(mut self, name: &ParameterName) -> Self {
        self.0.remove(name);
        self
    }

    pub fn get(&self, name: &ParameterName) -> Option<&ParameterValue> {
        self.0.get(name)
    }

    /// Looks a parameter up by its name as text, ignoring case.
    pub fn get_by_name(&self, name: &str) -> Option<&ParameterValue> {
        self.0
            .iter()
            .find(|(key, _)| key.value().eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &ParameterName) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ParameterName, ParameterValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks every value against the handler of its name.
    pub fn check(&self) -> Result<()> {
        self.0.iter().try_for_each(|(name, value)| name.check_value(value))
    }

    /// True when every entry of `self` appears in `other` with an equal value.
    pub fn is_subset_of(&self, other: &ParameterMap) -> bool {
        self.0
            .iter()
            .all(|(name, value)| other.0.get(name).map_or(false, |v| v == value))
    }
}

impl From<BTreeMap<ParameterName, ParameterValue>> for ParameterMap {
    fn from(map: BTreeMap<ParameterName, ParameterValue>) -> Self {
        ParameterMap(map)
    }
}

impl<'a> IntoIterator for &'a ParameterMap {
    type Item = (&'a ParameterName, &'a ParameterValue);
    type IntoIter = btree_map::Iter<'a, ParameterName, ParameterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Writes `;name=value` for every parameter.
///
/// Values are checked when a map is attached to a header value, so formatting only fails
/// for maps that were never attached.
impl fmt::Display for ParameterMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.0 {
            let text = name.value_text(value).map_err(|_| fmt::Error)?;
            write!(f, ";{name}={text}")?;
        }
        Ok(())
    }
}

/// Known parameter names of one header, keyed by lowercase name.
#[derive(Debug)]
pub struct ParameterRegistry {
    header: &'static str,
    names: HashMap<Cow<'static, str>, ParameterName>,
}

impl ParameterRegistry {
    pub fn new(header: &'static str, names: impl IntoIterator<Item = ParameterName>) -> Self {
        let names: HashMap<_, _> = names
            .into_iter()
            .map(|name| (name.name.clone(), name))
            .collect();
        debug!(header, parameters = names.len(), "parameter registry built");
        ParameterRegistry { header, names }
    }

    pub fn header(&self) -> &'static str {
        self.header
    }

    /// The registered name, or an extension name when `name` is unknown.
    pub fn resolve(&self, name: &str) -> ParameterName {
        self.lookup(name).unwrap_or_else(|| ParameterName::extension(name))
    }

    pub fn lookup(&self, name: &str) -> Option<ParameterName> {
        match self.names.get(name) {
            Some(found) => Some(found.clone()),
            None => self.names.get(name.to_ascii_lowercase().as_str()).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{LongHandler, QualityFactorHandler};
    use crate::types::quality::QualityFactor;

    const SIZE: HeaderParameterName<u64> = HeaderParameterName::new("size", &LongHandler);
    const Q: HeaderParameterName<QualityFactor> = HeaderParameterName::new("q", &QualityFactorHandler);

    #[test]
    fn test_extension_names() {
        let plain = ParameterName::extension("Level");
        assert_eq!(plain.value(), "level");
        assert!(!plain.is_encoded());
        assert_eq!(plain.handler().kind(), "text");

        let encoded = ParameterName::extension("title*");
        assert!(encoded.is_encoded());
        assert_eq!(encoded.handler().kind(), "encoded text");
    }

    #[test]
    fn test_typed_access() {
        let map = ParameterMap::new().with(&SIZE, 10);
        assert_eq!(SIZE.get(&map), Some(&10));
        assert_eq!(Q.get(&map), None);
        assert_eq!(map.get_by_name("SIZE"), Some(&ParameterValue::Long(10)));
    }

    #[test]
    fn test_check_reports_wrong_kind() {
        let map = ParameterMap::new().with_value(SIZE.name().clone(), ParameterValue::Text("big".into()));
        assert!(map.check().is_err());
    }

    #[test]
    fn test_display_sorted_by_name() {
        let map = ParameterMap::new()
            .with(&SIZE, 3)
            .with_value(ParameterName::extension("a"), ParameterValue::Text("x y".into()));
        assert_eq!(map.to_string(), ";a=\"x y\";size=3");
    }

    #[test]
    fn test_subset() {
        let small = ParameterMap::new().with(&SIZE, 3);
        let large = small.clone().with(&Q, QualityFactor::new(0.5).unwrap());
        assert!(small.is_subset_of(&large));
        assert!(!large.is_subset_of(&small));
        assert!(ParameterMap::new().is_subset_of(&small));
    }

    #[test]
    fn test_registry_resolution() {
        let registry = ParameterRegistry::new("test", [SIZE.name().clone()]);
        assert_eq!(registry.resolve("SIZE").handler().kind(), "long");
        assert_eq!(registry.resolve("other").handler().kind(), "text");
        assert!(registry.lookup("other").is_none());
    }
}
