//! Traits shared by all typed header values.

use std::borrow::Cow;
use std::fmt;

use crate::error::Result;
use crate::handler::ParameterKind;
use crate::types::param::{HeaderParameterName, ParameterMap};

/// A typed header value.
pub trait HeaderValue: fmt::Debug + Clone + PartialEq {
    /// The value formatted as it appears on the wire.
    fn to_header_text(&self) -> String;

    fn is_wildcard(&self) -> bool {
        false
    }

    /// Whether the header may appear in requests.
    fn is_request(&self) -> bool;

    /// Whether the header may appear in responses.
    fn is_response(&self) -> bool;

    fn is_multipart(&self) -> bool {
        false
    }
}

/// A header value followed by `;name=value` parameters.
///
/// Values are immutable: setters return either the same instance, when nothing changes,
/// or a modified copy.
pub trait HeaderValueWithParameters: HeaderValue {
    fn parameters(&self) -> &ParameterMap;

    /// Replaces the parameters without checking them. Parsers call this after each
    /// value has already gone through its handler.
    #[doc(hidden)]
    fn replace_parameters(self, parameters: ParameterMap) -> Self;

    /// Equality of everything except the parameters.
    fn equals_ignoring_parameters(&self, other: &Self) -> bool;

    fn parameter<V: ParameterKind>(&self, name: &HeaderParameterName<V>) -> Option<&V> {
        name.get(self.parameters())
    }

    /// Returns `self` unchanged when `parameters` equals the current map, otherwise a copy
    /// carrying the new map after every value has been checked against its handler.
    fn set_parameters(&self, parameters: ParameterMap) -> Result<Cow<'_, Self>> {
        if *self.parameters() == parameters {
            return Ok(Cow::Borrowed(self));
        }
        parameters.check()?;
        Ok(Cow::Owned(self.clone().replace_parameters(parameters)))
    }

    /// Sets one typed parameter.
    fn set_parameter<V: ParameterKind>(&self, name: &HeaderParameterName<V>, value: V) -> Result<Cow<'_, Self>> {
        self.set_parameters(self.parameters().clone().with(name, value))
    }

    fn remove_parameter<V>(&self, name: &HeaderParameterName<V>) -> Result<Cow<'_, Self>> {
        self.set_parameters(self.parameters().clone().without(name.name()))
    }

    /// Equal apart from parameters, and every parameter of `self` is present in `other`
    /// with the same value. Not symmetric.
    fn equals_only_present_parameters(&self, other: &Self) -> bool {
        self.equals_ignoring_parameters(other) && self.parameters().is_subset_of(other.parameters())
    }
}
