//! # Range and Content-Range
//!
//! Partial content requests ([RFC 9110 §14](https://datatracker.ietf.org/doc/html/rfc9110#section-14)).
//! A [`Range`] asks for one or more byte ranges; [`Range::resolve`] turns it into the
//! concrete ranges of a representation of known length. [`ContentRange`] describes the
//! range sent back in a 206 or 416 response.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::parser::{self, chars, nom_error};
use crate::types::header_value::HeaderValue;

/// One `range-spec` of a Range header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeSpec {
    /// `first-last`, both inclusive.
    Bounded { first: u64, last: u64 },
    /// `first-`, up to the end.
    From { first: u64 },
    /// `-length`, the final `length` bytes.
    Suffix { length: u64 },
}

impl RangeSpec {
    fn check(&self) -> Result<()> {
        match *self {
            RangeSpec::Bounded { first, last } if last < first => Err(Error::InvalidValue(format!(
                "Range {first}-{last} ends before it starts"
            ))),
            _ => Ok(()),
        }
    }

    /// The satisfiable byte positions of this spec in a representation of `length` bytes.
    pub fn resolve(&self, length: u64) -> Option<RangeInclusive<u64>> {
        if length == 0 {
            return None;
        }
        let end = length - 1;
        match *self {
            RangeSpec::Bounded { first, last } if first <= end => Some(first..=last.min(end)),
            RangeSpec::From { first } if first <= end => Some(first..=end),
            RangeSpec::Suffix { length: suffix } if suffix > 0 => Some(length.saturating_sub(suffix)..=end),
            _ => None,
        }
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSpec::Bounded { first, last } => write!(f, "{first}-{last}"),
            RangeSpec::From { first } => write!(f, "{first}-"),
            RangeSpec::Suffix { length } => write!(f, "-{length}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    unit: String,
    ranges: Vec<RangeSpec>,
}

impl Range {
    pub const BYTES: &'static str = "bytes";

    pub fn new(unit: &str, ranges: Vec<RangeSpec>) -> Result<Self> {
        if let Some(position) = chars::RFC7230_TOKEN.first_invalid(unit) {
            return Err(Error::invalid_character(unit, position));
        }
        if ranges.is_empty() {
            return Err(Error::EmptyList("Range"));
        }
        ranges.iter().try_for_each(RangeSpec::check)?;
        Ok(Range {
            unit: unit.to_ascii_lowercase(),
            ranges,
        })
    }

    pub fn bytes(ranges: Vec<RangeSpec>) -> Result<Self> {
        Self::new(Self::BYTES, ranges)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let (_, (unit, ranges)) = parser::range::range(text).map_err(|e| nom_error(text, e, "range"))?;
        Self::new(unit, ranges)
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn ranges(&self) -> &[RangeSpec] {
        &self.ranges
    }

    pub fn is_bytes(&self) -> bool {
        self.unit == Self::BYTES
    }

    /// The satisfiable ranges for a representation of `length` bytes, in request order.
    /// Fails when none is satisfiable, the 416 case.
    pub fn resolve(&self, length: u64) -> Result<Vec<RangeInclusive<u64>>> {
        let resolved: Vec<_> = self.ranges.iter().filter_map(|spec| spec.resolve(length)).collect();
        if resolved.is_empty() {
            return Err(Error::NotCompatible(format!(
                "Range \"{}\" is not satisfiable for {length} bytes",
                self.to_header_text()
            )));
        }
        Ok(resolved)
    }
}

impl HeaderValue for Range {
    fn to_header_text(&self) -> String {
        let specs: Vec<_> = self.ranges.iter().map(ToString::to_string).collect();
        format!("{}={}", self.unit, specs.join(","))
    }

    fn is_request(&self) -> bool {
        true
    }

    fn is_response(&self) -> bool {
        false
    }
}

header_value_impls!(Range);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRange {
    unit: String,
    range: Option<(u64, u64)>,
    complete_length: Option<u64>,
}

impl ContentRange {
    pub fn new(unit: &str, range: Option<(u64, u64)>, complete_length: Option<u64>) -> Result<Self> {
        if let Some(position) = chars::RFC7230_TOKEN.first_invalid(unit) {
            return Err(Error::invalid_character(unit, position));
        }
        match (range, complete_length) {
            (None, None) => {
                return Err(Error::InvalidValue(
                    "Content-Range needs a range or a complete length".to_string(),
                ))
            }
            (Some((first, last)), _) if last < first => {
                return Err(Error::InvalidValue(format!("Range {first}-{last} ends before it starts")))
            }
            (Some((_, last)), Some(length)) if last >= length => {
                return Err(Error::InvalidValue(format!(
                    "Range end {last} is beyond the complete length {length}"
                )))
            }
            _ => {}
        }
        Ok(ContentRange {
            unit: unit.to_ascii_lowercase(),
            range,
            complete_length,
        })
    }

    /// `bytes first-last/length`.
    pub fn bytes(range: RangeInclusive<u64>, complete_length: u64) -> Result<Self> {
        Self::new(Range::BYTES, Some((*range.start(), *range.end())), Some(complete_length))
    }

    /// `bytes */length`, sent with 416 Range Not Satisfiable.
    pub fn unsatisfied(complete_length: u64) -> Self {
        ContentRange {
            unit: Range::BYTES.to_string(),
            range: None,
            complete_length: Some(complete_length),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let (_, (unit, range, complete_length)) =
            parser::range::content_range(text).map_err(|e| nom_error(text, e, "content range"))?;
        Self::new(unit, range, complete_length)
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn range(&self) -> Option<RangeInclusive<u64>> {
        self.range.map(|(first, last)| first..=last)
    }

    pub fn complete_length(&self) -> Option<u64> {
        self.complete_length
    }

    /// Number of bytes in the enclosed part.
    pub fn content_length(&self) -> Option<u64> {
        self.range.map(|(first, last)| last - first + 1)
    }
}

impl HeaderValue for ContentRange {
    fn to_header_text(&self) -> String {
        let range = match self.range {
            Some((first, last)) => format!("{first}-{last}"),
            None => "*".to_string(),
        };
        let length = match self.complete_length {
            Some(length) => length.to_string(),
            None => "*".to_string(),
        };
        format!("{} {range}/{length}", self.unit)
    }

    fn is_request(&self) -> bool {
        false
    }

    fn is_response(&self) -> bool {
        true
    }
}

header_value_impls!(ContentRange);
