//! Quality factors (`q` parameters) and preference ordering.

use std::cmp::Ordering;
use std::fmt;

use ordered_float::NotNan;

use crate::error::{Error, Result};
use crate::handler::QualityFactorHandler;
use crate::types::param::HeaderParameterName;

/// The `q` parameter shared by the Accept family of headers.
pub const Q: HeaderParameterName<QualityFactor> = HeaderParameterName::new("q", &QualityFactorHandler);

/// A preference weight in the range `0.0..=1.0`.
///
/// Ordered by value; `1.0` is the most preferred and `0.0` means "not acceptable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualityFactor(NotNan<f32>);

impl QualityFactor {
    pub fn new(value: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::OutOfRange(format!(
                "Quality factor {value} is not in the range 0.0 to 1.0"
            )));
        }
        NotNan::new(value)
            .map(QualityFactor)
            .map_err(|e| Error::wrap("Invalid quality factor", e))
    }

    /// The implied weight of a value without a `q` parameter.
    pub fn one() -> Self {
        QualityFactor(NotNan::new(1.0).unwrap_or_default())
    }

    pub fn zero() -> Self {
        QualityFactor(NotNan::default())
    }

    pub fn value(&self) -> f32 {
        self.0.into_inner()
    }

    pub fn is_acceptable(&self) -> bool {
        self.value() > 0.0
    }
}

impl Default for QualityFactor {
    fn default() -> Self {
        Self::one()
    }
}

/// Shortest text that reads back to the same value, always with a decimal point.
impl fmt::Display for QualityFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value())
    }
}

impl std::str::FromStr for QualityFactor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        use crate::handler::HeaderHandler;
        QualityFactorHandler.parse(s)
    }
}

/// A value that may carry a quality factor.
pub trait HasQualityFactor {
    /// The explicit `q` parameter, if present.
    fn quality_factor(&self) -> Option<QualityFactor>;

    fn quality_factor_or_default(&self) -> QualityFactor {
        self.quality_factor().unwrap_or_default()
    }
}

/// Descending comparison of two optional quality factors, treating absence as `default`.
pub fn compare_quality_factors(
    left: Option<QualityFactor>,
    right: Option<QualityFactor>,
    default: QualityFactor,
) -> Ordering {
    right.unwrap_or(default).cmp(&left.unwrap_or(default))
}

/// Returns a copy of `values` in descending quality factor order.
///
/// The sort is stable, so values with equal weight keep their header order.
pub fn sort_by_quality_factor<T>(values: &[T]) -> Vec<T>
where
    T: HasQualityFactor + Clone,
{
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.quality_factor_or_default().cmp(&a.quality_factor_or_default()));
    sorted
}
