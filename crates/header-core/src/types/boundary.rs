//! Multipart boundaries ([RFC 2046 §5.1.1](https://datatracker.ietf.org/doc/html/rfc2046#section-5.1.1)).

use std::fmt;

use rand::Rng;
use tracing::trace;

use crate::error::{Error, Result};
use crate::parser::chars;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// The delimiter between the parts of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaTypeBoundary(String);

impl MediaTypeBoundary {
    pub const MAX_LENGTH: usize = 70;

    /// Length of boundaries produced by [`generate`](Self::generate).
    pub const GENERATED_LENGTH: usize = 40;

    /// Candidates tried before generation gives up.
    pub const MAX_GENERATE_ATTEMPTS: usize = 16;

    /// Validates `value`: 1 to 70 boundary characters, not ending in a space.
    pub fn new(value: &str) -> Result<Self> {
        if value.is_empty() || value.len() > Self::MAX_LENGTH {
            return Err(Error::OutOfRange(format!(
                "Boundary length {} is not in the range 1 to {}",
                value.len(),
                Self::MAX_LENGTH
            )));
        }
        if let Some(position) = chars::BOUNDARY_CHAR.first_invalid(value) {
            return Err(Error::invalid_character(value, position));
        }
        if value.ends_with(' ') {
            return Err(Error::InvalidValue(format!("Boundary {value:?} ends with a space")));
        }
        Ok(MediaTypeBoundary(value.to_string()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Self::new(text)
    }

    /// A random boundary that does not occur anywhere in `body`.
    pub fn generate(body: &[u8]) -> Result<Self> {
        let mut rng = rand::thread_rng();
        Self::generate_with(body, || {
            (0..Self::GENERATED_LENGTH)
                .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
                .collect()
        })
    }

    /// Takes candidates from `supplier` until one is valid and absent from `body`.
    pub fn generate_with<F>(body: &[u8], mut supplier: F) -> Result<Self>
    where
        F: FnMut() -> String,
    {
        for attempt in 1..=Self::MAX_GENERATE_ATTEMPTS {
            let boundary = Self::new(&supplier())?;
            if !occurs_in(body, boundary.0.as_bytes()) {
                return Ok(boundary);
            }
            trace!(attempt, boundary = %boundary, "boundary occurs in body");
        }
        Err(Error::InvalidValue(format!(
            "No boundary absent from the body after {} attempts",
            Self::MAX_GENERATE_ATTEMPTS
        )))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// `--boundary`, the line that starts each part.
    pub fn multipart_delimiter(&self) -> String {
        format!("--{}", self.0)
    }

    /// `--boundary--`, the line that ends the body.
    pub fn close_delimiter(&self) -> String {
        format!("--{}--", self.0)
    }
}

fn occurs_in(body: &[u8], needle: &[u8]) -> bool {
    body.windows(needle.len()).any(|window| window == needle)
}

impl fmt::Display for MediaTypeBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

text_value_impls!(MediaTypeBoundary);
