// Common test utilities for header-core
#![allow(dead_code)]

use std::fmt::{Debug, Display};
use std::str::FromStr;
use std::sync::Once;

use hval_header_core::prelude::*;
use hval_header_core::Error as HeaderError;

// --- Tracing ---

static TRACING: Once = Once::new();

/// Installs a test writer subscriber once per test binary. `RUST_LOG` selects the level.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// --- Value Construction Helpers ---

/// Parses a media type, panicking on failure.
pub fn media(text: &str) -> MediaType {
    MediaType::parse(text).unwrap_or_else(|e| panic!("Failed to parse test media type '{}': {:?}", text, e))
}

/// Parses a language tag, panicking on failure.
pub fn tag(text: &str) -> LanguageTag {
    LanguageTag::parse(text).unwrap_or_else(|e| panic!("Failed to parse test language tag '{}': {:?}", text, e))
}

pub fn q(value: f32) -> QualityFactor {
    QualityFactor::new(value).expect("test quality factor out of range")
}

// --- Parser/FromStr Test Helpers ---

/// Asserts that parsing the input string with T::from_str results in the expected value.
pub fn assert_parses_ok<T>(input: &str, expected: T)
where
    T: FromStr<Err = HeaderError> + PartialEq + Debug,
{
    match T::from_str(input) {
        Ok(parsed) => assert_eq!(parsed, expected, "Input: '{}'", input),
        Err(e) => panic!("Expected Ok({:?}), got Err({:?}) for input: '{}'", expected, e, input),
    }
}

/// Asserts that parsing the input string with T::from_str results in an Err.
pub fn assert_parse_fails<T>(input: &str)
where
    T: FromStr<Err = HeaderError> + Debug,
{
    match T::from_str(input) {
        Ok(parsed) => panic!("Expected Err, got Ok({:?}) for input: '{}'", parsed, input),
        Err(_) => {}
    }
}

/// Asserts that parsing fails at `position` (0-based, in characters).
pub fn assert_parse_fails_at<T>(input: &str, position: usize)
where
    T: FromStr<Err = HeaderError> + Debug,
{
    match T::from_str(input) {
        Ok(parsed) => panic!("Expected Err, got Ok({:?}) for input: '{}'", parsed, input),
        Err(e) => assert_eq!(e.position(), Some(position), "Error {:?} for input: '{}'", e, input),
    }
}

// --- Display Test Helper ---

/// Asserts that item.to_string() can be parsed back into an equivalent item.
pub fn assert_display_parses_back<T>(item: &T)
where
    T: Display + FromStr<Err = HeaderError> + PartialEq + Debug,
{
    let displayed = item.to_string();
    match T::from_str(&displayed) {
        Ok(parsed_back) => {
            assert_eq!(item, &parsed_back,
                "\nDisplay->FromStr round trip failed!\n  Original: {:?}\n  Displayed: '{}'\n  Parsed Back: {:?}\n",
                item, displayed, parsed_back);
        }
        Err(e) => panic!("Failed to parse back displayed string '{}': {:?}", displayed, e),
    }
}
