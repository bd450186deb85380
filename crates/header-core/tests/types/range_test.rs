// Tests for Range and Content-Range

use hval_header_core::prelude::*;
use hval_header_core::types::RangeSpec;

use crate::common::{assert_display_parses_back, assert_parse_fails, assert_parses_ok};

#[test]
fn test_range_display_parse_roundtrip() {
    let range = Range::bytes(vec![
        RangeSpec::Bounded { first: 0, last: 99 },
        RangeSpec::From { first: 200 },
        RangeSpec::Suffix { length: 50 },
    ])
    .unwrap();
    assert_display_parses_back(&range);
    assert_parses_ok("bytes=0-99,200-,-50", range);

    assert_parse_fails::<Range>("");
    assert_parse_fails::<Range>("bytes");
    assert_parse_fails::<Range>("bytes=-");
    assert_parse_fails::<Range>("bytes=1-2,");
}

#[test]
fn test_other_units() {
    let range = Range::parse("items=0-9").unwrap();
    assert_eq!(range.unit(), "items");
    assert!(!range.is_bytes());
    assert_eq!(range.ranges(), &[RangeSpec::Bounded { first: 0, last: 9 }]);
}

#[test]
fn test_resolve_against_length() {
    let range = Range::parse("bytes=-200, 50-99, 1000-").unwrap();
    assert_eq!(range.resolve(500).unwrap(), vec![300..=499, 50..=99]);
    assert_eq!(RangeSpec::Suffix { length: 900 }.resolve(500), Some(0..=499));
    assert_eq!(RangeSpec::Bounded { first: 400, last: 900 }.resolve(500), Some(400..=499));
    assert_eq!(RangeSpec::From { first: 500 }.resolve(500), None);
}

#[test]
fn test_content_range_display_parse_roundtrip() {
    assert_display_parses_back(&ContentRange::bytes(0..=1023, 146515).unwrap());
    assert_display_parses_back(&ContentRange::unsatisfied(146515));
    assert_display_parses_back(&ContentRange::new("bytes", Some((10, 20)), None).unwrap());
    assert_eq!(ContentRange::unsatisfied(100).to_string(), "bytes */100");

    assert_parse_fails::<ContentRange>("bytes 0-9");
    assert_parse_fails::<ContentRange>("bytes 0-9/x");
    assert!(ContentRange::new("bytes", None, None).is_err());
    assert!(ContentRange::bytes(5..=10, 10).is_err());
}
