// Tests for ETag, If-Match and If-None-Match

use hval_header_core::prelude::*;
use hval_header_core::types::{ETagList, Validator};

use crate::common::{assert_display_parses_back, assert_parse_fails, assert_parse_fails_at, assert_parses_ok};

#[test]
fn test_etag_display_parse_roundtrip() {
    assert_display_parses_back(&ETag::strong("33a64df551425fcc55e4d42a148795d9f25f89d4").unwrap());
    assert_display_parses_back(&ETag::weak("0815").unwrap());
    assert_display_parses_back(&ETagList::parse("\"a\", W/\"b\", \"\"").unwrap());
    assert_parses_ok("W/\"x\"", ETag::new("x", Validator::Weak).unwrap());

    assert_parse_fails::<ETag>("W\"x\"");
    assert_parse_fails::<ETag>("w/\"x\"");
    assert_parse_fails::<ETagList>("\"a\" \"b\"");
    assert_parse_fails_at::<ETag>("\"a b\"", 2);
}

#[test]
fn test_if_match_uses_strong_comparison() {
    let if_match = ETagList::parse("\"v1\", \"v2\"").unwrap();
    assert!(if_match.test_strong(&ETag::strong("v2").unwrap()));
    assert!(!if_match.test_strong(&ETag::weak("v2").unwrap()));
    assert!(!if_match.test_strong(&ETag::strong("v3").unwrap()));
}

#[test]
fn test_if_none_match_uses_weak_comparison() {
    let if_none_match = ETagList::parse("W/\"v1\"").unwrap();
    assert!(if_none_match.test_weak(&ETag::strong("v1").unwrap()));
    assert!(if_none_match.test_weak(&ETag::weak("v1").unwrap()));
    assert!(!if_none_match.test_weak(&ETag::weak("v2").unwrap()));
}

#[test]
fn test_wildcard_list() {
    let any = ETagList::parse(" * ").unwrap();
    assert!(any.is_wildcard());
    assert_eq!(any.tags(), &[ETag::Wildcard]);
    assert!(any.test_weak(&ETag::strong("anything").unwrap()));
    assert!(ETagList::new(vec![ETag::Wildcard, ETag::strong("a").unwrap()]).is_err());
    assert!(matches!(ETagList::new(Vec::new()), Err(Error::EmptyList(_))));
}

#[test]
fn test_scope() {
    assert!(ETag::strong("a").unwrap().is_response());
    assert!(!ETag::Wildcard.is_response());
    assert!(!ETagList::parse("\"a\"").unwrap().is_response());
}
