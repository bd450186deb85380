// Tests for MediaType

use std::borrow::Cow;

use hval_header_core::types::media_type::{BOUNDARY, CHARSET};
use hval_header_core::types::quality::Q;
use hval_header_core::prelude::*;

use crate::common::{assert_display_parses_back, assert_parse_fails, assert_parse_fails_at, assert_parses_ok, media, q};

#[test]
fn test_media_type_display_parse_roundtrip() {
    assert_display_parses_back(&MediaType::APPLICATION_JSON);
    assert_display_parses_back(&media("text/plain; charset=iso-8859-1"));
    assert_display_parses_back(&media("multipart/mixed; boundary=\"gc0p4Jq0M2Yt08jU534c0p\""));
    assert_display_parses_back(&media("application/ld+json; profile=\"http://www.w3.org/ns/json-ld#compacted\""));
    assert_parses_ok("IMAGE/PNG", MediaType::IMAGE_PNG);
}

#[test]
fn test_media_type_rejects_malformed_text() {
    assert_parse_fails::<MediaType>("");
    assert_parse_fails::<MediaType>("/html");
    assert_parse_fails::<MediaType>("text/html; charset");
    assert_parse_fails::<MediaType>("text/html; =utf-8");
    assert_parse_fails_at::<MediaType>("text/html;;", 10);
    assert_parse_fails_at::<MediaType>("text html", 4);
}

#[test]
fn test_unterminated_quoted_parameter() {
    let err = MediaType::parse("text/plain; title=\"open").unwrap_err();
    assert!(matches!(err, Error::Unterminated { .. }), "{err:?}");
    assert_eq!(err.position(), Some(23));
}

#[test]
fn test_typed_parameter_accessors() {
    let media_type = media("text/html; charset=\"utf-8\"; q=0.4");
    assert_eq!(media_type.charset(), Some(&CharsetName::UTF_8));
    assert_eq!(media_type.parameter(&Q), Some(&q(0.4)));
    assert_eq!(media_type.quality_factor(), Some(q(0.4)));
    assert!(media_type.parameter(&BOUNDARY).is_none());

    let latin = media_type.set_parameter(&CHARSET, CharsetName::ISO_8859_1).unwrap();
    assert_eq!(latin.to_string(), "text/html;charset=ISO-8859-1;q=0.4");

    let plain = latin.remove_parameter(&Q).unwrap();
    assert_eq!(plain.to_string(), "text/html;charset=ISO-8859-1");
}

#[test]
fn test_unchanged_setter_returns_same_instance() {
    let media_type = media("text/html;charset=utf-8");
    let same = media_type.set_charset(CharsetName::UTF_8).unwrap();
    assert!(matches!(same, Cow::Borrowed(_)));
    let html = MediaType::TEXT_HTML;
    let removed = html.remove_parameter(&CHARSET).unwrap();
    assert!(matches!(removed, Cow::Borrowed(_)));
}

#[test]
fn test_multipart_boundary() {
    let boundary = MediaTypeBoundary::generate(b"body without the boundary").unwrap();
    let multipart = MediaType::MULTIPART_FORM_DATA.set_boundary(boundary.clone()).unwrap().into_owned();
    assert!(multipart.is_multipart());
    assert_eq!(multipart.boundary(), Some(&boundary));
    assert_display_parses_back(&multipart);
}

#[test]
fn test_wildcard_and_suffix_matching() {
    assert!(media("*/*").is_wildcard());
    assert!(MediaType::APPLICATION_WILDCARD.test(&media("application/hal+json;charset=utf-8")));
    assert!(media("application/*+json").test(&MediaType::APPLICATION_PROBLEM_JSON));
    assert!(!media("application/*+json").test(&MediaType::APPLICATION_XML));
    assert!(!media("application/*+json").test(&media("application/hal+xml")));
    assert!(!media("application/vnd.api+json").test(&media("application/vnd.api")));
    assert!(!MediaType::TEXT_PLAIN.test(&MediaType::TEXT_HTML));
}

#[test]
fn test_parameters_compared_by_value() {
    assert_eq!(media("text/html;charset=UTF-8"), media("text/html; charset=utf-8"));
    assert_ne!(media("text/html;level=1"), media("text/html;level=2"));
    assert!(media("text/html;level=1").equals_ignoring_parameters(&media("text/html;level=2")));
}
