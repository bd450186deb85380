// Tests for Accept, Accept-Charset, Accept-Encoding and Accept-Language

use hval_header_core::prelude::*;
use hval_header_core::types::{AcceptEncodingValue, AcceptLanguageValue};

use crate::common::{assert_display_parses_back, assert_parse_fails, assert_parse_fails_at, media, q, tag};

#[test]
fn test_accept_display_parse_roundtrip() {
    let accept = Accept::new(vec![MediaType::APPLICATION_JSON, media("text/html;level=1;q=0.5")]).unwrap();
    assert_display_parses_back(&accept);
    assert_display_parses_back(&Accept::any());

    assert_parse_fails::<Accept>("");
    assert_parse_fails::<Accept>("application/json,");
    assert_parse_fails::<Accept>("badtype");
    assert_parse_fails_at::<Accept>("text/html;q=0.5;", 16);
}

#[test]
fn test_accept_browser_header() {
    let accept = Accept::parse(
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
    )
    .unwrap();
    assert_eq!(accept.values().len(), 6);
    assert!(accept.is_wildcard());
    assert_eq!(accept.values()[0], MediaType::TEXT_HTML);
    assert_eq!(accept.values()[5].quality_factor(), Some(q(0.8)));
    assert!(accept.test(&MediaType::APPLICATION_PDF));
}

#[test]
fn test_accept_stable_sort_for_equal_weights() {
    let accept = Accept::parse("image/png;q=0.5, text/csv, image/gif;q=0.5, text/xml").unwrap();
    let order: Vec<String> = accept.quality_factor_sorted_values().iter().map(MediaType::value).collect();
    assert_eq!(order, vec!["text/csv", "text/xml", "image/png", "image/gif"]);
}

#[test]
fn test_accept_negotiation() {
    let accept = Accept::parse("application/*;q=0.2, application/json").unwrap();
    let offered = [MediaType::APPLICATION_XML, MediaType::APPLICATION_JSON];
    assert_eq!(accept.select(&offered), Some(&MediaType::APPLICATION_JSON));
    assert!(accept.test_or_fail(&MediaType::APPLICATION_XML).is_ok());
    assert!(matches!(accept.test_or_fail(&MediaType::TEXT_PLAIN), Err(Error::NotCompatible(_))));
}

#[test]
fn test_accept_charset() {
    let header = AcceptCharset::parse("utf-8, iso-8859-1;q=0.5").unwrap();
    assert_eq!(header.quality_factor(&CharsetName::ISO_8859_1), q(0.5));
    assert_eq!(header.quality_factor(&CharsetName::UTF_16), QualityFactor::zero());
    assert_eq!(header.charset(), Some(&CharsetName::UTF_8));
    assert_display_parses_back(&header);
    assert_parse_fails::<AcceptCharset>("utf-8;q=");
}

#[test]
fn test_accept_encoding() {
    let header = AcceptEncoding::parse("br;q=1.0, gzip;q=0.8, *;q=0.1").unwrap();
    assert_eq!(header.values()[0].encoding(), Some("br"));
    assert_eq!(header.values()[0].quality_factor(), Some(q(1.0)));
    assert!(header.values()[0].equals_ignoring_parameters(&AcceptEncodingValue::BR));
    assert_eq!(header.quality_factor("zstd"), q(0.1));
    assert_eq!(header.select(&["deflate", "gzip"]), Some("gzip"));
    assert!(header.test("identity"));
    assert_display_parses_back(&header);
    assert_parse_fails::<AcceptEncoding>("gzip deflate");
}

#[test]
fn test_accept_language() {
    let header = AcceptLanguage::parse("fr-CH, fr;q=0.9, en;q=0.8, de;q=0.7, *;q=0.5").unwrap();
    assert_eq!(header.values()[0], AcceptLanguageValue::new(tag("fr-ch")));
    assert_eq!(header.quality_factor(&tag("fr-FR")), q(0.9));
    assert_eq!(header.quality_factor(&tag("ja")), q(0.5));
    let available = [tag("en-US"), tag("de")];
    assert_eq!(header.select(&available), Some(&tag("en-US")));
    assert_display_parses_back(&header);
    assert_parse_fails::<AcceptLanguage>("en;q=1.1");
}
