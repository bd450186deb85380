// Tests for serde support, header values serialize as their header text
#![cfg(feature = "serde")]

use hval_header_core::prelude::*;

use crate::common::media;

#[test]
fn test_serialize_as_header_text() {
    let json = serde_json::to_string(&media("application/json; charset=utf-8")).unwrap();
    assert_eq!(json, "\"application/json;charset=UTF-8\"");
    assert_eq!(serde_json::to_string(&HeaderName::ETag).unwrap(), "\"ETag\"");
    assert_eq!(serde_json::to_string(&ETag::weak("v").unwrap()).unwrap(), "\"W/\\\"v\\\"\"");
}

#[test]
fn test_deserialize_parses_text() {
    let accept: Accept = serde_json::from_str("\"text/*;q=0.3, text/html\"").unwrap();
    assert_eq!(accept.to_string(), "text/html, text/*;q=0.3");

    let values: Vec<CacheControl> = serde_json::from_str("[\"no-store\", \"max-age=5\"]").unwrap();
    assert!(values[0].no_store());
    assert_eq!(values[1].max_age(), Some(5));

    let name: HeaderName = serde_json::from_str("\"if-none-match\"").unwrap();
    assert_eq!(name, HeaderName::IfNoneMatch);
}

#[test]
fn test_deserialize_reports_parse_errors() {
    let err = serde_json::from_str::<MediaType>("\"text/\"").unwrap_err();
    assert!(err.to_string().contains("Missing"), "{}", err);
    assert!(serde_json::from_str::<Range>("\"bytes=9-1\"").is_err());
}
