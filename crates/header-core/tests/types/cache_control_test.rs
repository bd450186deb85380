// Tests for Cache-Control

use hval_header_core::handler::ParameterValue;
use hval_header_core::prelude::*;
use hval_header_core::types::cache_control::{
    MAX_AGE, NO_CACHE, NO_STORE, ONLY_IF_CACHED, STALE_IF_ERROR, STALE_WHILE_REVALIDATE,
};
use hval_header_core::types::{CacheControlDirective, CacheControlDirectiveName, DirectiveArgument};

use crate::common::{assert_display_parses_back, assert_parse_fails, assert_parse_fails_at};

#[test]
fn test_cache_control_display_parse_roundtrip() {
    let header = CacheControl::new(vec![
        CacheControlDirective::flag(NO_STORE).unwrap(),
        CacheControlDirective::seconds(MAX_AGE, 0).unwrap(),
    ])
    .unwrap();
    assert_display_parses_back(&header);
    assert_display_parses_back(&CacheControl::parse("private=\"Set-Cookie\", stale-if-error=86400").unwrap());

    assert_parse_fails::<CacheControl>("");
    assert_parse_fails::<CacheControl>(",public");
    assert_parse_fails::<CacheControl>("public,,private");
    assert_parse_fails_at::<CacheControl>("public x", 7);
    assert_parse_fails::<CacheControl>("max-age=\"60\"");
}

#[test]
fn test_request_directives() {
    let header = CacheControl::parse("no-cache, max-stale=60, min-fresh=5, only-if-cached").unwrap();
    assert!(header.no_cache());
    assert_eq!(header.max_stale(), Some(Some(60)));
    assert_eq!(header.min_fresh(), Some(5));
    assert!(header.contains(&ONLY_IF_CACHED));
    assert!(header.is_request());
    assert!(!header.is_response());
}

#[test]
fn test_response_extensions_rfc5861() {
    let header = CacheControl::parse("max-age=600, stale-while-revalidate=30, stale-if-error=1200").unwrap();
    assert_eq!(header.max_age(), Some(600));
    assert_eq!(header.stale_while_revalidate(), Some(30));
    assert_eq!(header.stale_if_error(), Some(1200));
    assert!(header.directive(&STALE_WHILE_REVALIDATE).is_some());
    assert!(header.directive(&STALE_IF_ERROR).is_some());
}

#[test]
fn test_directive_names() {
    let known = CacheControlDirectiveName::resolve("Max-Age");
    assert_eq!(known, MAX_AGE);
    assert_eq!(known.argument(), DirectiveArgument::Required);
    assert!(!known.is_extension());

    let extension = CacheControlDirectiveName::resolve("x-custom");
    assert!(extension.is_extension());
    assert_eq!(extension.argument(), DirectiveArgument::Optional);
    assert!(extension.is_request() && extension.is_response());
    assert!(!NO_CACHE.is_extension());
}

#[test]
fn test_directive_values() {
    let header = CacheControl::parse("no-cache=\"Set-Cookie\", x-n=3").unwrap();
    assert!(header.no_cache());
    assert_eq!(
        header.directive(&NO_CACHE).and_then(|d| d.value()),
        Some(&ParameterValue::Text("Set-Cookie".to_string()))
    );
    assert_eq!(header.directives()[1].value().and_then(ParameterValue::as_long), Some(3));
}
