// Tests for Link

use hval_header_core::prelude::*;
use hval_header_core::types::link::{find_relation, REL, TITLE};

use crate::common::{assert_display_parses_back, assert_parse_fails, media, tag};

#[test]
fn test_link_display_parse_roundtrip() {
    assert_display_parses_back(&Link::with_relation("https://api.example.com/items?page=2", "next").unwrap());
    assert_display_parses_back(
        &Link::parse("</style.css>; rel=preload; type=\"text/css\"; title=\"Main style\"").unwrap(),
    );

    assert_parse_fails::<Link>("");
    assert_parse_fails::<Link>("<a b>; rel=next");
    assert_parse_fails::<Link>("</a> rel=next");
    assert_parse_fails::<Link>("</a>; rel");
}

#[test]
fn test_pagination_links() {
    let links = Link::parse_list(
        "<https://api.example.com/users?page=3>; rel=\"next\", \
         <https://api.example.com/users?page=50>; rel=\"last\", \
         <https://api.example.com/users?page=1>; rel=\"first prev\"",
    )
    .unwrap();
    assert_eq!(links.len(), 3);
    assert_eq!(
        find_relation(&links, "last").map(Link::href),
        Some("https://api.example.com/users?page=50")
    );
    assert!(links[2].has_relation("PREV"));
    assert!(links[2].has_relation("first"));
    assert_eq!(links[0].parameter(&REL).map(String::as_str), Some("next"));
}

#[test]
fn test_link_typed_parameters() {
    let link = Link::parse("</fr/page>; rel=alternate; hreflang=fr-CA; type=\"text/html; charset=utf-8\"").unwrap();
    assert_eq!(link.hreflang(), Some(&tag("fr-ca")));
    assert_eq!(link.media_type(), Some(&media("text/html;charset=UTF-8")));
    assert_eq!(link.title(), None);
}

#[test]
fn test_link_title_prefers_encoded_form() {
    let link = Link::parse("</doc>; title=\"plain\"; title*=UTF-8'en'%E2%82%AC%20rates").unwrap();
    assert_eq!(link.title(), Some("€ rates"));
    assert_eq!(link.parameter(&TITLE).map(String::as_str), Some("plain"));
}
