// Tests for Cookie and Set-Cookie

use chrono::{TimeDelta, TimeZone, Utc};
use hval_header_core::prelude::*;
use hval_header_core::types::{ClientCookie, SameSite};

use crate::common::{assert_display_parses_back, assert_parse_fails, assert_parses_ok};

#[test]
fn test_cookie_display_parse_roundtrip() {
    let cookies = ClientCookies::new(vec![
        ClientCookie::new("sid", "31d4d96e407aad42").unwrap(),
        ClientCookie::new("lang", "en-US").unwrap(),
    ])
    .unwrap();
    assert_display_parses_back(&cookies);
    assert_parses_ok("sid=31d4d96e407aad42; lang=en-US", cookies);

    assert_parse_fails::<ClientCookies>("");
    assert_parse_fails::<ClientCookies>("=value");
    assert_parse_fails::<ClientCookies>("a=1, b=2");
    assert!(ClientCookies::new(Vec::new()).is_err());
}

#[test]
fn test_duplicate_names_keep_first() {
    let cookies = ClientCookies::parse("id=first; id=second").unwrap();
    assert_eq!(cookies.cookies().len(), 2);
    assert_eq!(cookies.get("id"), Some("first"));
}

#[test]
fn test_set_cookie_display_parse_roundtrip() {
    let expires = Utc.with_ymd_and_hms(2030, 6, 9, 10, 18, 14).unwrap();
    let cookie = ServerCookie::new("session", "abc123")
        .unwrap()
        .with_expires(expires)
        .with_domain("example.com")
        .unwrap()
        .with_path("/app")
        .unwrap()
        .with_http_only(true)
        .with_same_site(SameSite::None)
        .with_secure(true);
    assert_display_parses_back(&cookie);
    assert!(cookie.to_string().contains("Expires=Sun, 09 Jun 2030 10:18:14 GMT"));
    assert_eq!(cookie.expires_at(Utc::now()), Some(expires));
}

#[test]
fn test_set_cookie_attribute_names_ignore_case() {
    let cookie = ServerCookie::parse("a=b; max-age=120; HTTPONLY; samesite=lax; PATH=/").unwrap();
    assert_eq!(cookie.max_age(), Some(120));
    assert!(cookie.is_http_only());
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
    let received = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    assert_eq!(cookie.expires_at(received), Some(received + TimeDelta::try_seconds(120).unwrap()));
}

#[test]
fn test_removal_cookie() {
    let removal = ServerCookie::removal("session").unwrap();
    assert_eq!(removal.name(), "session");
    assert_eq!(removal.value(), "");
    assert!(removal.to_string().starts_with("session=; "));
}

#[test]
fn test_same_site_text() {
    assert_parses_ok("STRICT", SameSite::Strict);
    assert_eq!(SameSite::None.to_string(), "None");
    assert_parse_fails::<SameSite>("never");
    assert_parse_fails::<ServerCookie>("no-equals-sign");
    assert_eq!(ServerCookie::parse("a=1; Domain=").unwrap().domain(), None);
}
