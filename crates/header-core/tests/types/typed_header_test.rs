// Tests for header name dispatch

use hval_header_core::prelude::*;

use crate::common::{assert_parse_fails, assert_parses_ok, init_tracing, media};

fn typed(line: &str) -> TypedHeader {
    let header = Header::parse_line(line).unwrap_or_else(|e| panic!("Failed to split '{}': {:?}", line, e));
    TypedHeader::try_from(header).unwrap_or_else(|e| panic!("Failed to parse '{}': {:?}", line, e))
}

#[test]
fn test_header_names() {
    assert_parses_ok("accept-encoding", HeaderName::AcceptEncoding);
    assert_parses_ok("Set-Cookie", HeaderName::SetCookie);
    assert_parses_ok("X-Forwarded-For", HeaderName::Other("X-Forwarded-For".to_string()));
    assert_parse_fails::<HeaderName>("Content Type");
    assert_parse_fails::<HeaderName>("");
}

#[test]
fn test_request_headers() {
    init_tracing();
    let lines = [
        "Accept: text/html, application/xhtml+xml;q=0.9",
        "Accept-Charset: utf-8, iso-8859-1;q=0.5",
        "Accept-Encoding: gzip, deflate, br",
        "Accept-Language: en-US, en;q=0.5",
        "Cache-Control: no-cache",
        "Cookie: a=1; b=2",
        "If-Match: \"abc\"",
        "If-None-Match: W/\"abc\", \"def\"",
        "Range: bytes=0-1023",
    ];
    for line in lines {
        let header = typed(line);
        assert!(header.name().is_request(), "{}", line);
        assert_eq!(header.to_string(), typed(&header.to_string()).to_string(), "{}", line);
    }
}

#[test]
fn test_response_headers() {
    init_tracing();
    match typed("Content-Type: text/html; charset=utf-8") {
        TypedHeader::ContentType(media_type) => assert_eq!(media_type, media("text/html;charset=UTF-8")),
        other => panic!("Unexpected {:?}", other),
    }
    match typed("ETag: W/\"0815\"") {
        TypedHeader::ETag(etag) => assert!(etag.is_weak()),
        other => panic!("Unexpected {:?}", other),
    }
    match typed("Link: </p/2>; rel=next, </p/9>; rel=last") {
        TypedHeader::Link(links) => assert_eq!(links.len(), 2),
        other => panic!("Unexpected {:?}", other),
    }
    match typed("Set-Cookie: id=1; HttpOnly") {
        TypedHeader::SetCookie(cookie) => assert!(cookie.is_http_only()),
        other => panic!("Unexpected {:?}", other),
    }
    match typed("Content-Range: bytes 0-9/100") {
        TypedHeader::ContentRange(range) => assert_eq!(range.content_length(), Some(10)),
        other => panic!("Unexpected {:?}", other),
    }
    match typed("Content-Disposition: attachment; filename=a.txt") {
        TypedHeader::ContentDisposition(disposition) => assert!(disposition.is_attachment()),
        other => panic!("Unexpected {:?}", other),
    }
}

#[test]
fn test_parse_errors_carry_position() {
    let err = TypedHeader::parse(&HeaderName::Accept, "text/html;q=2").unwrap_err();
    assert!(matches!(err, Error::OutOfRange(_)), "{err:?}");

    let err = TypedHeader::parse(&HeaderName::Range, "bytes=x").unwrap_err();
    assert_eq!(err.position(), Some(6));
    assert!(err.to_string().contains("bytes=x"), "{}", err);
}

#[test]
fn test_typed_to_raw_header() {
    let typed = TypedHeader::CacheControl(CacheControl::parse("max-age=60, public").unwrap());
    let header = Header::from(typed);
    assert_eq!(header.name, HeaderName::CacheControl);
    assert_eq!(header.to_string(), "Cache-Control: max-age=60, public");
}
