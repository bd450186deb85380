// Tests for Content-Disposition

use chrono::{TimeZone, Utc};
use hval_header_core::prelude::*;
use hval_header_core::types::content_disposition::{FILENAME, SIZE};
use hval_header_core::types::{ContentDispositionFileName, ContentDispositionType};

use crate::common::{assert_display_parses_back, assert_parse_fails, assert_parses_ok};

#[test]
fn test_content_disposition_display_parse_roundtrip() {
    assert_display_parses_back(&ContentDisposition::INLINE);
    assert_display_parses_back(&ContentDisposition::attachment("report 2024.pdf").unwrap());
    assert_display_parses_back(&ContentDisposition::attachment("résumé.pdf").unwrap());
    assert_display_parses_back(&ContentDisposition::form_data("field").unwrap());
    assert_parses_ok("INLINE", ContentDisposition::INLINE);

    assert_parse_fails::<ContentDisposition>("");
    assert_parse_fails::<ContentDisposition>("attachment;");
    assert_parse_fails::<ContentDisposition>("attachment; filename");
    assert_parse_fails::<ContentDisposition>("attachment filename=a.txt");
}

#[test]
fn test_non_ascii_attachment_text() {
    let header = ContentDisposition::attachment("résumé.pdf").unwrap();
    assert_eq!(
        header.to_string(),
        "attachment;filename=r_sum_.pdf;filename*=UTF-8''r%C3%A9sum%C3%A9.pdf"
    );
}

#[test]
fn test_quoted_file_name_with_escapes() {
    let header = ContentDisposition::parse("attachment; filename=\"say \\\"hi\\\".txt\"").unwrap();
    assert_eq!(
        header.file_name(),
        Some(ContentDispositionFileName::NotEncoded("say \"hi\".txt".to_string()))
    );
    assert_eq!(header.to_string(), "attachment;filename=\"say \\\"hi\\\".txt\"");
}

#[test]
fn test_file_name_strips_path() {
    let header = ContentDisposition::parse("attachment; filename=\"../../etc/passwd\"").unwrap();
    let file_name = header.file_name().unwrap();
    assert_eq!(file_name.without_path().value(), "passwd");
}

#[test]
fn test_latin1_encoded_file_name() {
    let header = ContentDisposition::parse("attachment; filename*=iso-8859-1'en'%A3%20rates").unwrap();
    match header.file_name() {
        Some(ContentDispositionFileName::Encoded(text)) => {
            assert_eq!(text.value(), "£ rates");
            assert_eq!(text.charset(), &CharsetName::ISO_8859_1);
            assert_eq!(text.language().map(|l| l.value()), Some("en"));
        }
        other => panic!("Expected an encoded file name, got {:?}", other),
    }
}

#[test]
fn test_typed_parameters() {
    let header = ContentDisposition::parse(
        "inline; size=42; modification-date=\"Sun, 06 Nov 1994 08:49:37 GMT\"",
    )
    .unwrap();
    assert!(header.is_inline());
    assert_eq!(header.parameter(&SIZE), Some(&42));
    assert_eq!(
        header.modification_date(),
        Some(&Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap())
    );

    let renamed = header.set_parameter(&FILENAME, "a.txt".to_string()).unwrap();
    assert_eq!(renamed.file_name().map(|name| name.value().to_string()), Some("a.txt".to_string()));
    assert!(header.set_parameter(&FILENAME, "bad\u{1}".to_string()).is_err());
}

#[test]
fn test_disposition_types_ignore_case() {
    assert_eq!(
        ContentDisposition::parse("Form-Data; name=x").unwrap().disposition_type(),
        &ContentDispositionType::FormData
    );
    assert_eq!(ContentDispositionType::Extension("X-Y".to_string()), ContentDispositionType::Extension("x-y".to_string()));
}
