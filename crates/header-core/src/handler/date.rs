use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{Error, Result};
use crate::handler::string::QUOTED_STRING;
use crate::handler::HeaderHandler;

/// IMF-fixdate, the preferred HTTP date format.
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

// Obsolete formats still sent by older servers, tried in order after RFC 2822
const LEGACY_FORMATS: [&str; 3] = [
    "%A, %d-%b-%y %H:%M:%S GMT",
    "%a, %d-%b-%Y %H:%M:%S GMT",
    "%a %b %e %H:%M:%S %Y",
];

/// Parses an HTTP date in IMF-fixdate, RFC 850 or asctime form.
pub fn parse_http_date(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    match DateTime::parse_from_rfc2822(text) {
        Ok(date) => Ok(date.with_timezone(&Utc)),
        Err(rfc2822) => LEGACY_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| Error::wrap(format!("Invalid date {text:?}"), rfc2822)),
    }
}

pub fn format_http_date(date: &DateTime<Utc>) -> String {
    date.format(HTTP_DATE_FORMAT).to_string()
}

/// HTTP dates, optionally written inside quotes as Content-Disposition requires.
///
/// Parsing accepts both quoted and bare dates.
#[derive(Debug, Clone, Copy)]
pub struct DateHandler {
    pub quoted: bool,
}

impl HeaderHandler for DateHandler {
    type Value = DateTime<Utc>;

    fn parse(&self, text: &str) -> Result<DateTime<Utc>> {
        if text.starts_with('"') {
            parse_http_date(&QUOTED_STRING.parse(text)?)
        } else {
            parse_http_date(text)
        }
    }

    fn to_text(&self, value: &DateTime<Utc>) -> Result<String> {
        let text = format_http_date(value);
        if self.quoted {
            QUOTED_STRING.to_text(&text)
        } else {
            Ok(text)
        }
    }
}
