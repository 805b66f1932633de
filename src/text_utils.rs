use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

pub const INVALID_DATE: &str = "Invalid Date";

pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut res = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&#039;"),
            _ => res.push(c),
        }
    }
    Cow::Owned(res)
}

/// Accepts a plain date (2024-01-15), an RFC 3339 timestamp or a naive timestamp.
pub fn parse_date(buf: &str) -> Option<NaiveDate> {
    let buf = buf.trim();
    if let Ok(date) = NaiveDate::parse_from_str(buf, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Some(date_time.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(buf, fmt).ok())
        .map(|dt| dt.date())
}

/// Long display form, e.g. `January 15, 2024`.
pub fn format_date(buf: &str) -> String {
    match parse_date(buf) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Whitespace delimited tokens left after stripping tags.
pub fn word_count(html: &str) -> usize {
    lazy_static! {
        static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
    }

    TAG_REGEX.replace_all(html, " ").split_whitespace().count()
}
