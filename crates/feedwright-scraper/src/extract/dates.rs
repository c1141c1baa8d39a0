//! Date normalization into UTC timestamps.
//!
//! Every parser here returns `None` for input it cannot read; a bad date never
//! fails a route.

use std::sync::LazyLock;

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc,
};
use regex::Regex;

static ORDINAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("valid ordinal regex")
});

const NAIVE_DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f %z"];

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%b. %d, %Y",
    "%b.%d.%Y",
];

/// An explicit site date format: a chrono pattern plus the zone the site
/// writes its local times in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    pub pattern: &'static str,
    /// Seconds east of UTC.
    pub utc_offset_secs: i32,
    /// Set when the raw value omits the year: the current year in the site's
    /// zone plus this separator is prepended before parsing, so `pattern` must
    /// start with `%Y` followed by the same separator.
    pub year_prefix: Option<&'static str>,
}

impl DateFormat {
    /// A UTC pattern with the year present in the raw value.
    #[must_use]
    pub const fn utc(pattern: &'static str) -> Self {
        Self {
            pattern,
            utc_offset_secs: 0,
            year_prefix: None,
        }
    }

    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<DateTime<Utc>> {
        self.parse_relative_to(raw, Utc::now())
    }

    /// As [`DateFormat::parse`], with `now` deciding the inferred year.
    #[must_use]
    pub fn parse_relative_to(&self, raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let offset = FixedOffset::east_opt(self.utc_offset_secs)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match self.year_prefix {
            Some(separator) => {
                let year = now.with_timezone(&offset).year();
                parse_date_with_format(&format!("{year}{separator}{raw}"), self.pattern, offset)
            }
            None => parse_date_with_format(raw, self.pattern, offset),
        }
    }
}

/// Parses `raw` with `format` when a site declares one, else by shape.
#[must_use]
pub fn parse_with(format: Option<&DateFormat>, raw: &str) -> Option<DateTime<Utc>> {
    match format {
        Some(format) => format.parse(raw),
        None => parse_date(raw),
    }
}

/// Parses `raw` with an explicit chrono `pattern`, reading zone-less values as
/// local time at `offset`.
///
/// Ordinal day suffixes (`1st`, `22nd`) are removed first, so `"%B %d, %Y"`
/// accepts `"March 3rd, 2024"`. A pattern without time fields yields midnight.
#[must_use]
pub fn parse_date_with_format(
    raw: &str,
    pattern: &str,
    offset: FixedOffset,
) -> Option<DateTime<Utc>> {
    let cleaned = strip_ordinals(raw.trim());
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_str(&cleaned, pattern) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(&cleaned, pattern)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(&cleaned, pattern)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses a date of unknown shape.
///
/// Accepts RFC 3339, RFC 2822, ISO-like values with or without a zone (no zone
/// means UTC), English month-name dates, and Unix timestamps (13 or more digits
/// are milliseconds).
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return parse_unix(raw);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    let cleaned = strip_ordinals(raw);
    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(&cleaned, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

fn parse_unix(digits: &str) -> Option<DateTime<Utc>> {
    let value: i64 = digits.parse().ok()?;
    if digits.len() >= 13 {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

fn strip_ordinals(raw: &str) -> String {
    ORDINAL_RE.replace_all(raw, "$1").into_owned()
}
