// models/src/dates.rs

//! Parsing of the free-form `record_date` strings the backend hands back.
//!
//! Records are written with `YYYY-MM-DD`, but older rows and voice drafts can
//! carry timestamps or HTTP-style dates. Anything we cannot read is treated as
//! the earliest possible date, so it sinks to the bottom of "most recent
//! first" listings instead of landing in an arbitrary position.

use std::cmp::Ordering;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a record date. Returns `None` for blank or unreadable input.
pub fn parse_record_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    DateTime::parse_from_rfc2822(raw).ok().map(|dt| dt.naive_utc())
}

/// Sort key for an optional record date. `None` orders before every date.
pub fn record_date_key(raw: Option<&str>) -> Option<NaiveDateTime> {
    raw.and_then(parse_record_date)
}

/// Compares two record dates for a most-recent-first listing.
pub fn newest_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    record_date_key(b).cmp(&record_date_key(a))
}

/// Today's date in the `YYYY-MM-DD` form the backend stores.
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
