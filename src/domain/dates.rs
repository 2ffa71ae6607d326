//! Calendar rules shared by enrollments and payments.
//!
//! A school year runs from September to August and is identified by the
//! calendar year it starts in. Records that carry no explicit school-year link
//! are bucketed by the date they were made.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// First month of a school year.
pub const SCHOOL_YEAR_START_MONTH: u32 = 9;

/// Payments created this many days before "now" or later are always counted
/// in the current bucket, whatever their derived school year.
pub const RECENT_PAYMENT_WINDOW_DAYS: i64 = 30;

/// Returns the start year of the school year `date` falls in.
pub fn school_year_of(date: NaiveDate) -> i32 {
    if date.month() >= SCHOOL_YEAR_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    }
}

/// True when `created_at` lies within the recent-payment window ending at `now`.
///
/// Future-dated records count as recent.
pub fn is_recent(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(created_at) <= Duration::days(RECENT_PAYMENT_WINDOW_DAYS)
}

/// Parses the date shapes found in exported records: RFC 3339, a space or `T`
/// separated naive timestamp (taken as UTC), or a bare `YYYY-MM-DD`.
pub fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_date_time(raw).map(|at| at.date_naive())
}

/// Required date field. Unparsable input is a deserialization error.
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
}

/// Optional date field. Null, missing and malformed values all become `None`.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Optional timestamp field. Null, missing and malformed values all become `None`.
pub fn deserialize_optional_date_time<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date_time))
}
