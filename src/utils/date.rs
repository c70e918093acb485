//! Best-effort date coercion for FtM date properties.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Formats tried, in order, for values carrying a time of day
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Formats tried, in order, for plain calendar dates
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // ISO format: 2023-01-15
    "%d-%m-%Y", // European: 15-01-2023
    "%m/%d/%Y", // US: 01/15/2023
    "%d/%m/%Y", // UK: 15/01/2023
    "%d.%m.%Y", // German/Danish: 15.01.2023
    "%Y%m%d",   // Compact: 20230115
    "%d %b %Y", // 15 Jan 2023
    "%d %B %Y", // 15 January 2023
];

/// Parse a date-like string, returning `None` when no format applies
///
/// Partial dates (`2014-03`, `2014`) resolve to the first day of the period.
/// A trailing `Z` or UTC offset on a timestamp is accepted and the local
/// wall-clock part kept.
#[must_use]
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    parse_partial_date(s).map(|date| date.and_time(NaiveTime::MIN))
}

/// Parse `YYYY-MM` and `YYYY` prefixes
fn parse_partial_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.splitn(3, '-');
    let year = parts.next()?;
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year = year.parse::<i32>().ok()?;

    match (parts.next(), parts.next()) {
        (None, None) => NaiveDate::from_ymd_opt(year, 1, 1),
        (Some(month), None) if month.len() == 2 => {
            NaiveDate::from_ymd_opt(year, month.parse::<u32>().ok()?, 1)
        }
        _ => None,
    }
}

/// Earliest parseable value
#[must_use]
pub fn earliest<S: AsRef<str>>(values: &[S]) -> Option<NaiveDateTime> {
    values.iter().filter_map(|v| parse_date_string(v.as_ref())).min()
}

/// Latest parseable value
#[must_use]
pub fn latest<S: AsRef<str>>(values: &[S]) -> Option<NaiveDateTime> {
    values.iter().filter_map(|v| parse_date_string(v.as_ref())).max()
}

/// Last day of the month containing `date`
#[must_use]
pub fn month_end(date: NaiveDate) -> NaiveDate {
    first_of_next_month(date)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// First day of the month following `date`
#[must_use]
pub fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    use chrono::Datelike;

    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}
