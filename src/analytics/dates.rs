//! Timestamp parsing and calendar boundaries shared by the dashboard
//! and analytics reductions.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};

/// Parses the timestamp formats the backend actually emits: RFC 3339,
/// RFC 2822 (Flask's default datetime serialization), plain SQL
/// datetimes and bare dates. Returns None for anything else.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

pub fn start_of_day(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_hms_opt(0, 0, 0).expect("midnight is valid")
}

/// Week starts on Sunday, matching the dashboard's boundary.
pub fn start_of_week(now: NaiveDateTime) -> NaiveDateTime {
    let days_from_sunday = now.date().weekday().num_days_from_sunday() as i64;
    (now.date() - Duration::days(days_from_sunday))
        .and_hms_opt(0, 0, 0)
        .expect("midnight is valid")
}

pub fn start_of_month(now: NaiveDateTime) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .expect("first of month is valid")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is valid")
}

/// The last six calendar months ending at the current one, oldest
/// first, as (year, month) pairs.
pub fn last_six_months(now: NaiveDateTime) -> Vec<(i32, u32)> {
    let mut months = Vec::with_capacity(6);
    for back in (0..6).rev() {
        let mut year = now.year();
        let mut month = now.month() as i32 - back;
        while month < 1 {
            month += 12;
            year -= 1;
        }
        months.push((year, month as u32));
    }
    months
}

/// Display label for a trend bucket, e.g. "Aug 2026".
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .expect("first of month is valid")
        .format("%b %Y")
        .to_string()
}
