//! Human-readable rendering of task timestamps.
//!
//! Task instants travel as epoch milliseconds. This module turns them into
//! the two strings the board shows:
//!
//! - **Absolute**: `"Jan 15, 2024, 3:45 PM"` (month, day, year, 12-hour clock)
//! - **Relative**: `"just now"`, `"5 minutes ago"`, `"1 hour ago"`,
//!   `"3 days ago"`, then a short date once the instant is a week old
//!
//! The `*_in` / `*_at` variants take an explicit time zone or reference
//! instant; the plain functions use the local zone and the current time.
//!
//! ## Examples
//!
//! ```rust
//! use chrono::Utc;
//! use taskboard::libs::formatter::format_date_in;
//!
//! assert_eq!(format_date_in(1_705_333_500_000, &Utc), "Jan 15, 2024, 3:45 PM");
//! ```

use chrono::{DateTime, Datelike, Local, TimeZone};
use std::fmt::Display;

const ABSOLUTE_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";
const SHORT_DATE_FORMAT: &str = "%b %-d";
const SHORT_DATE_WITH_YEAR_FORMAT: &str = "%b %-d, %Y";

/// Formats epoch milliseconds as an absolute date and time in the local zone.
pub fn format_date(timestamp: i64) -> String {
    format_date_in(timestamp, &Local)
}

/// Formats epoch milliseconds as an absolute date and time in `tz`.
///
/// Out-of-range instants render as `"-"`.
pub fn format_date_in<Tz>(timestamp: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(timestamp).single() {
        Some(datetime) => datetime.format(ABSOLUTE_FORMAT).to_string(),
        None => "-".to_string(),
    }
}

/// Formats epoch milliseconds relative to the current local time.
pub fn format_relative_time(timestamp: i64) -> String {
    format_relative_time_at(timestamp, &Local::now())
}

/// Formats epoch milliseconds relative to `now`.
///
/// Instants in the future count as "just now". Past the one-week mark the
/// output switches to a short date, with the year only when it differs from
/// the year of `now`.
pub fn format_relative_time_at<Tz>(timestamp: i64, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let seconds = (now.timestamp_millis() - timestamp).div_euclid(1000);

    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return ago(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return ago(hours, "hour");
    }

    let days = hours / 24;
    if days < 7 {
        return ago(days, "day");
    }

    match now.timezone().timestamp_millis_opt(timestamp).single() {
        Some(datetime) if datetime.year() != now.year() => datetime.format(SHORT_DATE_WITH_YEAR_FORMAT).to_string(),
        Some(datetime) => datetime.format(SHORT_DATE_FORMAT).to_string(),
        None => "-".to_string(),
    }
}

fn ago(count: i64, unit: &str) -> String {
    let plural = if count > 1 { "s" } else { "" };
    format!("{} {}{} ago", count, unit, plural)
}
