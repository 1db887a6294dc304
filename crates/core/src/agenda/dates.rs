//! Naive calendar date helpers.
//!
//! Every `YYYY-MM-DD` string that enters the system goes through
//! [`parse_local_date`], which builds the date from its explicit components.
//! Nothing here knows about time zones, so a date never shifts by a day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::error::DateParseError;
use super::types::TangoEvent;

/// First year a calendar date may carry.
pub const MIN_YEAR: i32 = 0;
/// Last year a calendar date may carry. Four-digit years keep the text form
/// fixed-width, so string order is date order.
pub const MAX_YEAR: i32 = 9999;

/// Returns true if the date's year fits the four-digit `YYYY` form.
pub fn is_supported_date(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// Only the canonical shape is accepted: four-digit year, two-digit month
/// and two-digit day, no surrounding whitespace. The date is built from its
/// components, so impossible dates such as `2024-02-30` are rejected.
///
/// ```
/// use tangoagenda_core::agenda::parse_local_date;
///
/// let date = parse_local_date("2024-01-15").unwrap();
/// assert_eq!(date.to_string(), "2024-01-15");
/// assert!(parse_local_date("2024-1-15").is_err());
/// ```
pub fn parse_local_date(s: &str) -> Result<NaiveDate, DateParseError> {
    let format_err = || DateParseError::Format(s.to_string());

    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok {
        return Err(format_err());
    }

    let year: i32 = s[0..4].parse().map_err(|_| format_err())?;
    let month: u32 = s[5..7].parse().map_err(|_| format_err())?;
    let day: u32 = s[8..10].parse().map_err(|_| format_err())?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateParseError::OutOfRange(s.to_string()))
}

/// Formats a calendar date as zero-padded `YYYY-MM-DD`.
///
/// Inverse of [`parse_local_date`] for every date accepted by
/// [`is_supported_date`].
pub fn format_local_date(date: NaiveDate) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

/// Returns the seven weekdays in order, starting from `first`.
///
/// The admin listing groups weekly events this way, starting from today.
pub fn weekdays_starting_from(first: Weekday) -> [Weekday; 7] {
    let mut days = [first; 7];
    let mut current = first;
    for day in days.iter_mut() {
        *day = current;
        current = current.succ();
    }
    days
}

/// Returns the next date on or after `from` on which the event takes place.
///
/// One-off events only take place on their own date, so `None` is returned
/// once that date has passed.
pub fn next_occurrence(event: &TangoEvent, from: NaiveDate) -> Option<NaiveDate> {
    if event.date >= from {
        return Some(event.date);
    }
    if !event.has_weekly_recurrence {
        return None;
    }

    let target = event.date.weekday().num_days_from_monday() as i64;
    let current = from.weekday().num_days_from_monday() as i64;
    let days_ahead = (target - current).rem_euclid(7);
    Some(from + Duration::days(days_ahead))
}
