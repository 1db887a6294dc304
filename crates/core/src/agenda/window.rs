use chrono::NaiveDate;

use super::dates::is_supported_date;
use super::error::WindowError;

/// Longest window, in days, the agenda can be resolved over.
pub const MAX_WINDOW_DAYS: i64 = 366;

/// An inclusive window of calendar dates the agenda is resolved over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl QueryWindow {
    /// Creates a window. Both bounds must be four-digit-year dates, `start`
    /// must not be after `end`, and the window may cover at most
    /// [`MAX_WINDOW_DAYS`] days.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        for bound in [start, end] {
            if !is_supported_date(bound) {
                return Err(WindowError::UnsupportedDate(bound));
            }
        }
        if end < start {
            return Err(WindowError::EndBeforeStart { start, end });
        }
        if (end - start).num_days() >= MAX_WINDOW_DAYS {
            return Err(WindowError::TooLong {
                start,
                end,
                max_days: MAX_WINDOW_DAYS,
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a single-day window.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Creates a window from an optional end date. A missing end means a
    /// single day.
    pub fn from_bounds(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self, WindowError> {
        match end {
            Some(end) => Self::new(start, end),
            None => Self::new(start, start),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Iterates over every date of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take_while({
            let end = self.end;
            move |d| *d <= end
        })
    }
}
