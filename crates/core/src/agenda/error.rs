use chrono::NaiveDate;
use thiserror::Error;

use crate::storage::RepositoryError;

/// Errors that can occur when parsing a `YYYY-MM-DD` date.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("Invalid date format (expected YYYY-MM-DD): {0}")]
    Format(String),
    #[error("Date does not exist: {0}")]
    OutOfRange(String),
}

/// Errors that can occur when constructing a query window.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("Invalid window: end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("Invalid window: {start} to {end} spans more than {max_days} days")]
    TooLong {
        start: NaiveDate,
        end: NaiveDate,
        max_days: i64,
    },
    #[error("Invalid window: {0} is outside years 0000 to 9999")]
    UnsupportedDate(NaiveDate),
}

/// Errors that can occur when splitting an occurrence ID.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompositeIdError {
    #[error("Occurrence ID cannot be empty")]
    Empty,
    #[error("Invalid occurrence date suffix: {0}")]
    InvalidDate(#[from] DateParseError),
}

/// Errors returned by the occurrence resolver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    InvalidWindow(#[from] WindowError),
    #[error("Upstream query failed: {0}")]
    UpstreamQuery(#[from] RepositoryError),
}

/// Errors that can occur when validating an event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event title too long (max 200 characters)")]
    TitleTooLong,
    #[error("Event ID cannot contain '_': {0}")]
    ReservedIdCharacter(String),
    #[error("Price cannot be negative: {0}")]
    NegativePrice(String),
    #[error("Class end time must be after start time: {0}")]
    InvalidClassTime(String),
    #[error("Seminar days must be numbered from 1")]
    InvalidSeminarDay,
}

/// Errors that can occur when validating a teacher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TeacherError {
    #[error("Teacher name cannot be empty")]
    EmptyName,
    #[error("Teacher name too long (max 100 characters)")]
    NameTooLong,
}
