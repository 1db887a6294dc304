use chrono::NaiveDate;

use super::dates::{format_local_date, parse_local_date};
use super::error::CompositeIdError;

/// Separator between the base ID and the date in a composite occurrence ID.
pub const COMPOSITE_SEPARATOR: char = '_';

/// Builds the ID of a projected occurrence: `{base_id}_{YYYY-MM-DD}`.
pub fn composite_id(base_id: &str, date: NaiveDate) -> String {
    format!("{base_id}{COMPOSITE_SEPARATOR}{}", format_local_date(date))
}

/// An occurrence ID split into its base event ID and optional projected date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceRef {
    pub base_id: String,
    pub override_date: Option<NaiveDate>,
}

/// Splits an occurrence ID on its first `_`.
///
/// A plain ID yields no override date. A composite ID must carry a valid,
/// zero-padded `YYYY-MM-DD` suffix, so every night has exactly one ID.
pub fn split_occurrence_id(id: &str) -> Result<OccurrenceRef, CompositeIdError> {
    if id.is_empty() {
        return Err(CompositeIdError::Empty);
    }

    match id.split_once(COMPOSITE_SEPARATOR) {
        None => Ok(OccurrenceRef {
            base_id: id.to_string(),
            override_date: None,
        }),
        Some((base, _)) if base.is_empty() => Err(CompositeIdError::Empty),
        Some((base, suffix)) => Ok(OccurrenceRef {
            base_id: base.to_string(),
            override_date: Some(parse_local_date(suffix)?),
        }),
    }
}
