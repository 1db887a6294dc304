//! Pin rules that float selected events to the top of the agenda.
//!
//! A rule names either a stored event ID or the base ID of a weekly event;
//! in the latter case it also matches every projected night
//! (`{id}_{YYYY-MM-DD}`). Primary rules always apply. Weekday rules only apply
//! to occurrences that fall on the rule's weekday.

use std::str::FromStr;

use chrono::{Datelike, Weekday};
use thiserror::Error;

use super::composite::COMPOSITE_SEPARATOR;
use super::types::Occurrence;

/// Errors that can occur when parsing pin rules from configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PinParseError {
    #[error("Invalid pin rule (expected id:priority): {0}")]
    InvalidRule(String),
    #[error("Invalid weekday in pin rule: {0}")]
    InvalidWeekday(String),
    #[error("Invalid priority in pin rule: {0}")]
    InvalidPriority(String),
}

/// A pin that always applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRule {
    pub id_or_prefix: String,
    pub priority: u32,
}

/// A pin that only applies on a given weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayPinRule {
    pub id_or_prefix: String,
    pub weekday: Weekday,
    pub priority: u32,
}

/// The set of pin rules injected into the resolver.
///
/// An empty config yields a purely chronological agenda.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinConfig {
    pub primary: Vec<PinRule>,
    pub weekday: Vec<WeekdayPinRule>,
}

/// Returns true if `id` is `rule_id` itself or a projection of it.
pub fn matches_pin(id: &str, rule_id: &str) -> bool {
    match id.strip_prefix(rule_id) {
        Some("") => true,
        Some(rest) => rest.starts_with(COMPOSITE_SEPARATOR),
        None => false,
    }
}

impl PinConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primary(mut self, id_or_prefix: impl Into<String>, priority: u32) -> Self {
        self.primary.push(PinRule {
            id_or_prefix: id_or_prefix.into(),
            priority,
        });
        self
    }

    pub fn with_weekday(
        mut self,
        id_or_prefix: impl Into<String>,
        weekday: Weekday,
        priority: u32,
    ) -> Self {
        self.weekday.push(WeekdayPinRule {
            id_or_prefix: id_or_prefix.into(),
            weekday,
            priority,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.weekday.is_empty()
    }

    /// Lowest priority among the primary rules matching the occurrence.
    pub fn primary_priority(&self, occurrence: &Occurrence) -> Option<u32> {
        self.primary
            .iter()
            .filter(|rule| matches_pin(occurrence.id(), &rule.id_or_prefix))
            .map(|rule| rule.priority)
            .min()
    }

    /// Lowest priority among the weekday rules matching the occurrence on its
    /// own date.
    pub fn weekday_priority(&self, occurrence: &Occurrence) -> Option<u32> {
        let weekday = occurrence.date().weekday();
        self.weekday
            .iter()
            .filter(|rule| rule.weekday == weekday)
            .filter(|rule| matches_pin(occurrence.id(), &rule.id_or_prefix))
            .map(|rule| rule.priority)
            .min()
    }

    /// Parses a config from its environment representation.
    ///
    /// `primary` is a comma-separated list of `id:priority`, and `weekday` a
    /// comma-separated list of `id@weekday:priority`. Weekdays accept English
    /// names or abbreviations (`fri`, `Friday`).
    pub fn parse(primary: &str, weekday: &str) -> Result<Self, PinParseError> {
        let mut config = Self::new();

        for item in split_list(primary) {
            let (id, priority) = split_rule(item)?;
            config = config.with_primary(id, priority);
        }

        for item in split_list(weekday) {
            let (target, priority) = split_rule(item)?;
            let (id, day) = target
                .split_once('@')
                .ok_or_else(|| PinParseError::InvalidRule(item.to_string()))?;
            let day = Weekday::from_str(day.trim())
                .map_err(|_| PinParseError::InvalidWeekday(day.to_string()))?;
            let id = id.trim();
            if id.is_empty() {
                return Err(PinParseError::InvalidRule(item.to_string()));
            }
            config = config.with_weekday(id, day, priority);
        }

        Ok(config)
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn split_rule(item: &str) -> Result<(&str, u32), PinParseError> {
    let (id, priority) = item
        .rsplit_once(':')
        .ok_or_else(|| PinParseError::InvalidRule(item.to_string()))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(PinParseError::InvalidRule(item.to_string()));
    }
    let priority = priority
        .trim()
        .parse()
        .map_err(|_| PinParseError::InvalidPriority(item.to_string()))?;
    Ok((id, priority))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::agenda::types::{EventType, TangoEvent};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_matches_pin() {
        assert!(matches_pin("semillero", "semillero"));
        assert!(matches_pin("semillero_2024-01-05", "semillero"));
        assert!(!matches_pin("semillero2", "semillero"));
        assert!(!matches_pin("other", "semillero"));
    }

    #[test]
    fn test_weekday_priority_only_on_weekday() {
        let base = TangoEvent::weekly("La Calesita", EventType::Milonga, date(2024, 1, 5))
            .with_id("calesita");
        let config = PinConfig::new().with_weekday("calesita", Weekday::Fri, 1);

        // 2024-01-12 is a Friday.
        let friday = Occurrence::projected(&base, date(2024, 1, 12));
        assert_eq!(config.weekday_priority(&friday), Some(1));

        let mut moved = base.clone();
        moved.date = date(2024, 1, 6);
        let saturday = Occurrence::from_event(moved);
        assert_eq!(config.weekday_priority(&saturday), None);
    }

    #[test]
    fn test_primary_priority_takes_lowest() {
        let event = Occurrence::from_event(
            TangoEvent::new("Semillero", EventType::Class, date(2024, 1, 1)).with_id("semillero"),
        );
        let config = PinConfig::new()
            .with_primary("semillero", 5)
            .with_primary("semillero", 2);
        assert_eq!(config.primary_priority(&event), Some(2));
    }

    #[test]
    fn test_parse_config() {
        let config = PinConfig::parse("semillero:0, other:3", "calesita@fri:1").unwrap();

        assert_eq!(
            config,
            PinConfig::new()
                .with_primary("semillero", 0)
                .with_primary("other", 3)
                .with_weekday("calesita", Weekday::Fri, 1)
        );
    }

    #[test]
    fn test_parse_empty_config() {
        let config = PinConfig::parse("", " ").unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_rules() {
        assert!(matches!(
            PinConfig::parse("semillero", ""),
            Err(PinParseError::InvalidRule(_))
        ));
        assert!(matches!(
            PinConfig::parse("semillero:first", ""),
            Err(PinParseError::InvalidPriority(_))
        ));
        assert!(matches!(
            PinConfig::parse("", "calesita@someday:1"),
            Err(PinParseError::InvalidWeekday(_))
        ));
        assert!(matches!(
            PinConfig::parse("", "calesita:1"),
            Err(PinParseError::InvalidRule(_))
        ));
    }
}
