use chrono::NaiveDate;

use crate::agenda::{QueryWindow, TangoEvent};

/// Date filter of an [`EventQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    Any,
    On(NaiveDate),
    Between(QueryWindow),
    /// On or before the given date.
    Until(NaiveDate),
}

impl DateFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            DateFilter::Any => true,
            DateFilter::On(d) => *d == date,
            DateFilter::Between(window) => window.contains(date),
            DateFilter::Until(d) => date <= *d,
        }
    }
}

/// Result ordering of an [`EventQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventOrder {
    /// Date, then creation time, then ID.
    #[default]
    Date,
    /// Creation time, then ID.
    CreatedAt,
}

/// Filtering contract shared by every event store.
///
/// Soft-deleted events are never returned. Inactive events are skipped
/// unless `include_inactive` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventQuery {
    pub date: DateFilter,
    pub recurring: Option<bool>,
    pub include_inactive: bool,
    pub order: EventOrder,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl EventQuery {
    /// Active events dated inside `window`, by date.
    pub fn exact_matches(window: QueryWindow) -> Self {
        let date = if window.is_single_day() {
            DateFilter::On(window.start)
        } else {
            DateFilter::Between(window)
        };
        Self {
            date,
            ..Self::default()
        }
    }

    /// Active weekly events anchored on or before the end of `window`.
    ///
    /// Later anchors cannot project into the window.
    pub fn recurring_candidates(window: QueryWindow) -> Self {
        Self {
            date: DateFilter::Until(window.end),
            recurring: Some(true),
            ..Self::default()
        }
    }

    /// Every non-deleted event, active or not, as the admin sees them.
    pub fn admin() -> Self {
        Self {
            include_inactive: true,
            ..Self::default()
        }
    }

    pub fn with_recurring(mut self, recurring: Option<bool>) -> Self {
        self.recurring = recurring;
        self
    }

    pub fn with_order(mut self, order: EventOrder) -> Self {
        self.order = order;
        self
    }

    pub fn paginate(mut self, offset: usize, limit: Option<usize>) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// Returns true if the event passes every filter of the query.
    pub fn matches(&self, event: &TangoEvent) -> bool {
        event.deleted_at.is_none()
            && (self.include_inactive || event.is_active)
            && self.date.matches(event.date)
            && self
                .recurring
                .is_none_or(|weekly| event.has_weekly_recurrence == weekly)
    }

    /// Filters, orders and paginates a set of events in memory.
    pub fn apply<'a>(&self, events: impl IntoIterator<Item = &'a TangoEvent>) -> Vec<TangoEvent> {
        let mut matched: Vec<&TangoEvent> = events.into_iter().filter(|e| self.matches(e)).collect();

        match self.order {
            EventOrder::Date => matched.sort_by(|a, b| {
                (a.date, a.created_at, &a.id).cmp(&(b.date, b.created_at, &b.id))
            }),
            EventOrder::CreatedAt => {
                matched.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)))
            }
        }

        matched
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::agenda::EventType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixtures() -> Vec<TangoEvent> {
        let mut deleted =
            TangoEvent::new("Borrado", EventType::Milonga, date(2024, 1, 3)).with_id("deleted");
        deleted.deleted_at = Some(Utc::now());

        vec![
            TangoEvent::weekly("Práctica", EventType::Practice, date(2024, 1, 1)).with_id("weekly"),
            TangoEvent::new("Milonga", EventType::Milonga, date(2024, 1, 3)).with_id("oneoff"),
            TangoEvent::new("Oculta", EventType::Milonga, date(2024, 1, 3))
                .with_id("inactive")
                .inactive(),
            deleted,
        ]
    }

    fn ids(events: &[TangoEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_default_query_skips_deleted_and_inactive() {
        let events = fixtures();
        let result = EventQuery::default().apply(&events);
        assert_eq!(ids(&result), vec!["weekly", "oneoff"]);
    }

    #[test]
    fn test_admin_query_includes_inactive_but_not_deleted() {
        let events = fixtures();
        let result = EventQuery::admin().apply(&events);
        assert_eq!(ids(&result), vec!["weekly", "oneoff", "inactive"]);
    }

    #[test]
    fn test_exact_matches_single_day() {
        let events = fixtures();
        let query = EventQuery::exact_matches(QueryWindow::single(date(2024, 1, 3)));
        assert_eq!(query.date, DateFilter::On(date(2024, 1, 3)));
        assert_eq!(ids(&query.apply(&events)), vec!["oneoff"]);
    }

    #[test]
    fn test_recurring_candidates_skip_later_anchors() {
        let events = fixtures();

        let before = QueryWindow::new(date(2023, 12, 1), date(2023, 12, 31)).unwrap();
        assert!(EventQuery::recurring_candidates(before).apply(&events).is_empty());

        let later = QueryWindow::single(date(2024, 1, 8));
        assert_eq!(
            ids(&EventQuery::recurring_candidates(later).apply(&events)),
            vec!["weekly"]
        );
    }

    #[test]
    fn test_order_by_date_breaks_ties_on_created_at() {
        let day = date(2024, 2, 1);
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        let events = vec![
            TangoEvent::new("B", EventType::Class, day).with_id("b").with_created_at(late),
            TangoEvent::new("A", EventType::Class, day).with_id("a").with_created_at(early),
        ];

        assert_eq!(ids(&EventQuery::default().apply(&events)), vec!["a", "b"]);
    }

    #[test]
    fn test_pagination() {
        let events: Vec<_> = (1..=7)
            .map(|d| {
                TangoEvent::new("Evento", EventType::Milonga, date(2024, 5, d))
                    .with_id(format!("e{d}"))
            })
            .collect();

        let page = EventQuery::admin().paginate(5, Some(5)).apply(&events);
        assert_eq!(ids(&page), vec!["e6", "e7"]);
    }
}
