//! The event occurrence resolver.
//!
//! Turns stored events into the dated agenda for a window: exact-date matches
//! are returned as they are, weekly events are projected onto every later
//! night of their weekday inside the window, and the result is ordered with
//! the configured pin rules on top.

use std::collections::HashSet;
use std::iter::successors;

use chrono::{Datelike, Days, NaiveDate};

use crate::storage::{EventQuery, EventRepository, RepositoryError};

use super::composite::split_occurrence_id;
use super::error::ResolveError;
use super::pinning::PinConfig;
use super::types::{Occurrence, TangoEvent};
use super::window::QueryWindow;

/// Projects weekly events onto the dates of `window`.
///
/// A night is produced for every date on the anchor's weekday that is
/// strictly after the anchor. The anchor itself is never re-projected.
pub fn project_recurring(candidates: &[TangoEvent], window: QueryWindow) -> Vec<Occurrence> {
    candidates
        .iter()
        .filter(|event| event.has_weekly_recurrence)
        .flat_map(|event| {
            successors(first_night_after_anchor(event.date, window), |d| {
                d.checked_add_days(Days::new(7))
            })
            .take_while(move |d| *d <= window.end)
            .map(move |d| Occurrence::projected(event, d))
        })
        .collect()
}

/// First date on the anchor's weekday that is after the anchor and not
/// before the window start.
fn first_night_after_anchor(anchor: NaiveDate, window: QueryWindow) -> Option<NaiveDate> {
    if window.start <= anchor {
        return anchor.checked_add_days(Days::new(7));
    }
    let target = anchor.weekday().num_days_from_monday() as i64;
    let current = window.start.weekday().num_days_from_monday() as i64;
    let ahead = (target - current).rem_euclid(7) as u64;
    window.start.checked_add_days(Days::new(ahead))
}

/// Concatenates exact matches and projections, keeping the first occurrence
/// of every ID.
pub fn merge_occurrences(exact: Vec<TangoEvent>, projected: Vec<Occurrence>) -> Vec<Occurrence> {
    let mut seen = HashSet::new();
    exact
        .into_iter()
        .map(Occurrence::from_event)
        .chain(projected)
        .filter(|occurrence| seen.insert(occurrence.id().to_string()))
        .collect()
}

/// Orders occurrences: primary pins, weekday pins, date, creation time, ID.
///
/// Weekday pins only rank occurrences that no primary pin matched. The final
/// ID key makes the order total.
pub fn sort_occurrences(occurrences: &mut [Occurrence], pins: &PinConfig) {
    occurrences.sort_by_cached_key(|occurrence| {
        let primary = pins.primary_priority(occurrence);
        let weekday = match primary {
            Some(_) => None,
            None => pins.weekday_priority(occurrence),
        };
        (
            rank(primary),
            rank(weekday),
            occurrence.date(),
            occurrence.created_at(),
            occurrence.id().to_string(),
        )
    });
}

/// Pinned (lower priority first) before unpinned.
fn rank(priority: Option<u32>) -> (bool, u32) {
    match priority {
        Some(p) => (false, p),
        None => (true, 0),
    }
}

/// Resolves the agenda for `[start, end]`, or for `start` alone when `end`
/// is absent.
///
/// Both store queries run concurrently. If either fails the whole call fails;
/// partial agendas are never returned.
pub async fn resolve_occurrences<R>(
    repo: &R,
    start: NaiveDate,
    end: Option<NaiveDate>,
    pins: &PinConfig,
) -> Result<Vec<Occurrence>, ResolveError>
where
    R: EventRepository + ?Sized,
{
    let window = QueryWindow::from_bounds(start, end)?;

    let exact_query = EventQuery::exact_matches(window);
    let recurring_query = EventQuery::recurring_candidates(window);

    let (exact, candidates) = tokio::try_join!(
        repo.query_events(&exact_query),
        repo.query_events(&recurring_query),
    )?;

    let projected = project_recurring(&candidates, window);
    let mut occurrences = merge_occurrences(exact, projected);
    sort_occurrences(&mut occurrences, pins);

    Ok(occurrences)
}

/// Looks up a single occurrence by plain or composite ID.
///
/// A composite ID only resolves when its base event is visible, recurs
/// weekly, and the date is a later night on the anchor's weekday.
pub async fn get_occurrence<R>(repo: &R, id: &str) -> Result<Occurrence, RepositoryError>
where
    R: EventRepository + ?Sized,
{
    let not_found = || RepositoryError::NotFound {
        entity_type: "Event",
        id: id.to_string(),
    };

    let occurrence_ref = split_occurrence_id(id).map_err(|_| not_found())?;

    let event = repo
        .get_event(&occurrence_ref.base_id)
        .await?
        .filter(TangoEvent::is_visible)
        .ok_or_else(not_found)?;

    match occurrence_ref.override_date {
        None => Ok(Occurrence::from_event(event)),
        Some(date)
            if event.has_weekly_recurrence
                && date.weekday() == event.date.weekday()
                && date > event.date =>
        {
            Ok(Occurrence::projected(&event, date))
        }
        Some(_) => Err(not_found()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc, Weekday};

    use super::*;
    use crate::agenda::error::WindowError;
    use crate::agenda::types::EventType;
    use crate::storage::Result as RepoResult;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 12, 1, hour, 0, 0).unwrap()
    }

    /// In-memory event store used by the resolver tests.
    #[derive(Default)]
    struct FakeRepository {
        events: Mutex<HashMap<String, TangoEvent>>,
    }

    impl FakeRepository {
        fn with_events(events: Vec<TangoEvent>) -> Self {
            let repo = Self::default();
            {
                let mut map = repo.events.lock().unwrap();
                for event in events {
                    map.insert(event.id.clone(), event);
                }
            }
            repo
        }
    }

    #[async_trait]
    impl EventRepository for FakeRepository {
        async fn get_event(&self, id: &str) -> RepoResult<Option<TangoEvent>> {
            let events = self.events.lock().unwrap();
            Ok(events.get(id).filter(|e| e.deleted_at.is_none()).cloned())
        }

        async fn query_events(&self, query: &EventQuery) -> RepoResult<Vec<TangoEvent>> {
            let events = self.events.lock().unwrap();
            Ok(query.apply(events.values()))
        }

        async fn create_event(&self, event: &TangoEvent) -> RepoResult<()> {
            self.events
                .lock()
                .unwrap()
                .insert(event.id.clone(), event.clone());
            Ok(())
        }

        async fn update_event(&self, event: &TangoEvent) -> RepoResult<()> {
            self.create_event(event).await
        }

        async fn set_event_active(&self, _id: &str, _active: bool) -> RepoResult<()> {
            Ok(())
        }

        async fn soft_delete_event(&self, _id: &str, _at: DateTime<Utc>) -> RepoResult<()> {
            Ok(())
        }
    }

    /// Store whose queries fail, either always or only for recurring queries.
    struct FailingRepository {
        only_recurring: bool,
    }

    #[async_trait]
    impl EventRepository for FailingRepository {
        async fn get_event(&self, _id: &str) -> RepoResult<Option<TangoEvent>> {
            Err(RepositoryError::ConnectionFailed("store unreachable".to_string()))
        }

        async fn query_events(&self, query: &EventQuery) -> RepoResult<Vec<TangoEvent>> {
            if self.only_recurring && query.recurring != Some(true) {
                return Ok(vec![
                    TangoEvent::new("Milonga", EventType::Milonga, date(2024, 1, 15))
                        .with_id("exact"),
                ]);
            }
            Err(RepositoryError::QueryFailed("recurring query failed".to_string()))
        }

        async fn create_event(&self, _event: &TangoEvent) -> RepoResult<()> {
            unimplemented!()
        }

        async fn update_event(&self, _event: &TangoEvent) -> RepoResult<()> {
            unimplemented!()
        }

        async fn set_event_active(&self, _id: &str, _active: bool) -> RepoResult<()> {
            unimplemented!()
        }

        async fn soft_delete_event(&self, _id: &str, _at: DateTime<Utc>) -> RepoResult<()> {
            unimplemented!()
        }
    }

    fn ids(occurrences: &[Occurrence]) -> Vec<&str> {
        occurrences.iter().map(|o| o.id()).collect()
    }

    #[tokio::test]
    async fn test_weekly_event_projects_onto_later_monday() {
        // Monday anchor, queried two weeks later.
        let repo = FakeRepository::with_events(vec![TangoEvent::weekly(
            "Práctica",
            EventType::Practice,
            date(2024, 1, 1),
        )
        .with_id("A")]);

        let result = resolve_occurrences(&repo, date(2024, 1, 15), None, &PinConfig::default())
            .await
            .unwrap();

        assert_eq!(ids(&result), vec!["A_2024-01-15"]);
        assert_eq!(result[0].date(), date(2024, 1, 15));
        assert_eq!(result[0].base_id, "A");
    }

    #[tokio::test]
    async fn test_one_off_event_on_its_date() {
        let repo = FakeRepository::with_events(vec![TangoEvent::new(
            "Festival",
            EventType::SpecialEvent,
            date(2024, 3, 10),
        )
        .with_id("B")]);

        let result = resolve_occurrences(&repo, date(2024, 3, 10), None, &PinConfig::default())
            .await
            .unwrap();

        assert_eq!(ids(&result), vec!["B"]);
        assert!(!result[0].is_projected());
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty_agenda() {
        let repo = FakeRepository::default();

        let result = resolve_occurrences(
            &repo,
            date(2024, 6, 1),
            Some(date(2024, 6, 30)),
            &PinConfig::default(),
        )
        .await
        .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_end_before_start_is_invalid_window() {
        let repo = FailingRepository {
            only_recurring: false,
        };

        let result = resolve_occurrences(
            &repo,
            date(2024, 1, 10),
            Some(date(2024, 1, 1)),
            &PinConfig::default(),
        )
        .await;

        // The failing store is never reached.
        assert!(matches!(result, Err(ResolveError::InvalidWindow(_))));
    }

    #[tokio::test]
    async fn test_recurring_failure_fails_whole_resolution() {
        let repo = FailingRepository {
            only_recurring: true,
        };

        let result = resolve_occurrences(&repo, date(2024, 1, 15), None, &PinConfig::default())
            .await;

        assert_eq!(
            result,
            Err(ResolveError::UpstreamQuery(RepositoryError::QueryFailed(
                "recurring query failed".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_anchor_in_window_appears_once_and_later_nights_are_projected() {
        let repo = FakeRepository::with_events(vec![TangoEvent::weekly(
            "Práctica",
            EventType::Practice,
            date(2024, 1, 1),
        )
        .with_id("A")]);

        let result = resolve_occurrences(
            &repo,
            date(2024, 1, 1),
            Some(date(2024, 1, 31)),
            &PinConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            ids(&result),
            vec!["A", "A_2024-01-08", "A_2024-01-15", "A_2024-01-22", "A_2024-01-29"]
        );
    }

    #[tokio::test]
    async fn test_window_properties_over_a_mixed_store() {
        let repo = FakeRepository::with_events(vec![
            TangoEvent::weekly("Lunes", EventType::Practice, date(2023, 11, 6)).with_id("mon"),
            TangoEvent::weekly("Viernes", EventType::Milonga, date(2024, 2, 9)).with_id("fri"),
            TangoEvent::weekly("Futuro", EventType::Class, date(2024, 5, 1)).with_id("future"),
            TangoEvent::new("Festival", EventType::SpecialEvent, date(2024, 2, 14))
                .with_id("fest"),
            TangoEvent::new("Fuera", EventType::Milonga, date(2024, 3, 14)).with_id("outside"),
            TangoEvent::weekly("Oculta", EventType::Milonga, date(2024, 1, 2))
                .with_id("hidden")
                .inactive(),
        ]);
        let window = QueryWindow::new(date(2024, 2, 1), date(2024, 2, 29)).unwrap();

        let result = resolve_occurrences(
            &repo,
            window.start,
            Some(window.end),
            &PinConfig::default(),
        )
        .await
        .unwrap();

        let mut unique = HashSet::new();
        for occurrence in &result {
            assert!(unique.insert(occurrence.id()), "duplicate {}", occurrence.id());
            assert!(window.contains(occurrence.date()));
            if occurrence.is_projected() {
                let base = repo.get_event(&occurrence.base_id).await.unwrap().unwrap();
                assert_eq!(occurrence.date().weekday(), base.date.weekday());
                assert!(occurrence.date() > base.date);
            }
        }

        assert_eq!(
            ids(&result),
            vec![
                "mon_2024-02-05",
                "fri",
                "mon_2024-02-12",
                "fest",
                "fri_2024-02-16",
                "mon_2024-02-19",
                "fri_2024-02-23",
                "mon_2024-02-26",
            ]
        );
        assert_eq!(
            result.iter().map(|o| o.date()).collect::<Vec<_>>(),
            vec![
                date(2024, 2, 5),
                date(2024, 2, 9),
                date(2024, 2, 12),
                date(2024, 2, 14),
                date(2024, 2, 16),
                date(2024, 2, 19),
                date(2024, 2, 23),
                date(2024, 2, 26),
            ]
        );
    }

    #[test]
    fn test_sort_falls_back_to_date_then_created_at() {
        let day = date(2024, 4, 5);
        let mut occurrences = vec![
            Occurrence::from_event(
                TangoEvent::new("Tarde", EventType::Milonga, day)
                    .with_id("late")
                    .with_created_at(at(12)),
            ),
            Occurrence::from_event(
                TangoEvent::new("Antes", EventType::Milonga, day - Duration::days(1))
                    .with_id("yesterday")
                    .with_created_at(at(23)),
            ),
            Occurrence::from_event(
                TangoEvent::new("Temprano", EventType::Milonga, day)
                    .with_id("early")
                    .with_created_at(at(8)),
            ),
        ];

        sort_occurrences(&mut occurrences, &PinConfig::default());

        assert_eq!(ids(&occurrences), vec!["yesterday", "early", "late"]);
    }

    #[test]
    fn test_sort_breaks_full_ties_on_id() {
        let day = date(2024, 4, 5);
        let mut occurrences: Vec<_> = ["c", "a", "b"]
            .into_iter()
            .map(|id| {
                Occurrence::from_event(
                    TangoEvent::new("Igual", EventType::Class, day)
                        .with_id(id)
                        .with_created_at(at(10)),
                )
            })
            .collect();

        sort_occurrences(&mut occurrences, &PinConfig::default());

        assert_eq!(ids(&occurrences), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_primary_pin_comes_first() {
        let semillero = TangoEvent::weekly("Semillero", EventType::Class, date(2024, 1, 3))
            .with_id("semillero");
        let mut occurrences = vec![
            Occurrence::from_event(
                TangoEvent::new("Milonga", EventType::Milonga, date(2024, 1, 8)).with_id("m"),
            ),
            Occurrence::projected(&semillero, date(2024, 1, 10)),
        ];
        let pins = PinConfig::new().with_primary("semillero", 0);

        sort_occurrences(&mut occurrences, &pins);

        assert_eq!(ids(&occurrences), vec!["semillero_2024-01-10", "m"]);
    }

    #[test]
    fn test_weekday_pin_applies_only_on_its_weekday() {
        // 2024-01-05 is a Friday.
        let calesita = TangoEvent::weekly("La Calesita", EventType::Milonga, date(2024, 1, 5))
            .with_id("calesita")
            .with_created_at(at(23));
        let other_friday = TangoEvent::new("Otra", EventType::Milonga, date(2024, 1, 12))
            .with_id("other")
            .with_created_at(at(1));
        let thursday = TangoEvent::new("Jueves", EventType::Class, date(2024, 1, 11))
            .with_id("thursday");

        let pins = PinConfig::new().with_weekday("calesita", Weekday::Fri, 1);
        let window = QueryWindow::new(date(2024, 1, 11), date(2024, 1, 12)).unwrap();

        let projected = project_recurring(std::slice::from_ref(&calesita), window);
        let mut occurrences =
            merge_occurrences(vec![other_friday.clone(), thursday.clone()], projected);
        sort_occurrences(&mut occurrences, &pins);

        assert_eq!(
            ids(&occurrences),
            vec!["calesita_2024-01-12", "thursday", "other"]
        );

        // Moved to a Saturday, the same event is no longer pinned.
        let mut saturday = calesita.clone();
        saturday.date = date(2024, 1, 13);
        saturday.has_weekly_recurrence = false;
        let mut occurrences = vec![
            Occurrence::from_event(saturday),
            Occurrence::from_event(thursday),
        ];
        sort_occurrences(&mut occurrences, &pins);
        assert_eq!(ids(&occurrences), vec!["thursday", "calesita"]);
    }

    #[test]
    fn test_primary_pin_outranks_weekday_pin() {
        let friday = date(2024, 1, 12);
        let mut occurrences = vec![
            Occurrence::from_event(
                TangoEvent::new("La Calesita", EventType::Milonga, friday).with_id("calesita"),
            ),
            Occurrence::from_event(
                TangoEvent::new("Semillero", EventType::Class, date(2024, 1, 13))
                    .with_id("semillero"),
            ),
        ];
        let pins = PinConfig::new()
            .with_primary("semillero", 0)
            .with_weekday("calesita", Weekday::Fri, 0);

        sort_occurrences(&mut occurrences, &pins);

        assert_eq!(ids(&occurrences), vec!["semillero", "calesita"]);
    }

    #[test]
    fn test_merge_keeps_first_of_duplicate_ids() {
        let event = TangoEvent::new("Milonga", EventType::Milonga, date(2024, 1, 1)).with_id("x");
        let mut copy = event.clone();
        copy.title = "Copia".to_string();

        let merged = merge_occurrences(vec![event, copy], Vec::new());

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].event.title, "Milonga");
    }

    #[test]
    fn test_project_skips_anchor_and_earlier_dates() {
        let event = TangoEvent::weekly("Práctica", EventType::Practice, date(2024, 1, 8))
            .with_id("A");
        let window = QueryWindow::new(date(2024, 1, 1), date(2024, 1, 15)).unwrap();

        let projected = project_recurring(&[event], window);

        assert_eq!(ids(&projected), vec!["A_2024-01-15"]);
    }

    #[test]
    fn test_project_steps_weekly_across_a_year() {
        // Wednesday anchor long before the window; the window opens on a Monday.
        let event = TangoEvent::weekly("Milonga", EventType::Milonga, date(2020, 1, 1))
            .with_id("W");
        let window = QueryWindow::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();

        let projected = project_recurring(&[event.clone()], window);

        let expected: Vec<NaiveDate> = window
            .days()
            .filter(|d| d.weekday() == event.date.weekday() && *d > event.date)
            .collect();
        let dates: Vec<NaiveDate> = projected.iter().map(|o| o.date()).collect();
        assert_eq!(dates, expected);
        assert_eq!(dates.first(), Some(&date(2024, 1, 3)));
        assert_eq!(dates.last(), Some(&date(2024, 12, 25)));
    }

    #[test]
    fn test_project_anchor_on_window_start() {
        let event = TangoEvent::weekly("Clase", EventType::Class, date(2024, 1, 1))
            .with_id("A");
        let window = QueryWindow::new(date(2024, 1, 1), date(2024, 1, 14)).unwrap();

        assert_eq!(ids(&project_recurring(&[event], window)), vec!["A_2024-01-08"]);
    }

    #[tokio::test]
    async fn test_oversized_window_is_rejected_before_querying() {
        let repo = FailingRepository {
            only_recurring: false,
        };

        let result = resolve_occurrences(
            &repo,
            date(1, 1, 1),
            Some(date(9999, 12, 31)),
            &PinConfig::default(),
        )
        .await;

        assert!(matches!(
            result,
            Err(ResolveError::InvalidWindow(WindowError::TooLong { .. }))
        ));
    }

    #[tokio::test]
    async fn test_get_occurrence_plain_and_composite() {
        let repo = FakeRepository::with_events(vec![TangoEvent::weekly(
            "Práctica",
            EventType::Practice,
            date(2024, 1, 1),
        )
        .with_id("A")]);

        let plain = get_occurrence(&repo, "A").await.unwrap();
        assert_eq!(plain.id(), "A");
        assert_eq!(plain.date(), date(2024, 1, 1));

        let night = get_occurrence(&repo, "A_2024-01-22").await.unwrap();
        assert_eq!(night.id(), "A_2024-01-22");
        assert_eq!(night.date(), date(2024, 1, 22));
        assert_eq!(night.base_id, "A");
    }

    #[tokio::test]
    async fn test_get_occurrence_rejects_impossible_nights() {
        let repo = FakeRepository::with_events(vec![
            TangoEvent::weekly("Práctica", EventType::Practice, date(2024, 1, 1)).with_id("A"),
            TangoEvent::new("Festival", EventType::SpecialEvent, date(2024, 1, 1)).with_id("B"),
            TangoEvent::weekly("Oculta", EventType::Milonga, date(2024, 1, 1))
                .with_id("C")
                .inactive(),
        ]);

        for id in [
            "A_2024-01-23",  // wrong weekday
            "A_2024-01-01",  // the anchor itself
            "A_2023-12-25",  // before the anchor
            "B_2024-01-08",  // not weekly
            "C_2024-01-08",  // inactive
            "A_not-a-date",  // malformed
            "missing",
        ] {
            let result = get_occurrence(&repo, id).await;
            assert!(
                matches!(result, Err(RepositoryError::NotFound { .. })),
                "expected not found for {id}"
            );
        }
    }

    #[tokio::test]
    async fn test_get_occurrence_propagates_store_errors() {
        let repo = FailingRepository {
            only_recurring: false,
        };

        let result = get_occurrence(&repo, "A").await;

        assert!(matches!(result, Err(RepositoryError::ConnectionFailed(_))));
    }
}
