use chrono::{Datelike, Weekday};
use serde::Serialize;

use super::composite::COMPOSITE_SEPARATOR;
use super::dates::weekdays_starting_from;
use super::error::{EventError, TeacherError};
use super::types::{TangoEvent, Teacher};

/// Validates an event before creation or update.
pub fn validate_event(event: &TangoEvent) -> Result<(), EventError> {
    if event.title.trim().is_empty() {
        return Err(EventError::EmptyTitle);
    }
    if event.title.chars().count() > 200 {
        return Err(EventError::TitleTooLong);
    }
    // Composite occurrence IDs split on the first separator.
    if event.id.contains(COMPOSITE_SEPARATOR) {
        return Err(EventError::ReservedIdCharacter(event.id.clone()));
    }

    if let Some(pricing) = event.pricing.iter().find(|p| p.price < 0.0 || p.price.is_nan()) {
        return Err(EventError::NegativePrice(pricing.price_type.clone()));
    }

    let all_classes = event
        .classes
        .iter()
        .chain(event.seminar_days.iter().flat_map(|day| day.classes.iter()));
    for class in all_classes {
        if class.end_time.is_some_and(|end| end <= class.start_time) {
            return Err(EventError::InvalidClassTime(class.class_name.clone()));
        }
    }

    if event.seminar_days.iter().any(|day| day.day_number == 0) {
        return Err(EventError::InvalidSeminarDay);
    }

    Ok(())
}

/// Validates a teacher before creation or update.
pub fn validate_teacher(teacher: &Teacher) -> Result<(), TeacherError> {
    if teacher.name.trim().is_empty() {
        return Err(TeacherError::EmptyName);
    }
    if teacher.name.chars().count() > 100 {
        return Err(TeacherError::NameTooLong);
    }
    Ok(())
}

/// Spanish weekday name shown in the admin listing.
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Weekly events that take place on one weekday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayGroup {
    pub weekday: Weekday,
    pub label: &'static str,
    pub events: Vec<TangoEvent>,
}

/// Groups weekly events by the weekday of their anchor, starting from
/// `first` and keeping only weekdays that have events.
///
/// Within a group, events keep their input order.
pub fn group_recurring_by_weekday(events: &[TangoEvent], first: Weekday) -> Vec<WeekdayGroup> {
    weekdays_starting_from(first)
        .into_iter()
        .filter_map(|weekday| {
            let events: Vec<TangoEvent> = events
                .iter()
                .filter(|e| e.has_weekly_recurrence && e.date.weekday() == weekday)
                .cloned()
                .collect();
            (!events.is_empty()).then(|| WeekdayGroup {
                weekday,
                label: weekday_label(weekday),
                events,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::agenda::types::{EventClass, EventPricing, EventType, SeminarDay};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn class(start: NaiveTime, end: Option<NaiveTime>) -> EventClass {
        EventClass {
            class_name: "Técnica".to_string(),
            start_time: start,
            end_time: end,
            class_level: None,
            class_order: 1,
        }
    }

    fn milonga() -> TangoEvent {
        TangoEvent::new("Milonga", EventType::Milonga, date(2024, 1, 1))
    }

    #[test]
    fn test_validate_event_valid() {
        let event = milonga().with_class(class(time(19, 0), Some(time(20, 30))));
        assert!(validate_event(&event).is_ok());
    }

    #[test]
    fn test_validate_event_title() {
        let mut event = milonga();
        event.title = "   ".to_string();
        assert_eq!(validate_event(&event), Err(EventError::EmptyTitle));

        event.title = "a".repeat(201);
        assert_eq!(validate_event(&event), Err(EventError::TitleTooLong));

        event.title = "ñ".repeat(200);
        assert!(validate_event(&event).is_ok());
    }

    #[test]
    fn test_validate_event_rejects_separator_in_id() {
        let event = milonga().with_id("la_calesita");
        assert_eq!(
            validate_event(&event),
            Err(EventError::ReservedIdCharacter("la_calesita".to_string()))
        );
    }

    #[test]
    fn test_validate_event_negative_price() {
        let event = milonga().with_pricing(EventPricing {
            price_type: "general".to_string(),
            price: -1.0,
            description: None,
        });
        assert_eq!(
            validate_event(&event),
            Err(EventError::NegativePrice("general".to_string()))
        );
    }

    #[test]
    fn test_validate_event_class_times() {
        let event = milonga().with_class(class(time(20, 0), Some(time(19, 0))));
        assert_eq!(
            validate_event(&event),
            Err(EventError::InvalidClassTime("Técnica".to_string()))
        );

        let open_ended = milonga().with_class(class(time(20, 0), None));
        assert!(validate_event(&open_ended).is_ok());
    }

    #[test]
    fn test_validate_event_seminar_days() {
        let mut event = TangoEvent::new("Seminario", EventType::Seminar, date(2024, 5, 10));
        event.seminar_days.push(SeminarDay {
            day_number: 0,
            date: date(2024, 5, 10),
            theme: None,
            classes: Vec::new(),
        });
        assert_eq!(validate_event(&event), Err(EventError::InvalidSeminarDay));

        event.seminar_days[0].day_number = 1;
        event.seminar_days[0]
            .classes
            .push(class(time(18, 0), Some(time(18, 0))));
        assert!(matches!(
            validate_event(&event),
            Err(EventError::InvalidClassTime(_))
        ));
    }

    #[test]
    fn test_validate_teacher() {
        assert!(validate_teacher(&Teacher::new("Graciela")).is_ok());
        assert_eq!(
            validate_teacher(&Teacher::new(" ")),
            Err(TeacherError::EmptyName)
        );
        assert_eq!(
            validate_teacher(&Teacher::new("x".repeat(101))),
            Err(TeacherError::NameTooLong)
        );
    }

    #[test]
    fn test_group_recurring_by_weekday_starts_from_today() {
        // 2024-01-01 is a Monday, 2024-01-05 a Friday, 2024-01-07 a Sunday.
        let events = vec![
            TangoEvent::weekly("Lunes", EventType::Practice, date(2024, 1, 1)).with_id("mon"),
            TangoEvent::weekly("Viernes", EventType::Milonga, date(2024, 1, 5)).with_id("fri"),
            TangoEvent::weekly("Domingo", EventType::Milonga, date(2024, 1, 7)).with_id("sun"),
            TangoEvent::new("Suelta", EventType::Milonga, date(2024, 1, 5)).with_id("one"),
        ];

        let groups = group_recurring_by_weekday(&events, Weekday::Fri);

        let summary: Vec<(Weekday, &str, Vec<&str>)> = groups
            .iter()
            .map(|g| (g.weekday, g.label, g.events.iter().map(|e| e.id.as_str()).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Weekday::Fri, "Viernes", vec!["fri"]),
                (Weekday::Sun, "Domingo", vec!["sun"]),
                (Weekday::Mon, "Lunes", vec!["mon"]),
            ]
        );
    }
}
