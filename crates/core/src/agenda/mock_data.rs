//! Demo data for seeding a fresh store.
//!
//! Pure functions: the same `today` always yields the same agenda shape.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

use super::types::{
    ClassLevel, EventClass, EventOrganizer, EventPractice, EventPricing, EventType,
    MilongaPreClass, SeminarDay, TangoEvent, Teacher,
};

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

/// The most recent `weekday` on or before `today`.
fn last_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let back = (today.weekday().num_days_from_monday() as i64
        - weekday.num_days_from_monday() as i64)
        .rem_euclid(7);
    today - Duration::days(back)
}

fn price(price_type: &str, amount: f64) -> EventPricing {
    EventPricing {
        price_type: price_type.to_string(),
        price: amount,
        description: None,
    }
}

fn organizer(teacher: &Teacher) -> EventOrganizer {
    EventOrganizer {
        organizer_type: "teacher".to_string(),
        is_primary: true,
        teacher_id: Some(teacher.id.clone()),
        is_one_time_teacher: false,
        one_time_teacher_name: None,
    }
}

/// Demo teachers.
pub fn generate_seed_teachers() -> Vec<Teacher> {
    vec![
        Teacher::new("Graciela González").with_nickname("Grace"),
        Teacher::new("Carlos Pérez").with_phone_number("+54 11 5555-0101"),
        Teacher::new("Lucía Fernández"),
    ]
}

/// Generate a demo agenda around `today`.
///
/// Weekly events are anchored in the past week so that they project onto
/// the coming weeks. One-off events are spread over the next month.
///
/// ```
/// use chrono::NaiveDate;
/// use tangoagenda_core::agenda::{generate_seed_events, generate_seed_teachers};
///
/// let teachers = generate_seed_teachers();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let events = generate_seed_events(today, &teachers);
///
/// assert!(events.iter().any(|e| e.has_weekly_recurrence));
/// ```
pub fn generate_seed_events(today: NaiveDate, teachers: &[Teacher]) -> Vec<TangoEvent> {
    let mut events = Vec::new();

    let mut practica = TangoEvent::weekly(
        "Práctica de los Lunes",
        EventType::Practice,
        last_weekday(today, Weekday::Mon),
    )
    .with_venue("Club Sunderland")
    .with_address("Lugones 3161")
    .with_pricing(price("general", 3000.0));
    practica.practice = Some(EventPractice {
        practice_time: time(20, 0),
        practice_end_time: Some(time(23, 0)),
    });
    events.push(practica);

    let mut clase = TangoEvent::weekly(
        "Clase de Tango Salón",
        EventType::Class,
        last_weekday(today, Weekday::Wed),
    )
    .with_venue("La Viruta")
    .with_address("Armenia 1366")
    .with_class(EventClass {
        class_name: "Abrazo y caminata".to_string(),
        start_time: time(19, 0),
        end_time: Some(time(20, 30)),
        class_level: Some(ClassLevel::Beginner),
        class_order: 1,
    })
    .with_class(EventClass {
        class_name: "Giros".to_string(),
        start_time: time(20, 30),
        end_time: Some(time(22, 0)),
        class_level: Some(ClassLevel::Intermediate),
        class_order: 2,
    })
    .with_pricing(price("clase", 5000.0))
    .with_pricing(price("pack 4 clases", 18000.0));
    if let Some(teacher) = teachers.first() {
        clase.organizers.push(organizer(teacher));
    }
    events.push(clase);

    let mut milonga = TangoEvent::weekly(
        "Milonga La Calesita",
        EventType::Milonga,
        last_weekday(today, Weekday::Fri),
    )
    .with_venue("La Calesita")
    .with_address("Comodoro Rivadavia 1350")
    .with_pricing(price("general", 6000.0));
    milonga.milonga_pre_class = Some(MilongaPreClass {
        class_time: time(21, 0),
        class_end_time: Some(time(22, 30)),
        class_level: Some(ClassLevel::AllLevels),
        milonga_start_time: Some(time(22, 30)),
    });
    if let Some(teacher) = teachers.get(1) {
        milonga.organizers.push(organizer(teacher));
    }
    events.push(milonga);

    events.push(
        TangoEvent::new(
            "Festival de Primavera",
            EventType::SpecialEvent,
            today + Duration::days(12),
        )
        .with_venue("Salón Canning")
        .with_description("Orquesta en vivo y exhibición")
        .with_pricing(price("anticipada", 10000.0))
        .with_pricing(price("puerta", 12000.0)),
    );

    let seminar_start = today + Duration::days(20);
    let mut seminario = TangoEvent::new("Seminario de Vals", EventType::Seminar, seminar_start)
        .with_venue("Estudio DNI");
    seminario.seminar_days = (0..2)
        .map(|i| SeminarDay {
            day_number: i + 1,
            date: seminar_start + Duration::days(i as i64),
            theme: Some(if i == 0 { "Giros" } else { "Musicalidad" }.to_string()),
            classes: vec![EventClass {
                class_name: format!("Vals {}", i + 1),
                start_time: time(17, 0),
                end_time: Some(time(19, 0)),
                class_level: Some(ClassLevel::Advanced),
                class_order: 1,
            }],
        })
        .collect();
    if let Some(teacher) = teachers.get(2) {
        seminario.organizers.push(organizer(teacher));
    }
    events.push(seminario);

    events.push(
        TangoEvent::new("Milonga de Gala", EventType::Milonga, today + Duration::days(5))
            .with_venue("Confitería Ideal")
            .with_pricing(price("general", 8000.0)),
    );

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::operations::validate_event;

    #[test]
    fn test_seed_events_are_valid() {
        let teachers = generate_seed_teachers();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let events = generate_seed_events(today, &teachers);

        assert_eq!(events.len(), 6);
        for event in &events {
            assert!(validate_event(event).is_ok(), "invalid seed {}", event.title);
        }
    }

    #[test]
    fn test_weekly_seeds_are_anchored_on_or_before_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let events = generate_seed_events(today, &generate_seed_teachers());

        for event in events.iter().filter(|e| e.has_weekly_recurrence) {
            assert!(event.date <= today);
            assert!(today - event.date < Duration::days(7));
        }
    }

    #[test]
    fn test_last_weekday() {
        // 2024-06-15 is a Saturday.
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(last_weekday(today, Weekday::Sat), today);
        assert_eq!(
            last_weekday(today, Weekday::Fri),
            NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
        );
        assert_eq!(
            last_weekday(today, Weekday::Sun),
            NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
        );
    }
}
