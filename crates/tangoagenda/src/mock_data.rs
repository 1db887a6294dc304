use chrono::NaiveDate;

use tangoagenda_core::agenda::{generate_seed_events, generate_seed_teachers};

use crate::state::AppState;

/// Fills the store with demo teachers and events around `today`.
pub async fn seed_demo_data(state: &AppState, today: NaiveDate) -> anyhow::Result<()> {
    let teachers = generate_seed_teachers();
    for teacher in &teachers {
        state.teacher_repo.create_teacher(teacher).await?;
    }

    let events = generate_seed_events(today, &teachers);
    for event in &events {
        state.event_repo.create_event(event).await?;
    }

    tracing::info!(
        teachers = teachers.len(),
        events = events.len(),
        %today,
        "Seeded demo data"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangoagenda_core::agenda::resolve_occurrences;
    use tangoagenda_core::storage::EventQuery;

    #[tokio::test]
    async fn test_seeded_agenda_shows_next_weeks() {
        let state = AppState::default();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        seed_demo_data(&state, today).await.unwrap();

        let stored = state
            .event_repo
            .query_events(&EventQuery::admin())
            .await
            .unwrap();
        assert_eq!(stored.len(), 6);
        assert_eq!(state.teacher_repo.list_teachers().await.unwrap().len(), 3);

        // Two weeks ahead: three weekly nights per week plus the gala and
        // the festival.
        let end = today + chrono::Duration::days(13);
        let agenda = resolve_occurrences(
            state.event_repo.as_ref(),
            today + chrono::Duration::days(1),
            Some(end),
            state.pins(),
        )
        .await
        .unwrap();
        assert_eq!(agenda.len(), 8);
    }
}
