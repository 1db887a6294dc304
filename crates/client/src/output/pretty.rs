//! Pretty output formatting.

use tangoagenda_core::agenda::{format_local_date, Occurrence, TangoEvent, Teacher};

use crate::client::{agenda::AgendaPage, events::EventPage, events::WeekdayGroup, health::HealthStatus};

fn push_event_details(output: &mut String, event: &TangoEvent) {
    if let Some(venue) = &event.venue_name {
        output.push_str(&format!("\n  Venue: {}", venue));
    }
    if let Some(address) = &event.address {
        output.push_str(&format!("\n  Address: {}", address));
    }
    if let Some(level) = event.display_level() {
        output.push_str(&format!("\n  Level: {}", level.label()));
    }
    if let Some(price) = event.main_price() {
        output.push_str(&format!("\n  Price: {} ({})", price.price, price.price_type));
    }
}

/// Format a stored event for display.
pub fn format_event(event: &TangoEvent) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Date: {}",
        event.title,
        event.event_type.label(),
        event.id,
        format_local_date(event.date)
    );
    if event.has_weekly_recurrence {
        output.push_str("\n  Repeats: weekly");
    }
    if !event.is_active {
        output.push_str("\n  Hidden from agenda");
    }
    push_event_details(&mut output, event);
    output
}

/// Format an occurrence for display.
pub fn format_occurrence(occurrence: &Occurrence) -> String {
    let event = &occurrence.event;
    let mut output = format!(
        "{}  {} [{}]\n  ID: {}",
        format_local_date(event.date),
        event.title,
        event.event_type.label(),
        event.id
    );
    if occurrence.base_id != event.id {
        output.push_str(&format!("\n  Weekly event: {}", occurrence.base_id));
    }
    push_event_details(&mut output, event);
    output
}

/// Format a resolved agenda for display.
pub fn format_agenda(page: &AgendaPage) -> String {
    if page.events.is_empty() {
        return "No events found.".to_string();
    }
    let mut output = format!("AGENDA ({})\n", page.total);
    output.push_str(&"-".repeat(40));
    for occurrence in &page.events {
        output.push_str(&format!("\n{}", format_occurrence(occurrence)));
        output.push('\n');
    }
    output
}

/// Format a page of stored events for display.
pub fn format_event_page(page: &EventPage) -> String {
    if page.events.is_empty() {
        return "No events found.".to_string();
    }
    let mut output = format!("EVENTS ({})\n", page.events.len());
    output.push_str(&"-".repeat(40));
    for event in &page.events {
        output.push_str(&format!("\n{}", format_event(event)));
        output.push('\n');
    }
    if page.has_more {
        output.push_str("(more events available, use --offset)\n");
    }
    output
}

/// Format weekly events grouped by weekday.
pub fn format_weekday_groups(groups: &[WeekdayGroup]) -> String {
    if groups.is_empty() {
        return "No weekly events found.".to_string();
    }
    let mut output = String::new();
    for group in groups {
        output.push_str(&format!("{}\n", group.label.to_uppercase()));
        for event in &group.events {
            output.push_str(&format!("  {} ({})\n", event.title, event.id));
        }
    }
    output
}

/// Format a teacher for display.
pub fn format_teacher(teacher: &Teacher) -> String {
    let mut output = format!("{}\n  ID: {}", teacher.name, teacher.id);
    if let Some(nickname) = &teacher.nickname {
        output.push_str(&format!("\n  Nickname: {}", nickname));
    }
    if let Some(phone) = &teacher.phone_number {
        output.push_str(&format!("\n  Phone: {}", phone));
    }
    output
}

/// Format teachers for display.
pub fn format_teachers(teachers: &[Teacher]) -> String {
    if teachers.is_empty() {
        return "No teachers found.".to_string();
    }
    let mut output = format!("TEACHERS ({})\n", teachers.len());
    output.push_str(&"-".repeat(40));
    for teacher in teachers {
        output.push_str(&format!("\n{}", format_teacher(teacher)));
        output.push('\n');
    }
    output
}

pub fn format_health(health: &HealthStatus) -> String {
    match &health.error {
        Some(error) => format!("Status: {}\n  Error: {}", health.status, error),
        None => format!("Status: {}", health.status),
    }
}
