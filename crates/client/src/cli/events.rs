//! Event CLI commands.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tangoagenda_core::agenda::{CreateEventRequest, UpdateEventRequest};

pub use tangoagenda_core::agenda::EventType as CoreEventType;

/// Event management commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// CLI event type (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EventType {
    Class,
    Milonga,
    Seminar,
    Practice,
    SpecialEvent,
}

impl From<EventType> for CoreEventType {
    fn from(t: EventType) -> Self {
        match t {
            EventType::Class => CoreEventType::Class,
            EventType::Milonga => CoreEventType::Milonga,
            EventType::Seminar => CoreEventType::Seminar,
            EventType::Practice => CoreEventType::Practice,
            EventType::SpecialEvent => CoreEventType::SpecialEvent,
        }
    }
}

/// Fields accepted when creating an event.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Event title.
    #[arg(long)]
    pub title: String,
    /// Event type.
    #[arg(long, value_enum)]
    pub event_type: EventType,
    /// Event date, or first night for weekly events (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,
    /// Repeat every week from `date`.
    #[arg(long)]
    pub weekly: bool,
    /// Create the event hidden from the public agenda.
    #[arg(long)]
    pub inactive: bool,
    /// Venue name.
    #[arg(long)]
    pub venue: Option<String>,
    /// Street address.
    #[arg(long)]
    pub address: Option<String>,
    /// Free-text description.
    #[arg(long)]
    pub description: Option<String>,
}

impl CreateArgs {
    pub fn into_request(self) -> CreateEventRequest {
        let mut req = CreateEventRequest::new(self.title, self.event_type.into(), self.date);
        req.has_weekly_recurrence = self.weekly;
        req.is_active = !self.inactive;
        req.venue_name = self.venue;
        req.address = self.address;
        req.description = self.description;
        req
    }
}

/// Fields accepted when updating an event. Omitted fields are kept.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Event ID.
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, value_enum)]
    pub event_type: Option<EventType>,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Turn weekly recurrence on or off.
    #[arg(long)]
    pub weekly: Option<bool>,
    #[arg(long)]
    pub venue: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl UpdateArgs {
    pub fn into_request(self) -> (String, UpdateEventRequest) {
        let req = UpdateEventRequest {
            title: self.title,
            event_type: self.event_type.map(Into::into),
            date: self.date,
            has_weekly_recurrence: self.weekly,
            venue_name: self.venue,
            address: self.address,
            description: self.description,
            ..UpdateEventRequest::default()
        };
        (self.id, req)
    }
}

/// Available event actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List stored events ordered by date.
    List {
        /// Only weekly (`true`) or only one-off (`false`) events.
        #[arg(long)]
        recurring: Option<bool>,
        /// Rows to skip.
        #[arg(long)]
        offset: Option<usize>,
        /// Page size.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Weekly events grouped by weekday.
    Weekly,
    /// Create a new event.
    Create(CreateArgs),
    /// Get a stored event by ID.
    Get {
        /// Event ID.
        id: String,
    },
    /// Update an event.
    Update(UpdateArgs),
    /// Show or hide an event on the public agenda.
    Toggle {
        /// Event ID.
        id: String,
    },
    /// Soft-delete an event.
    Delete {
        /// Event ID.
        id: String,
    },
}
