use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::composite::composite_id;
use crate::serde::{deserialize_optional_time, deserialize_time};

/// The kind of tango event, determining which payload sections apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Class,
    Milonga,
    Seminar,
    Practice,
    SpecialEvent,
}

impl EventType {
    /// Returns the display label used by the public agenda.
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Class => "Clase",
            EventType::Milonga => "Milonga",
            EventType::Seminar => "Seminario",
            EventType::Practice => "Práctica",
            EventType::SpecialEvent => "Evento Especial",
        }
    }

    /// Returns the snake_case identifier stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Class => "class",
            EventType::Milonga => "milonga",
            EventType::Seminar => "seminar",
            EventType::Practice => "practice",
            EventType::SpecialEvent => "special_event",
        }
    }
}

/// Level of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassLevel {
    Beginner,
    Intermediate,
    Advanced,
    AllLevels,
}

impl ClassLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ClassLevel::Beginner => "Principiante",
            ClassLevel::Intermediate => "Intermedio",
            ClassLevel::Advanced => "Avanzado",
            ClassLevel::AllLevels => "Todos los niveles",
        }
    }
}

/// A class taught as part of an event (or of a seminar day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventClass {
    pub class_name: String,
    #[serde(deserialize_with = "deserialize_time")]
    pub start_time: NaiveTime,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_level: Option<ClassLevel>,
    #[serde(default = "default_class_order")]
    pub class_order: u32,
}

fn default_class_order() -> u32 {
    1
}

/// Practice slot attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPractice {
    #[serde(deserialize_with = "deserialize_time")]
    pub practice_time: NaiveTime,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub practice_end_time: Option<NaiveTime>,
}

/// Who organizes an event: a registered teacher or a one-time guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOrganizer {
    #[serde(default = "default_organizer_type")]
    pub organizer_type: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub is_one_time_teacher: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_teacher_name: Option<String>,
}

fn default_organizer_type() -> String {
    "teacher".to_string()
}

/// A price line for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPricing {
    pub price_type: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One day of a multi-day seminar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeminarDay {
    pub day_number: u32,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default)]
    pub classes: Vec<EventClass>,
}

/// Class given right before a milonga starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilongaPreClass {
    #[serde(deserialize_with = "deserialize_time")]
    pub class_time: NaiveTime,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub class_end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_level: Option<ClassLevel>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub milonga_start_time: Option<NaiveTime>,
}

/// A stored tango event.
///
/// For weekly events, `date` is the anchor: the first night the event takes
/// place. Every later night on the same weekday is projected at query time,
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TangoEvent {
    pub id: String,
    pub title: String,
    pub event_type: EventType,
    pub date: NaiveDate,
    #[serde(default)]
    pub has_weekly_recurrence: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_description: Option<String>,
    #[serde(default)]
    pub classes: Vec<EventClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice: Option<EventPractice>,
    #[serde(default)]
    pub organizers: Vec<EventOrganizer>,
    #[serde(default)]
    pub pricing: Vec<EventPricing>,
    #[serde(default)]
    pub seminar_days: Vec<SeminarDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milonga_pre_class: Option<MilongaPreClass>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl TangoEvent {
    /// Creates a new one-off event with a fresh ID.
    pub fn new(title: impl Into<String>, event_type: EventType, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            event_type,
            date,
            has_weekly_recurrence: false,
            is_active: true,
            venue_name: None,
            address: None,
            contact_phone: None,
            avatar_image_url: None,
            description: None,
            show_description: None,
            classes: Vec::new(),
            practice: None,
            organizers: Vec::new(),
            pricing: Vec::new(),
            seminar_days: Vec::new(),
            milonga_pre_class: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Creates a new event that repeats every week from `date`.
    pub fn weekly(title: impl Into<String>, event_type: EventType, date: NaiveDate) -> Self {
        Self::new(title, event_type, date).recurring(true)
    }

    /// Sets the weekly recurrence flag.
    pub fn recurring(mut self, weekly: bool) -> Self {
        self.has_weekly_recurrence = weekly;
        self
    }

    /// Sets a specific ID for this event (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_venue(mut self, venue_name: impl Into<String>) -> Self {
        self.venue_name = Some(venue_name.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_class(mut self, class: EventClass) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_pricing(mut self, pricing: EventPricing) -> Self {
        self.pricing.push(pricing);
        self
    }

    /// Sets the creation timestamp (useful for testing sort order).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Returns true if the event should show up on the public agenda.
    pub fn is_visible(&self) -> bool {
        self.is_active && self.deleted_at.is_none()
    }

    /// Returns the first price line, which the agenda shows as the main price.
    pub fn main_price(&self) -> Option<&EventPricing> {
        self.pricing.first()
    }

    /// Returns the level shown on the agenda card: first class, else pre-class.
    pub fn display_level(&self) -> Option<ClassLevel> {
        self.classes
            .first()
            .and_then(|c| c.class_level)
            .or_else(|| self.milonga_pre_class.as_ref().and_then(|p| p.class_level))
    }
}

/// A concrete, dated instance of a [`TangoEvent`].
///
/// Serializes flat: every event field plus `base_id`. For projected nights of
/// a weekly event, `id` is the composite `{base_id}_{YYYY-MM-DD}` and `date`
/// is the projected night.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    #[serde(flatten)]
    pub event: TangoEvent,
    pub base_id: String,
}

impl Occurrence {
    /// Wraps a stored event as its own occurrence.
    pub fn from_event(event: TangoEvent) -> Self {
        let base_id = event.id.clone();
        Self { event, base_id }
    }

    /// Projects a weekly event onto `date`.
    pub fn projected(base: &TangoEvent, date: NaiveDate) -> Self {
        let mut event = base.clone();
        event.id = composite_id(&base.id, date);
        event.date = date;
        Self {
            event,
            base_id: base.id.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.event.id
    }

    pub fn date(&self) -> NaiveDate {
        self.event.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.event.created_at
    }

    /// Returns true if this occurrence was projected from a weekly event.
    pub fn is_projected(&self) -> bool {
        self.event.id != self.base_id
    }
}

/// A teacher that can be listed as an event organizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Teacher {
    /// Creates a new teacher with a fresh ID.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            nickname: None,
            phone_number: None,
            bio: None,
            photo_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Sets a specific ID for this teacher (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
