//! API request types for the admin surface.
//!
//! Shared between the server and the client. Pure data types with no I/O.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::types::{
    EventClass, EventOrganizer, EventPractice, EventPricing, EventType, MilongaPreClass,
    SeminarDay, TangoEvent, Teacher,
};
use crate::serde::{deserialize_date, deserialize_optional_date, deserialize_optional_string};

fn default_true() -> bool {
    true
}

/// Request payload for creating a new event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub event_type: EventType,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub has_weekly_recurrence: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub venue_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub contact_phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_image_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub show_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<EventClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice: Option<EventPractice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizers: Vec<EventOrganizer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pricing: Vec<EventPricing>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seminar_days: Vec<SeminarDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milonga_pre_class: Option<MilongaPreClass>,
}

impl CreateEventRequest {
    pub fn new(title: impl Into<String>, event_type: EventType, date: NaiveDate) -> Self {
        Self {
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
        }
    }

    pub fn weekly(mut self) -> Self {
        self.has_weekly_recurrence = true;
        self
    }

    pub fn with_venue(mut self, venue_name: impl Into<String>) -> Self {
        self.venue_name = Some(venue_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Convert into a new event with a fresh ID.
    pub fn into_event(self) -> TangoEvent {
        let mut event = TangoEvent::new(self.title.trim(), self.event_type, self.date)
            .recurring(self.has_weekly_recurrence);
        event.is_active = self.is_active;
        event.venue_name = self.venue_name;
        event.address = self.address;
        event.contact_phone = self.contact_phone;
        event.avatar_image_url = self.avatar_image_url;
        event.description = self.description;
        event.show_description = self.show_description;
        event.classes = self.classes;
        event.practice = self.practice;
        event.organizers = self.organizers;
        event.pricing = self.pricing;
        event.seminar_days = self.seminar_days;
        event.milonga_pre_class = self.milonga_pre_class;
        event
    }
}

/// Request payload for updating an event.
///
/// Only present fields are applied. An empty string clears an optional text
/// field. Present collections replace the stored ones wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_weekly_recurrence: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<EventClass>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice: Option<EventPractice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizers: Option<Vec<EventOrganizer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Vec<EventPricing>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seminar_days: Option<Vec<SeminarDay>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milonga_pre_class: Option<MilongaPreClass>,
}

/// Replaces an optional text field. Empty input clears it.
fn replace_text(field: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *field = Some(value).filter(|v| !v.trim().is_empty());
    }
}

impl UpdateEventRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_venue(mut self, venue_name: impl Into<String>) -> Self {
        self.venue_name = Some(venue_name.into());
        self
    }

    pub fn with_weekly_recurrence(mut self, weekly: bool) -> Self {
        self.has_weekly_recurrence = Some(weekly);
        self
    }

    /// Apply updates to an existing event and bump `updated_at`.
    pub fn apply_to(self, event: &mut TangoEvent) {
        if let Some(title) = self.title {
            event.title = title.trim().to_string();
        }
        if let Some(event_type) = self.event_type {
            event.event_type = event_type;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(weekly) = self.has_weekly_recurrence {
            event.has_weekly_recurrence = weekly;
        }
        if let Some(active) = self.is_active {
            event.is_active = active;
        }
        replace_text(&mut event.venue_name, self.venue_name);
        replace_text(&mut event.address, self.address);
        replace_text(&mut event.contact_phone, self.contact_phone);
        replace_text(&mut event.avatar_image_url, self.avatar_image_url);
        replace_text(&mut event.description, self.description);
        replace_text(&mut event.show_description, self.show_description);
        if let Some(classes) = self.classes {
            event.classes = classes;
        }
        if self.practice.is_some() {
            event.practice = self.practice;
        }
        if let Some(organizers) = self.organizers {
            event.organizers = organizers;
        }
        if let Some(pricing) = self.pricing {
            event.pricing = pricing;
        }
        if let Some(seminar_days) = self.seminar_days {
            event.seminar_days = seminar_days;
        }
        if self.milonga_pre_class.is_some() {
            event.milonga_pre_class = self.milonga_pre_class;
        }
        event.updated_at = Utc::now();
    }
}

/// Request payload for creating a new teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTeacherRequest {
    pub name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub nickname: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone_number: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub bio: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<String>,
}

impl CreateTeacherRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nickname: None,
            phone_number: None,
            bio: None,
            photo_url: None,
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

    /// Convert into a new teacher with a fresh ID.
    pub fn into_teacher(self) -> Teacher {
        let mut teacher = Teacher::new(self.name.trim());
        teacher.nickname = self.nickname;
        teacher.phone_number = self.phone_number;
        teacher.bio = self.bio;
        teacher.photo_url = self.photo_url;
        teacher
    }
}

/// Request payload for updating a teacher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTeacherRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl UpdateTeacherRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn apply_to(self, teacher: &mut Teacher) {
        if let Some(name) = self.name {
            teacher.name = name.trim().to_string();
        }
        replace_text(&mut teacher.nickname, self.nickname);
        replace_text(&mut teacher.phone_number, self.phone_number);
        replace_text(&mut teacher.bio, self.bio);
        replace_text(&mut teacher.photo_url, self.photo_url);
        teacher.updated_at = Utc::now();
    }
}
