//! Event domain models.
//!
//! An event is the scope of everything an attendee does: profiles, likes,
//! messages and contact shares all belong to exactly one event and are only
//! writable while it is active.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A live event attendees can join with its access code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    /// Stored upper-cased; lookups are case-insensitive.
    pub access_code: String,
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where an event stands relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Active,
    Ended,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Active => "active",
            EventStatus::Ended => "ended",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why an attendee cannot enter (or write inside) an event right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EventAccessError {
    #[error("This event hasn't started yet")]
    NotStarted,

    #[error("This event has ended")]
    Ended,
}

impl Event {
    /// Status at `now`. The window is half-open: `[starts_at, expires_at)`.
    pub fn status_at(&self, now: DateTime<Utc>) -> EventStatus {
        if now < self.starts_at {
            EventStatus::Upcoming
        } else if now >= self.expires_at {
            EventStatus::Ended
        } else {
            EventStatus::Active
        }
    }

    /// Returns Ok if the event is active at `now`.
    pub fn check_access(&self, now: DateTime<Utc>) -> Result<(), EventAccessError> {
        match self.status_at(now) {
            EventStatus::Active => Ok(()),
            EventStatus::Upcoming => Err(EventAccessError::NotStarted),
            EventStatus::Ended => Err(EventAccessError::Ended),
        }
    }

    /// Feedback is collected during and after the event, never before it.
    pub fn accepts_feedback_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.starts_at
    }
}

lazy_static::lazy_static! {
    static ref ACCESS_CODE_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9-]{4,20}$").unwrap();
}

/// Request to create an event (organizer only).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_create_window"))]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Generated when omitted.
    #[validate(regex(
        path = *ACCESS_CODE_REGEX,
        message = "Access code must be 4-20 letters, digits or dashes"
    ))]
    pub access_code: Option<String>,

    pub starts_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,
}

fn validate_create_window(request: &CreateEventRequest) -> Result<(), ValidationError> {
    validate_window(request.starts_at, request.expires_at)
}

/// Request to update an event. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(regex(
        path = *ACCESS_CODE_REGEX,
        message = "Access code must be 4-20 letters, digits or dashes"
    ))]
    pub access_code: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,

    pub expires_at: Option<DateTime<Utc>>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,
}

impl UpdateEventRequest {
    /// Applies the update to `event`, returning the merged record.
    ///
    /// The resulting window is re-checked because either bound may change.
    pub fn apply_to(&self, mut event: Event) -> Result<Event, ValidationError> {
        if let Some(name) = &self.name {
            event.name = name.clone();
        }
        if let Some(code) = &self.access_code {
            event.access_code = shared::validation::normalize_access_code(code);
        }
        if let Some(starts_at) = self.starts_at {
            event.starts_at = starts_at;
        }
        if let Some(expires_at) = self.expires_at {
            event.expires_at = expires_at;
        }
        if let Some(location) = &self.location {
            event.location = Some(location.clone());
        }
        validate_window(event.starts_at, event.expires_at)?;
        Ok(event)
    }
}

/// Checks that an event ends after it starts.
pub fn validate_window(
    starts_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if expires_at > starts_at {
        Ok(())
    } else {
        let mut err = ValidationError::new("event_window");
        err.message = Some("expires_at must be after starts_at".into());
        Err(err)
    }
}

/// Request to join an event with its access code.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct JoinEventRequest {
    #[validate(length(min = 1, max = 32, message = "Event code is required"))]
    pub code: String,
}

/// Event as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EventResponse {
    pub id: Uuid,
    pub name: String,
    pub access_code: String,
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub location: Option<String>,
    pub status: EventStatus,
}

impl EventResponse {
    pub fn from_event(event: Event, now: DateTime<Utc>) -> Self {
        let status = event.status_at(now);
        Self {
            id: event.id,
            name: event.name,
            access_code: event.access_code,
            starts_at: event.starts_at,
            expires_at: event.expires_at,
            location: event.location,
            status,
        }
    }
}

/// Response for listing events.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListEventsResponse {
    pub data: Vec<EventResponse>,
}

/// Generate a random access code in XXX-XXX format.
pub fn generate_access_code() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let chars: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

    let mut segment = || -> String {
        (0..3)
            .map(|_| chars[rng.gen_range(0..chars.len())] as char)
            .collect()
    };

    format!("{}-{}", segment(), segment())
}
