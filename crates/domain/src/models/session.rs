//! Session context.
//!
//! Attendees have no accounts. A device holds an opaque session id and
//! presents it on every request; together with the event from the request
//! path it forms the context every domain operation runs in.

use serde::Serialize;
use uuid::Uuid;

/// Who is acting, and in which event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub event_id: Uuid,
    pub session_id: String,
}

impl SessionContext {
    pub fn new(event_id: Uuid, session_id: impl Into<String>) -> Self {
        Self {
            event_id,
            session_id: session_id.into(),
        }
    }

    /// Match id between this session and `other`.
    pub fn match_id_with(&self, other: &str) -> String {
        shared::match_key::derive_match_id(&self.session_id, other)
    }
}

/// Response when a new session is issued.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateSessionResponse {
    pub session_id: String,
}
