//! Event feedback entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the event_feedback table.
#[derive(Debug, Clone, FromRow)]
pub struct EventFeedbackEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub session_id: String,
    pub overall_rating: i16,
    pub match_quality_rating: i16,
    pub would_attend_again: bool,
    pub highlight: Option<String>,
    pub suggestion: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<EventFeedbackEntity> for domain::models::EventFeedback {
    fn from(entity: EventFeedbackEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            session_id: entity.session_id,
            overall_rating: entity.overall_rating,
            match_quality_rating: entity.match_quality_rating,
            would_attend_again: entity.would_attend_again,
            highlight: entity.highlight,
            suggestion: entity.suggestion,
            created_at: entity.created_at,
        }
    }
}
