//! Post-event feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Feedback left by an attendee, once per (event, session).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventFeedback {
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

/// Request to submit feedback.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SubmitFeedbackRequest {
    #[validate(range(min = 1, max = 5, message = "Ratings must be between 1 and 5"))]
    pub overall_rating: i16,

    #[validate(range(min = 1, max = 5, message = "Ratings must be between 1 and 5"))]
    pub match_quality_rating: i16,

    pub would_attend_again: bool,

    #[validate(length(max = 2000, message = "Highlight must be at most 2000 characters"))]
    pub highlight: Option<String>,

    #[validate(length(max = 2000, message = "Suggestion must be at most 2000 characters"))]
    pub suggestion: Option<String>,
}
