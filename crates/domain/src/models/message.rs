//! Chat message domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A chat message between two matched attendees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Message {
    pub id: Uuid,
    pub event_id: Uuid,
    pub sender_session_id: String,
    pub receiver_session_id: String,
    pub content: String,
    pub match_id: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to send a message.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SendMessageRequest {
    #[validate(custom(function = "shared::validation::validate_session_id"))]
    pub receiver_session_id: String,

    #[validate(length(min = 1, max = 1000, message = "Message must be 1-1000 characters"))]
    pub content: String,
}

/// Response for a conversation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListMessagesResponse {
    pub match_id: String,
    pub data: Vec<Message>,
}

/// Response after marking a conversation read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MarkReadResponse {
    pub updated: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_request_validation() {
        let ok = SendMessageRequest {
            receiver_session_id: "s2".to_string(),
            content: "See you at the bar?".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = SendMessageRequest {
            receiver_session_id: "s2".to_string(),
            content: String::new(),
        };
        assert!(empty.validate().is_err());

        let long = SendMessageRequest {
            receiver_session_id: "s2".to_string(),
            content: "x".repeat(1001),
        };
        assert!(long.validate().is_err());
    }
}
