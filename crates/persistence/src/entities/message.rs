//! Message entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the messages table.
#[derive(Debug, Clone, FromRow)]
pub struct MessageEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub sender_session_id: String,
    pub receiver_session_id: String,
    pub content: String,
    pub match_id: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MessageEntity> for domain::models::Message {
    fn from(entity: MessageEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            sender_session_id: entity.sender_session_id,
            receiver_session_id: entity.receiver_session_id,
            content: entity.content,
            match_id: entity.match_id,
            is_read: entity.is_read,
            created_at: entity.created_at,
        }
    }
}
