//! Like entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the likes table.
#[derive(Debug, Clone, FromRow)]
pub struct LikeEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub liker_session_id: String,
    pub liked_session_id: String,
    pub is_mutual: bool,
    pub liker_notified: bool,
    pub liked_notified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<LikeEntity> for domain::models::Like {
    fn from(entity: LikeEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            liker_session_id: entity.liker_session_id,
            liked_session_id: entity.liked_session_id,
            is_mutual: entity.is_mutual,
            liker_notified: entity.liker_notified,
            liked_notified: entity.liked_notified,
            created_at: entity.created_at,
        }
    }
}
