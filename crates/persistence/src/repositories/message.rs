//! Message repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::MessageEntity;
use crate::metrics::QueryTimer;

const MESSAGE_COLUMNS: &str =
    "id, event_id, sender_session_id, receiver_session_id, content, match_id, is_read, created_at";

/// Repository for message database operations.
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a message between two matched sessions.
    pub async fn create(
        &self,
        event_id: Uuid,
        sender_session_id: &str,
        receiver_session_id: &str,
        content: &str,
        match_id: &str,
    ) -> Result<MessageEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_message");
        let query = format!(
            r#"
            INSERT INTO messages (event_id, sender_session_id, receiver_session_id, content, match_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MESSAGE_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, MessageEntity>(&query)
            .bind(event_id)
            .bind(sender_session_id)
            .bind(receiver_session_id)
            .bind(content)
            .bind(match_id)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Every message between two sessions, oldest first.
    ///
    /// Match ids of different pairs can collide, so both session ids are
    /// part of the filter.
    pub async fn list_conversation(
        &self,
        event_id: Uuid,
        match_id: &str,
        session_a: &str,
        session_b: &str,
    ) -> Result<Vec<MessageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_conversation");
        let query = format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE event_id = $1 AND match_id = $2
              AND ((sender_session_id = $3 AND receiver_session_id = $4)
                OR (sender_session_id = $4 AND receiver_session_id = $3))
            ORDER BY created_at ASC, id ASC
            "#
        );
        let result = sqlx::query_as::<_, MessageEntity>(&query)
            .bind(event_id)
            .bind(match_id)
            .bind(session_a)
            .bind(session_b)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Unread messages addressed to a session.
    pub async fn list_unread_for(
        &self,
        event_id: Uuid,
        receiver_session_id: &str,
    ) -> Result<Vec<MessageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_unread_messages");
        let query = format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE event_id = $1 AND receiver_session_id = $2 AND is_read = false
            ORDER BY created_at ASC
            "#
        );
        let result = sqlx::query_as::<_, MessageEntity>(&query)
            .bind(event_id)
            .bind(receiver_session_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Messages a session sent or received after `since`, oldest first.
    pub async fn list_recent_for(
        &self,
        event_id: Uuid,
        session_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<MessageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_recent_messages");
        let query = format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE event_id = $1 AND created_at > $3
              AND (sender_session_id = $2 OR receiver_session_id = $2)
            ORDER BY created_at ASC
            "#
        );
        let result = sqlx::query_as::<_, MessageEntity>(&query)
            .bind(event_id)
            .bind(session_id)
            .bind(since)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Mark everything the reader received from `sender_session_id` as read.
    pub async fn mark_read(
        &self,
        event_id: Uuid,
        match_id: &str,
        reader_session_id: &str,
        sender_session_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_messages_read");
        let result = sqlx::query(
            r#"
            UPDATE messages SET is_read = true
            WHERE event_id = $1 AND match_id = $2
              AND receiver_session_id = $3 AND sender_session_id = $4
              AND is_read = false
            "#,
        )
        .bind(event_id)
        .bind(match_id)
        .bind(reader_session_id)
        .bind(sender_session_id)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
