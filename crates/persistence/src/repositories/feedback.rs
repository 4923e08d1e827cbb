//! Event feedback repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventFeedbackEntity;
use crate::metrics::QueryTimer;

/// Repository for post-event feedback.
#[derive(Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store feedback. Each session may submit once per event.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        event_id: Uuid,
        session_id: &str,
        overall_rating: i16,
        match_quality_rating: i16,
        would_attend_again: bool,
        highlight: Option<&str>,
        suggestion: Option<&str>,
    ) -> Result<EventFeedbackEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event_feedback");
        let result = sqlx::query_as::<_, EventFeedbackEntity>(
            r#"
            INSERT INTO event_feedback (event_id, session_id, overall_rating, match_quality_rating,
                would_attend_again, highlight, suggestion)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, event_id, session_id, overall_rating, match_quality_rating,
                would_attend_again, highlight, suggestion, created_at
            "#,
        )
        .bind(event_id)
        .bind(session_id)
        .bind(overall_rating)
        .bind(match_quality_rating)
        .bind(would_attend_again)
        .bind(highlight)
        .bind(suggestion)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The feedback a session submitted for an event, if any.
    pub async fn find_by_session(
        &self,
        event_id: Uuid,
        session_id: &str,
    ) -> Result<Option<EventFeedbackEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_feedback");
        let result = sqlx::query_as::<_, EventFeedbackEntity>(
            r#"
            SELECT id, event_id, session_id, overall_rating, match_quality_rating,
                would_attend_again, highlight, suggestion, created_at
            FROM event_feedback
            WHERE event_id = $1 AND session_id = $2
            "#,
        )
        .bind(event_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
