//! Like repository for database operations.
//!
//! Recording a like runs the domain matcher inside one transaction that
//! first takes a transaction-scoped advisory lock on the unordered pair.
//! Two sessions liking each other at the same moment therefore queue up
//! and the second one always sees the first one's row.

use domain::models::{Like, MatchSide, SessionContext};
use domain::services::matching::{record_like, LikeOutcome, LikeStore, MatchError};
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::entities::LikeEntity;
use crate::metrics::QueryTimer;

const LIKE_COLUMNS: &str =
    "id, event_id, liker_session_id, liked_session_id, is_mutual, liker_notified, liked_notified, created_at";

/// Repository for like and match database operations.
#[derive(Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record that the caller likes `liked_session_id`, completing the match
    /// if the like is reciprocated.
    pub async fn record_like(
        &self,
        ctx: &SessionContext,
        liked_session_id: &str,
    ) -> Result<LikeOutcome, MatchError<sqlx::Error>> {
        let timer = QueryTimer::new("record_like");

        let mut tx = self.pool.begin().await.map_err(MatchError::Store)?;

        let lock_key = format!("{}:{}", ctx.event_id, ctx.match_id_with(liked_session_id));
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(&lock_key)
            .execute(&mut *tx)
            .await
            .map_err(MatchError::Store)?;

        let store = TxLikeStore {
            tx: Mutex::new(tx),
        };
        let outcome = record_like(&store, ctx, liked_session_id).await?;

        store
            .tx
            .into_inner()
            .commit()
            .await
            .map_err(MatchError::Store)?;

        timer.record();
        Ok(outcome)
    }

    /// Likes sent by a session in an event, newest first.
    pub async fn list_sent(
        &self,
        event_id: Uuid,
        liker_session_id: &str,
    ) -> Result<Vec<LikeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_sent_likes");
        let query = format!(
            r#"
            SELECT {LIKE_COLUMNS} FROM likes
            WHERE event_id = $1 AND liker_session_id = $2
            ORDER BY created_at DESC
            "#
        );
        let result = sqlx::query_as::<_, LikeEntity>(&query)
            .bind(event_id)
            .bind(liker_session_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Mutual rows the session takes part in, on either side, oldest first.
    pub async fn list_mutual_for(
        &self,
        event_id: Uuid,
        session_id: &str,
    ) -> Result<Vec<LikeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_mutual_likes");
        let query = format!(
            r#"
            SELECT {LIKE_COLUMNS} FROM likes
            WHERE event_id = $1 AND is_mutual = true
              AND (liker_session_id = $2 OR liked_session_id = $2)
            ORDER BY created_at ASC
            "#
        );
        let result = sqlx::query_as::<_, LikeEntity>(&query)
            .bind(event_id)
            .bind(session_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Mutual rows whose notified flag for the session's side is still unset.
    pub async fn list_unseen_matches(
        &self,
        event_id: Uuid,
        session_id: &str,
    ) -> Result<Vec<LikeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_unseen_matches");
        let query = format!(
            r#"
            SELECT {LIKE_COLUMNS} FROM likes
            WHERE event_id = $1 AND is_mutual = true
              AND ((liker_session_id = $2 AND liker_notified = false)
                OR (liked_session_id = $2 AND liked_notified = false))
            ORDER BY created_at ASC
            "#
        );
        let result = sqlx::query_as::<_, LikeEntity>(&query)
            .bind(event_id)
            .bind(session_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Set the notified flag on each `(row, side)` pair.
    pub async fn mark_notified(&self, acknowledgements: &[(Uuid, MatchSide)]) -> Result<u64, sqlx::Error> {
        if acknowledgements.is_empty() {
            return Ok(0);
        }
        let timer = QueryTimer::new("mark_matches_notified");

        let mut tx = self.pool.begin().await?;
        let mut updated = 0;
        for (like_id, side) in acknowledgements {
            let (liker, liked) = side_flags(*side);
            updated += sqlx::query(
                r#"
                UPDATE likes
                SET liker_notified = liker_notified OR $2,
                    liked_notified = liked_notified OR $3
                WHERE id = $1
                "#,
            )
            .bind(like_id)
            .bind(liker)
            .bind(liked)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;

        timer.record();
        Ok(updated)
    }

    /// Whether the two sessions are matched in the event.
    pub async fn is_matched(&self, event_id: Uuid, a: &str, b: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("is_matched");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM likes
                WHERE event_id = $1 AND is_mutual = true
                  AND ((liker_session_id = $2 AND liked_session_id = $3)
                    OR (liker_session_id = $3 AND liked_session_id = $2))
            )
            "#,
        )
        .bind(event_id)
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

fn side_flags(side: MatchSide) -> (bool, bool) {
    match side {
        MatchSide::Liker => (true, false),
        MatchSide::Liked => (false, true),
    }
}

/// [`LikeStore`] over an open transaction.
struct TxLikeStore {
    tx: Mutex<Transaction<'static, Postgres>>,
}

#[async_trait::async_trait]
impl LikeStore for TxLikeStore {
    type Error = sqlx::Error;

    async fn find_likes(
        &self,
        event_id: Uuid,
        liker_session_id: &str,
        liked_session_id: &str,
    ) -> Result<Vec<Like>, Self::Error> {
        let query = format!(
            r#"
            SELECT {LIKE_COLUMNS} FROM likes
            WHERE event_id = $1 AND liker_session_id = $2 AND liked_session_id = $3
            ORDER BY created_at ASC, id ASC
            "#
        );
        let mut guard = self.tx.lock().await;
        let rows = sqlx::query_as::<_, LikeEntity>(&query)
            .bind(event_id)
            .bind(liker_session_id)
            .bind(liked_session_id)
            .fetch_all(&mut **guard)
            .await?;
        Ok(rows.into_iter().map(Like::from).collect())
    }

    async fn insert_like(
        &self,
        event_id: Uuid,
        liker_session_id: &str,
        liked_session_id: &str,
    ) -> Result<Like, Self::Error> {
        let query = format!(
            r#"
            INSERT INTO likes (event_id, liker_session_id, liked_session_id)
            VALUES ($1, $2, $3)
            RETURNING {LIKE_COLUMNS}
            "#
        );
        let mut guard = self.tx.lock().await;
        let row = sqlx::query_as::<_, LikeEntity>(&query)
            .bind(event_id)
            .bind(liker_session_id)
            .bind(liked_session_id)
            .fetch_one(&mut **guard)
            .await?;
        Ok(row.into())
    }

    async fn mark_mutual(&self, like_id: Uuid, side: MatchSide) -> Result<Like, Self::Error> {
        let (liker, liked) = side_flags(side);
        let query = format!(
            r#"
            UPDATE likes
            SET is_mutual = true,
                liker_notified = liker_notified OR $2,
                liked_notified = liked_notified OR $3
            WHERE id = $1
            RETURNING {LIKE_COLUMNS}
            "#
        );
        let mut guard = self.tx.lock().await;
        let row = sqlx::query_as::<_, LikeEntity>(&query)
            .bind(like_id)
            .bind(liker)
            .bind(liked)
            .fetch_one(&mut **guard)
            .await?;
        Ok(row.into())
    }
}
