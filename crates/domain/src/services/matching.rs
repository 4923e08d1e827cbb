//! Reciprocal-like matcher.
//!
//! When session A likes session B inside an event, the matcher records the
//! like and checks whether B already liked A. If so both rows become mutual
//! and each side's notified flag is set at most once:
//!
//! - A's row (liker = A) gets `liker_notified`, since A sees the match in
//!   the response to its own like.
//! - B's row (liker = B, liked = A) gets `liked_notified`, again for A.
//!
//! B learns about the match later through the notification scan, which
//! flips the remaining two flags.
//!
//! The matcher is written against [`LikeStore`] so the same sequence runs
//! inside a database transaction in production and over
//! [`InMemoryLikeStore`] in tests. Callers that share a store between
//! devices must serialize calls per (event, pair); the PostgreSQL repository
//! does so with an advisory lock.

use std::sync::Mutex;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Like, MatchSide, SessionContext};

/// Storage operations the matcher needs.
#[async_trait::async_trait]
pub trait LikeStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All like rows `liker -> liked` in the event, oldest first.
    async fn find_likes(
        &self,
        event_id: Uuid,
        liker_session_id: &str,
        liked_session_id: &str,
    ) -> Result<Vec<Like>, Self::Error>;

    /// Inserts a fresh non-mutual like.
    async fn insert_like(
        &self,
        event_id: Uuid,
        liker_session_id: &str,
        liked_session_id: &str,
    ) -> Result<Like, Self::Error>;

    /// Sets `is_mutual` and the notified flag of `side` on one row.
    async fn mark_mutual(&self, like_id: Uuid, side: MatchSide) -> Result<Like, Self::Error>;
}

/// Matcher failure.
#[derive(Debug, Error)]
pub enum MatchError<E: std::error::Error + 'static> {
    #[error("You cannot like yourself")]
    SelfLike,

    #[error(transparent)]
    Store(E),
}

/// Result of recording a like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeOutcome {
    /// The caller's like row, as stored after the operation.
    pub like: Like,
    /// The pair is mutually matched.
    pub matched: bool,
    /// This call turned the pair into a match.
    pub newly_matched: bool,
    /// False when an existing like was reused.
    pub created: bool,
}

/// Records that `ctx.session_id` likes `liked_session_id` in `ctx.event_id`.
///
/// Repeated likes reuse the existing row. Every reciprocal row found is
/// marked mutual, not only the first.
pub async fn record_like<S>(
    store: &S,
    ctx: &SessionContext,
    liked_session_id: &str,
) -> Result<LikeOutcome, MatchError<S::Error>>
where
    S: LikeStore + ?Sized,
{
    let liker = ctx.session_id.as_str();
    if liker == liked_session_id {
        return Err(MatchError::SelfLike);
    }

    let existing = store
        .find_likes(ctx.event_id, liker, liked_session_id)
        .await
        .map_err(MatchError::Store)?;

    let (mut like, created) = match existing.into_iter().next() {
        Some(like) => (like, false),
        None => {
            let like = store
                .insert_like(ctx.event_id, liker, liked_session_id)
                .await
                .map_err(MatchError::Store)?;
            (like, true)
        }
    };

    let reciprocal = store
        .find_likes(ctx.event_id, liked_session_id, liker)
        .await
        .map_err(MatchError::Store)?;

    if reciprocal.is_empty() {
        debug!(
            event_id = %ctx.event_id,
            liker = %liker,
            liked = %liked_session_id,
            created,
            "Like recorded, not reciprocated"
        );
        return Ok(LikeOutcome {
            like,
            matched: false,
            newly_matched: false,
            created,
        });
    }

    let mut newly_matched = false;

    if !like.is_mutual {
        like = store
            .mark_mutual(like.id, MatchSide::Liker)
            .await
            .map_err(MatchError::Store)?;
        newly_matched = true;
    }

    for row in reciprocal.iter().filter(|row| !row.is_mutual) {
        store
            .mark_mutual(row.id, MatchSide::Liked)
            .await
            .map_err(MatchError::Store)?;
        newly_matched = true;
    }

    if reciprocal.len() > 1 {
        debug!(
            event_id = %ctx.event_id,
            rows = reciprocal.len(),
            "Multiple reciprocal likes found, all marked mutual"
        );
    }

    if newly_matched {
        info!(
            event_id = %ctx.event_id,
            liker = %liker,
            liked = %liked_session_id,
            match_id = %like.match_id(),
            "Mutual match"
        );
    }

    Ok(LikeOutcome {
        like,
        matched: true,
        newly_matched,
        created,
    })
}

/// Error from [`InMemoryLikeStore`].
#[derive(Debug, Error)]
pub enum MemoryStoreError {
    #[error("Like {0} not found")]
    NotFound(Uuid),
}

/// Like store kept in process memory.
///
/// Used by tests and local tooling. Rows keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryLikeStore {
    likes: Mutex<Vec<Like>>,
}

impl InMemoryLikeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with rows.
    pub fn with_likes(likes: Vec<Like>) -> Self {
        Self {
            likes: Mutex::new(likes),
        }
    }

    /// Copy of every stored row.
    pub fn snapshot(&self) -> Vec<Like> {
        self.rows().clone()
    }

    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<Like>> {
        self.likes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl LikeStore for InMemoryLikeStore {
    type Error = MemoryStoreError;

    async fn find_likes(
        &self,
        event_id: Uuid,
        liker_session_id: &str,
        liked_session_id: &str,
    ) -> Result<Vec<Like>, Self::Error> {
        Ok(self
            .rows()
            .iter()
            .filter(|l| {
                l.event_id == event_id
                    && l.liker_session_id == liker_session_id
                    && l.liked_session_id == liked_session_id
            })
            .cloned()
            .collect())
    }

    async fn insert_like(
        &self,
        event_id: Uuid,
        liker_session_id: &str,
        liked_session_id: &str,
    ) -> Result<Like, Self::Error> {
        let like = Like {
            id: Uuid::new_v4(),
            event_id,
            liker_session_id: liker_session_id.to_string(),
            liked_session_id: liked_session_id.to_string(),
            is_mutual: false,
            liker_notified: false,
            liked_notified: false,
            created_at: Utc::now(),
        };
        self.rows().push(like.clone());
        Ok(like)
    }

    async fn mark_mutual(&self, like_id: Uuid, side: MatchSide) -> Result<Like, Self::Error> {
        let mut rows = self.rows();
        let row = rows
            .iter_mut()
            .find(|l| l.id == like_id)
            .ok_or(MemoryStoreError::NotFound(like_id))?;
        row.mark_mutual(side);
        Ok(row.clone())
    }
}
