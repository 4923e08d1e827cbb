//! Like and match domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::profile::EventProfile;

/// One direction of interest: `liker_session_id` likes `liked_session_id`.
///
/// The row is created non-mutual and later mutated in place when the
/// reciprocal like shows up. It is never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Like {
    pub id: Uuid,
    pub event_id: Uuid,
    pub liker_session_id: String,
    pub liked_session_id: String,
    pub is_mutual: bool,
    /// The liker has been told about the match.
    pub liker_notified: bool,
    /// The liked session has been told about the match.
    pub liked_notified: bool,
    pub created_at: DateTime<Utc>,
}

/// The role a session plays on a like row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSide {
    Liker,
    Liked,
}

impl Like {
    /// Role of `session_id` on this row, if it participates.
    pub fn side_of(&self, session_id: &str) -> Option<MatchSide> {
        if self.liker_session_id == session_id {
            Some(MatchSide::Liker)
        } else if self.liked_session_id == session_id {
            Some(MatchSide::Liked)
        } else {
            None
        }
    }

    /// The other participant, seen from `session_id`.
    pub fn partner_of(&self, session_id: &str) -> Option<&str> {
        match self.side_of(session_id)? {
            MatchSide::Liker => Some(&self.liked_session_id),
            MatchSide::Liked => Some(&self.liker_session_id),
        }
    }

    /// Notified flag for the given side.
    pub fn notified(&self, side: MatchSide) -> bool {
        match side {
            MatchSide::Liker => self.liker_notified,
            MatchSide::Liked => self.liked_notified,
        }
    }

    /// Marks the row mutual and flags `side` as notified.
    pub fn mark_mutual(&mut self, side: MatchSide) {
        self.is_mutual = true;
        match side {
            MatchSide::Liker => self.liker_notified = true,
            MatchSide::Liked => self.liked_notified = true,
        }
    }

    /// True if this row is a match `session_id` has not been told about yet.
    pub fn is_unseen_match_for(&self, session_id: &str) -> bool {
        self.is_mutual
            && self
                .side_of(session_id)
                .map(|side| !self.notified(side))
                .unwrap_or(false)
    }

    /// Match id of the pair on this row.
    pub fn match_id(&self) -> String {
        shared::match_key::derive_match_id(&self.liker_session_id, &self.liked_session_id)
    }
}

/// Request to like another attendee.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateLikeRequest {
    #[validate(custom(function = "shared::validation::validate_session_id"))]
    pub liked_session_id: String,
}

/// Response after recording a like.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LikeResponse {
    pub like: Like,
    /// The like completed a mutual match.
    pub matched: bool,
    /// False when an existing like was reused.
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
}

/// Response for listing the caller's sent likes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListLikesResponse {
    pub data: Vec<Like>,
}

/// One mutual match as seen by the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchSummary {
    pub match_id: String,
    pub partner: EventProfile,
    pub matched_at: DateTime<Utc>,
}

/// Response for listing matches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListMatchesResponse {
    pub data: Vec<MatchSummary>,
}
