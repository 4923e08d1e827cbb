//! Notification surfacing.
//!
//! Notifications are not stored anywhere: they are derived on every scan
//! from like rows whose notified flag for the caller's role is still false,
//! and from unread messages addressed to the caller.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{EventProfile, Like, MatchSide, Message};

/// A match the session has not been told about yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchNotice {
    pub match_id: String,
    pub partner_session_id: String,
    pub matched_at: DateTime<Utc>,
    /// Rows (and the caller's side on each) to flag once the notice is shown.
    pub acknowledgements: Vec<(Uuid, MatchSide)>,
}

/// Outcome of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationScan {
    /// Oldest unseen match.
    pub new_match: Option<MatchNotice>,
    /// Most recent unread message.
    pub latest_unread: Option<Message>,
    pub unread_count: usize,
}

/// Derives what `session_id` should be told about.
///
/// `likes` and `messages` may contain unrelated rows; they are filtered here.
pub fn scan_notifications(session_id: &str, likes: &[Like], messages: &[Message]) -> NotificationScan {
    let mut unseen: Vec<&Like> = likes
        .iter()
        .filter(|like| like.is_unseen_match_for(session_id))
        .collect();
    unseen.sort_by_key(|like| like.created_at);

    let new_match = unseen.first().and_then(|first| {
        let partner = first.partner_of(session_id)?.to_string();
        let acknowledgements = unseen
            .iter()
            .filter(|like| like.partner_of(session_id) == Some(partner.as_str()))
            .filter_map(|like| like.side_of(session_id).map(|side| (like.id, side)))
            .collect();
        Some(MatchNotice {
            match_id: first.match_id(),
            partner_session_id: partner,
            matched_at: first.created_at,
            acknowledgements,
        })
    });

    let unread: Vec<&Message> = messages
        .iter()
        .filter(|m| m.receiver_session_id == session_id && !m.is_read)
        .collect();

    let latest_unread = unread
        .iter()
        .max_by_key(|m| m.created_at)
        .map(|m| (*m).clone());

    NotificationScan {
        new_match,
        latest_unread,
        unread_count: unread.len(),
    }
}

/// Match notification as sent to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchNotification {
    pub match_id: String,
    pub partner_session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<EventProfile>,
    pub matched_at: DateTime<Utc>,
}

/// Notifications response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NotificationsResponse {
    pub new_match: Option<MatchNotification>,
    pub message: Option<Message>,
    pub unread_messages: usize,
}
