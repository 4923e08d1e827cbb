//! Data the attendee screens refresh.
//!
//! Each loader re-reads the store from scratch. Loading notifications does
//! not acknowledge them; callers pass the returned acknowledgements to
//! [`acknowledge`] once the response has been handed to the client.

use chrono::{DateTime, Utc};
use domain::models::{ContactShare, EventProfile, Like, MatchSide, Message, SessionContext};
use domain::services::discovery::{discover, DiscoveryFilters};
use domain::services::notification::{
    scan_notifications, MatchNotification, NotificationsResponse,
};
use persistence::repositories::{
    ContactShareRepository, LikeRepository, MessageRepository, ProfileRepository,
};
use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ApiError;

/// Discovery list and sent likes, refreshed together.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProfilesSnapshot {
    pub profiles: Vec<EventProfile>,
    pub likes: Vec<Like>,
}

/// Messages since the previous refresh plus every contact share received.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MessagesSnapshot {
    pub messages: Vec<Message>,
    pub contact_shares: Vec<ContactShare>,
}

/// Notifications response and the like rows to mark seen once it is sent.
#[derive(Debug, Clone)]
pub struct PendingNotifications {
    pub response: NotificationsResponse,
    pub acknowledgements: Vec<(Uuid, MatchSide)>,
}

/// Scans for the oldest unseen match and the latest unread message.
///
/// Nothing is marked seen here, so a notice that never reaches the client
/// surfaces again on the next scan.
pub async fn load_notifications(
    pool: &PgPool,
    ctx: &SessionContext,
) -> Result<PendingNotifications, ApiError> {
    let likes: Vec<Like> = LikeRepository::new(pool.clone())
        .list_unseen_matches(ctx.event_id, &ctx.session_id)
        .await?
        .into_iter()
        .map(Like::from)
        .collect();

    let messages: Vec<Message> = MessageRepository::new(pool.clone())
        .list_unread_for(ctx.event_id, &ctx.session_id)
        .await?
        .into_iter()
        .map(Message::from)
        .collect();

    let scan = scan_notifications(&ctx.session_id, &likes, &messages);

    let (new_match, acknowledgements) = match scan.new_match {
        Some(notice) => {
            let partner = ProfileRepository::new(pool.clone())
                .find_by_session(ctx.event_id, &notice.partner_session_id)
                .await?
                .map(EventProfile::from);

            let notification = MatchNotification {
                match_id: notice.match_id,
                partner_session_id: notice.partner_session_id,
                partner,
                matched_at: notice.matched_at,
            };
            (Some(notification), notice.acknowledgements)
        }
        None => (None, Vec::new()),
    };

    Ok(PendingNotifications {
        response: NotificationsResponse {
            new_match,
            message: scan.latest_unread,
            unread_messages: scan.unread_count,
        },
        acknowledgements,
    })
}

/// Marks delivered match notifications as seen for the caller.
///
/// A failure is logged only. The match stays unseen and is offered again.
pub async fn acknowledge(pool: &PgPool, ctx: &SessionContext, acknowledgements: &[(Uuid, MatchSide)]) {
    if acknowledgements.is_empty() {
        return;
    }

    match LikeRepository::new(pool.clone())
        .mark_notified(acknowledgements)
        .await
    {
        Ok(updated) => debug!(
            event_id = %ctx.event_id,
            session_id = %ctx.session_id,
            updated,
            "Match notification acknowledged"
        ),
        Err(e) => warn!(
            event_id = %ctx.event_id,
            session_id = %ctx.session_id,
            error = %e,
            "Failed to acknowledge match notification"
        ),
    }
}

/// Profiles the caller can discover with default filters, plus the likes
/// the caller has sent. Empty until the caller has a profile.
pub async fn load_profiles(pool: &PgPool, ctx: &SessionContext) -> Result<ProfilesSnapshot, ApiError> {
    let profiles = ProfileRepository::new(pool.clone());

    let Some(viewer) = profiles
        .find_by_session(ctx.event_id, &ctx.session_id)
        .await?
        .map(EventProfile::from)
    else {
        return Ok(ProfilesSnapshot {
            profiles: Vec::new(),
            likes: Vec::new(),
        });
    };

    let candidates: Vec<EventProfile> = profiles
        .list_visible(ctx.event_id)
        .await?
        .into_iter()
        .map(EventProfile::from)
        .collect();

    let visible = discover(&viewer, &candidates, &DiscoveryFilters::default())
        .into_iter()
        .cloned()
        .collect();

    let likes = LikeRepository::new(pool.clone())
        .list_sent(ctx.event_id, &ctx.session_id)
        .await?
        .into_iter()
        .map(Like::from)
        .collect();

    Ok(ProfilesSnapshot {
        profiles: visible,
        likes,
    })
}

/// Messages involving the caller created after `since`, and the contact
/// shares the caller has received.
pub async fn load_messages(
    pool: &PgPool,
    ctx: &SessionContext,
    since: DateTime<Utc>,
) -> Result<MessagesSnapshot, ApiError> {
    let messages = MessageRepository::new(pool.clone())
        .list_recent_for(ctx.event_id, &ctx.session_id, since)
        .await?
        .into_iter()
        .map(Message::from)
        .collect();

    let contact_shares = ContactShareRepository::new(pool.clone())
        .list_received(ctx.event_id, &ctx.session_id)
        .await?
        .into_iter()
        .map(ContactShare::from)
        .collect();

    Ok(MessagesSnapshot {
        messages,
        contact_shares,
    })
}
