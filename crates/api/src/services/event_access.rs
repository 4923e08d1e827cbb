//! Event and pair guards used by attendee routes.

use chrono::Utc;
use domain::models::{Event, EventProfile, SessionContext};
use persistence::repositories::{EventRepository, LikeRepository, ProfileRepository};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;

/// Loads an event or fails with 404.
pub async fn load_event(pool: &PgPool, event_id: Uuid) -> Result<Event, ApiError> {
    EventRepository::new(pool.clone())
        .find_by_id(event_id)
        .await?
        .map(Event::from)
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))
}

/// Loads an event and rejects it unless it is running right now.
pub async fn load_active_event(pool: &PgPool, event_id: Uuid) -> Result<Event, ApiError> {
    let event = load_event(pool, event_id).await?;
    event.check_access(Utc::now())?;
    Ok(event)
}

/// The caller's own profile in the event.
pub async fn require_profile(pool: &PgPool, ctx: &SessionContext) -> Result<EventProfile, ApiError> {
    ProfileRepository::new(pool.clone())
        .find_by_session(ctx.event_id, &ctx.session_id)
        .await?
        .map(EventProfile::from)
        .ok_or_else(|| ApiError::NotFound("Create your profile for this event first".to_string()))
}

/// Fails with 403 unless the caller and `other` are matched. Returns the
/// pair's match id.
pub async fn require_match(
    pool: &PgPool,
    ctx: &SessionContext,
    other_session_id: &str,
) -> Result<String, ApiError> {
    if other_session_id == ctx.session_id {
        return Err(ApiError::Validation(
            "You cannot do that with yourself".to_string(),
        ));
    }

    let matched = LikeRepository::new(pool.clone())
        .is_matched(ctx.event_id, &ctx.session_id, other_session_id)
        .await?;

    if !matched {
        return Err(ApiError::Forbidden(
            "You can only interact with your matches".to_string(),
        ));
    }

    Ok(ctx.match_id_with(other_session_id))
}
