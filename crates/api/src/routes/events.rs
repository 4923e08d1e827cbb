//! Attendee-facing event routes.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use domain::models::event::{EventResponse, JoinEventRequest};
use domain::models::Event;
use persistence::repositories::EventRepository;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionId;
use crate::services::load_event;

/// Join an event by its access code.
///
/// POST /api/v1/events/join
///
/// The code is matched case-insensitively. Joining is only possible while
/// the event is running.
pub async fn join_event(
    State(state): State<AppState>,
    session: SessionId,
    Json(request): Json<JoinEventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    request.validate()?;

    let code = shared::validation::normalize_access_code(&request.code);
    let event: Event = EventRepository::new(state.pool.clone())
        .find_by_code(&code)
        .await?
        .map(Event::from)
        .ok_or_else(|| {
            warn!(session_id = %session.as_str(), "Join with unknown event code");
            ApiError::NotFound("Event not found".to_string())
        })?;

    let now = Utc::now();
    if let Err(e) = event.check_access(now) {
        warn!(
            event_id = %event.id,
            session_id = %session.as_str(),
            reason = %e,
            "Join rejected"
        );
        return Err(e.into());
    }

    info!(event_id = %event.id, session_id = %session.as_str(), "Session joined event");

    Ok(Json(EventResponse::from_event(event, now)))
}

/// Get an event with its current status.
///
/// GET /api/v1/events/:event_id
pub async fn get_event(
    State(state): State<AppState>,
    _session: SessionId,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = load_event(&state.pool, event_id).await?;
    Ok(Json(EventResponse::from_event(event, Utc::now())))
}
