//! Organizer event management.
//!
//! All routes sit behind the admin key middleware.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::event::{
    CreateEventRequest, EventResponse, ListEventsResponse, UpdateEventRequest,
};
use domain::models::Event;
use persistence::repositories::EventRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::load_event;

/// List all events.
///
/// GET /api/v1/admin/events
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    let now = Utc::now();
    let data = EventRepository::new(state.pool.clone())
        .list_all()
        .await?
        .into_iter()
        .map(|e| EventResponse::from_event(e.into(), now))
        .collect();

    Ok(Json(ListEventsResponse { data }))
}

/// Create an event. A code is generated when none is given.
///
/// POST /api/v1/admin/events
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    request.validate()?;

    let repo = EventRepository::new(state.pool.clone());

    let access_code = match &request.access_code {
        Some(code) => {
            let code = shared::validation::normalize_access_code(code);
            if repo.code_exists(&code).await? {
                return Err(ApiError::Conflict("Access code is already in use".to_string()));
            }
            code
        }
        None => repo.generate_unique_code().await?.ok_or_else(|| {
            ApiError::ServiceUnavailable("Could not generate a unique access code".to_string())
        })?,
    };

    let event: Event = repo
        .create(
            request.name.trim(),
            &access_code,
            request.starts_at,
            request.expires_at,
            request.location.as_deref(),
        )
        .await?
        .into();

    info!(
        event_id = %event.id,
        access_code = %event.access_code,
        starts_at = %event.starts_at,
        expires_at = %event.expires_at,
        "Event created"
    );

    Ok((
        StatusCode::CREATED,
        Json(EventResponse::from_event(event, Utc::now())),
    ))
}

/// Get one event.
///
/// GET /api/v1/admin/events/:event_id
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = load_event(&state.pool, event_id).await?;
    Ok(Json(EventResponse::from_event(event, Utc::now())))
}

/// Update an event.
///
/// PATCH /api/v1/admin/events/:event_id
pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    request.validate()?;

    let repo = EventRepository::new(state.pool.clone());
    let current = load_event(&state.pool, event_id).await?;
    let previous_code = current.access_code.clone();
    let merged = request.apply_to(current)?;

    if !merged.access_code.eq_ignore_ascii_case(&previous_code)
        && repo.code_exists(&merged.access_code).await?
    {
        return Err(ApiError::Conflict("Access code is already in use".to_string()));
    }

    let event: Event = repo
        .update(&merged)
        .await?
        .map(Event::from)
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    info!(event_id = %event.id, "Event updated");

    Ok(Json(EventResponse::from_event(event, Utc::now())))
}

/// Delete an event. Everything scoped to it is removed by cascade.
///
/// DELETE /api/v1/admin/events/:event_id
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = EventRepository::new(state.pool.clone())
        .delete(event_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }

    info!(event_id = %event_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}
