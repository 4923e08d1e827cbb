//! Attendee profile and discovery routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::profile::{CreateProfileRequest, ListProfilesResponse, UpdateProfileRequest};
use domain::models::{EventProfile, GenderIdentity, SessionContext};
use domain::services::discovery::{discover, DiscoveryFilters, DEFAULT_MAX_AGE, DEFAULT_MIN_AGE};
use persistence::repositories::ProfileRepository;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionId;
use crate::services::{load_active_event, load_event, require_profile};

/// Query parameters of the discovery list.
#[derive(Debug, Default, Deserialize)]
pub struct DiscoverQuery {
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub gender: Option<GenderIdentity>,
    /// Comma separated tags.
    pub interests: Option<String>,
}

impl DiscoverQuery {
    pub fn into_filters(self) -> DiscoveryFilters {
        DiscoveryFilters {
            min_age: self.min_age.unwrap_or(DEFAULT_MIN_AGE),
            max_age: self.max_age.unwrap_or(DEFAULT_MAX_AGE),
            gender: self.gender,
            interests: self
                .interests
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|tag| !tag.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// Create the caller's profile in an event.
///
/// POST /api/v1/events/:event_id/profiles
pub async fn create_profile(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
    Json(request): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<EventProfile>), ApiError> {
    request.validate()?;
    load_active_event(&state.pool, event_id).await?;

    let ctx = SessionContext::new(event_id, session.into_inner());
    let repo = ProfileRepository::new(state.pool.clone());

    if repo.find_by_session(event_id, &ctx.session_id).await?.is_some() {
        return Err(ApiError::Conflict(
            "You already have a profile in this event".to_string(),
        ));
    }

    let profile: EventProfile = repo.create(&request.into_profile(&ctx)).await?.into();

    info!(
        event_id = %event_id,
        session_id = %profile.session_id,
        is_visible = profile.is_visible,
        "Profile created"
    );

    Ok((StatusCode::CREATED, Json(profile)))
}

/// The caller's own profile.
///
/// GET /api/v1/events/:event_id/profiles/me
pub async fn get_my_profile(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventProfile>, ApiError> {
    let ctx = SessionContext::new(event_id, session.into_inner());
    Ok(Json(require_profile(&state.pool, &ctx).await?))
}

/// Update the caller's profile, including its visibility.
///
/// PATCH /api/v1/events/:event_id/profiles/me
pub async fn update_my_profile(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<EventProfile>, ApiError> {
    request.validate()?;
    load_active_event(&state.pool, event_id).await?;

    let ctx = SessionContext::new(event_id, session.into_inner());
    let merged = request.apply_to(require_profile(&state.pool, &ctx).await?);

    let profile: EventProfile = ProfileRepository::new(state.pool.clone())
        .update(&merged)
        .await?
        .map(EventProfile::from)
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    info!(
        event_id = %event_id,
        session_id = %profile.session_id,
        is_visible = profile.is_visible,
        "Profile updated"
    );

    Ok(Json(profile))
}

/// Leave the event by deleting the caller's profile.
///
/// DELETE /api/v1/events/:event_id/profiles/me
pub async fn delete_my_profile(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = ProfileRepository::new(state.pool.clone())
        .delete_by_session(event_id, session.as_str())
        .await?;

    if !deleted {
        return Err(ApiError::NotFound("Profile not found".to_string()));
    }

    info!(event_id = %event_id, session_id = %session.as_str(), "Profile deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Another attendee's visible profile.
///
/// GET /api/v1/events/:event_id/profiles/:session_id
pub async fn get_profile(
    State(state): State<AppState>,
    _session: SessionId,
    Path((event_id, session_id)): Path<(Uuid, String)>,
) -> Result<Json<EventProfile>, ApiError> {
    ProfileRepository::new(state.pool.clone())
        .find_by_session(event_id, &session_id)
        .await?
        .map(EventProfile::from)
        .filter(|profile| profile.is_visible)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))
}

/// Profiles the caller may see, filtered by the query.
///
/// GET /api/v1/events/:event_id/discover
pub async fn discover_profiles(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
    Query(query): Query<DiscoverQuery>,
) -> Result<Json<ListProfilesResponse>, ApiError> {
    let filters = query.into_filters();
    filters.validate()?;

    load_event(&state.pool, event_id).await?;
    let ctx = SessionContext::new(event_id, session.into_inner());
    let viewer = require_profile(&state.pool, &ctx).await?;

    let candidates: Vec<EventProfile> = ProfileRepository::new(state.pool.clone())
        .list_visible(event_id)
        .await?
        .into_iter()
        .map(EventProfile::from)
        .collect();

    let data = discover(&viewer, &candidates, &filters)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ListProfilesResponse { data }))
}
