//! Like and match routes.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use domain::models::like::{
    CreateLikeRequest, LikeResponse, ListLikesResponse, ListMatchesResponse, MatchSummary,
};
use domain::models::{EventProfile, Like, SessionContext};
use persistence::repositories::{LikeRepository, ProfileRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionId;
use crate::middleware::metrics::{record_like_recorded, record_match_made};
use crate::services::{load_active_event, require_profile};

/// Like another attendee.
///
/// POST /api/v1/events/:event_id/likes
///
/// Liking someone twice reuses the first like. If the other attendee
/// already liked the caller, both likes become a match.
pub async fn create_like(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
    Json(request): Json<CreateLikeRequest>,
) -> Result<(StatusCode, Json<LikeResponse>), ApiError> {
    request.validate()?;
    load_active_event(&state.pool, event_id).await?;

    let ctx = SessionContext::new(event_id, session.into_inner());
    require_profile(&state.pool, &ctx).await?;

    let target_visible = ProfileRepository::new(state.pool.clone())
        .find_by_session(event_id, &request.liked_session_id)
        .await?
        .map(|p| p.is_visible)
        .unwrap_or(false);
    if !target_visible {
        return Err(ApiError::NotFound("Profile not found".to_string()));
    }

    let outcome = LikeRepository::new(state.pool.clone())
        .record_like(&ctx, &request.liked_session_id)
        .await?;

    record_like_recorded(outcome.created);
    if outcome.newly_matched {
        record_match_made();
    }

    info!(
        event_id = %event_id,
        liker = %ctx.session_id,
        liked = %request.liked_session_id,
        created = outcome.created,
        matched = outcome.matched,
        "Like recorded"
    );

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let match_id = outcome.matched.then(|| outcome.like.match_id());

    Ok((
        status,
        Json(LikeResponse {
            like: outcome.like,
            matched: outcome.matched,
            created: outcome.created,
            match_id,
        }),
    ))
}

/// Likes the caller has sent.
///
/// GET /api/v1/events/:event_id/likes
pub async fn list_likes(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ListLikesResponse>, ApiError> {
    let data = LikeRepository::new(state.pool.clone())
        .list_sent(event_id, session.as_str())
        .await?
        .into_iter()
        .map(Like::from)
        .collect();

    Ok(Json(ListLikesResponse { data }))
}

/// The caller's matches with their partners' profiles.
///
/// GET /api/v1/events/:event_id/matches
///
/// Partners who deleted their profile are left out.
pub async fn list_matches(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ListMatchesResponse>, ApiError> {
    let session_id = session.into_inner();

    let mutual: Vec<Like> = LikeRepository::new(state.pool.clone())
        .list_mutual_for(event_id, &session_id)
        .await?
        .into_iter()
        .map(Like::from)
        .collect();

    let partners = matched_partners(&session_id, &mutual);
    let partner_ids: Vec<String> = partners.iter().map(|(id, _)| id.clone()).collect();

    let mut profiles: HashMap<String, EventProfile> = ProfileRepository::new(state.pool.clone())
        .find_by_sessions(event_id, &partner_ids)
        .await?
        .into_iter()
        .map(|entity| (entity.session_id.clone(), EventProfile::from(entity)))
        .collect();

    let data = partners
        .into_iter()
        .filter_map(|(partner_id, matched_at)| {
            profiles.remove(&partner_id).map(|partner| MatchSummary {
                match_id: shared::match_key::derive_match_id(&session_id, &partner_id),
                partner,
                matched_at,
            })
        })
        .collect();

    Ok(Json(ListMatchesResponse { data }))
}

/// Distinct partners in `mutual`, each with its earliest row time, in the
/// order the matches first appear.
fn matched_partners(session_id: &str, mutual: &[Like]) -> Vec<(String, DateTime<Utc>)> {
    let mut partners: Vec<(String, DateTime<Utc>)> = Vec::new();
    for like in mutual {
        let Some(partner) = like.partner_of(session_id) else {
            continue;
        };
        match partners.iter_mut().find(|(id, _)| id == partner) {
            Some((_, at)) if like.created_at < *at => *at = like.created_at,
            Some(_) => {}
            None => partners.push((partner.to_string(), like.created_at)),
        }
    }
    partners
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn mutual(liker: &str, liked: &str, minutes_ago: i64) -> Like {
        Like {
            id: Uuid::new_v4(),
            event_id: Uuid::nil(),
            liker_session_id: liker.to_string(),
            liked_session_id: liked.to_string(),
            is_mutual: true,
            liker_notified: true,
            liked_notified: true,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_matched_partners_are_deduplicated() {
        let rows = vec![mutual("B", "A", 10), mutual("A", "B", 5), mutual("A", "C", 1)];
        let partners = matched_partners("A", &rows);

        assert_eq!(partners.len(), 2);
        assert_eq!(partners[0].0, "B");
        assert_eq!(partners[0].1, rows[0].created_at);
        assert_eq!(partners[1].0, "C");
    }

    #[test]
    fn test_matched_partners_ignore_foreign_rows() {
        let rows = vec![mutual("X", "Y", 1)];
        assert!(matched_partners("A", &rows).is_empty());
    }
}
