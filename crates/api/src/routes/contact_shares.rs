//! Contact sharing between matched attendees.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::contact_share::{ListContactSharesResponse, ShareContactRequest};
use domain::models::{ContactShare, SessionContext};
use persistence::repositories::ContactShareRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionId;
use crate::services::{load_active_event, require_match};

/// Share the caller's contact details with a match, once per match.
///
/// POST /api/v1/events/:event_id/contact-shares
pub async fn share_contact(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
    Json(request): Json<ShareContactRequest>,
) -> Result<(StatusCode, Json<ContactShare>), ApiError> {
    request.validate()?;
    load_active_event(&state.pool, event_id).await?;

    let ctx = SessionContext::new(event_id, session.into_inner());
    let match_id = require_match(&state.pool, &ctx, &request.recipient_session_id).await?;

    let share: ContactShare = ContactShareRepository::new(state.pool.clone())
        .create(
            event_id,
            &ctx.session_id,
            &request.recipient_session_id,
            &match_id,
            request.full_name.trim(),
            request.phone_number.trim(),
        )
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => ApiError::Conflict(
                "You already shared your contact details with this match".to_string(),
            ),
            other => other,
        })?
        .into();

    info!(event_id = %event_id, match_id = %match_id, "Contact shared");

    Ok((StatusCode::CREATED, Json(share)))
}

/// Contact details the caller has received.
///
/// GET /api/v1/events/:event_id/contact-shares
pub async fn list_contact_shares(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ListContactSharesResponse>, ApiError> {
    let data = ContactShareRepository::new(state.pool.clone())
        .list_received(event_id, session.as_str())
        .await?
        .into_iter()
        .map(ContactShare::from)
        .collect();

    Ok(Json(ListContactSharesResponse { data }))
}
