//! Notification polling.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::SessionContext;
use domain::services::notification::NotificationsResponse;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionId;
use crate::services::{feed, load_event};

/// Oldest unseen match and latest unread message.
///
/// GET /api/v1/events/:event_id/notifications
///
/// A match returned here is marked as seen for the caller before the
/// response is written.
pub async fn get_notifications(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
) -> Result<Json<NotificationsResponse>, ApiError> {
    load_event(&state.pool, event_id).await?;
    let ctx = SessionContext::new(event_id, session.into_inner());
    let pending = feed::load_notifications(&state.pool, &ctx).await?;
    feed::acknowledge(&state.pool, &ctx, &pending.acknowledgements).await;
    Ok(Json(pending.response))
}
