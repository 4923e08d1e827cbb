//! Messaging between matched attendees.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::message::{ListMessagesResponse, MarkReadResponse, SendMessageRequest};
use domain::models::{Message, SessionContext};
use persistence::repositories::MessageRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionId;
use crate::middleware::metrics::record_message_sent;
use crate::services::{load_active_event, require_match};

/// Send a message to a match.
///
/// POST /api/v1/events/:event_id/messages
pub async fn send_message(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    request.validate()?;
    load_active_event(&state.pool, event_id).await?;

    let ctx = SessionContext::new(event_id, session.into_inner());
    let match_id = require_match(&state.pool, &ctx, &request.receiver_session_id).await?;

    let message: Message = MessageRepository::new(state.pool.clone())
        .create(
            event_id,
            &ctx.session_id,
            &request.receiver_session_id,
            &request.content,
            &match_id,
        )
        .await?
        .into();

    record_message_sent();
    info!(
        event_id = %event_id,
        match_id = %match_id,
        sender = %ctx.session_id,
        "Message sent"
    );

    Ok((StatusCode::CREATED, Json(message)))
}

/// Conversation with one match, oldest first.
///
/// GET /api/v1/events/:event_id/conversations/:other_session_id/messages
pub async fn list_conversation(
    State(state): State<AppState>,
    session: SessionId,
    Path((event_id, other_session_id)): Path<(Uuid, String)>,
) -> Result<Json<ListMessagesResponse>, ApiError> {
    let ctx = SessionContext::new(event_id, session.into_inner());
    let match_id = require_match(&state.pool, &ctx, &other_session_id).await?;

    let data = MessageRepository::new(state.pool.clone())
        .list_conversation(event_id, &match_id, &ctx.session_id, &other_session_id)
        .await?
        .into_iter()
        .map(Message::from)
        .collect();

    Ok(Json(ListMessagesResponse { match_id, data }))
}

/// Mark every message the match sent the caller as read.
///
/// POST /api/v1/events/:event_id/conversations/:other_session_id/read
pub async fn mark_conversation_read(
    State(state): State<AppState>,
    session: SessionId,
    Path((event_id, other_session_id)): Path<(Uuid, String)>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let ctx = SessionContext::new(event_id, session.into_inner());
    let match_id = require_match(&state.pool, &ctx, &other_session_id).await?;

    let updated = MessageRepository::new(state.pool.clone())
        .mark_read(event_id, &match_id, &ctx.session_id, &other_session_id)
        .await?;

    Ok(Json(MarkReadResponse { updated }))
}
