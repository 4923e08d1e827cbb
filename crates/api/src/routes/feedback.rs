//! Post-event feedback.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::feedback::SubmitFeedbackRequest;
use domain::models::EventFeedback;
use persistence::repositories::FeedbackRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionId;
use crate::services::load_event;

/// Submit feedback for an event, once per session.
///
/// POST /api/v1/events/:event_id/feedback
///
/// Accepted from the start of the event onward, including after it ended.
pub async fn submit_feedback(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
    Json(request): Json<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<EventFeedback>), ApiError> {
    request.validate()?;

    let event = load_event(&state.pool, event_id).await?;
    if !event.accepts_feedback_at(Utc::now()) {
        return Err(ApiError::Forbidden(
            domain::models::EventAccessError::NotStarted.to_string(),
        ));
    }

    let repo = FeedbackRepository::new(state.pool.clone());
    if repo.find_by_session(event_id, session.as_str()).await?.is_some() {
        return Err(ApiError::Conflict(
            "You already submitted feedback for this event".to_string(),
        ));
    }

    let feedback: EventFeedback = repo
        .create(
            event_id,
            session.as_str(),
            request.overall_rating,
            request.match_quality_rating,
            request.would_attend_again,
            request.highlight.as_deref().map(str::trim),
            request.suggestion.as_deref().map(str::trim),
        )
        .await?
        .into();

    info!(
        event_id = %event_id,
        overall_rating = feedback.overall_rating,
        match_quality_rating = feedback.match_quality_rating,
        "Feedback submitted"
    );

    Ok((StatusCode::CREATED, Json(feedback)))
}
