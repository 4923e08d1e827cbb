//! Server-Sent Events live feed.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use domain::models::SessionContext;
use futures_util::Stream;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionId;
use crate::services::{live::spawn_live_feed, load_event};

const KEEP_ALIVE_SECS: u64 = 15;

/// Open the live feed for the caller.
///
/// GET /api/v1/events/:event_id/live
pub async fn live_feed(
    State(state): State<AppState>,
    session: SessionId,
    Path(event_id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    load_event(&state.pool, event_id).await?;
    let ctx = SessionContext::new(event_id, session.into_inner());

    let stream = spawn_live_feed(state.pool.clone(), ctx, state.config.polling.clone());

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(KEEP_ALIVE_SECS))
            .text("keep-alive"),
    ))
}
