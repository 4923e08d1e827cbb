//! Organizer authentication.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;

/// Header organizers send their key in.
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Rejects requests whose `X-Admin-Key` does not match the configured key.
pub async fn require_admin_key(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let presented = req
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let expected = &state.config.security.admin_api_key;
    if presented.is_empty()
        || expected.is_empty()
        || !shared::crypto::admin_key_matches(presented, expected)
    {
        tracing::warn!(path = %req.uri().path(), "Rejected admin request");
        return ApiError::Unauthorized("Invalid or missing admin key".to_string()).into_response();
    }

    next.run(req).await
}
