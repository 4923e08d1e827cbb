//! Anonymous session issuance.

use axum::{http::StatusCode, Json};
use domain::models::session::CreateSessionResponse;
use tracing::debug;

/// Issue a fresh session id.
///
/// POST /api/v1/sessions
///
/// The server keeps no session table; the id itself is the identity and the
/// device stores it.
pub async fn create_session() -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = shared::crypto::generate_session_id();
    debug!("Session issued");
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}
