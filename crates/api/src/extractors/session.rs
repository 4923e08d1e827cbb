//! Attendee session extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

/// Header every attendee request carries.
pub const SESSION_HEADER: &str = "X-Session-Id";

/// Validated value of the `X-Session-Id` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .ok_or_else(|| ApiError::Unauthorized("Missing session id".to_string()))?;

        if !shared::validation::is_valid_session_id(value) {
            return Err(ApiError::Unauthorized("Invalid session id".to_string()));
        }

        Ok(SessionId(value.to_string()))
    }
}
