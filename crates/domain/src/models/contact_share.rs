//! Contact share domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::PHONE_NUMBER_REGEX;

/// Real contact details one matched attendee chose to hand to the other.
///
/// At most one per (event, sharer, match).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContactShare {
    pub id: Uuid,
    pub event_id: Uuid,
    pub sharer_session_id: String,
    pub recipient_session_id: String,
    pub match_id: String,
    pub full_name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// Request to share contact details with a match.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ShareContactRequest {
    #[validate(custom(function = "shared::validation::validate_session_id"))]
    pub recipient_session_id: String,

    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,

    #[validate(regex(path = *PHONE_NUMBER_REGEX, message = "Invalid phone number"))]
    #[validate(custom(function = "shared::validation::validate_phone_digits"))]
    pub phone_number: String,
}

/// Response for listing received contact shares.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListContactSharesResponse {
    pub data: Vec<ContactShare>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_contact_request_validation() {
        let ok = ShareContactRequest {
            recipient_session_id: "s2".to_string(),
            full_name: "Maya Lindqvist".to_string(),
            phone_number: "+46 70 123 45 67".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_phone = ShareContactRequest {
            phone_number: "call me maybe".to_string(),
            ..ok.clone()
        };
        assert!(bad_phone.validate().is_err());

        let too_short = ShareContactRequest {
            phone_number: "12-34".to_string(),
            ..ok.clone()
        };
        assert!(too_short.validate().is_err());

        let nameless = ShareContactRequest {
            full_name: String::new(),
            ..ok
        };
        assert!(nameless.validate().is_err());
    }
}
