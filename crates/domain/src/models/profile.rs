//! Event profile domain models.
//!
//! A profile is temporary: it exists for one (event, session) pair and is
//! deleted when the attendee leaves the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::HEX_COLOR_REGEX;

use super::session::SessionContext;

/// Gender identity shown on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenderIdentity {
    Man,
    Woman,
    NonBinary,
}

impl GenderIdentity {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderIdentity::Man => "man",
            GenderIdentity::Woman => "woman",
            GenderIdentity::NonBinary => "non-binary",
        }
    }
}

impl std::str::FromStr for GenderIdentity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "man" => Ok(GenderIdentity::Man),
            "woman" => Ok(GenderIdentity::Woman),
            "non-binary" | "non_binary" | "nonbinary" => Ok(GenderIdentity::NonBinary),
            other => Err(format!("Unknown gender identity: {}", other)),
        }
    }
}

/// Who an attendee wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterestedIn {
    Men,
    Women,
    Everyone,
    NonBinary,
}

impl InterestedIn {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestedIn::Men => "men",
            InterestedIn::Women => "women",
            InterestedIn::Everyone => "everyone",
            InterestedIn::NonBinary => "non-binary",
        }
    }

    /// Returns true if someone with `gender` satisfies this preference.
    pub fn accepts(&self, gender: GenderIdentity) -> bool {
        match self {
            InterestedIn::Everyone => true,
            InterestedIn::Men => gender == GenderIdentity::Man,
            InterestedIn::Women => gender == GenderIdentity::Woman,
            InterestedIn::NonBinary => gender == GenderIdentity::NonBinary,
        }
    }
}

/// An attendee's profile within one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventProfile {
    pub id: Uuid,
    pub event_id: Uuid,
    pub session_id: String,
    pub first_name: String,
    pub age: i32,
    pub gender_identity: GenderIdentity,
    pub interested_in: InterestedIn,
    pub interests: Vec<String>,
    pub is_visible: bool,
    pub profile_photo_url: Option<String>,
    /// Fallback avatar background when there is no photo.
    pub profile_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create the caller's profile in an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[validate(range(min = 18, max = 120, message = "Age must be between 18 and 120"))]
    pub age: i32,

    pub gender_identity: GenderIdentity,

    pub interested_in: InterestedIn,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_interests"))]
    pub interests: Vec<String>,

    #[serde(default = "default_visible")]
    pub is_visible: bool,

    #[validate(url(message = "Profile photo must be a valid URL"))]
    pub profile_photo_url: Option<String>,

    #[validate(regex(path = *HEX_COLOR_REGEX, message = "Profile color must be #RRGGBB"))]
    pub profile_color: Option<String>,
}

fn default_visible() -> bool {
    true
}

impl CreateProfileRequest {
    /// Builds the profile to insert. The id and timestamps are placeholders
    /// until the row is written.
    pub fn into_profile(self, ctx: &SessionContext) -> EventProfile {
        let now = Utc::now();
        EventProfile {
            id: Uuid::nil(),
            event_id: ctx.event_id,
            session_id: ctx.session_id.clone(),
            first_name: self.first_name.trim().to_string(),
            age: self.age,
            gender_identity: self.gender_identity,
            interested_in: self.interested_in,
            interests: clean_interests(self.interests),
            is_visible: self.is_visible,
            profile_photo_url: self.profile_photo_url,
            profile_color: self.profile_color.unwrap_or_else(pick_profile_color),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: Option<String>,

    #[validate(range(min = 18, max = 120, message = "Age must be between 18 and 120"))]
    pub age: Option<i32>,

    pub gender_identity: Option<GenderIdentity>,

    pub interested_in: Option<InterestedIn>,

    #[validate(custom(function = "shared::validation::validate_interests"))]
    pub interests: Option<Vec<String>>,

    pub is_visible: Option<bool>,

    #[validate(url(message = "Profile photo must be a valid URL"))]
    pub profile_photo_url: Option<String>,

    #[validate(regex(path = *HEX_COLOR_REGEX, message = "Profile color must be #RRGGBB"))]
    pub profile_color: Option<String>,
}

impl UpdateProfileRequest {
    /// Applies the update to `profile` and returns the merged record.
    pub fn apply_to(self, mut profile: EventProfile) -> EventProfile {
        if let Some(first_name) = self.first_name {
            profile.first_name = first_name;
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(gender) = self.gender_identity {
            profile.gender_identity = gender;
        }
        if let Some(interested_in) = self.interested_in {
            profile.interested_in = interested_in;
        }
        if let Some(interests) = self.interests {
            profile.interests = clean_interests(interests);
        }
        if let Some(is_visible) = self.is_visible {
            profile.is_visible = is_visible;
        }
        if let Some(url) = self.profile_photo_url {
            profile.profile_photo_url = Some(url);
        }
        if let Some(color) = self.profile_color {
            profile.profile_color = color;
        }
        profile
    }
}

/// Trims tags and drops case-insensitive duplicates, keeping first spelling.
pub fn clean_interests(interests: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    interests
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty() && seen.insert(shared::validation::normalize_tag(tag)))
        .collect()
}

/// Avatar background palette used when a profile has no color of its own.
pub const PROFILE_COLORS: [&str; 8] = [
    "#FF5A5F", "#FC642D", "#FFB400", "#00A699", "#007A87", "#7B0051", "#3F51B5", "#8CE071",
];

/// Picks a random color from [`PROFILE_COLORS`].
pub fn pick_profile_color() -> String {
    use rand::seq::SliceRandom;
    PROFILE_COLORS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(PROFILE_COLORS[0])
        .to_string()
}

/// Response for listing profiles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListProfilesResponse {
    pub data: Vec<EventProfile>,
}
