//! Event profile entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{EventProfile, GenderIdentity, InterestedIn};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for gender_identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "gender_identity", rename_all = "snake_case")]
pub enum GenderIdentityDb {
    Man,
    Woman,
    NonBinary,
}

impl From<GenderIdentityDb> for GenderIdentity {
    fn from(db: GenderIdentityDb) -> Self {
        match db {
            GenderIdentityDb::Man => GenderIdentity::Man,
            GenderIdentityDb::Woman => GenderIdentity::Woman,
            GenderIdentityDb::NonBinary => GenderIdentity::NonBinary,
        }
    }
}

impl From<GenderIdentity> for GenderIdentityDb {
    fn from(gender: GenderIdentity) -> Self {
        match gender {
            GenderIdentity::Man => GenderIdentityDb::Man,
            GenderIdentity::Woman => GenderIdentityDb::Woman,
            GenderIdentity::NonBinary => GenderIdentityDb::NonBinary,
        }
    }
}

/// Database enum for interested_in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "interested_in", rename_all = "snake_case")]
pub enum InterestedInDb {
    Men,
    Women,
    Everyone,
    NonBinary,
}

impl From<InterestedInDb> for InterestedIn {
    fn from(db: InterestedInDb) -> Self {
        match db {
            InterestedInDb::Men => InterestedIn::Men,
            InterestedInDb::Women => InterestedIn::Women,
            InterestedInDb::Everyone => InterestedIn::Everyone,
            InterestedInDb::NonBinary => InterestedIn::NonBinary,
        }
    }
}

impl From<InterestedIn> for InterestedInDb {
    fn from(pref: InterestedIn) -> Self {
        match pref {
            InterestedIn::Men => InterestedInDb::Men,
            InterestedIn::Women => InterestedInDb::Women,
            InterestedIn::Everyone => InterestedInDb::Everyone,
            InterestedIn::NonBinary => InterestedInDb::NonBinary,
        }
    }
}

/// Database row mapping for the event_profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct EventProfileEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub session_id: String,
    pub first_name: String,
    pub age: i32,
    pub gender_identity: GenderIdentityDb,
    pub interested_in: InterestedInDb,
    pub interests: Vec<String>,
    pub is_visible: bool,
    pub profile_photo_url: Option<String>,
    pub profile_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventProfileEntity> for EventProfile {
    fn from(entity: EventProfileEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            session_id: entity.session_id,
            first_name: entity.first_name,
            age: entity.age,
            gender_identity: entity.gender_identity.into(),
            interested_in: entity.interested_in.into(),
            interests: entity.interests,
            is_visible: entity.is_visible,
            profile_photo_url: entity.profile_photo_url,
            profile_color: entity.profile_color,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_round_trip() {
        for gender in [GenderIdentity::Man, GenderIdentity::Woman, GenderIdentity::NonBinary] {
            let db: GenderIdentityDb = gender.into();
            assert_eq!(GenderIdentity::from(db), gender);
        }
    }

    #[test]
    fn test_interested_in_round_trip() {
        for pref in [
            InterestedIn::Men,
            InterestedIn::Women,
            InterestedIn::Everyone,
            InterestedIn::NonBinary,
        ] {
            let db: InterestedInDb = pref.into();
            assert_eq!(InterestedIn::from(db), pref);
        }
    }
}
