//! Event profile repository for database operations.

use domain::models::EventProfile;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{EventProfileEntity, GenderIdentityDb, InterestedInDb};
use crate::metrics::QueryTimer;

const PROFILE_COLUMNS: &str = "id, event_id, session_id, first_name, age, gender_identity, \
     interested_in, interests, is_visible, profile_photo_url, profile_color, created_at, updated_at";

/// Repository for event profile database operations.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a profile. Fails with a unique violation if the session already
    /// has one in this event.
    pub async fn create(&self, profile: &EventProfile) -> Result<EventProfileEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event_profile");
        let query = format!(
            r#"
            INSERT INTO event_profiles (event_id, session_id, first_name, age, gender_identity,
                interested_in, interests, is_visible, profile_photo_url, profile_color)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PROFILE_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, EventProfileEntity>(&query)
            .bind(profile.event_id)
            .bind(&profile.session_id)
            .bind(&profile.first_name)
            .bind(profile.age)
            .bind(GenderIdentityDb::from(profile.gender_identity))
            .bind(InterestedInDb::from(profile.interested_in))
            .bind(&profile.interests)
            .bind(profile.is_visible)
            .bind(&profile.profile_photo_url)
            .bind(&profile.profile_color)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find the profile a session created in an event.
    pub async fn find_by_session(
        &self,
        event_id: Uuid,
        session_id: &str,
    ) -> Result<Option<EventProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_profile_by_session");
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM event_profiles WHERE event_id = $1 AND session_id = $2"
        );
        let result = sqlx::query_as::<_, EventProfileEntity>(&query)
            .bind(event_id)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Visible profiles in an event, oldest first.
    pub async fn list_visible(&self, event_id: Uuid) -> Result<Vec<EventProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_visible_event_profiles");
        let query = format!(
            r#"
            SELECT {PROFILE_COLUMNS} FROM event_profiles
            WHERE event_id = $1 AND is_visible = true
            ORDER BY created_at ASC, id ASC
            "#
        );
        let result = sqlx::query_as::<_, EventProfileEntity>(&query)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Profiles for a set of sessions in an event, hidden ones included.
    pub async fn find_by_sessions(
        &self,
        event_id: Uuid,
        session_ids: &[String],
    ) -> Result<Vec<EventProfileEntity>, sqlx::Error> {
        if session_ids.is_empty() {
            return Ok(Vec::new());
        }
        let timer = QueryTimer::new("find_event_profiles_by_sessions");
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM event_profiles WHERE event_id = $1 AND session_id = ANY($2)"
        );
        let result = sqlx::query_as::<_, EventProfileEntity>(&query)
            .bind(event_id)
            .bind(session_ids)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Persist an already-merged profile.
    pub async fn update(&self, profile: &EventProfile) -> Result<Option<EventProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_event_profile");
        let query = format!(
            r#"
            UPDATE event_profiles
            SET first_name = $3, age = $4, gender_identity = $5, interested_in = $6,
                interests = $7, is_visible = $8, profile_photo_url = $9, profile_color = $10,
                updated_at = NOW()
            WHERE event_id = $1 AND session_id = $2
            RETURNING {PROFILE_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, EventProfileEntity>(&query)
            .bind(profile.event_id)
            .bind(&profile.session_id)
            .bind(&profile.first_name)
            .bind(profile.age)
            .bind(GenderIdentityDb::from(profile.gender_identity))
            .bind(InterestedInDb::from(profile.interested_in))
            .bind(&profile.interests)
            .bind(profile.is_visible)
            .bind(&profile.profile_photo_url)
            .bind(&profile.profile_color)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Delete the caller's profile. Likes and messages are kept.
    pub async fn delete_by_session(&self, event_id: Uuid, session_id: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_event_profile");
        let result = sqlx::query("DELETE FROM event_profiles WHERE event_id = $1 AND session_id = $2")
            .bind(event_id)
            .bind(session_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
