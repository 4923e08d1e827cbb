//! Event repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::Event;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventEntity;
use crate::metrics::QueryTimer;

/// Attempts made to find an unused generated access code.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Repository for event-related database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event.
    pub async fn create(
        &self,
        name: &str,
        access_code: &str,
        starts_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        location: Option<&str>,
    ) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events (name, access_code, starts_at, expires_at, location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, access_code, starts_at, expires_at, location, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(access_code)
        .bind(starts_at)
        .bind(expires_at)
        .bind(location)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, name, access_code, starts_at, expires_at, location, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an event by access code, ignoring case.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_code");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, name, access_code, starts_at, expires_at, location, created_at, updated_at
            FROM events
            WHERE UPPER(access_code) = UPPER($1)
            "#,
        )
        .bind(code.trim())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all events, most recent start first.
    pub async fn list_all(&self) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, name, access_code, starts_at, expires_at, location, created_at, updated_at
            FROM events
            ORDER BY starts_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Persist an already-merged event.
    pub async fn update(&self, event: &Event) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events
            SET name = $2, access_code = $3, starts_at = $4, expires_at = $5,
                location = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, access_code, starts_at, expires_at, location, created_at, updated_at
            "#,
        )
        .bind(event.id)
        .bind(&event.name)
        .bind(&event.access_code)
        .bind(event.starts_at)
        .bind(event.expires_at)
        .bind(&event.location)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an event and, by cascade, everything scoped to it.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Check whether an access code is taken, ignoring case.
    pub async fn code_exists(&self, code: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("event_code_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM events WHERE UPPER(access_code) = UPPER($1))",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Generate an access code not used by any event.
    ///
    /// Returns `None` if every attempt collided.
    pub async fn generate_unique_code(&self) -> Result<Option<String>, sqlx::Error> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = domain::models::event::generate_access_code();
            if !self.code_exists(&code).await? {
                return Ok(Some(code));
            }
        }
        Ok(None)
    }
}
