//! Contact share repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ContactShareEntity;
use crate::metrics::QueryTimer;

const SHARE_COLUMNS: &str = "id, event_id, sharer_session_id, recipient_session_id, match_id, \
     full_name, phone_number, created_at";

/// Repository for contact share database operations.
#[derive(Clone)]
pub struct ContactShareRepository {
    pool: PgPool,
}

impl ContactShareRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a contact share. A second share for the same match fails with a
    /// unique violation.
    pub async fn create(
        &self,
        event_id: Uuid,
        sharer_session_id: &str,
        recipient_session_id: &str,
        match_id: &str,
        full_name: &str,
        phone_number: &str,
    ) -> Result<ContactShareEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_contact_share");
        let query = format!(
            r#"
            INSERT INTO contact_shares (event_id, sharer_session_id, recipient_session_id,
                match_id, full_name, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SHARE_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, ContactShareEntity>(&query)
            .bind(event_id)
            .bind(sharer_session_id)
            .bind(recipient_session_id)
            .bind(match_id)
            .bind(full_name)
            .bind(phone_number)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Contact details other sessions shared with `recipient_session_id`.
    pub async fn list_received(
        &self,
        event_id: Uuid,
        recipient_session_id: &str,
    ) -> Result<Vec<ContactShareEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_received_contact_shares");
        let query = format!(
            r#"
            SELECT {SHARE_COLUMNS} FROM contact_shares
            WHERE event_id = $1 AND recipient_session_id = $2
            ORDER BY created_at DESC
            "#
        );
        let result = sqlx::query_as::<_, ContactShareEntity>(&query)
            .bind(event_id)
            .bind(recipient_session_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }
}
