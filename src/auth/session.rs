use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::Role;

/// Who is making the request. Built from a verified session and passed
/// explicitly into every service call.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SessionIdentity {
    pub user_id: i64,
    pub role: Role,
    pub name: String,
}

impl SessionIdentity {
    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }
}

/// Server-side session row.
pub struct Session;

impl Session {
    pub async fn create(
        db: &SqlitePool,
        identity: &SessionIdentity,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, role, name, expires_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(identity.user_id)
        .bind(identity.role)
        .bind(&identity.name)
        .bind(expires_at.unix_timestamp())
        .execute(db)
        .await?;
        Ok(id)
    }

    /// Identity bound to an unexpired session, if any.
    pub async fn find_active(
        db: &SqlitePool,
        id: Uuid,
        now: OffsetDateTime,
    ) -> anyhow::Result<Option<SessionIdentity>> {
        let identity = sqlx::query_as::<_, SessionIdentity>(
            r#"
            SELECT user_id, role, name
            FROM sessions
            WHERE id = ? AND expires_at > ?
            "#,
        )
        .bind(id)
        .bind(now.unix_timestamp())
        .fetch_optional(db)
        .await?;
        Ok(identity)
    }

    /// Removing an unknown session is not an error.
    pub async fn delete(db: &SqlitePool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn purge_expired(db: &SqlitePool, now: OffsetDateTime) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now.unix_timestamp())
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }
}
