//! MySQL Repository Implementations

use chrono::Utc;
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::MySqlPool;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// MySQL-backed identity and session store
#[derive(Clone)]
pub struct MySqlAuthRepository {
    pool: MySqlPool,
}

impl MySqlAuthRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for MySqlAuthRepository {
    async fn create_user(&self, user: &User) -> AuthResult<()> {
        sqlx::query("INSERT INTO users (id, username, password) VALUES (?, ?, ?)")
            .bind(user.id.as_str())
            .bind(&user.username)
            .bind(user.password_hash.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for MySqlAuthRepository {
    async fn create_session(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(session.id.as_str())
        .bind(session.user_id.as_str())
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn is_valid(&self, user_id: &UserId) -> AuthResult<bool> {
        let live: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM sessions
            WHERE user_id = ? AND expires_at > ?
            "#,
        )
        .bind(user_id.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(live > 0)
    }

    async fn invalidate(&self, user_id: &UserId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    password: String,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: UserId::from_raw(self.id),
            username: self.username,
            password_hash: HashedPassword::from_stored(self.password),
        }
    }
}

/// Duplicate username (MySQL 1062) becomes `UserAlreadyExists`.
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AuthError::UserAlreadyExists
        }
        _ => AuthError::Database(err),
    }
}
