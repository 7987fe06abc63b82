// Database repository for user records and session bindings

use sqlx::PgPool;

use crate::auth::{error::AuthError, models::User};

/// User repository for database operations
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with no active session
    ///
    /// # Arguments
    /// * `email` - Unique email for the new account
    /// * `name` - Optional display name
    /// * `password_hash` - Argon2 digest of the password (never the plaintext)
    ///
    /// # Returns
    /// * `Result<User, AuthError>` - The inserted row, or `EmailInUse` if the
    ///   email is already registered
    ///
    /// The unique index on `email` is the second line of defense against the
    /// lookup-then-create race: a concurrent duplicate insert surfaces here
    /// as `EmailInUse` rather than as a storage fault.
    pub async fn create_user(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, email, name, password_hash, session_token, created_at",
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::EmailInUse;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    /// Find a user by email (exact match; emails are case-sensitive as stored)
    ///
    /// # Arguments
    /// * `email` - Email to look up
    ///
    /// # Returns
    /// * `Result<Option<User>, AuthError>` - The matching row, if any
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, password_hash, session_token, created_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    /// Find a user by ID
    ///
    /// # Arguments
    /// * `id` - User id, as carried in a token's subject claim
    ///
    /// # Returns
    /// * `Result<Option<User>, AuthError>` - The matching row, if any
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, password_hash, session_token, created_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    /// Bind a token as the user's current session, replacing any prior value.
    /// Last write wins; issuing a new token implicitly invalidates the old one.
    pub async fn set_session_token(&self, id: i32, token: &str) -> Result<(), AuthError> {
        sqlx::query("UPDATE users SET session_token = $1 WHERE id = $2")
            .bind(token)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Clear the user's session binding (logout). Outstanding tokens remain
    /// cryptographically valid but no longer match the stored value.
    pub async fn clear_session_token(&self, id: i32) -> Result<(), AuthError> {
        self.set_session_token(id, "").await
    }
}
