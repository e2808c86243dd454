// Credential store over the users table

use crate::auth::{
    error::AuthError,
    models::{UpdateReport, UpdateUserRequest, User},
};
use sqlx::PgPool;

/// User repository for database operations
///
/// Lookups are exact-match on email, case-sensitive.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, created_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    /// Insert a new user and return the stored record with its assigned id
    ///
    /// The unique index on email backs the service-level existence check: a
    /// concurrent duplicate insert surfaces here as `EmailAlreadyExists`.
    pub async fn insert(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING id, username, email, password_hash, role, created_at",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::EmailAlreadyExists;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    /// Merge the provided fields into the record with this email
    ///
    /// Omitted fields keep their stored values.
    pub async fn update_by_email(
        &self,
        email: &str,
        fields: &UpdateUserRequest,
    ) -> Result<UpdateReport, AuthError> {
        let result = sqlx::query(
            "UPDATE users
             SET username = COALESCE($2, username),
                 role = COALESCE($3, role)
             WHERE email = $1",
        )
        .bind(email)
        .bind(fields.username.as_deref())
        .bind(fields.role)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        let matched = result.rows_affected() > 0;
        Ok(UpdateReport {
            matched,
            modified: matched,
        })
    }
}
