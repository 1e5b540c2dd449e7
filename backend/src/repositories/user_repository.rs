//! Database repository for user account operations.
//!
//! Provides lookups and confirmation-state updates for the `users` table.

use crate::auth::traits::AccountStore;
use crate::database::models::User;
use crate::errors::CreateUserError;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = r#"
    id,
    login,
    email,
    password_hash,
    created_at,
    confirmation_code,
    confirmation_expires_at,
    is_confirmed
"#;

/// Repository for user database operations.
///
/// Uniqueness of `login`, `email` and `confirmation_code` is enforced by the
/// schema; inserts that collide come back as [`CreateUserError`].
#[derive(Clone)]
pub struct UserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool (cheap to clone)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(&self, predicate: &str, value: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {predicate}");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

#[async_trait]
impl AccountStore for UserRepository {
    /// Retrieves a user whose login or email matches.
    ///
    /// # Returns
    /// `Some(User)` if found, `None` otherwise
    async fn find_by_login_or_email(&self, login_or_email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE login = ?1 OR email = ?1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(login_or_email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.fetch_one_where("email = ?", email).await
    }

    async fn find_by_confirmation_code(&self, code: &str) -> Result<Option<User>> {
        self.fetch_one_where("confirmation_code = ?", code).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        self.fetch_one_where("id = ?", id).await
    }

    /// Inserts a new user.
    ///
    /// The insert only happens when neither the new login nor the new email
    /// matches any existing login or email, so a login can never equal
    /// another account's email.
    ///
    /// # Errors
    /// `LoginTaken` / `EmailTaken` when the identity is already in use.
    async fn create(&self, user: &User) -> Result<(), CreateUserError> {
        let rows_affected = sqlx::query(
            r#"
            INSERT INTO users (id, login, email, password_hash, created_at,
                               confirmation_code, confirmation_expires_at, is_confirmed)
            SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8
            WHERE NOT EXISTS (
                SELECT 1 FROM users
                WHERE login IN (?2, ?3) OR email IN (?2, ?3)
            )
            "#,
        )
        .bind(&user.id)
        .bind(&user.login)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(&user.email_confirmation.confirmation_code)
        .bind(user.email_confirmation.expiration_date)
        .bind(user.email_confirmation.is_confirmed)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows_affected > 0 {
            return Ok(());
        }

        // Same precedence as the pre-insert checks: login first.
        let login_taken = self
            .find_by_login_or_email(&user.login)
            .await
            .map_err(CreateUserError::Other)?
            .is_some();

        Err(if login_taken {
            CreateUserError::LoginTaken
        } else {
            CreateUserError::EmailTaken
        })
    }

    /// # Returns
    /// `true` if the row still carried `confirmation_code` and was unconfirmed
    async fn confirm_email(&self, id: &str, confirmation_code: &str) -> Result<bool> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE users
            SET is_confirmed = 1
            WHERE id = ? AND confirmation_code = ? AND is_confirmed = 0
            "#,
        )
        .bind(id)
        .bind(confirmation_code)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn update_registration_confirmation(
        &self,
        id: &str,
        confirmation_code: &str,
        expiration_date: DateTime<Utc>,
    ) -> Result<bool> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE users
            SET confirmation_code = ?,
                confirmation_expires_at = ?
            WHERE id = ?
            "#,
        )
        .bind(confirmation_code)
        .bind(expiration_date)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }
}
