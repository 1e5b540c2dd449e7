//! Collaborator interfaces consumed by [`AuthService`](super::service::AuthService).
//!
//! Each trait has one production implementation elsewhere in the crate
//! (`UserRepository`, `BcryptHasher`, `EmailService`, `JwtUtils`) and
//! in-memory doubles in the service tests.

use crate::database::models::User;
use crate::errors::{CreateUserError, ServiceResult};
use crate::utils::jwt::Claims;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Durable account storage.
///
/// Implementations must enforce login and email uniqueness atomically on
/// insert and report violations through [`CreateUserError`].
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Finds an account whose login or email equals `login_or_email`.
    async fn find_by_login_or_email(&self, login_or_email: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Finds the account whose current confirmation code is `code`.
    async fn find_by_confirmation_code(&self, code: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn create(&self, user: &User) -> Result<(), CreateUserError>;
    /// Marks the account confirmed only while `confirmation_code` is still its
    /// current code and it is unconfirmed. Returns `false` when nothing changed.
    async fn confirm_email(&self, id: &str, confirmation_code: &str) -> Result<bool>;
    /// Replaces code and expiry in one write.
    async fn update_registration_confirmation(
        &self,
        id: &str,
        confirmation_code: &str,
        expiration_date: DateTime<Utc>,
    ) -> Result<bool>;
}

/// One-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> ServiceResult<String>;
    async fn verify(&self, password: &str, hash: &str) -> ServiceResult<bool>;
}

/// Delivers a confirmation code to an email address.
#[async_trait]
pub trait ConfirmationNotifier: Send + Sync {
    async fn send_confirmation(&self, email: &str, code: &str) -> ServiceResult<()>;
}

/// Signs and checks bearer tokens.
pub trait TokenIssuer: Send + Sync {
    /// Mints a signed token for `subject_id`.
    fn create(&self, subject_id: &str) -> ServiceResult<String>;
    /// Reads claims without checking signature or expiry.
    fn decode(&self, token: &str) -> Option<Claims>;
    /// Returns claims only for a well-signed, unexpired token.
    fn verify(&self, token: &str) -> Option<Claims>;
}
