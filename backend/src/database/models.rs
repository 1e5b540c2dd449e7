//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the `users` table. API-facing shapes live in `auth::models`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub login: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub email_confirmation: EmailConfirmation,
}

/// Ownership proof state for the account's email address.
///
/// `is_confirmed` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EmailConfirmation {
    pub confirmation_code: String,
    #[sqlx(rename = "confirmation_expires_at")]
    pub expiration_date: DateTime<Utc>,
    pub is_confirmed: bool,
}

impl EmailConfirmation {
    /// A fresh, unconfirmed state.
    pub fn pending(confirmation_code: String, expiration_date: DateTime<Utc>) -> Self {
        Self {
            confirmation_code,
            expiration_date,
            is_confirmed: false,
        }
    }

    /// `true` once `now` is strictly past the expiration date.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let expires = Utc::now();
        let state = EmailConfirmation::pending("code".to_string(), expires);

        assert!(!state.is_expired_at(expires - Duration::seconds(1)));
        assert!(!state.is_expired_at(expires));
        assert!(state.is_expired_at(expires + Duration::milliseconds(1)));
    }
}
