//! Data structures for authentication-related requests and responses.
//!
//! Request fields default to empty strings so that a missing JSON field
//! reaches validation instead of failing deserialization.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Registration request payload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegistrationRequest {
    #[validate(
        length(min = 3, max = 10, message = "Login must be between 3-10 characters"),
        custom(function = "validate_login_charset")
    )]
    pub login: String,

    #[validate(length(min = 6, max = 20, message = "Password must be between 6-20 characters"))]
    pub password: String,

    #[validate(email(message = "Must be a valid email"))]
    pub email: String,
}

/// Registration confirmation payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfirmationRequest {
    pub code: String,
}

/// Confirmation email resend payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmailResendingRequest {
    pub email: String,
}

/// Login request payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    pub login_or_email: String,
    pub password: String,
}

/// Successful login payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSuccess {
    pub access_token: String,
}

/// Current user as returned by `/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeView {
    pub email: String,
    pub login: String,
    pub user_id: String,
}

fn validate_login_charset(login: &str) -> Result<(), ValidationError> {
    if login
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Ok(())
    } else {
        Err(ValidationError::new("login_charset")
            .with_message("Login may only contain letters, digits, '_' and '-'".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(login: &str, password: &str, email: &str) -> RegistrationRequest {
        RegistrationRequest {
            login: login.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(registration("alice_1", "P@ss12", "a@x.com").validate().is_ok());
    }

    #[test]
    fn test_invalid_registration_fields() {
        let errors = registration("a!", "123", "nope").validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("login"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("email"));
        assert_eq!(fields["login"].len(), 2);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request: LoginRequest = serde_json::from_str(r#"{"password":"x"}"#).unwrap();
        assert_eq!(request.login_or_email, "");

        let request: LoginRequest =
            serde_json::from_str(r#"{"loginOrEmail":"alice","password":"x"}"#).unwrap();
        assert_eq!(request.login_or_email, "alice");
    }
}
