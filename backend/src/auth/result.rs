//! Structured outcome of every auth operation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    Success,
    BadRequest,
    Unauthorized,
}

/// Field-tagged business or validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
    pub field: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: field.into(),
        }
    }
}

/// Status, ordered extensions and an optional payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult<T> {
    pub status: ResultStatus,
    pub extensions: Vec<FieldError>,
    pub data: Option<T>,
}

impl<T> AuthResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResultStatus::Success,
            extensions: Vec::new(),
            data: Some(data),
        }
    }

    pub fn bad_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::failure(ResultStatus::BadRequest, vec![FieldError::new(field, message)])
    }

    pub fn unauthorized(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::failure(ResultStatus::Unauthorized, vec![FieldError::new(field, message)])
    }

    pub fn failure(status: ResultStatus, extensions: Vec<FieldError>) -> Self {
        Self {
            status,
            extensions,
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }

    /// Re-types a failed result, dropping any payload.
    pub fn into_failure<U>(self) -> AuthResult<U> {
        AuthResult::failure(self.status, self.extensions)
    }
}

impl AuthResult<()> {
    pub fn ok() -> Self {
        Self::success(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_failure_keeps_status_and_extensions() {
        let result: AuthResult<String> = AuthResult::unauthorized("password", "Password is wrong");
        let retyped: AuthResult<u32> = result.into_failure();

        assert_eq!(retyped.status, ResultStatus::Unauthorized);
        assert_eq!(retyped.extensions, vec![FieldError::new("password", "Password is wrong")]);
        assert!(retyped.data.is_none());
    }
}
