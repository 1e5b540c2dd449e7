//! Global application error types.
//!
//! Business-rule rejections never show up here; they are returned as
//! [`AuthResult`](crate::auth::result::AuthResult) values. These types cover
//! infrastructure faults that propagate to the HTTP boundary.

use thiserror::Error;

/// Operational fault raised by a collaborator of the auth service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("External service error: {message}")]
    ExternalService { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn external_service(message: impl Into<String>) -> Self {
        Self::ExternalService {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

/// Failure modes of inserting a new user row.
#[derive(Debug, Error)]
pub enum CreateUserError {
    #[error("login already taken")]
    LoginTaken,

    #[error("email already taken")]
    EmailTaken,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for CreateUserError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let message = db_err.message();
                if message.contains("users.login") {
                    return CreateUserError::LoginTaken;
                }
                if message.contains("users.email") {
                    return CreateUserError::EmailTaken;
                }
            }
        }
        CreateUserError::Other(err.into())
    }
}
