//! Response helpers shared by the HTTP handlers.
//!
//! Converts service-layer outcomes into HTTP responses:
//! - `AuthResult` business failures become 400/401 with an `errorsMessages` body
//! - `ServiceError` faults are logged and become an opaque 500
//! - `validator` errors become field-tagged 400 responses
//!
//! # Response Format
//! Business and validation failures return:
//! ```json
//! { "errorsMessages": [ { "message": "Login is not unique", "field": "login" } ] }
//! ```

use crate::auth::result::{AuthResult, FieldError, ResultStatus};
use crate::errors::ServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Body returned for 400 and 401 responses
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorsMessages {
    pub errors_messages: Vec<FieldError>,
}

/// Body returned for 500 responses
#[derive(Debug, Serialize, Deserialize)]
pub struct FaultMessage {
    pub message: String,
}

/// Builds a field-tagged error response.
pub fn errors_response(status: StatusCode, errors: Vec<FieldError>) -> Response {
    (
        status,
        Json(ErrorsMessages {
            errors_messages: errors,
        }),
    )
        .into_response()
}

/// Translates an `AuthResult` into a response.
///
/// On success the payload is serialized with `success_status`, unless that
/// status is `204 No Content`, in which case the body is empty.
pub fn auth_result_to_http<T: Serialize>(result: AuthResult<T>, success_status: StatusCode) -> Response {
    match result.status {
        ResultStatus::Success => match result.data {
            Some(data) if success_status != StatusCode::NO_CONTENT => {
                (success_status, Json(data)).into_response()
            }
            _ => success_status.into_response(),
        },
        ResultStatus::BadRequest => errors_response(StatusCode::BAD_REQUEST, result.extensions),
        ResultStatus::Unauthorized => errors_response(StatusCode::UNAUTHORIZED, result.extensions),
    }
}

/// Converts a ServiceError into an opaque 500 naming only the operation.
pub fn service_error_to_http(error: ServiceError, operation: &str) -> Response {
    match &error {
        ServiceError::Database { source } => {
            tracing::error!("{}: database error: {:#}", operation, source)
        }
        other => tracing::error!("{}: {}", operation, other),
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FaultMessage {
            message: operation.to_string(),
        }),
    )
        .into_response()
}

/// Formats validator::ValidationErrors into field-specific error details
pub fn validation_errors_to_field_errors(errors: &validator::ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                FieldError::new(
                    field.to_string(),
                    error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                )
            })
        })
        .collect();
    // HashMap iteration order is unstable.
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}
