//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse request data, validate registration input, call the
//! `auth::service` for core business logic and translate the outcome into an
//! HTTP response.

use crate::api::common::{
    auth_result_to_http, errors_response, service_error_to_http, validation_errors_to_field_errors,
};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::Validate;

/// Handle user registration request
#[axum::debug_handler]
pub async fn registration(
    Extension(auth_service): Extension<AuthService>,
    Json(payload): Json<RegistrationRequest>,
) -> Response {
    if let Err(errors) = payload.validate() {
        return errors_response(
            StatusCode::BAD_REQUEST,
            validation_errors_to_field_errors(&errors),
        );
    }

    match auth_service.register_user(payload).await {
        Ok(result) => auth_result_to_http(result, StatusCode::NO_CONTENT),
        Err(error) => service_error_to_http(error, "auth.registration"),
    }
}

/// Handle registration confirmation request
#[axum::debug_handler]
pub async fn registration_confirmation(
    Extension(auth_service): Extension<AuthService>,
    Json(payload): Json<ConfirmationRequest>,
) -> Response {
    match auth_service.confirm_registration(payload).await {
        Ok(result) => auth_result_to_http(result, StatusCode::NO_CONTENT),
        Err(error) => service_error_to_http(error, "auth.registrationConfirmation"),
    }
}

/// Handle confirmation email resending request
#[axum::debug_handler]
pub async fn registration_email_resending(
    Extension(auth_service): Extension<AuthService>,
    Json(payload): Json<EmailResendingRequest>,
) -> Response {
    match auth_service.resend_confirmation(payload).await {
        Ok(result) => auth_result_to_http(result, StatusCode::NO_CONTENT),
        Err(error) => service_error_to_http(error, "auth.registrationEmailResending"),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(auth_service): Extension<AuthService>,
    Json(payload): Json<LoginRequest>,
) -> Response {
    match auth_service.login(payload).await {
        Ok(result) => auth_result_to_http(result, StatusCode::OK),
        Err(error) => service_error_to_http(error, "auth.login"),
    }
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(
    Extension(auth_service): Extension<AuthService>,
    Extension(claims): Extension<Claims>,
) -> Response {
    match auth_service.current_user(claims.user_id()).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => (StatusCode::UNAUTHORIZED, Json(serde_json::json!({}))).into_response(),
        Err(error) => service_error_to_http(error, "auth.me"),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::common::ErrorsMessages;
    use crate::auth::models::{LoginSuccess, MeView};
    use crate::auth::routes::auth_router;
    use crate::auth::service::tests::{RecordingNotifier, harness, harness_with};
    use crate::auth::traits::TokenIssuer;
    use crate::utils::jwt::JwtUtils;
    use axum::{
        Extension, Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde::de::DeserializeOwned;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app(service: crate::auth::service::AuthService) -> Router {
        Router::new()
            .nest("/auth", auth_router())
            .layer(Extension(service))
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_registration_flow_over_http() {
        let h = harness();
        let app = app(h.service.clone());

        let response = app
            .clone()
            .oneshot(post(
                "/auth/registration",
                json!({"login": "alice", "password": "P@ss12", "email": "a@x.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(post(
                "/auth/registration",
                json!({"login": "alice", "password": "P@ss12", "email": "b@x.com"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorsMessages = body_json(response).await;
        assert_eq!(body.errors_messages[0].field, "login");

        let code = h.store.code_for("alice");
        let response = app
            .clone()
            .oneshot(post("/auth/registration-confirmation", json!({ "code": code })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(post("/auth/registration-confirmation", json!({ "code": code })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_registration_shape_validation() {
        let h = harness();
        let response = app(h.service.clone())
            .oneshot(post("/auth/registration", json!({ "login": "al" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorsMessages = body_json(response).await;
        let fields: Vec<&str> = body.errors_messages.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "login", "password"]);
        assert!(h.store.users.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_and_me() {
        let h = harness();
        let app = app(h.service.clone());
        app.clone()
            .oneshot(post(
                "/auth/registration",
                json!({"login": "alice", "password": "P@ss12", "email": "a@x.com"}),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(post(
                "/auth/login",
                json!({"loginOrEmail": "a@x.com", "password": "wrong"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorsMessages = body_json(response).await;
        assert_eq!(body.errors_messages[0].field, "password");

        let response = app
            .clone()
            .oneshot(post(
                "/auth/login",
                json!({"loginOrEmail": "alice", "password": "P@ss12"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let LoginSuccess { access_token } = body_json(response).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/auth/me")
                    .header(header::AUTHORIZATION, format!("Bearer {access_token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let me: MeView = body_json(response).await;
        assert_eq!(me.login, "alice");
        assert_eq!(me.email, "a@x.com");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/auth/me")
                    .header(header::AUTHORIZATION, "Bearer garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_for_missing_account() {
        let h = harness();
        let token = JwtUtils::new("test-secret", 3600).create("ghost").unwrap();

        let response = app(h.service.clone())
            .oneshot(
                Request::builder()
                    .uri("/auth/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = body_json(response).await;
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    async fn test_resend_delivery_failure_is_500() {
        let h = harness_with(RecordingNotifier {
            fail: true,
            ..Default::default()
        });
        let app = app(h.service.clone());
        app.clone()
            .oneshot(post(
                "/auth/registration",
                json!({"login": "alice", "password": "P@ss12", "email": "a@x.com"}),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(post(
                "/auth/registration-email-resending",
                json!({ "email": "a@x.com" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = body_json(response).await;
        assert_eq!(body, json!({ "message": "auth.registrationEmailResending" }));
    }
}
