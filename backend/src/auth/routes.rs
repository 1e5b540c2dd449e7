//! Defines the HTTP routes for registration and authentication.
//!
//! The router expects an `Extension<AuthService>` layer to be applied by the
//! caller.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/registration", post(registration))
        .route("/registration-confirmation", post(registration_confirmation))
        .route(
            "/registration-email-resending",
            post(registration_email_resending),
        )
        .route("/me", get(me).layer(middleware::from_fn(jwt_auth)))
}
