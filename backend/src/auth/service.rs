//! Core business logic for the authentication system.
//!
//! Registration, email confirmation, confirmation resending and login. Every
//! business-rule rejection comes back as an [`AuthResult`]; only collaborator
//! faults travel through the `Err` side of [`ServiceResult`].

use crate::auth::models::*;
use crate::auth::result::AuthResult;
use crate::auth::traits::{AccountStore, PasswordHasher, TokenIssuer};
use crate::config::Config;
use crate::database::models::{EmailConfirmation, User};
use crate::errors::{CreateUserError, ServiceResult};
use crate::services::notification_dispatcher::NotificationDispatcher;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::confirmation_code::generate_confirmation_code;
use crate::utils::jwt::Claims;
use chrono::Duration;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

const LOGIN_NOT_UNIQUE: &str = "Login is not unique";
const EMAIL_NOT_UNIQUE: &str = "Email is not unique";
const ALREADY_CONFIRMED: &str = "The account has already been confirmed";
const CODE_INCORRECT: &str = "Confirmation code is incorrect";

/// Authentication service for registration, confirmation and login.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn TokenIssuer>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
    confirmation_code_ttl: Duration,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<dyn PasswordHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
        dispatcher: NotificationDispatcher,
        config: &Config,
    ) -> Self {
        AuthService {
            store,
            hasher,
            token_issuer,
            dispatcher,
            clock: Arc::new(SystemClock),
            confirmation_code_ttl: config.confirmation_code_ttl(),
        }
    }

    /// Registers a new, unconfirmed account and emails its confirmation code.
    ///
    /// Succeeds once the account is persisted. The email is sent on a detached
    /// task whose failure is only logged.
    pub async fn register_user(&self, request: RegistrationRequest) -> ServiceResult<AuthResult<()>> {
        if request.login.is_empty() || request.password.is_empty() || request.email.is_empty() {
            return Ok(AuthResult::bad_request(
                "login,password,email",
                "All fields are required",
            ));
        }

        if self
            .store
            .find_by_login_or_email(&request.login)
            .await?
            .is_some()
        {
            return Ok(AuthResult::bad_request("login", LOGIN_NOT_UNIQUE));
        }

        if self
            .store
            .find_by_login_or_email(&request.email)
            .await?
            .is_some()
        {
            return Ok(AuthResult::bad_request("email", EMAIL_NOT_UNIQUE));
        }

        let password_hash = self.hasher.hash(&request.password).await?;
        let now = self.clock.now();
        let (code, expires_at) = generate_confirmation_code(now, self.confirmation_code_ttl)?;

        let user = User {
            id: Uuid::now_v7().to_string(),
            login: request.login,
            email: request.email,
            password_hash,
            created_at: now,
            email_confirmation: EmailConfirmation::pending(code, expires_at),
        };

        // The unique index is authoritative when two registrations race.
        match self.store.create(&user).await {
            Ok(()) => {}
            Err(CreateUserError::LoginTaken) => {
                return Ok(AuthResult::bad_request("login", LOGIN_NOT_UNIQUE));
            }
            Err(CreateUserError::EmailTaken) => {
                return Ok(AuthResult::bad_request("email", EMAIL_NOT_UNIQUE));
            }
            Err(CreateUserError::Other(e)) => return Err(e.into()),
        }

        info!("Registered user {} ({})", user.id, user.login);

        self.dispatcher
            .dispatch_detached(user.email, user.email_confirmation.confirmation_code);

        Ok(AuthResult::ok())
    }

    /// Marks the account owning `code` as confirmed.
    pub async fn confirm_registration(
        &self,
        request: ConfirmationRequest,
    ) -> ServiceResult<AuthResult<()>> {
        let Some(user) = self.store.find_by_confirmation_code(&request.code).await? else {
            return Ok(AuthResult::bad_request("code", CODE_INCORRECT));
        };

        if user.email_confirmation.is_confirmed {
            return Ok(AuthResult::bad_request("code", ALREADY_CONFIRMED));
        }

        if user.email_confirmation.is_expired_at(self.clock.now()) {
            return Ok(AuthResult::bad_request(
                "code",
                "The confirmation code has expired",
            ));
        }

        // The code may have been replaced or used since the lookup.
        if !self.store.confirm_email(&user.id, &request.code).await? {
            warn!("Confirmation code for user {} changed before it was applied", user.id);
            return Ok(AuthResult::bad_request("code", CODE_INCORRECT));
        }
        info!("Confirmed email for user {}", user.id);

        Ok(AuthResult::ok())
    }

    /// Issues a new confirmation code for an unconfirmed account and emails it.
    ///
    /// The previous code stops working. Delivery is awaited; a delivery
    /// failure is returned as an error even though the new code is already
    /// persisted.
    pub async fn resend_confirmation(
        &self,
        request: EmailResendingRequest,
    ) -> ServiceResult<AuthResult<()>> {
        let Some(user) = self.store.find_by_email(&request.email).await? else {
            return Ok(AuthResult::bad_request(
                "email",
                "User with this email does not exist",
            ));
        };

        if user.email_confirmation.is_confirmed {
            return Ok(AuthResult::bad_request("email", ALREADY_CONFIRMED));
        }

        let (code, expires_at) =
            generate_confirmation_code(self.clock.now(), self.confirmation_code_ttl)?;

        if !self
            .store
            .update_registration_confirmation(&user.id, &code, expires_at)
            .await?
        {
            warn!("Confirmation code refresh touched no rows for user {}", user.id);
        }

        self.dispatcher.send(&user.email, &code).await?;

        Ok(AuthResult::ok())
    }

    /// Authenticates and issues an access token.
    ///
    /// Confirmation status is not checked.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResult<LoginSuccess>> {
        let auth = self.authenticate(&request).await?;

        match auth.data {
            Some(ref user_id) if auth.is_success() => {
                let access_token = self.token_issuer.create(user_id)?;
                Ok(AuthResult::success(LoginSuccess { access_token }))
            }
            _ => Ok(auth.into_failure()),
        }
    }

    /// Checks credentials; on success the payload is the user id.
    pub async fn authenticate(&self, request: &LoginRequest) -> ServiceResult<AuthResult<String>> {
        let Some(user) = self
            .store
            .find_by_login_or_email(&request.login_or_email)
            .await?
        else {
            return Ok(AuthResult::unauthorized(
                "login or email",
                "Login or email is incorrect",
            ));
        };

        if !self
            .hasher
            .verify(&request.password, &user.password_hash)
            .await?
        {
            return Ok(AuthResult::unauthorized("password", "Password is wrong"));
        }

        Ok(AuthResult::success(user.id))
    }

    /// Looks up the profile for an authenticated user id.
    pub async fn current_user(&self, user_id: &str) -> ServiceResult<Option<MeView>> {
        let user = self.store.find_by_id(user_id).await?;

        Ok(user.map(|user| MeView {
            email: user.email,
            login: user.login,
            user_id: user.id,
        }))
    }

    /// Validates a bearer token presented on a later request.
    pub fn verify_access_token(&self, token: &str) -> Option<Claims> {
        self.token_issuer.verify(token)
    }
}
