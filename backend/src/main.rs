//! Main entry point for the identity backend.
//!
//! This file initializes logging, loads configuration, opens the database,
//! wires the auth service to its collaborators and serves the HTTP routes.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use anyhow::{Context, Result};
use auth::service::AuthService;
use auth::traits::ConfirmationNotifier;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use repositories::user_repository::UserRepository;
use services::email_service::{DisabledEmailService, EmailService};
use services::notification_dispatcher::NotificationDispatcher;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utils::jwt::JwtUtils;
use utils::password::BcryptHasher;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    db.migrate().await?;

    let auth_service = build_auth_service(&config, &db);

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/auth", auth::routes::auth_router())
        .layer(Extension(auth_service));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;

    info!("Starting identity server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

fn build_auth_service(config: &Config, db: &Database) -> AuthService {
    let notifier: Arc<dyn ConfirmationNotifier> = match config.email_config() {
        Some(email_config) => match EmailService::new(email_config) {
            Ok(service) => {
                info!("Email service initialized successfully");
                Arc::new(service)
            }
            Err(e) => {
                warn!(
                    "Failed to initialize email service: {}. Confirmation emails will not be delivered.",
                    e
                );
                Arc::new(DisabledEmailService)
            }
        },
        None => {
            warn!("Email configuration not found. Confirmation emails will not be delivered.");
            Arc::new(DisabledEmailService)
        }
    };

    AuthService::new(
        Arc::new(UserRepository::new(db.pool().clone())),
        Arc::new(BcryptHasher::new(config.bcrypt_cost)),
        Arc::new(JwtUtils::new(
            &config.jwt_secret,
            config.jwt_expires_in_seconds,
        )),
        NotificationDispatcher::new(notifier),
        config,
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "Identity Backend",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
