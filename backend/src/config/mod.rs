//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, token signing secret, confirmation code
//! lifetime and the optional SMTP settings used for confirmation emails.

use anyhow::{Context, Result, bail};
use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// One year, in minutes.
const MAX_CONFIRMATION_CODE_TTL_MINUTES: i64 = 525_600;
/// One year, in seconds.
const MAX_JWT_EXPIRES_IN_SECONDS: u64 = 31_536_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub confirmation_code_ttl_minutes: i64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
    pub email: Option<EmailConfig>,
}

/// SMTP settings for the confirmation mailer.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
    /// Front-end origin that hosts the `confirm-email` page.
    pub base_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

        let jwt_expires_in_seconds = parse_in_range(
            "JWT_EXPIRES_IN_SECONDS",
            &env::var("JWT_EXPIRES_IN_SECONDS").unwrap_or_else(|_| "86400".to_string()),
            1..=MAX_JWT_EXPIRES_IN_SECONDS,
        )?;

        let confirmation_code_ttl_minutes = parse_in_range(
            "CONFIRMATION_CODE_TTL_MINUTES",
            &env::var("CONFIRMATION_CODE_TTL_MINUTES").unwrap_or_else(|_| "60".to_string()),
            1..=MAX_CONFIRMATION_CODE_TTL_MINUTES,
        )?;

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(value) => value
                .parse::<u32>()
                .context("BCRYPT_COST must be a valid number")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let email = EmailConfig::from_env()?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            confirmation_code_ttl_minutes,
            bcrypt_cost,
            server_port,
            email,
        })
    }

    /// Returns the email configuration, if SMTP delivery is set up.
    pub fn email_config(&self) -> Option<EmailConfig> {
        self.email.clone()
    }

    /// Lifetime of a freshly generated confirmation code.
    pub fn confirmation_code_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.confirmation_code_ttl_minutes)
    }
}

impl EmailConfig {
    /// Reads SMTP settings. Returns `None` unless host, username, password and
    /// sender address are all present.
    fn from_env() -> Result<Option<Self>> {
        let (Ok(smtp_host), Ok(smtp_username), Ok(smtp_password), Ok(from_email)) = (
            env::var("SMTP_HOST"),
            env::var("SMTP_USERNAME"),
            env::var("SMTP_PASSWORD"),
            env::var("FROM_EMAIL"),
        ) else {
            return Ok(None);
        };

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .context("SMTP_PORT must be a valid number")?;

        let from_name = env::var("FROM_NAME").unwrap_or_else(|_| "Sender".to_string());
        let base_url =
            env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Some(EmailConfig {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            from_email,
            from_name,
            base_url,
        }))
    }
}

/// Parses a numeric setting and rejects values outside `range`.
fn parse_in_range<T>(name: &str, raw: &str, range: RangeInclusive<T>) -> Result<T>
where
    T: FromStr + PartialOrd + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = raw
        .trim()
        .parse::<T>()
        .with_context(|| format!("{name} must be a valid number"))?;

    if !range.contains(&value) {
        bail!(
            "{name} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        );
    }

    Ok(value)
}
