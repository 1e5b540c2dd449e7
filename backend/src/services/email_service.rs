use crate::auth::traits::ConfirmationNotifier;
use crate::config::EmailConfig;
use crate::errors::{ServiceError, ServiceResult};
use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::str::FromStr;

pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new EmailService instance
    pub fn new(config: EmailConfig) -> ServiceResult<Self> {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| ServiceError::validation(format!("Invalid SMTP host: {e}")))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self { mailer, config })
    }

    /// Sends the registration confirmation email
    pub async fn send_registration_email(
        &self,
        recipient_email: &str,
        code: &str,
    ) -> ServiceResult<()> {
        let confirm_url = confirmation_url(&self.config.base_url, code);

        self.send_email(
            recipient_email,
            "Your code is here",
            &build_registration_html(&confirm_url),
            &build_registration_text(&confirm_url),
        )
        .await
    }

    /// Sends a generic email
    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> ServiceResult<()> {
        let from_mailbox = Mailbox::from_str(&format!(
            "{} <{}>",
            self.config.from_name, self.config.from_email
        ))
        .map_err(|e| ServiceError::validation(format!("Invalid from email: {e}")))?;

        let to_mailbox = Mailbox::from_str(to_email)
            .map_err(|e| ServiceError::validation(format!("Invalid recipient email: {e}")))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                lettre::message::MultiPart::alternative()
                    .singlepart(
                        lettre::message::SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_content.to_string()),
                    )
                    .singlepart(
                        lettre::message::SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_content.to_string()),
                    ),
            )
            .map_err(|e| ServiceError::validation(format!("Failed to build email: {e}")))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| ServiceError::external_service(format!("Failed to send email: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl ConfirmationNotifier for EmailService {
    async fn send_confirmation(&self, email: &str, code: &str) -> ServiceResult<()> {
        self.send_registration_email(email, code).await
    }
}

/// Stand-in used when SMTP is not configured. Every send fails.
pub struct DisabledEmailService;

#[async_trait]
impl ConfirmationNotifier for DisabledEmailService {
    async fn send_confirmation(&self, email: &str, _code: &str) -> ServiceResult<()> {
        tracing::warn!("Email service not configured. Confirmation email not sent to {}", email);
        Err(ServiceError::external_service("Email service not configured"))
    }
}

fn confirmation_url(base_url: &str, code: &str) -> String {
    format!("{}/confirm-email?code={}", base_url.trim_end_matches('/'), code)
}

fn build_registration_html(confirm_url: &str) -> String {
    format!(
        r#"
        <h1>Thanks for your registration</h1>
        <p>To finish registration please follow the link below:
            <a href='{}'>complete registration</a>
        </p>
        "#,
        confirm_url
    )
}

fn build_registration_text(confirm_url: &str) -> String {
    format!(
        r#"Thanks for your registration

To finish registration please follow the link below:
{}
"#,
        confirm_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_url() {
        assert_eq!(
            confirmation_url("https://somesite.com/", "abc"),
            "https://somesite.com/confirm-email?code=abc"
        );
    }

    #[test]
    fn test_templates_embed_link() {
        let url = confirmation_url("https://somesite.com", "abc");
        assert!(build_registration_html(&url).contains("href='https://somesite.com/confirm-email?code=abc'"));
        assert!(build_registration_text(&url).contains(&url));
    }

    #[tokio::test]
    async fn test_disabled_service_reports_failure() {
        let result = DisabledEmailService.send_confirmation("a@x.com", "abc").await;
        assert!(matches!(result, Err(ServiceError::ExternalService { .. })));
    }
}
