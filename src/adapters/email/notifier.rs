//! HTTP email implementation of the Notifier port.
//!
//! Sends transactional email through an HTTP email API. The API key is
//! held as `secrecy::SecretString`.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Notification, Notifier};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// Configuration for the email notifier.
pub struct EmailConfig {
    api_key: SecretString,
    api_base_url: String,
    /// Sender address, e.g. `MentorHub <no-reply@mentorhub.app>`.
    from_address: String,
}

impl EmailConfig {
    pub fn new(api_key: impl Into<String>, from_address: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: "https://api.resend.com".to_string(),
            from_address: from_address.into(),
        }
    }

    /// Overrides the API base URL (for tests against a local stub).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: String,
}

/// HTTP email implementation of the Notifier port.
pub struct HttpEmailNotifier {
    config: EmailConfig,
    http_client: reqwest::Client,
}

impl HttpEmailNotifier {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn render(notification: &Notification) -> (&'static str, String) {
        match notification {
            Notification::VerificationApproved { name, .. } => (
                "Verification approved",
                wrap_body(
                    name,
                    "Your mentor verification has been approved.".to_string(),
                ),
            ),
            Notification::VerificationDeclined { name, reason, .. } => (
                "Verification declined",
                wrap_body(
                    name,
                    format!(
                        "Your mentor verification has been declined. Reason: {}",
                        reason
                    ),
                ),
            ),
        }
    }
}

fn wrap_body(name: &str, message: String) -> String {
    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; background-color: #f9f9f9; padding: 20px;">
  <div style="max-width: 600px; margin: 0 auto; background: #ffffff; padding: 30px; border-radius: 8px;">
    <h2 style="color: #333;">Hello, {}</h2>
    <p style="font-size: 16px; color: #555;">{}</p>
  </div>
</body>
</html>"#,
        name, message
    )
}

#[async_trait]
impl Notifier for HttpEmailNotifier {
    async fn send(&self, notification: Notification) -> Result<(), DomainError> {
        let (subject, html) = Self::render(&notification);
        let request = SendEmailRequest {
            from: &self.config.from_address,
            to: notification.recipient(),
            subject,
            html,
        };

        let response = self
            .http_client
            .post(format!("{}/emails", self.config.api_base_url))
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::NotificationError,
                    format!("Email request failed: {}", e),
                )
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                format!("Email API error: {}", error_text),
            ));
        }

        Ok(())
    }
}
