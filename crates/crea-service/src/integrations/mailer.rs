//! Outgoing mail
//!
//! `SmtpMailer` relays through the configured SMTP host using `lettre`,
//! authenticating with XOAUTH2 when an OAuth access token is configured and
//! with a password otherwise. Without an SMTP host, `LogMailer` writes each
//! message to the log instead.

use async_trait::async_trait;
use crea_common::MailConfig;
use crea_core::{DomainError, Mailer, OutgoingEmail};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, instrument};

const IMPLICIT_TLS_PORT: u16 = 465;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// # Errors
    /// Fails when no host is configured or the sender address is malformed
    pub fn new(config: &MailConfig) -> Result<Self, DomainError> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or_else(|| DomainError::InternalError("SMTP_HOST is not set".to_string()))?;

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| DomainError::InternalError(format!("invalid SMTP_FROM: {e}")))?;

        let builder = if config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| DomainError::InternalError(format!("smtp relay: {e}")))?
        .port(config.smtp_port);

        let username = config
            .username
            .clone()
            .unwrap_or_else(|| from.email.to_string());

        let builder = match (&config.oauth_access_token, &config.password) {
            (Some(token), _) => builder
                .credentials(Credentials::new(username, token.clone()))
                .authentication(vec![Mechanism::Xoauth2]),
            (None, Some(password)) => builder.credentials(Credentials::new(username, password.clone())),
            (None, None) => builder,
        };

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, email), fields(subject = %email.subject))]
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DomainError> {
        let to: Mailbox = email.to.parse().map_err(|_| DomainError::InvalidEmail)?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| DomainError::InternalError(format!("mail build: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DomainError::ExternalServiceError(format!("smtp: {e}")))?;

        info!("Email sent");
        Ok(())
    }
}

/// Mailer used when no SMTP relay is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DomainError> {
        info!(to = %email.to, subject = %email.subject, body = %email.body, "Email (not sent, SMTP disabled)");
        Ok(())
    }
}

// ============================================================================
// Templates
// ============================================================================

pub fn otp_email(to: &str, code: &str, purpose: crea_cache::OtpPurpose, ttl_seconds: u64) -> OutgoingEmail {
    let action = match purpose {
        crea_cache::OtpPurpose::Signup => "complete your CREA registration",
        crea_cache::OtpPurpose::PasswordReset => "reset your CREA password",
    };
    OutgoingEmail {
        to: to.to_string(),
        subject: format!("Your CREA verification code: {code}"),
        body: format!(
            "Use the code {code} to {action}.\n\nThe code expires in {} minutes. \
             If you did not request it, you can ignore this email.\n",
            ttl_seconds.div_ceil(60)
        ),
    }
}

pub fn welcome_email(to: &str, name: &str, membership_number: &str, portal_url: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: "Welcome to CREA".to_string(),
        body: format!(
            "Dear {name},\n\nYour membership is now active. Your membership number is \
             {membership_number}.\n\nYou can view your membership at {portal_url}/membership.\n\n\
             Central Railway Engineers Association\n"
        ),
    }
}

pub fn donation_receipt_email(to: &str, name: &str, amount_paise: i64, payment_id: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: "Thank you for your donation to CREA".to_string(),
        body: format!(
            "Dear {name},\n\nWe have received your donation of Rs {}.{:02} \
             (payment reference {payment_id}). Thank you for supporting the association.\n\n\
             Central Railway Engineers Association\n",
            amount_paise / 100,
            amount_paise % 100
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_email_mentions_code_and_expiry() {
        let email = otp_email("a@b.in", "042917", crea_cache::OtpPurpose::Signup, 600);
        assert!(email.subject.contains("042917"));
        assert!(email.body.contains("10 minutes"));
        assert!(email.body.contains("registration"));
    }

    #[test]
    fn test_donation_receipt_formats_rupees() {
        let email = donation_receipt_email("a@b.in", "Asha", 250_050, "pay_1");
        assert!(email.body.contains("Rs 2500.50"));
    }

    #[test]
    fn test_smtp_mailer_requires_host() {
        let config = MailConfig {
            smtp_host: None,
            smtp_port: 587,
            username: None,
            password: None,
            from: "CREA <noreply@crea.example>".into(),
            oauth_access_token: None,
        };
        assert!(SmtpMailer::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_log_mailer_accepts_everything() {
        let email = welcome_email("a@b.in", "Asha", "CREA-2026-00001", "https://crea.example");
        assert!(LogMailer.send(&email).await.is_ok());
    }
}
