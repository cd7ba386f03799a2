use std::time::Duration;

use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::transport::smtp::PoolConfig;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;

use super::manager::SecureEmailManager;
use crate::modules::utils::logging::log_external_call;
use crate::EXTERNAL_CALL_TIMEOUT_SECS;

const RESET_SUBJECT: &str = "CardioRisk Password Reset";

/// Delivery failures for the reset-code channel.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("mail credentials problem: {0}")]
    Credentials(String),
    #[error("invalid mail address: {0}")]
    Address(String),
    #[error("could not build message: {0}")]
    Message(String),
    #[error("smtp transport failed: {0}")]
    Transport(String),
}

/// How a code left the system.
#[derive(Debug, PartialEq)]
pub enum Delivery {
    /// Handed to the mail relay for real delivery.
    Sent,
    /// Demo mode: transport skipped, code handed back to the caller so the
    /// surface can display it directly.
    Surfaced(String),
}

/// The single capability both sender variants provide: deliver a short code
/// to a recipient. Which variant is active is a deployment-time choice made
/// once at construction, never per call.
pub trait CodeSender {
    fn send(&self, recipient: &str, code: &str) -> Result<Delivery, NotificationError>;
}

/// Real channel: authenticated SMTP session over required TLS. Fails closed
/// if authentication or transmission fails.
pub struct SmtpSender;

impl SmtpSender {
    fn reset_body(code: &str) -> String {
        format!(
            "Hello,\n\n\
            A password reset was requested for your CardioRisk account.\n\n\
            Your one-time reset code is:\n\n\
            {}\n\n\
            Enter this code on the reset screen together with your new password.\n\n\
            If you did not request this reset, please ignore this email.\n\n\
            CardioRisk",
            code
        )
    }
}

impl CodeSender for SmtpSender {
    fn send(&self, recipient: &str, code: &str) -> Result<Delivery, NotificationError> {
        let creds = SecureEmailManager::new()?.get_credentials()?;

        let email = Message::builder()
            .from(
                format!("CardioRisk <{}>", creds.username)
                    .parse()
                    .map_err(|e| NotificationError::Address(format!("from address: {}", e)))?,
            )
            .to(recipient
                .parse()
                .map_err(|e| NotificationError::Address(format!("to address: {}", e)))?)
            .subject(RESET_SUBJECT)
            .header(lettre::message::header::ContentType::TEXT_PLAIN)
            .body(Self::reset_body(code))
            .map_err(|e| NotificationError::Message(e.to_string()))?;

        let tls_parameters = TlsParameters::builder(creds.host.clone())
            .build()
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let mailer = SmtpTransport::relay(&creds.host)
            .map_err(|e| NotificationError::Transport(e.to_string()))?
            .credentials(Credentials::new(creds.username, creds.password))
            .port(creds.port)
            .tls(Tls::Required(tls_parameters))
            .pool_config(PoolConfig::new().max_size(1))
            .timeout(Some(Duration::from_secs(EXTERNAL_CALL_TIMEOUT_SECS)))
            .build();

        match mailer.send(&email) {
            Ok(_) => {
                log_external_call("mail-relay", "send_reset_code", true, None);
                Ok(Delivery::Sent)
            }
            Err(e) => {
                log_external_call("mail-relay", "send_reset_code", false, Some(&e.to_string()));
                Err(NotificationError::Transport(e.to_string()))
            }
        }
    }
}

/// Demo channel for local runs without a mail transport: always succeeds
/// and surfaces the code through the response path instead of sending it.
pub struct DemoSender;

impl CodeSender for DemoSender {
    fn send(&self, _recipient: &str, code: &str) -> Result<Delivery, NotificationError> {
        Ok(Delivery::Surfaced(code.to_string()))
    }
}
