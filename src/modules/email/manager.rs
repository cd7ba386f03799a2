use keyring::Entry;
use serde::{Deserialize, Serialize};

use super::sender::NotificationError;
use crate::modules::utils::time::current_timestamp;

const KEYRING_SERVICE: &str = "cardiorisk-email";
const KEYRING_USER: &str = "smtp-credentials";

/// SMTP relay credentials. Deployment configuration, never user input; the
/// config file only says *whether* to use SMTP, the secrets live here.
#[derive(Serialize, Deserialize)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub last_updated: u64,
}

/// Keeps SMTP credentials in the system keyring rather than on disk.
pub struct SecureEmailManager {
    keyring: Entry,
}

impl SecureEmailManager {
    pub fn new() -> Result<Self, NotificationError> {
        let keyring = Entry::new(KEYRING_SERVICE, KEYRING_USER)
            .map_err(|e| NotificationError::Credentials(e.to_string()))?;
        Ok(Self { keyring })
    }

    /// Store new SMTP credentials in the system keyring.
    pub fn store_credentials(
        &self,
        username: &str,
        password: &str,
        host: &str,
        port: u16,
    ) -> Result<(), NotificationError> {
        let credentials = SmtpCredentials {
            username: username.to_string(),
            password: password.to_string(),
            host: host.to_string(),
            port,
            last_updated: current_timestamp(),
        };

        let creds_json = serde_json::to_string(&credentials)
            .map_err(|e| NotificationError::Credentials(e.to_string()))?;

        self.keyring
            .set_password(&creds_json)
            .map_err(|e| NotificationError::Credentials(e.to_string()))
    }

    /// Retrieve stored SMTP credentials. Fails when none have been set up.
    pub fn get_credentials(&self) -> Result<SmtpCredentials, NotificationError> {
        let creds_json = self
            .keyring
            .get_password()
            .map_err(|e| NotificationError::Credentials(e.to_string()))?;

        serde_json::from_str(&creds_json)
            .map_err(|e| NotificationError::Credentials(e.to_string()))
    }

    pub fn delete_credentials(&self) -> Result<(), NotificationError> {
        self.keyring
            .delete_password()
            .map_err(|e| NotificationError::Credentials(e.to_string()))
    }

    pub fn is_configured(&self) -> bool {
        self.get_credentials().is_ok()
    }
}
