use thiserror::Error;

use super::store::StoreError;
use crate::modules::email::sender::NotificationError;

/// Authentication failure taxonomy. Every variant is recoverable: the
/// surface shows the message on the current screen and the user may retry
/// or cancel.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No account matches that email address.")]
    UserNotFound,
    #[error("Email or password is incorrect.")]
    InvalidCredentials,
    #[error("The code you entered does not match. Please try again.")]
    OtpMismatch,
    #[error("The new passwords do not match.")]
    PasswordMismatch,
    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),
    #[error("Could not deliver the reset code: {0}")]
    Notification(#[from] NotificationError),
}

impl AuthError {
    /// True for failures of an external collaborator rather than of the
    /// user's input.
    pub fn is_external(&self) -> bool {
        matches!(self, AuthError::Store(_) | AuthError::Notification(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_classification() {
        assert!(AuthError::Store(StoreError::Unavailable("down".into())).is_external());
        assert!(!AuthError::InvalidCredentials.is_external());
        assert!(!AuthError::OtpMismatch.is_external());
    }

    #[test]
    fn test_messages_do_not_leak_internals() {
        // Credential errors must read the same to the user regardless of
        // which check failed internally.
        let msg = AuthError::InvalidCredentials.to_string();
        assert!(!msg.to_lowercase().contains("hash"));
        assert!(!msg.to_lowercase().contains("store"));
    }
}
