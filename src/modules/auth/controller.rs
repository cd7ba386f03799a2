use super::error::AuthError;
use super::otp::OtpSource;
use super::password::{hash_password, verify_password};
use super::store::CredentialStore;
use crate::modules::email::sender::{CodeSender, Delivery};
use crate::modules::utils::logging::log_auth_event;

/// Outcome of a successful reset request. In demo mode the code comes back
/// through `surfaced` so the surface can display it; with a real sender it
/// stays `None` and only the recipient's inbox sees it.
#[derive(Debug)]
pub struct IssuedOtp {
    pub email: String,
    pub code: String,
    pub surfaced: Option<String>,
}

/// Orchestrates credential checks and the password-reset flow against the
/// external store and notification channel. Holds no session state; the
/// session machine passes in whatever pending data a step needs.
pub struct AuthController {
    store: Box<dyn CredentialStore>,
    sender: Box<dyn CodeSender>,
    otp: Box<dyn OtpSource>,
}

impl AuthController {
    pub fn new(
        store: Box<dyn CredentialStore>,
        sender: Box<dyn CodeSender>,
        otp: Box<dyn OtpSource>,
    ) -> Self {
        Self { store, sender, otp }
    }

    /// Verify `password` against the stored hash for `email`.
    ///
    /// The plaintext is never compared to anything stored; the stored salt
    /// re-derives a hash which is compared instead. The store is re-read on
    /// every attempt, so a hash rotated elsewhere takes effect immediately.
    pub fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let record = self
            .store
            .find_user(email)?
            .ok_or(AuthError::UserNotFound)?;

        if verify_password(password, &record.password_hash) {
            log_auth_event("login", email, true, None);
            Ok(())
        } else {
            log_auth_event("login", email, false, Some("hash mismatch"));
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Issue a one-time code for `email` and hand it to the sender.
    ///
    /// The forward transition only happens if delivery succeeds or the demo
    /// sender surfaces the code; a failed delivery aborts with the code
    /// never leaving this call.
    pub fn request_reset(&self, email: &str) -> Result<IssuedOtp, AuthError> {
        if self.store.find_user(email)?.is_none() {
            log_auth_event("reset_request", email, false, Some("unknown email"));
            return Err(AuthError::UserNotFound);
        }

        let code = self.otp.generate();
        let surfaced = match self.sender.send(email, &code)? {
            Delivery::Sent => None,
            Delivery::Surfaced(code) => Some(code),
        };

        log_auth_event("reset_request", email, true, None);
        Ok(IssuedOtp {
            email: email.to_string(),
            code,
            surfaced,
        })
    }

    /// Complete a reset: check the submitted code against the issued one,
    /// check the new/confirm pair, then write a freshly salted hash through
    /// the store.
    pub fn confirm_reset(
        &self,
        email: &str,
        issued_code: &str,
        submitted_code: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        if submitted_code != issued_code {
            log_auth_event("reset_confirm", email, false, Some("code mismatch"));
            return Err(AuthError::OtpMismatch);
        }

        if new_password != confirm_password {
            log_auth_event("reset_confirm", email, false, Some("password mismatch"));
            return Err(AuthError::PasswordMismatch);
        }

        let new_hash = hash_password(new_password);
        if !self.store.set_password_hash(email, &new_hash)? {
            // The row vanished between issue and confirm. The account is
            // managed out-of-band, so surface it as a store-level failure.
            log_auth_event("reset_confirm", email, false, Some("row disappeared"));
            return Err(AuthError::UserNotFound);
        }

        log_auth_event("reset_confirm", email, true, None);
        Ok(())
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// OTP source that replays a fixed sequence of codes.
    pub struct FixedOtp {
        codes: RefCell<Vec<String>>,
    }

    impl FixedOtp {
        pub fn new(codes: &[&str]) -> Self {
            Self {
                codes: RefCell::new(codes.iter().rev().map(|c| c.to_string()).collect()),
            }
        }
    }

    impl OtpSource for FixedOtp {
        fn generate(&self) -> String {
            self.codes.borrow_mut().pop().expect("ran out of codes")
        }
    }

    impl<S: OtpSource> OtpSource for Rc<S> {
        fn generate(&self) -> String {
            (**self).generate()
        }
    }
}
