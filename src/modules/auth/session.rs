use super::controller::AuthController;
use super::error::AuthError;

/// The screen the session is currently on.
///
/// Pending reset data lives only inside `ResetVerify` and the authenticated
/// identity only inside `Dashboard`, so the invariants "OTP present exactly
/// on the verify screen" and "user present exactly on the dashboard" hold
/// by construction rather than by discipline.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login,
    ResetRequest,
    ResetVerify { email: String, otp: String },
    Dashboard { user: String },
}

/// A user-triggered event, one per button on the interactive surface.
#[derive(Debug)]
pub enum Event {
    SubmitLogin {
        email: String,
        password: String,
    },
    BeginReset,
    SubmitResetRequest {
        email: String,
    },
    SubmitResetConfirmation {
        submitted_otp: String,
        new_password: String,
        confirm_password: String,
    },
    CancelReset,
    Logout,
}

/// What a transition produced, for the surface to render.
#[derive(Debug)]
pub enum Transition {
    /// The screen changed.
    Moved,
    /// The screen changed and the demo sender surfaced the reset code.
    MovedWithCode(String),
    /// The screen did not change; show the error and let the user retry.
    Rejected(AuthError),
    /// The event is not valid on the current screen; nothing happened.
    Ignored,
}

/// One interacting user's transient state. Owned by the interaction context
/// that created it and threaded by value through every transition; there is
/// no process-wide session singleton.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    screen: Screen,
}

impl Session {
    /// Every session starts on the login screen.
    pub fn new() -> Self {
        Self {
            screen: Screen::Login,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Apply one event, producing the next session state.
    ///
    /// Errors never advance the screen: the OTP survives failed verify
    /// attempts (unlimited retries, no lockout in this design) and is
    /// discarded only on success or cancel.
    pub fn apply(self, auth: &AuthController, event: Event) -> (Self, Transition) {
        match (self.screen, event) {
            (Screen::Login, Event::SubmitLogin { email, password }) => {
                match auth.login(&email, &password) {
                    Ok(()) => (
                        Self {
                            screen: Screen::Dashboard { user: email },
                        },
                        Transition::Moved,
                    ),
                    Err(e) => (
                        Self {
                            screen: Screen::Login,
                        },
                        Transition::Rejected(e),
                    ),
                }
            }

            (Screen::Login, Event::BeginReset) => (
                Self {
                    screen: Screen::ResetRequest,
                },
                Transition::Moved,
            ),

            (Screen::ResetRequest, Event::SubmitResetRequest { email }) => {
                match auth.request_reset(&email) {
                    Ok(issued) => {
                        let next = Self {
                            screen: Screen::ResetVerify {
                                email: issued.email,
                                otp: issued.code,
                            },
                        };
                        match issued.surfaced {
                            Some(code) => (next, Transition::MovedWithCode(code)),
                            None => (next, Transition::Moved),
                        }
                    }
                    Err(e) => (
                        Self {
                            screen: Screen::ResetRequest,
                        },
                        Transition::Rejected(e),
                    ),
                }
            }

            (Screen::ResetRequest, Event::CancelReset) => (
                Self {
                    screen: Screen::Login,
                },
                Transition::Moved,
            ),

            (
                Screen::ResetVerify { email, otp },
                Event::SubmitResetConfirmation {
                    submitted_otp,
                    new_password,
                    confirm_password,
                },
            ) => match auth.confirm_reset(
                &email,
                &otp,
                &submitted_otp,
                &new_password,
                &confirm_password,
            ) {
                Ok(()) => (
                    // Terminating transition: the code is single-use and
                    // dropped here along with the pending email.
                    Self {
                        screen: Screen::Login,
                    },
                    Transition::Moved,
                ),
                Err(e) => (
                    // The pending code stays valid for another attempt.
                    Self {
                        screen: Screen::ResetVerify { email, otp },
                    },
                    Transition::Rejected(e),
                ),
            },

            (Screen::ResetVerify { .. }, Event::CancelReset) => (
                Self {
                    screen: Screen::Login,
                },
                Transition::Moved,
            ),

            (Screen::Dashboard { .. }, Event::Logout) => (
                Self {
                    screen: Screen::Login,
                },
                Transition::Moved,
            ),

            (screen, event) => {
                log::warn!("event {:?} ignored on screen {:?}", event, screen);
                (Self { screen }, Transition::Ignored)
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
