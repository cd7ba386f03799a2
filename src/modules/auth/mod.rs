pub mod controller;
pub mod error;
pub mod otp;
pub mod password;
pub mod session;
pub mod store;

// Re-export the main types and functions
pub use controller::{AuthController, IssuedOtp};
pub use error::AuthError;
pub use otp::{OtpSource, RandomOtp};
pub use password::{hash_password, verify_password};
pub use session::{Event, Screen, Session, Transition};
pub use store::{CredentialStore, SheetStore, StoreError, UserRecord};
