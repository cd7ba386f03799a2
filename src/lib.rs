// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{auth, config, email, risk, ui, utils};

// Re-export commonly used types
pub use modules::auth::controller::AuthController;
pub use modules::auth::session::{Event, Screen, Session, Transition};
pub use modules::auth::store::{CredentialStore, UserRecord};
pub use modules::config::AppConfig;
pub use modules::risk::input::PatientInput;

// Constants
pub const CONFIG_FILE: &str = "cardiorisk.json";
pub const OTP_LENGTH: usize = 6;
pub const PBKDF2_ITERATIONS: u32 = 100_000;
pub const SALT_LENGTH: usize = 16;
pub const EXTERNAL_CALL_TIMEOUT_SECS: u64 = 10;

// Type aliases
pub type HmacSha256 = hmac::Hmac<sha2::Sha256>;
