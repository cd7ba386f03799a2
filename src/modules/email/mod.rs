pub mod manager;
pub mod sender;
mod setup;

pub use manager::{SecureEmailManager, SmtpCredentials};
pub use sender::{CodeSender, Delivery, DemoSender, NotificationError, SmtpSender};
pub use setup::{setup_email_credentials, test_email_configuration};
