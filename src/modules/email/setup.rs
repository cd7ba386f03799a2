use super::manager::SecureEmailManager;
use super::sender::{CodeSender, NotificationError, SmtpSender};
use crate::modules::utils::io::{is_valid_email, read_line};

/// Interactive one-time setup of the SMTP relay credentials.
///
/// Runs when the deployment is configured for real delivery but the keyring
/// holds no credentials yet. Secrets go straight into the system keyring,
/// never into the config file.
pub fn setup_email_credentials() -> Result<(), NotificationError> {
    println!("\n=== Mail Relay Setup ===");

    let host = loop {
        println!("Enter SMTP server address (e.g., smtp.gmail.com):");
        let input = read_line().map_err(|e| NotificationError::Credentials(e.to_string()))?;
        let input = input.trim();

        if input.is_empty() || !input.contains('.') || input.contains(' ') {
            println!("Invalid SMTP server format. Please enter a valid domain.");
            continue;
        }

        break input.to_string();
    };

    let port = loop {
        println!("Enter SMTP port (default: 587):");
        let input = read_line().map_err(|e| NotificationError::Credentials(e.to_string()))?;
        let input = input.trim();

        if input.is_empty() {
            break 587;
        }

        match input.parse::<u16>() {
            Ok(p) if p > 0 => break p,
            _ => {
                println!("Invalid port number. Please enter a number between 1 and 65535.");
                continue;
            }
        }
    };

    let username = loop {
        println!("Enter sender email address:");
        let input = read_line().map_err(|e| NotificationError::Credentials(e.to_string()))?;
        let input = input.trim();

        if !is_valid_email(input) {
            println!("Invalid email format. Please enter a valid email address.");
            continue;
        }

        break input.to_string();
    };

    let password = loop {
        println!("Enter email password or app-specific password:");
        let pass =
            rpassword::read_password().map_err(|e| NotificationError::Credentials(e.to_string()))?;

        if pass.trim().is_empty() {
            println!("Password cannot be empty. Please try again.");
            continue;
        }

        break pass;
    };

    SecureEmailManager::new()?.store_credentials(&username, &password, &host, port)?;

    println!("\nMail configuration saved to the system keyring.");
    Ok(())
}

/// Send a test code to the configured sender address to verify the relay.
pub fn test_email_configuration() -> Result<(), NotificationError> {
    let creds = SecureEmailManager::new()?.get_credentials()?;

    println!("Testing mail relay {}:{} ...", creds.host, creds.port);
    SmtpSender.send(&creds.username, "000000")?;
    println!("Test email sent successfully to: {}", creds.username);
    Ok(())
}
