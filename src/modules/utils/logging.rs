use env_logger::{Builder, WriteStyle};
use log::{error, info, warn, LevelFilter};
use std::fs::OpenOptions;

/// Initialize the logging system, writing to the application log file.
pub fn initialize_logging() -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("application.log")?;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp_secs()
        .format_module_path(true)
        .write_style(WriteStyle::Auto)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    info!("Logging system initialized");
    Ok(())
}

/// Mask an identifier before it reaches the log. Emails and codes never
/// appear whole. Counts and slices in chars, so non-ASCII input masks
/// cleanly instead of splitting a code point.
fn format_sensitive(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count <= 4 {
        return "*".repeat(char_count);
    }
    let head: String = text.chars().take(2).collect();
    let tail: String = text.chars().skip(char_count - 2).collect();
    format!("{}***{}", head, tail)
}

/// Structured logging for authentication events (login, reset request,
/// reset confirm).
pub fn log_auth_event(event_type: &str, email: &str, success: bool, details: Option<&str>) {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if success {
        info!(
            "Auth event: type={}, user={}, success=true, timestamp={}, details={:?}",
            event_type,
            format_sensitive(email),
            timestamp,
            details
        );
    } else {
        warn!(
            "Auth event: type={}, user={}, success=false, timestamp={}, details={:?}",
            event_type,
            format_sensitive(email),
            timestamp,
            details
        );
    }
}

/// Structured logging for round-trips to external collaborators (credential
/// store, mail relay, scoring service).
pub fn log_external_call(service: &str, operation: &str, success: bool, details: Option<&str>) {
    if success {
        info!(
            "External call: service={}, op={}, success=true, details={:?}",
            service, operation, details
        );
    } else {
        error!(
            "External call: service={}, op={}, success=false, details={:?}",
            service, operation, details
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_data_formatting() {
        assert_eq!(format_sensitive("a@x.com"), "a@***om");
        assert_eq!(format_sensitive("key"), "***");
        assert_eq!(format_sensitive("longpassword"), "lo***rd");
        assert_eq!(format_sensitive(""), "");
    }

    #[test]
    fn test_email_is_never_logged_whole() {
        assert_ne!(format_sensitive("patient@clinic.example"), "patient@clinic.example");
    }

    #[test]
    fn test_non_ascii_email_masks_without_panicking() {
        // Emails are opaque strings here; masking must stay on char
        // boundaries for multibyte input.
        assert_eq!(format_sensitive("日本@x.com"), "日本***om");
        assert_eq!(format_sensitive("日本"), "**");
        assert_eq!(format_sensitive("ärzt@praxis.de"), "är***de");
        log_auth_event("login", "日本@x.com", false, None);
    }
}
