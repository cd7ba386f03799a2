use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which reset-code channel the deployment uses. A construction-time choice;
/// nothing switches channels per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderMode {
    /// Real delivery through the configured mail relay.
    Smtp,
    /// Local testing: the code is surfaced on screen instead of sent.
    Demo,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Deployment configuration. SMTP secrets are deliberately absent; they
/// live in the system keyring (see `email::SecureEmailManager`).
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the tabular credential-store service.
    pub store_url: String,
    /// Scoring endpoint of the risk-model service.
    pub model_url: String,
    /// Reset-code channel.
    pub sender: SenderMode,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Fallback for first runs with no config file: local endpoints and the
    /// demo channel, so nothing real is contacted by accident.
    pub fn demo_defaults() -> Self {
        Self {
            store_url: "http://localhost:8080/sheet".to_string(),
            model_url: "http://localhost:8081/predict".to_string(),
            sender: SenderMode::Demo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"store_url": "http://sheets.internal/creds",
                "model_url": "http://models.internal/cardio",
                "sender": "smtp"}}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.store_url, "http://sheets.internal/creds");
        assert_eq!(config.sender, SenderMode::Smtp);
    }

    #[test]
    fn test_malformed_config_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_config_is_an_io_error() {
        assert!(matches!(
            AppConfig::load(Path::new("/nonexistent/cardiorisk.json")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_demo_defaults_use_demo_sender() {
        assert_eq!(AppConfig::demo_defaults().sender, SenderMode::Demo);
    }
}
