use std::env;
use std::path::Path;

use chrono_tz::Tz;
use tokio::fs;
use tracing::{info, warn};

use crate::types::BrevoError;

use super::{paths, Config};

impl Config {
    /// Load configuration from config.json
    /// Falls back to defaults if the file doesn't exist or can't be parsed
    pub async fn load() -> Self {
        let mut config = match Self::try_load().await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = ?err, "Failed to load config.json, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        info!(
            api = %config.api_base_url,
            timezone = %config.document_timezone,
            max_sync_offset = config.max_sync_offset,
            "Loaded configuration"
        );
        config
    }

    async fn try_load() -> Result<Self, BrevoError> {
        let config_path = paths::get_config_path()?;

        if !config_path.exists() {
            warn!(path = %config_path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::from_path(&config_path).await
    }

    /// Read and validate a configuration file.
    pub async fn from_path(path: &Path) -> Result<Self, BrevoError> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|err| BrevoError::Config(format!("Failed to read config file: {err}")))?;

        let config: Config = serde_json::from_str(&contents)
            .map_err(|err| BrevoError::Config(format!("Failed to parse config.json: {err}")))?;

        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(custom) = env::var("BREVO_API_URL") {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                self.api_base_url = trimmed.to_string();
            }
        }
    }

    fn validate(&self) -> Result<(), BrevoError> {
        if self.api_base_url.trim().is_empty() {
            return Err(BrevoError::Config("api_base_url must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(BrevoError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        self.timezone()?;
        Ok(())
    }

    /// Parsed document timezone.
    pub fn timezone(&self) -> Result<Tz, BrevoError> {
        self.document_timezone.parse::<Tz>().map_err(|_| {
            BrevoError::Config(format!(
                "Unknown document timezone `{}`",
                self.document_timezone
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn missing_fields_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"document_timezone": "Europe/Paris"}}"#).unwrap();

        let config = Config::from_path(file.path()).await.unwrap();

        assert_eq!(config.api_base_url, "https://api.brevo.com");
        assert_eq!(config.max_sync_offset, 1000);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.create_only_on_not_found);
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Paris);
    }

    #[tokio::test]
    async fn rejects_unknown_timezone() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"document_timezone": "Mars/Olympus"}}"#).unwrap();

        let err = Config::from_path(file.path()).await.unwrap_err();
        assert!(matches!(err, BrevoError::Config(_)));
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Config::from_path(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config.json"));
    }
}
