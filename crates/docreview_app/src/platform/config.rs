//! Optional RON configuration, overridden by command-line flags.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use docreview_client::ClientSettings;
use docreview_logging::review_info;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "docreview.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub output_dir: PathBuf,
    pub log_destination: LogDestination,
    pub connect_timeout_secs: u64,
    pub max_download_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            server_url: client.base_url,
            output_dir: PathBuf::from("output"),
            log_destination: LogDestination::Terminal,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            max_download_bytes: client.max_download_bytes,
        }
    }
}

impl AppConfig {
    /// Loads `explicit` if given (it must exist), else `docreview.ron` when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                match fs::read_to_string(path) {
                    Ok(text) => Self::parse(&text)
                        .with_context(|| format!("failed to parse {}", path.display())),
                    Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
                    Err(err) => {
                        Err(err).with_context(|| format!("failed to read {}", path.display()))
                    }
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        review_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.server_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_download_bytes: self.max_download_bytes,
            ..ClientSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::parse(r#"(server_url: "http://review.local:8080", log_destination: Both)"#)
            .unwrap();
        assert_eq!(config.server_url, "http://review.local:8080");
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.output_dir, PathBuf::from("output"));

        let settings = config.client_settings();
        assert_eq!(settings.base_url, "http://review.local:8080");
        assert_eq!(settings.analyze_path, "/analyze");
        assert_eq!(settings.field_name, "files[]");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&temp.path().join("nope.ron"))).is_err());
    }

    #[test]
    fn round_trips_through_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docreview.ron");
        let config = AppConfig {
            max_download_bytes: 1024,
            ..AppConfig::default()
        };
        fs::write(&path, ron::to_string(&config).unwrap()).unwrap();
        assert_eq!(AppConfig::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(AppConfig::parse("(server_url: 42)").is_err());
    }
}
