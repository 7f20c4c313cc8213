//! Configuration management for the Bamboo client
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (BAMBOO_*)
//! 3. Config file (~/.config/bamboo/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Server connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the Bamboo server (without the REST prefix)
    pub url: String,

    /// Username for basic authentication; bearer token auth is used when unset
    pub username: Option<String>,

    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8085".to_string(),
            username: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/bamboo/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bamboo").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - BAMBOO_URL: Server base URL
    /// - BAMBOO_USERNAME: Username for basic auth
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("BAMBOO_URL") {
            self.server.url = url;
        }

        if let Ok(username) = std::env::var("BAMBOO_USERNAME") {
            self.server.username = Some(username);
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, url: Option<String>, username: Option<String>) -> Self {
        if let Some(url) = url {
            self.server.url = url;
        }

        if let Some(u) = username {
            self.server.username = Some(u);
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(url: Option<String>, username: Option<String>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(url, username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.url, "http://localhost:8085");
        assert!(config.server.username.is_none());
        assert_eq!(config.server.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_cli_overrides(
            Some("https://bamboo.example.com".to_string()),
            Some("ci-bot".to_string()),
        );

        assert_eq!(config.server.url, "https://bamboo.example.com");
        assert_eq!(config.server.username, Some("ci-bot".to_string()));
    }

    #[test]
    fn test_cli_overrides_keep_existing_when_absent() {
        let config = Config::default().with_cli_overrides(None, None);
        assert_eq!(config.server.url, "http://localhost:8085");
        assert!(config.server.username.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[server]
url = "https://bamboo.internal:8443"
username = "builder"
timeout = "2m 30s"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.url, "https://bamboo.internal:8443");
        assert_eq!(config.server.username, Some("builder".to_string()));
        assert_eq!(config.server.timeout, Duration::from_secs(150));
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[server]
username = "builder"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        // url and timeout should use defaults
        assert_eq!(config.server.url, "http://localhost:8085");
        assert_eq!(config.server.timeout, Duration::from_secs(30));
        assert_eq!(config.server.username, Some("builder".to_string()));
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let toml = r#"
[server]
timeout = "soon"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }
}
