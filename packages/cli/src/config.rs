//! CLI Configuration
//!
//! Stores the Agent Hub base URL and request timeout in ~/.agent-hub/config.toml

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config file path (~/.agent-hub/config.toml)
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".agent-hub").join("config.toml"))
    }

    /// Load config from disk
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config at {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// API base URL; `override_url` (flag or env) wins over the file
    pub fn api_url<'a>(&'a self, override_url: Option<&'a str>) -> &'a str {
        override_url
            .or(self.api_url.as_deref())
            .unwrap_or(DEFAULT_API_URL)
    }

    /// Store a new base URL, keeping the other settings
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("API URL must start with http:// or https://");
        }
        self.api_url = Some(url.trim_end_matches('/').to_string());
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url(None), DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_and_precedence() {
        let config = Config::parse(
            r#"
            api_url = "https://hub.example.com"
            timeout_secs = 5
        "#,
        )
        .unwrap();

        assert_eq!(config.api_url(None), "https://hub.example.com");
        assert_eq!(
            config.api_url(Some("http://127.0.0.1:8080")),
            "http://127.0.0.1:8080"
        );
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_set_api_url_keeps_timeout() {
        let mut config = Config::parse("timeout_secs = 90").unwrap();

        config.set_api_url("https://hub.example.com/").unwrap();

        assert_eq!(config.api_url(None), "https://hub.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(90));
    }

    #[test]
    fn test_set_api_url_rejects_scheme() {
        let mut config = Config::default();
        assert!(config.set_api_url("hub.example.com").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_invalid_is_error() {
        assert!(Config::parse("timeout_secs = \"oops\"").is_err());
        assert!(Config::parse("api_url = ").is_err());
    }
}
