use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";

/// Resolve the gateway base URL based on priority:
/// 1. Explicit value (--gateway-url flag)
/// 2. FIXWATCH_GATEWAY_URL environment variable
/// 3. Config file
/// 4. Built-in default (local gateway)
pub fn resolve_gateway_url(explicit: Option<&str>, config: &Config) -> String {
    if let Some(url) = explicit {
        return url.to_string();
    }

    if let Ok(env_url) = std::env::var("FIXWATCH_GATEWAY_URL")
        && !env_url.is_empty()
    {
        return env_url;
    }

    config
        .gateway_url
        .clone()
        .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub gateway_url: Option<String>,

    /// Poll period override in milliseconds. Display tuning only; absent
    /// means the canonical 2000.
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Config("could not determine config directory".to_string()))?;
        Ok(base.join("fixwatch").join("config.toml"))
    }

    pub fn poll_period(&self) -> std::time::Duration {
        self.poll_interval_ms
            .map(std::time::Duration::from_millis)
            .unwrap_or(crate::POLL_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_default() {
        let config = Config::load_from(&PathBuf::from("/nonexistent/config.toml")).unwrap();
        assert!(config.gateway_url.is_none());
        assert_eq!(config.poll_period(), crate::POLL_PERIOD);
    }

    #[test]
    fn explicit_value_wins() {
        let config = Config {
            gateway_url: Some("http://gateway:9000".to_string()),
            poll_interval_ms: None,
        };
        assert_eq!(
            resolve_gateway_url(Some("http://cli:1234"), &config),
            "http://cli:1234"
        );
    }

    #[test]
    fn config_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            gateway_url: Some("http://gateway:9000".to_string()),
            poll_interval_ms: Some(500),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.gateway_url.as_deref(), Some("http://gateway:9000"));
        assert_eq!(loaded.poll_period(), std::time::Duration::from_millis(500));
    }
}
