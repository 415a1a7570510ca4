use std::{path::PathBuf, time::Duration};

use directories::{ProjectDirs, UserDirs};
use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

pub const API_BASE_ENV: &str = "QUICKMP3_API_BASE";
pub const TIMEOUT_ENV: &str = "QUICKMP3_TIMEOUT_SECS";
pub const DOWNLOAD_DIR_ENV: &str = "QUICKMP3_DOWNLOAD_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid API base {value:?}: {reason}")]
    InvalidApiBase { value: String, reason: String },

    #[error("invalid request timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Runtime settings, read once at startup and shared by reference afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Origin every request is sent to, without a trailing slash.
    pub api_base: String,
    /// `None` keeps a request pending for as long as the server takes.
    pub request_timeout: Option<Duration>,
    pub download_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: None,
            download_dir: default_download_dir(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            config.api_base = normalize_api_base(&value)?;
        }

        if let Some(value) = lookup(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(value.clone()))?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        if let Some(dir) = lookup(DOWNLOAD_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            config.download_dir = PathBuf::from(dir.trim());
        }

        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: &str) -> Result<Self, ConfigError> {
        self.api_base = normalize_api_base(api_base)?;
        Ok(self)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

fn normalize_api_base(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidApiBase {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiBase {
            value: value.to_string(),
            reason: format!("unsupported scheme `{}`", url.scheme()),
        });
    }

    Ok(trimmed.to_string())
}

fn default_download_dir() -> PathBuf {
    if let Some(dir) = UserDirs::new().and_then(|dirs| dirs.download_dir().map(PathBuf::from)) {
        return dir;
    }

    ProjectDirs::from("com", "folsetech", "quickmp3")
        .map(|dirs| dirs.data_dir().join("renders"))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_origin() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn api_base_override_drops_trailing_slash() {
        let config =
            Config::from_lookup(lookup(&[(API_BASE_ENV, " https://songs.example.com/ ")])).unwrap();
        assert_eq!(config.api_base, "https://songs.example.com");
        assert_eq!(
            config.endpoint("/api/generate-song"),
            "https://songs.example.com/api/generate-song"
        );
    }

    #[test]
    fn blank_api_base_keeps_default() {
        let config = Config::from_lookup(lookup(&[(API_BASE_ENV, "   ")])).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn rejects_non_http_api_base() {
        let err = Config::from_lookup(lookup(&[(API_BASE_ENV, "ftp://files.local")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiBase { .. }));

        let err = Config::from_lookup(lookup(&[(API_BASE_ENV, "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiBase { .. }));
    }

    #[test]
    fn parses_timeout_and_download_dir() {
        let config = Config::from_lookup(lookup(&[
            (TIMEOUT_ENV, "90"),
            (DOWNLOAD_DIR_ENV, "/tmp/renders"),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.download_dir, PathBuf::from("/tmp/renders"));
    }

    #[test]
    fn rejects_zero_or_garbage_timeout() {
        for value in ["0", "-3", "soon"] {
            let err = Config::from_lookup(lookup(&[(TIMEOUT_ENV, value)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimeout(_)), "{value}");
        }
    }
}
