//! Configuration management for Authflow

use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Toolkit configuration
///
/// The screenshot directory is an explicit value here rather than a path
/// resolved relative to the process working directory.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the application under test
    pub base_url: String,

    /// Chrome DevTools endpoint (e.g. "ws://localhost:9222")
    pub cdp_endpoint: String,

    /// Directory where screenshots are written
    pub screenshot_dir: PathBuf,

    /// Default timeout for visibility waits in milliseconds
    pub default_timeout_ms: u64,

    /// Bounded wait for error-display elements in milliseconds
    pub error_wait_ms: u64,

    /// Delay before classifying the current location after a flow submit
    pub settle_delay_ms: u64,

    /// Viewport width
    pub viewport_width: u32,

    /// Viewport height
    pub viewport_height: u32,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            cdp_endpoint: "ws://localhost:9222".to_string(),
            screenshot_dir: PathBuf::from("screenshots"),
            default_timeout_ms: 10_000,
            error_wait_ms: 5_000,
            settle_delay_ms: 2_000,
            viewport_width: 1920,
            viewport_height: 1080,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(base_url) = env::var("AUTHFLOW_BASE_URL") {
            config.base_url = base_url;
        }

        if let Ok(endpoint) = env::var("AUTHFLOW_CDP_ENDPOINT") {
            config.cdp_endpoint = endpoint;
        }

        if let Ok(dir) = env::var("AUTHFLOW_SCREENSHOT_DIR") {
            config.screenshot_dir = PathBuf::from(dir);
        }

        if let Ok(timeout) = env::var("AUTHFLOW_DEFAULT_TIMEOUT") {
            config.default_timeout_ms = timeout
                .parse()
                .map_err(|_| Error::configuration("Invalid AUTHFLOW_DEFAULT_TIMEOUT"))?;
        }

        if let Ok(wait) = env::var("AUTHFLOW_ERROR_WAIT") {
            config.error_wait_ms = wait
                .parse()
                .map_err(|_| Error::configuration("Invalid AUTHFLOW_ERROR_WAIT"))?;
        }

        if let Ok(settle) = env::var("AUTHFLOW_SETTLE_DELAY") {
            config.settle_delay_ms = settle
                .parse()
                .map_err(|_| Error::configuration("Invalid AUTHFLOW_SETTLE_DELAY"))?;
        }

        if let Ok(width) = env::var("AUTHFLOW_VIEWPORT_WIDTH") {
            config.viewport_width = width
                .parse()
                .map_err(|_| Error::configuration("Invalid AUTHFLOW_VIEWPORT_WIDTH"))?;
        }

        if let Ok(height) = env::var("AUTHFLOW_VIEWPORT_HEIGHT") {
            config.viewport_height = height
                .parse()
                .map_err(|_| Error::configuration("Invalid AUTHFLOW_VIEWPORT_HEIGHT"))?;
        }

        if let Ok(log_level) = env::var("AUTHFLOW_LOG_LEVEL") {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Join a path onto the configured base URL
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let config = Config::default();
        assert_eq!(config.default_timeout_ms, 10_000);
        assert_eq!(config.error_wait_ms, 5_000);
        assert_eq!(config.settle_delay_ms, 2_000);
    }

    #[test]
    fn test_url_for_joins_slashes() {
        let config = Config {
            base_url: "http://localhost:3000/".to_string(),
            ..Config::default()
        };

        assert_eq!(config.url_for("/sign-in"), "http://localhost:3000/sign-in");
        assert_eq!(config.url_for("sign-up"), "http://localhost:3000/sign-up");
        assert_eq!(config.url_for("/"), "http://localhost:3000/");
    }

    #[test]
    fn test_url_for_passes_absolute_urls() {
        let config = Config::default();
        assert_eq!(
            config.url_for("https://example.com/sign-in"),
            "https://example.com/sign-in"
        );
    }

    #[test]
    fn test_from_file_toml() {
        let toml = r#"
            base_url = "http://app.test"
            cdp_endpoint = "ws://localhost:9333"
            screenshot_dir = "out/shots"
            default_timeout_ms = 8000
            error_wait_ms = 3000
            settle_delay_ms = 500
            viewport_width = 1280
            viewport_height = 720
            log_level = "debug"
        "#;

        let path = std::env::temp_dir().join("authflow_config_test.toml");
        std::fs::write(&path, toml).unwrap();

        let config = Config::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.base_url, "http://app.test");
        assert_eq!(config.default_timeout_ms, 8000);
        assert_eq!(config.screenshot_dir, PathBuf::from("out/shots"));

        std::fs::remove_file(&path).ok();
    }
}
