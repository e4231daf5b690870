//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::infrastructure::thumbs::ThumbLoaderConfig;

const APP_NAME: &str = "thumbstore";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Plugin store endpoint used when none is configured.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.craftcms.com/v1/";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Plugin store API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Thumbnail loader configuration.
    #[serde(default)]
    pub thumbs: ThumbLoaderConfig,
}

/// Plugin store API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the plugin store API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Honour proxy settings from the environment.
    #[serde(default = "default_true")]
    pub system_proxy: bool,

    /// Headers sent unchanged with every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            headers: BTreeMap::new(),
            timeout_secs: default_timeout_secs(),
            system_proxy: true,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(endpoint) = &args.api_endpoint {
            self.api.endpoint.clone_from(endpoint);
        }
        if let Some(timeout) = args.timeout {
            self.api.timeout_secs = timeout;
        }
        for header in &args.headers {
            if let Some((name, value)) = header.split_once(':') {
                self.api
                    .headers
                    .insert(name.trim().to_string(), value.trim().to_string());
            }
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("thumbstore.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_with_sections() {
        let toml_content = r#"
            log_level = "debug"

            [api]
            endpoint = "https://staging.example.test/v1"
            timeout_secs = 5

            [api.headers]
            "X-Craft-System" = "craft:5.0.0;pro"

            [thumbs]
            worker_count = 2
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.api.endpoint, "https://staging.example.test/v1");
        assert_eq!(config.api.timeout_secs, 5);
        assert!(config.api.system_proxy);
        assert_eq!(
            config.api.headers.get("X-Craft-System").map(String::as_str),
            Some("craft:5.0.0;pro")
        );
        assert_eq!(config.thumbs.worker_count, 2);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api.endpoint, DEFAULT_API_ENDPOINT);
        assert!(config.api.headers.is_empty());
        assert_eq!(config.thumbs, ThumbLoaderConfig::default());
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "thumbstore",
            "--api-endpoint",
            "http://localhost:8080/",
            "--timeout",
            "3",
            "--header",
            "X-Api-Key: abc",
            "core-data",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.api.endpoint, "http://localhost:8080/");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(
            config.api.headers.get("X-Api-Key").map(String::as_str),
            Some("abc")
        );
    }
}
