use super::app_config::AppConfig;
use directories::ProjectDirs;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";
const APP_NAME: &str = "thumbstore";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No per-user configuration directory on this platform.
    #[error("failed to determine config directory")]
    NoConfigDir,
    /// A config file passed with `--config` does not exist.
    #[error("config file {} does not exist", .0.display())]
    MissingOverride(PathBuf),
    /// Reading or writing a config path failed.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The default configuration could not be rendered.
    #[error("failed to serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Locates and loads `config.toml`.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Uses the platform configuration directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if the platform has none.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::NoConfigDir)?;

        Ok(Self { config_dir })
    }

    #[cfg(test)]
    fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Loads the configuration.
    ///
    /// An explicit `path_override` must exist. Without one, the file in the
    /// configuration directory is used, and a default one is written on first
    /// run. A file that does not parse yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the override is missing or a file cannot be
    /// read or written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        if let Some(path) = path_override {
            if !path.exists() {
                return Err(ConfigError::MissingOverride(path.to_path_buf()));
            }
            debug!(path = %path.display(), "Loading config from --config");
            return Self::read(path);
        }

        let path = self.config_dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Self::read(&path);
        }

        info!(path = %path.display(), "Config file not found, writing default");
        self.ensure_config_dir()?;
        let config = AppConfig::default();
        Self::write_atomic(&path, &toml::to_string_pretty(&config)?)?;
        Ok(config)
    }

    fn ensure_config_dir(&self) -> Result<(), ConfigError> {
        if !self.config_dir.exists() {
            info!(path = %self.config_dir.display(), "Creating configuration directory");
            fs::create_dir_all(&self.config_dir).map_err(ConfigError::io(&self.config_dir))?;
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<AppConfig, ConfigError> {
        let content = fs::read_to_string(path).map_err(ConfigError::io(path))?;
        Ok(toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
            AppConfig::default()
        }))
    }

    fn write_atomic(path: &Path, content: &str) -> Result<(), ConfigError> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(ConfigError::io(path))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(ConfigError::io(path))?;
        temp_file
            .persist(path)
            .map_err(|e| ConfigError::io(path)(e.error))?;
        Ok(())
    }
}
