use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::rendering::{RenderConfig, ShaderConfig};
use super::window::WindowConfig;

pub const CONFIG_FILE: &str = "triangle.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub shaders: ShaderConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Looks for `triangle.toml` in the working directory, then in the
    /// platform config directory. Falls back to the built-in defaults when
    /// neither exists. Never writes anything.
    ///
    /// Returns the file that was used, if any, so the caller can report it
    /// once logging is up.
    pub fn load() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_first(&search_paths())
    }

    /// Loads the first existing file among `candidates`.
    pub fn load_first(candidates: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => Ok((Self::from_path(path)?, Some(path.clone()))),
            None => Ok((Self::default(), None)),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        self.logging
            .level
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("unknown log level '{}'", self.logging.level)))
    }
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dirs) = ProjectDirs::from("com", "MetroManDevTeam", "Triangle") {
        paths.push(dirs.config_dir().join(CONFIG_FILE));
    }
    paths
}
