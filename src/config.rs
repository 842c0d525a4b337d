use crate::clock::DEFAULT_FPS;
use crate::input::classifier::ClassifierSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CONFIG_DIR: &str = "auxinput";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Engine settings read from `config.toml`.
///
/// Missing keys fall back to their defaults, so a partial file is valid.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub engine_name: String,
    pub max_fps: u32,
    pub log_level: String,
    pub gamepads_enabled: bool,
    pub input: ClassifierSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine_name: "AuxInput".to_string(),
            max_fps: DEFAULT_FPS,
            log_level: "info".to_string(),
            gamepads_enabled: true,
            input: ClassifierSettings::default(),
        }
    }
}

impl AppConfig {
    /// Log level for the subscriber; unknown names fall back to `INFO`.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or_else(|_| {
            warn!("Unknown log level '{}', using info", self.log_level);
            tracing::Level::INFO
        })
    }
}

fn get_config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| {
        warn!("Could not determine config directory, using current directory");
        PathBuf::from(".")
    })
}

pub fn default_config_path() -> PathBuf {
    let mut path = get_config_dir();
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);
    path
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError + '_ {
    move |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub async fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(io_error(path))?;

    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}

pub async fn save(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(io_error(parent))?;
    }

    let content = toml::to_string_pretty(config)?;
    tokio::fs::write(path, content)
        .await
        .map_err(io_error(path))?;
    debug!("Saved config to {}", path.display());
    Ok(())
}

/// Loads the config at `path`, writing the defaults there first if the file does not exist.
pub async fn ensure_default(path: &Path) -> Result<AppConfig, ConfigError> {
    let exists = tokio::fs::try_exists(path)
        .await
        .map_err(io_error(path))?;

    if exists {
        return load(path).await;
    }

    info!("No config at {}, writing defaults", path.display());
    let config = AppConfig::default();
    save(path, &config).await?;
    Ok(config)
}
