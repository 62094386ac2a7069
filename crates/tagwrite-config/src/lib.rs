use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tagwrite_engine::{ConfigurationError, EditableSurface, Session, Settings, TagRegistry, TagSpec};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid tags in config file at {config_path}: {source}")]
    InvalidTags {
        config_path: PathBuf,
        source: ConfigurationError,
    },
}

/// The `config.toml` file:
///
/// ```toml
/// sorting = true
/// tag_separator = " "
///
/// [[tags]]
/// tag = "@"
/// autocomplete = [{ label = "Ann", value = 1 }, { label = "bob", value = 2 }]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_sorting")]
    pub sorting: bool,
    #[serde(default = "default_tag_separator")]
    pub tag_separator: String,
    #[serde(default)]
    pub tags: Vec<TagSpec>,
}

fn default_sorting() -> bool {
    true
}

fn default_tag_separator() -> String {
    " ".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sorting: default_sorting(),
            tag_separator: default_tag_separator(),
            tags: Vec::new(),
        }
    }
}

impl Config {
    /// `Ok(None)` when there is no file; a file whose tags would be
    /// rejected by a session is an error here already.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            debug!("No config file at {}", config_path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        TagRegistry::new(config.tags.clone()).map_err(|source| ConfigError::InvalidTags {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Fails for a candidate whose value is JSON `null`: TOML has no null.
    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/tagwrite");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn settings(&self) -> Settings {
        Settings {
            sorting: self.sorting,
            tag_separator: self.tag_separator.clone(),
        }
    }

    /// A session configured from this file and bound to `surface`.
    pub fn session<S: EditableSurface>(&self, surface: S) -> Result<Session<S>, ConfigurationError> {
        let mut session = Session::with_settings(self.settings());
        session.set_tags(self.tags.clone())?;
        session.set_container(surface)?;
        Ok(session)
    }
}
