use std::path::{Path, PathBuf};

use blockdoc_io::prelude::{MutationOptions, MutationPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "blockdoc.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found at {config_path}")]
    ConfigNotFound { config_path: PathBuf },

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
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub editor: EditorConfig,
    pub output: OutputConfig,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub mutation_policy: MutationPolicy,
    /// Prefix for the sequential block ids the CLI mints.
    pub id_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mutation_policy: MutationPolicy::Silent,
            id_prefix: "b".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
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

        Ok(Some(config))
    }

    /// An explicit path must exist; the default file is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path)?.ok_or_else(|| ConfigError::ConfigNotFound {
                config_path: path.to_path_buf(),
            }),
            None => Ok(Self::load_from_path(DEFAULT_CONFIG_FILE)?.unwrap_or_default()),
        }
    }

    /// `strict` from the command line wins over the configured policy.
    pub fn mutation_options(&self, strict: bool) -> MutationOptions {
        if strict {
            MutationOptions::strict()
        } else {
            MutationOptions {
                policy: self.editor.mutation_policy,
            }
        }
    }
}
