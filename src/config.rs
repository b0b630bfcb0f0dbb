//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/kintree/kintree.toml`
//! 3. Environment variables: `KINTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("cannot parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("config error: {0}")]
    Message(String),
}

/// Unified configuration for kintree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory searched for tree files given as bare names (default: data)
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    data_dir: Option<PathBuf>,
}

/// Get the XDG config directory for kintree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kintree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("kintree.toml"))
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/kintree/kintree.toml`
    /// 3. Environment variables: `KINTREE_*` prefix (explicit override)
    pub fn load() -> Result<Self, ConfigError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                if let Some(data_dir) = raw.data_dir {
                    current.data_dir = data_dir;
                }
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply KINTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ConfigError> {
        let builder =
            Config::builder().add_source(Environment::with_prefix("KINTREE").separator("__"));

        let config = builder
            .build()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = PathBuf::from(val);
        }

        Ok(settings)
    }

    /// Expand shell variables and tilde in path-like fields.
    ///
    /// Handles `~`, `$VAR`, and `${VAR}` syntax.
    fn expand_paths(&mut self) {
        let expanded = shellexpand::full(self.data_dir.to_string_lossy().as_ref())
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| self.data_dir.to_string_lossy().into_owned());
        self.data_dir = PathBuf::from(expanded);
    }

    /// Resolve a tree file argument: a path that exists is used as given,
    /// otherwise the data directory is tried.
    pub fn resolve_tree_file(&self, path: &Path) -> PathBuf {
        if path.exists() {
            return path.to_path_buf();
        }
        self.data_dir.join(path)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Message(e.to_string()))
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# kintree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/kintree/kintree.toml
#   Env:    KINTREE_* environment variables (explicit overrides)

# Directory searched for tree files given as bare names
# data_dir = "data"
"#
        .to_string()
    }
}
