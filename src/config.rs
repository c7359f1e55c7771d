//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treechat/treechat.toml`
//! 3. Environment variables: `TREECHAT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for treechat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Path of the JSON tree library (default: XDG data dir)
    pub data_file: PathBuf,
    /// Tree used when --tree is not given
    pub default_tree: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            default_tree: "main".into(),
        }
    }
}

/// Default library location: `$XDG_DATA_HOME/treechat/trees.json`.
fn default_data_file() -> PathBuf {
    ProjectDirs::from("", "", "treechat")
        .map(|dirs| dirs.data_dir().join("trees.json"))
        .unwrap_or_else(|| PathBuf::from("trees.json"))
}

/// Get the XDG config directory for treechat.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treechat").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treechat.toml"))
}

/// Raw settings for intermediate parsing (fields are Option to detect
/// "not specified" and inherit from the layer below).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub default_tree: Option<String>,
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins if Some.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay
                .data_file
                .clone()
                .unwrap_or_else(|| self.data_file.clone()),
            default_tree: overlay
                .default_tree
                .clone()
                .unwrap_or_else(|| self.default_tree.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/treechat/treechat.toml`
    /// 3. Environment variables: `TREECHAT_*` prefix
    pub fn load() -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Apply TREECHAT_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let cfg = Config::builder()
            .add_source(Environment::with_prefix("TREECHAT"))
            .build()
            .map_err(|e| ApplicationError::Config {
                message: format!("env overrides: {}", e),
            })?;
        let raw: RawSettings = cfg.try_deserialize().map_err(|e| ApplicationError::Config {
            message: format!("env overrides: {}", e),
        })?;
        Ok(settings.merge_with(&raw))
    }

    /// Render the merged settings as TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
