//! Configuration management for the save provider
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `RETRO_SAVES_*` environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file name, resolved relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Prefix of environment overrides, e.g. `RETRO_SAVES_BASE_DIRECTORY`
pub const ENV_PREFIX: &str = "RETRO_SAVES";

/// Storage layout and document tree settings
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    // ═══ DIRECTORY LAYOUT (Environment Override Supported) ═══
    /// Base directory, also the root of the document tree
    /// Environment: RETRO_SAVES_BASE_DIRECTORY
    pub base_directory: String,

    /// Subdirectory names under the base directory
    pub saves_dir_name: String,
    pub states_dir_name: String,
    pub states_preview_dir_name: String,
    pub internal_roms_dir_name: String,

    // ═══ DOCUMENT TREE ═══
    /// Root token prefixed to every document id
    pub root_id: String,
    pub root_title: String,
    pub root_icon: String,

    /// Maximum number of entries returned by a search
    pub search_limit: usize,

    // ═══ SAVE STORE ═══
    /// Total attempts for a save read or write
    pub file_access_retries: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_directory: "./retro-data".to_string(),
            saves_dir_name: "saves".to_string(),
            states_dir_name: "states".to_string(),
            states_preview_dir_name: "state-previews".to_string(),
            internal_roms_dir_name: "roms".to_string(),
            root_id: "internal_data".to_string(),
            root_title: "Retro Saves".to_string(),
            root_icon: "ic_launcher".to_string(),
            search_limit: 50,
            file_access_retries: 3,
        }
    }
}

impl StorageConfig {
    /// Load configuration from `config.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from the given file (extension optional, file optional)
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    /// Load configuration from the given file, reading overrides from `<env_prefix>_*`
    pub fn load_with_env_prefix(path: &Path, env_prefix: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("base_directory", defaults.base_directory)?
            .set_default("saves_dir_name", defaults.saves_dir_name)?
            .set_default("states_dir_name", defaults.states_dir_name)?
            .set_default("states_preview_dir_name", defaults.states_preview_dir_name)?
            .set_default("internal_roms_dir_name", defaults.internal_roms_dir_name)?
            .set_default("root_id", defaults.root_id)?
            .set_default("root_title", defaults.root_title)?
            .set_default("root_icon", defaults.root_icon)?
            .set_default("search_limit", defaults.search_limit as i64)?
            .set_default("file_access_retries", defaults.file_access_retries as i64)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(env_prefix))
            .build()?;

        let config: StorageConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.base_directory.is_empty() {
            return Err(config::ConfigError::Message(
                "base_directory cannot be empty".into(),
            ));
        }

        if self.root_id.is_empty() || self.root_id.contains('/') {
            return Err(config::ConfigError::Message(
                "root_id must be non-empty and cannot contain '/'".into(),
            ));
        }

        let names = self.directory_names();
        for name in &names {
            if name.is_empty() || name.contains('/') || name.contains('\\') || *name == ".." {
                return Err(config::ConfigError::Message(format!(
                    "Invalid directory name: {name:?}"
                )));
            }
        }

        for (i, name) in names.iter().enumerate() {
            if names[i + 1..].contains(name) {
                return Err(config::ConfigError::Message(format!(
                    "Directory name {name:?} is used more than once"
                )));
            }
        }

        if self.file_access_retries == 0 {
            return Err(config::ConfigError::Message(
                "file_access_retries must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get base directory as PathBuf
    pub fn base_directory_path(&self) -> PathBuf {
        PathBuf::from(&self.base_directory)
    }

    fn directory_names(&self) -> [&str; 4] {
        [
            &self.saves_dir_name,
            &self.states_dir_name,
            &self.states_preview_dir_name,
            &self.internal_roms_dir_name,
        ]
    }
}
