//! Directory locator
//!
//! Resolves the well-known directories the document tree and save store
//! operate on.

use crate::config::StorageConfig;
use log::info;
use std::fs;
use std::io::Result;
use std::path::PathBuf;

/// Supplies the absolute directories used by the provider.
///
/// Implementations must return the same paths for the lifetime of the process.
pub trait DirectoryLocator: Send + Sync {
    fn base_directory(&self) -> PathBuf;
    fn saves_directory(&self) -> PathBuf;
    fn states_directory(&self) -> PathBuf;
    fn states_preview_directory(&self) -> PathBuf;
    fn internal_roms_directory(&self) -> PathBuf;
}

/// Locator that lays every directory out directly under the configured base.
#[derive(Debug, Clone)]
pub struct DirectoriesManager {
    base: PathBuf,
    saves: PathBuf,
    states: PathBuf,
    states_preview: PathBuf,
    internal_roms: PathBuf,
}

impl DirectoriesManager {
    pub fn new(config: &StorageConfig) -> Self {
        let base = config.base_directory_path();
        Self {
            saves: base.join(&config.saves_dir_name),
            states: base.join(&config.states_dir_name),
            states_preview: base.join(&config.states_preview_dir_name),
            internal_roms: base.join(&config.internal_roms_dir_name),
            base,
        }
    }

    /// Create the base directory and the four well-known subdirectories
    pub fn ensure_created(&self) -> Result<()> {
        for dir in [
            &self.base,
            &self.saves,
            &self.states,
            &self.states_preview,
            &self.internal_roms,
        ] {
            fs::create_dir_all(dir)?;
        }
        info!("Storage layout ready under {}", self.base.display());
        Ok(())
    }
}

impl DirectoryLocator for DirectoriesManager {
    fn base_directory(&self) -> PathBuf {
        self.base.clone()
    }

    fn saves_directory(&self) -> PathBuf {
        self.saves.clone()
    }

    fn states_directory(&self) -> PathBuf {
        self.states.clone()
    }

    fn states_preview_directory(&self) -> PathBuf {
        self.states_preview.clone()
    }

    fn internal_roms_directory(&self) -> PathBuf {
        self.internal_roms.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lays_out_directories_under_base() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            base_directory: dir.path().to_string_lossy().to_string(),
            ..StorageConfig::default()
        };

        let manager = DirectoriesManager::new(&config);
        manager.ensure_created().unwrap();
        // idempotent
        manager.ensure_created().unwrap();

        assert_eq!(manager.saves_directory(), dir.path().join("saves"));
        assert_eq!(manager.states_preview_directory(), dir.path().join("state-previews"));
        assert!(manager.internal_roms_directory().is_dir());
        assert!(manager.states_directory().is_dir());
    }
}
