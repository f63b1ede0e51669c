//! Save data store
//!
//! Reads and writes the single save RAM file of a game. Reads and writes are
//! retried and never panic or propagate errors; the outcome says what happened.
//! No locking is done, concurrent writers rely on the filesystem.

use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::StorageConfig;
use crate::error::SaveError;
use crate::saves::naming::save_file_location;
use crate::saves::results::{Game, ReadOutcome, SaveInfo, WriteOutcome};
use crate::saves::retry::with_retries;
use crate::storage::filesystem::{SaveFileSystem, StdFileSystem};
use crate::storage::locator::DirectoryLocator;

pub struct SaveDataStore {
    locator: Arc<dyn DirectoryLocator>,
    fs: Arc<dyn SaveFileSystem>,
    attempts: usize,
}

impl SaveDataStore {
    pub fn new(config: &StorageConfig, locator: Arc<dyn DirectoryLocator>) -> Self {
        Self::with_file_system(locator, Arc::new(StdFileSystem), config.file_access_retries)
    }

    pub fn with_file_system(
        locator: Arc<dyn DirectoryLocator>,
        fs: Arc<dyn SaveFileSystem>,
        attempts: usize,
    ) -> Self {
        Self {
            locator,
            fs,
            attempts,
        }
    }

    /// Path of the save file for `game`, creating the system directory if needed
    pub fn save_file_path(&self, game: &Game) -> Result<PathBuf, SaveError> {
        let path = save_file_location(&self.locator.saves_directory(), game)?;
        if let Some(system_dir) = path.parent() {
            self.fs.create_directory(system_dir)?;
        }
        Ok(path)
    }

    /// Read the save RAM of `game`
    pub fn read_save_ram(&self, game: &Game) -> ReadOutcome {
        let result = with_retries(self.attempts, "Reading save RAM", || {
            let path = self.save_file_path(game)?;
            match self.fs.stat(&path)? {
                Some(stat) if stat.len > 0 => Ok(Some(self.fs.read(&path)?)),
                _ => Ok(None),
            }
        });

        match result {
            Ok(Some(data)) => {
                debug!("Loaded {} bytes of save RAM for {}", data.len(), game.file_name);
                ReadOutcome::Loaded(data)
            }
            Ok(None) => ReadOutcome::Absent,
            Err(e) => {
                error!("Failed to read save RAM for {}: {}", game.file_name, e);
                ReadOutcome::Failed(e)
            }
        }
    }

    /// Replace the save RAM of `game`. Empty data leaves the existing save untouched.
    pub fn write_save_ram(&self, game: &Game, data: &[u8]) -> WriteOutcome {
        if data.is_empty() {
            debug!("Skipping empty save RAM write for {}", game.file_name);
            return WriteOutcome::Skipped;
        }

        let result = with_retries(self.attempts, "Writing save RAM", || {
            let path = self.save_file_path(game)?;
            self.fs.write(&path, data)?;
            Ok(path)
        });

        match result {
            Ok(path) => {
                info!(
                    "Stored {} bytes of save RAM for {} (real: {})",
                    data.len(),
                    game.file_name,
                    path.display()
                );
                WriteOutcome::Written
            }
            Err(e) => {
                error!("Failed to write save RAM for {}: {}", game.file_name, e);
                WriteOutcome::Failed(e)
            }
        }
    }

    /// Stat the save file once. A missing or unreadable file is reported as invalid.
    pub fn save_info(&self, game: &Game) -> SaveInfo {
        let path = match self.save_file_path(game) {
            Ok(path) => path,
            Err(SaveError::Io(e)) => {
                warn!("Could not prepare save directory for {}: {}", game.file_name, e);
                match save_file_location(&self.locator.saves_directory(), game) {
                    Ok(path) => path,
                    Err(_) => return SaveInfo::default(),
                }
            }
            Err(e) => {
                warn!("No save location for {}: {}", game.file_name, e);
                return SaveInfo::default();
            }
        };

        match self.fs.stat(&path) {
            Ok(Some(stat)) => SaveInfo {
                is_valid: stat.len > 0,
                last_modified: stat.modified_millis,
            },
            Ok(None) => SaveInfo::default(),
            Err(e) => {
                warn!("Failed to stat save file {}: {}", path.display(), e);
                SaveInfo::default()
            }
        }
    }
}
