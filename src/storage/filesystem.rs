//! File system operations
//!
//! Backend used by the save store. Kept behind a trait so callers can
//! substitute a device that fails on demand.

use std::fs;
use std::io::{ErrorKind, Result};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Size and modification time of a regular file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub len: u64,
    pub modified_millis: i64,
}

/// Blocking file operations needed by the save store
pub trait SaveFileSystem: Send + Sync {
    /// Create a directory and any missing parents; succeeds if it already exists
    fn create_directory(&self, path: &Path) -> Result<()>;

    /// Stat a file, `Ok(None)` when it does not exist
    fn stat(&self, path: &Path) -> Result<Option<FileStat>>;

    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Replace the file content with `data`
    fn write(&self, path: &Path, data: &[u8]) -> Result<()>;
}

/// `std::fs` backed implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl SaveFileSystem for StdFileSystem {
    fn create_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
    }

    fn stat(&self, path: &Path) -> Result<Option<FileStat>> {
        match fs::metadata(path) {
            Ok(metadata) => Ok(Some(FileStat {
                len: metadata.len(),
                modified_millis: modified_millis(metadata.modified().ok()),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        fs::write(path, data)
    }
}

/// Milliseconds since the Unix epoch, 0 when unknown
pub fn modified_millis(time: Option<SystemTime>) -> i64 {
    time.and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|dur| dur.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let fs = StdFileSystem;
        assert_eq!(fs.stat(&dir.path().join("missing.srm")).unwrap(), None);
    }

    #[test]
    fn write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.srm");
        let fs = StdFileSystem;

        fs.write(&path, b"first-version").unwrap();
        fs.write(&path, b"second").unwrap();

        assert_eq!(fs.read(&path).unwrap(), b"second");
        let stat = fs.stat(&path).unwrap().unwrap();
        assert_eq!(stat.len, 6);
        assert!(stat.modified_millis > 0);
    }

    #[test]
    fn unknown_time_is_zero() {
        assert_eq!(modified_millis(None), 0);
        assert_eq!(modified_millis(Some(UNIX_EPOCH)), 0);
    }
}
