//! File permissions
//!
//! Decides which mutating operations an entry allows.

use std::fs::Metadata;
use std::path::Path;

/// Check if an entry is writable
pub fn is_writable(metadata: &Metadata) -> bool {
    !metadata.permissions().readonly()
}

/// Check if the entry at `path` exists and is writable
pub fn path_is_writable(path: &Path) -> bool {
    path.metadata().map(|m| is_writable(&m)).unwrap_or(false)
}
