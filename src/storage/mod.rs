//! File system storage management
//!
//! Directory layout, path validation, permissions and the file backend.

pub mod filesystem;
pub mod locator;
pub mod permissions;
pub mod validation;

// Re-export commonly used items
pub use filesystem::{FileStat, SaveFileSystem, StdFileSystem};
pub use locator::{DirectoriesManager, DirectoryLocator};
pub use validation::{resolve_document_id, to_document_id};
