//! Retro Save Provider
//!
//! File access layer for an emulator's data directory: a virtual document
//! tree for file-browser style callers, and a retrying store for per-game
//! save RAM using RetroArch's `.srm` layout.

pub mod config;
pub mod dispatch;
pub mod documents;
pub mod error;
pub mod saves;
pub mod storage;

pub use config::StorageConfig;
pub use documents::VirtualDocumentTree;
pub use error::{DocumentError, SaveError};
pub use saves::SaveDataStore;
