//! Error types
//!
//! Defines domain-specific error types for the document tree and the save store.

use std::fmt;
use std::io;

/// Document tree errors
#[derive(Debug)]
pub enum DocumentError {
    NotFound(String),
    PermissionDenied(String),
    NotEmpty(String),
    InvalidId(String),
    AlreadyExists(String),
    Cancelled,
    Io(io::Error),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::NotFound(id) => write!(f, "Document not found: {}", id),
            DocumentError::PermissionDenied(id) => write!(f, "Document is not writable: {}", id),
            DocumentError::NotEmpty(id) => write!(f, "Directory not empty: {}", id),
            DocumentError::InvalidId(id) => write!(f, "Invalid document id: {}", id),
            DocumentError::AlreadyExists(id) => write!(f, "Document already exists: {}", id),
            DocumentError::Cancelled => write!(f, "Operation cancelled"),
            DocumentError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DocumentError {
    fn from(error: io::Error) -> Self {
        DocumentError::Io(error)
    }
}

/// Save store errors
#[derive(Debug)]
pub enum SaveError {
    InvalidGame(String),
    Cancelled,
    Io(io::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::InvalidGame(msg) => write!(f, "Invalid game for save lookup: {}", msg),
            SaveError::Cancelled => write!(f, "Save operation cancelled"),
            SaveError::Io(e) => write!(f, "Save IO error: {}", e),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(error: io::Error) -> Self {
        SaveError::Io(error)
    }
}
