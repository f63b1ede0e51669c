//! Error handlers
//!
//! Maps domain errors onto platform-style error kinds.

use crate::error::types::DocumentError;
use std::io;

/// Convert a document error to the closest `io::ErrorKind`
pub fn document_error_kind(err: &DocumentError) -> io::ErrorKind {
    match err {
        DocumentError::NotFound(_) => io::ErrorKind::NotFound,
        DocumentError::PermissionDenied(_) => io::ErrorKind::PermissionDenied,
        DocumentError::NotEmpty(_) => io::ErrorKind::DirectoryNotEmpty,
        DocumentError::InvalidId(_) => io::ErrorKind::InvalidInput,
        DocumentError::AlreadyExists(_) => io::ErrorKind::AlreadyExists,
        DocumentError::Cancelled => io::ErrorKind::Interrupted,
        DocumentError::Io(e) => e.kind(),
    }
}

impl From<DocumentError> for io::Error {
    fn from(error: DocumentError) -> Self {
        match error {
            DocumentError::Io(e) => e,
            other => io::Error::new(document_error_kind(&other), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_kinds() {
        assert_eq!(
            document_error_kind(&DocumentError::NotEmpty("x".into())),
            io::ErrorKind::DirectoryNotEmpty
        );
        assert_eq!(
            document_error_kind(&DocumentError::InvalidId("../x".into())),
            io::ErrorKind::InvalidInput
        );
    }

    #[test]
    fn io_error_passes_through() {
        let err: io::Error =
            DocumentError::Io(io::Error::new(io::ErrorKind::TimedOut, "slow")).into();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);

        let err: io::Error = DocumentError::NotFound("internal_data/a".into()).into();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("internal_data/a"));
    }
}
