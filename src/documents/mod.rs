//! Document tree module
//!
//! Presents the base directory as a browsable tree of document ids with
//! per-entry metadata and create, delete and rename operations.

pub mod mime;
pub mod results;
mod tree;

// Re-export public types
pub use mime::{GuessMimeTypes, MimeTypeLookup};
pub use results::{
    DocumentEntry, DocumentFlags, DocumentKind, InvalidOpenMode, MIME_TYPE_DIR,
    MIME_TYPE_FALLBACK, OpenMode, RootDescriptor, RootFlags,
};
pub use tree::{DirectoryRole, VirtualDocumentTree};
