//! Document tree result types
//!
//! Rows handed to a file-browser style caller, plus the flag and mode types
//! those rows and operations use.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// MIME type reported for directories
pub const MIME_TYPE_DIR: &str = "vnd.android.document/directory";

/// MIME type reported when the extension is unknown
pub const MIME_TYPE_FALLBACK: &str = "application/octet-stream";

/// Capability bits of a document row. Values match the Android
/// `DocumentsContract.Document` flag constants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocumentFlags(u32);

impl DocumentFlags {
    pub const NONE: DocumentFlags = DocumentFlags(0);
    pub const SUPPORTS_WRITE: DocumentFlags = DocumentFlags(0x2);
    pub const SUPPORTS_DELETE: DocumentFlags = DocumentFlags(0x4);
    pub const DIR_SUPPORTS_CREATE: DocumentFlags = DocumentFlags(0x8);
    pub const SUPPORTS_RENAME: DocumentFlags = DocumentFlags(0x40);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: DocumentFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for DocumentFlags {
    type Output = DocumentFlags;

    fn bitor(self, rhs: DocumentFlags) -> DocumentFlags {
        DocumentFlags(self.0 | rhs.0)
    }
}

/// Capability bits of a root row, matching `DocumentsContract.Root`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RootFlags(u32);

impl RootFlags {
    pub const SUPPORTS_CREATE: RootFlags = RootFlags(0x1);
    pub const SUPPORTS_SEARCH: RootFlags = RootFlags(0x8);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: RootFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for RootFlags {
    type Output = RootFlags;

    fn bitor(self, rhs: RootFlags) -> RootFlags {
        RootFlags(self.0 | rhs.0)
    }
}

/// A root of the virtual tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDescriptor {
    pub root_id: String,
    pub document_id: String,
    pub title: String,
    pub icon: String,
    pub flags: RootFlags,
}

/// A document row, computed from the filesystem on every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub document_id: String,
    pub mime_type: String,
    pub display_name: String,
    /// Milliseconds since the Unix epoch
    pub last_modified: i64,
    pub flags: DocumentFlags,
    pub size: u64,
}

impl DocumentEntry {
    pub fn is_directory(&self) -> bool {
        self.mime_type == MIME_TYPE_DIR
    }
}

/// What `create_document` should create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Directory,
    File,
}

impl DocumentKind {
    /// Derive the kind from a requested MIME type
    pub fn from_mime_type(mime_type: &str) -> Self {
        if mime_type == MIME_TYPE_DIR {
            DocumentKind::Directory
        } else {
            DocumentKind::File
        }
    }
}

/// Access mode for `open`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Write,
    ReadWrite,
    Append,
    Truncate,
}

impl OpenMode {
    pub fn writes(self) -> bool {
        !matches!(self, OpenMode::Read)
    }
}

/// Error returned for an unrecognised mode string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOpenMode(pub String);

impl fmt::Display for InvalidOpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid open mode: {}", self.0)
    }
}

impl std::error::Error for InvalidOpenMode {}

impl FromStr for OpenMode {
    type Err = InvalidOpenMode;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "r" => Ok(OpenMode::Read),
            "w" => Ok(OpenMode::Write),
            "rw" => Ok(OpenMode::ReadWrite),
            "a" | "wa" => Ok(OpenMode::Append),
            "t" | "wt" | "rwt" => Ok(OpenMode::Truncate),
            other => Err(InvalidOpenMode(other.to_string())),
        }
    }
}
