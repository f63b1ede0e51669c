//! Save store result types

use crate::error::SaveError;

/// The game a save belongs to. Only used to locate the save file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub system_id: String,
    pub file_name: String,
}

impl Game {
    pub fn new(system_id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            system_id: system_id.into(),
            file_name: file_name.into(),
        }
    }
}

/// Result of a save metadata lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveInfo {
    /// The save file exists and is not empty
    pub is_valid: bool,
    /// Milliseconds since the Unix epoch, 0 when there is no file
    pub last_modified: i64,
}

/// Result of reading save RAM
#[derive(Debug)]
pub enum ReadOutcome {
    Loaded(Vec<u8>),
    /// No save file, or an empty one
    Absent,
    /// Every attempt failed
    Failed(SaveError),
}

impl ReadOutcome {
    /// Collapse to the lenient form: failure reads as "no save"
    pub fn into_option(self) -> Option<Vec<u8>> {
        match self {
            ReadOutcome::Loaded(data) => Some(data),
            ReadOutcome::Absent | ReadOutcome::Failed(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ReadOutcome::Failed(_))
    }
}

/// Result of writing save RAM
#[derive(Debug)]
pub enum WriteOutcome {
    Written,
    /// Nothing to write, the existing save was left untouched
    Skipped,
    /// Every attempt failed
    Failed(SaveError),
}

impl WriteOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, WriteOutcome::Failed(_))
    }
}
