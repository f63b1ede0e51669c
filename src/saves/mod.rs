//! Save data module
//!
//! Locates and accesses the save RAM file of each game.

pub mod naming;
pub mod results;
pub mod retry;
mod store;

// Re-export public types and functions
pub use naming::{SAVE_EXTENSION, save_file_location, save_file_name};
pub use results::{Game, ReadOutcome, SaveInfo, WriteOutcome};
pub use store::SaveDataStore;
