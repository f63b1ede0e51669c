//! Error handling
//!
//! Defines error types and handling for the document tree and save store.

pub mod handlers;
pub mod types;

pub use types::*;
