//! Blocking dispatch
//!
//! Every tree and save operation is blocking file I/O. This module moves
//! them onto tokio's blocking pool so async callers never stall their
//! scheduler, and threads a cancellation token through each call.

pub mod cancellation;
mod operations;

use log::{debug, error};
use std::fmt;

pub use cancellation::{CancellationSource, CancellationToken};
pub use operations::{AsyncDocumentTree, AsyncSaveStore};

/// Why a dispatched job produced no result
#[derive(Debug)]
pub enum DispatchError {
    Cancelled,
    Panicked(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Cancelled => write!(f, "Operation cancelled"),
            DispatchError::Panicked(msg) => write!(f, "Blocking task failed: {}", msg),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Run `job` on the blocking pool.
///
/// A token cancelled before the job starts skips it; a job that finishes
/// after cancellation has its result discarded.
pub async fn run_blocking<T, F>(token: &CancellationToken, job: F) -> Result<T, DispatchError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    if token.is_cancelled() {
        return Err(DispatchError::Cancelled);
    }

    let job_token = token.clone();
    let handle = tokio::task::spawn_blocking(move || {
        if job_token.is_cancelled() {
            None
        } else {
            Some(job())
        }
    });

    match handle.await {
        Ok(Some(value)) if !token.is_cancelled() => Ok(value),
        Ok(_) => {
            debug!("Discarding result of cancelled blocking job");
            Err(DispatchError::Cancelled)
        }
        Err(e) => {
            error!("Blocking job failed: {}", e);
            Err(DispatchError::Panicked(e.to_string()))
        }
    }
}
