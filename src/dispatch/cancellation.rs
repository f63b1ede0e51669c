//! Cooperative cancellation
//!
//! A `CancellationSource` hands out cheap `CancellationToken` clones that
//! blocking jobs check before they start and after they finish.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Controller that can trigger cancellation
#[derive(Debug, Clone, Default)]
pub struct CancellationSource {
    cancelled: Arc<AtomicBool>,
}

impl CancellationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

/// Cloneable handle to check cancellation status
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token that is never cancelled
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
