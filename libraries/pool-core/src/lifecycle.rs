//! View lifecycle guard.
//!
//! Background work (batch detection, listing refreshes) holds a clone of the
//! guard and checks it before every state write. Once the owning view closes,
//! in-flight results are dropped instead of being applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "is this view still open" flag
#[derive(Debug, Clone)]
pub struct ViewLifecycle {
    active: Arc<AtomicBool>,
}

impl ViewLifecycle {
    /// Create an active guard
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether writes should still be applied
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Mark the view as torn down; visible to every clone
    pub fn close(&self) {
        self.active.store(false, Ordering::Release);
    }
}

impl Default for ViewLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
