//! Session generation token.
//!
//! Every session start and stop advances the generation. Async work captures
//! the generation when it begins and checks it before touching shared state;
//! a mismatch means the session it belonged to is gone.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared, monotonically increasing session marker.
#[derive(Debug, Clone, Default)]
pub struct SessionToken(Arc<AtomicU64>);

impl SessionToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// The generation right now.
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Invalidate everything captured so far. Returns the new generation.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `generation` is still the live one.
    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}
