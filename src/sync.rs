//! Shared search-control primitives.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation token observed by every recursive search call and by all
/// parallel root workers.
///
/// Cloning is cheap and produces a handle to the same flag, so a caller can
/// keep a clone around to interrupt a search running on another thread.
#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new, unset flag.
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// True once [`set`](Self::set) has been called.
    #[inline]
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Request cancellation. Every in-flight search call observing this flag
    /// unwinds promptly with a neutral score.
    #[inline]
    pub fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clear the flag for the next search.
    #[inline]
    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        StopFlag::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_round_trip() {
        let flag = StopFlag::new();
        assert!(!flag.is_set());
        flag.set();
        assert!(flag.is_set());
        flag.clear();
        assert!(!flag.is_set());
    }

    #[test]
    fn clones_share_state() {
        let flag = StopFlag::new();
        let other = flag.clone();
        other.set();
        assert!(flag.is_set());
    }
}
