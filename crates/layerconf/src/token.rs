//! Per-provider change state.
//!
//! A [`ChangeToken`] is a shared two-state flag: `Unchanged` until the
//! provider's live-update mechanism marks it, then `Changed` until the next
//! successful reload resets it. The root's selective reload sweep only
//! touches providers whose token reads changed, so unchanged providers keep
//! their data and skip I/O.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared change flag for one provider.
///
/// Clones observe the same underlying state, so a watch thread and the
/// owning provider can hold the same token.
#[derive(Clone, Debug, Default)]
pub struct ChangeToken {
    changed: Arc<AtomicBool>,
}

impl ChangeToken {
    /// Creates a token in the unchanged state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once the underlying source has signaled a change that has not
    /// yet been consumed by a reload.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.changed.load(Ordering::Acquire)
    }

    /// Marks the token as changed. Idempotent.
    pub fn mark_changed(&self) {
        self.changed.store(true, Ordering::Release);
    }

    /// Returns the token to the unchanged state after a successful reload.
    pub fn reset(&self) {
        self.changed.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unchanged() {
        let token = ChangeToken::new();
        assert!(!token.has_changed());
    }

    #[test]
    fn mark_and_reset_cycle() {
        let token = ChangeToken::new();

        token.mark_changed();
        assert!(token.has_changed());

        token.mark_changed();
        assert!(token.has_changed());

        token.reset();
        assert!(!token.has_changed());
    }

    #[test]
    fn clones_share_state() {
        let token = ChangeToken::new();
        let observer = token.clone();

        token.mark_changed();
        assert!(observer.has_changed());

        observer.reset();
        assert!(!token.has_changed());
    }
}
