//! Rename-propagation gate shared by every parameter field in a session.
//!
//! Bulk operations that tear down and recreate parameter fields (a procedure
//! mutator regenerating its argument list, local-declaration updates) must
//! not fire rename propagation for every intermediate `set_text`. The gate is
//! the editor-wide switch those operations flip off for the duration of the
//! rebuild.
//!
//! One `ChangeGate` is created per editor session and a clone handed to each
//! field; suppression is scoped and guaranteed to restore the prior value on
//! every exit path, including unwinding.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

/// Shared enable/disable switch for rename propagation.
///
/// Defaults to enabled. The flag itself is private: the only writer is the
/// [`SuppressionGuard`] returned by [`ChangeGate::suppress`], so the gate can
/// never be left disabled by a code path that forgot to restore it.
#[derive(Clone, Debug)]
pub struct ChangeGate {
    enabled: Arc<AtomicBool>,
}

impl Default for ChangeGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeGate {
    /// Create a gate in the enabled state.
    pub fn new() -> Self {
        ChangeGate {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether rename propagation is currently allowed.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Disable propagation until the returned guard is dropped.
    ///
    /// The guard captures the current value and restores it on drop, so
    /// nested suppression scopes unwind correctly (LIFO).
    pub fn suppress(&self) -> SuppressionGuard {
        let prior = self.enabled.swap(false, Ordering::Relaxed);
        debug!(prior = prior, "Change gate suppressed");
        SuppressionGuard {
            enabled: Arc::clone(&self.enabled),
            prior,
        }
    }

    /// Run `thunk` with propagation disabled, restoring the prior state
    /// afterwards even if `thunk` panics.
    pub fn with_disabled<T>(&self, thunk: impl FnOnce() -> T) -> T {
        let _guard = self.suppress();
        thunk()
    }
}

/// Scoped suppression handle. Restores the captured gate value when dropped.
#[must_use = "dropping the guard immediately re-enables propagation"]
pub struct SuppressionGuard {
    enabled: Arc<AtomicBool>,
    prior: bool,
}

impl Drop for SuppressionGuard {
    fn drop(&mut self) {
        self.enabled.store(self.prior, Ordering::Relaxed);
        debug!(restored = self.prior, "Change gate restored");
    }
}
