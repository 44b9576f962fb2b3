//! Single-session exclusivity guard.
//!
//! At most one crash-handling session may run at a time, even when fatal
//! signals land on several threads at once or the handler itself faults.
//! An atomic compare-and-set keeps the invariant under multi-threaded
//! delivery; entry while held is rejected, never queued.

use std::sync::atomic::{AtomicBool, Ordering};

static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Attempts to mark a session active. Safe in handler context.
pub(crate) fn try_acquire() -> bool {
    ACTIVE
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
}

/// Clears the active mark so a later, independent crash is handled fully.
pub(crate) fn release() {
    ACTIVE.store(false, Ordering::Release);
}
