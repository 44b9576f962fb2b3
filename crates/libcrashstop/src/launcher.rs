//! Interface to the external debugger launcher.
//!
//! The core never spawns a debugger itself. A front end may register a
//! launch hook, which the suspension protocol invokes with the opaque
//! options string right before stopping the process. The launched debugger
//! signals successful attachment by setting [`CRASHSTOP_ATTACHED`] — either
//! through [`notify_attached`] from in-process code, or directly by symbol
//! from the debugger (`set CRASHSTOP_ATTACHED = 1`).

use std::sync::OnceLock;
use std::sync::atomic::{AtomicI32, Ordering};

/// Handshake word an attached debugger sets to let the crashed process
/// resume. Exported by symbol so it can be written from the debugger side.
#[unsafe(no_mangle)]
pub static CRASHSTOP_ATTACHED: AtomicI32 = AtomicI32::new(0);

/// Launch hook signature. Receives the options string passed at
/// installation and returns whether the launch was started.
///
/// The hook runs in signal-handler context and must restrict itself to
/// async-signal-safe operations (`fork`/`exec`, raw writes, atomics).
pub type LaunchFn = fn(opts: &str) -> bool;

static LAUNCHER: OnceLock<LaunchFn> = OnceLock::new();

/// Registers the launch hook. Only the first registration takes effect.
pub fn set_debugger_launcher(launch: LaunchFn) {
    let _ = LAUNCHER.set(launch);
}

/// Marks the debugger as attached, releasing a pending handshake wait.
pub fn notify_attached() {
    CRASHSTOP_ATTACHED.store(1, Ordering::Release);
}

pub(crate) fn get() -> Option<LaunchFn> {
    LAUNCHER.get().copied()
}

/// Consumes the attach flag if it has been set.
pub(crate) fn take_attached() -> bool {
    CRASHSTOP_ATTACHED
        .compare_exchange(1, 0, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
}
