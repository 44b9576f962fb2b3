//! Core library for the crashstop crash-interception facility.
//!
//! Installs handlers for the fatal signals (SIGILL, SIGABRT, SIGFPE,
//! SIGSEGV, SIGBUS, SIGSYS) that report the signal on stderr using only
//! async-signal-safe primitives and then stop the process with SIGSTOP, so
//! a debugger can be attached post mortem instead of the process dying
//! under the default action.
//!
//! The API is split in two tiers. [`install_signal_handlers`] and the other
//! setup entry points run outside signal context and may use ordinary
//! logging and error reporting. Everything reachable from the installed
//! handler — the [`handler`] session, [`emit`], the session guard, the
//! launcher hook — is restricted by construction to raw writes, atomics and
//! `raise`.

pub mod errors;
pub mod flags;
pub mod install;
pub mod launcher;
pub mod stack;
pub mod state;

mod emit;
mod handler;
mod session;

pub use errors::{CrashStopError, CrashStopResult};
pub use flags::DebugFlags;
pub use handler::trigger_debug;
pub use install::{FATAL_SIGNALS, install_signal_handlers};
pub use launcher::{notify_attached, set_debugger_launcher};
pub use state::installed;

/// Exposes the crate version for CLI reporting.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
