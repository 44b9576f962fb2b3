//! Error taxonomy for the crash-interception core.
//!
//! These errors only ever surface outside signal context (installation
//! time); handler-path failures are reported through the signal-safe
//! emitter or swallowed, since nothing can be raised there.

use nix::errno::Errno;
use nix::sys::signal::Signal;
use thiserror::Error;

/// Unified result type across the crash-interception core.
pub type CrashStopResult<T> = Result<T, CrashStopError>;

/// Error cases
#[derive(Debug, Error)]
pub enum CrashStopError {
    /// The kernel rejected the alternate signal stack region.
    #[error("failed to register alternate signal stack: {0}")]
    AltStack(#[source] Errno),

    /// A single signal in the fatal set could not be intercepted.
    #[error("failed to intercept signal {signal}: {source}")]
    Intercept {
        signal: Signal,
        #[source]
        source: Errno,
    },
}
