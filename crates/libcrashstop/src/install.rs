//! Fatal-signal interception setup.
//!
//! Runs outside signal context, so ordinary error reporting through `log`
//! is permitted here — unlike everything reachable from the handler.

use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::errors::CrashStopError;
use crate::flags::DebugFlags;
use crate::{handler, stack, state};

/// The fixed set of intercepted fatal signals.
pub const FATAL_SIGNALS: [Signal; 6] = [
    Signal::SIGILL,
    Signal::SIGABRT,
    Signal::SIGFPE,
    Signal::SIGSEGV,
    Signal::SIGBUS,
    Signal::SIGSYS,
];

/// Installs the crash handler for every signal in [`FATAL_SIGNALS`].
///
/// Returns `false` immediately, with no side effects, when the facility is
/// disabled via `CRASHSTOP_DISABLED`. Otherwise the configuration is stored
/// process-wide, the alternate stack is provisioned when
/// [`DebugFlags::ALT_STACK`] is set (a rejected region degrades to running
/// handlers on the normal stack), and registration is attempted for every
/// signal in the set even when individual registrations fail. Returns `true`
/// whenever installation proceeded, partial failures included.
///
/// `opts` is an opaque string handed to the registered debugger launcher;
/// the core never interprets it. On a repeated installation the flags are
/// refreshed but the options string from the first call is kept.
pub fn install_signal_handlers(flags: DebugFlags, opts: &str) -> bool {
    state::init_from_env();
    if state::disabled() {
        return false;
    }

    state::set_config(flags, opts);

    let mut sa_flags = SaFlags::empty();
    if flags.contains(DebugFlags::ALT_STACK) {
        match stack::provision() {
            Ok(()) => sa_flags |= SaFlags::SA_ONSTACK,
            Err(err) => log::error!("{err}; handlers will run on the normal stack"),
        }
    }

    let action = SigAction::new(
        SigHandler::Handler(handler::crash_handler),
        sa_flags,
        SigSet::empty(),
    );
    for sig in FATAL_SIGNALS {
        log::debug!("installing crash handler for {sig}");
        if let Err(errno) = unsafe { signal::sigaction(sig, &action) } {
            let err = CrashStopError::Intercept {
                signal: sig,
                source: errno,
            };
            log::error!("{err}");
        }
    }

    state::set_installed();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    // Without ALT_STACK provisioning is skipped, which is the same degraded
    // path taken when sigaltstack rejects the region: installation proceeds
    // and every disposition in the set is still registered.
    #[test]
    fn installs_all_dispositions_without_alt_stack() {
        assert!(install_signal_handlers(DebugFlags::empty(), ""));

        let action = SigAction::new(
            SigHandler::Handler(handler::crash_handler),
            SaFlags::empty(),
            SigSet::empty(),
        );
        for sig in FATAL_SIGNALS {
            let previous = unsafe { signal::sigaction(sig, &action) }.expect("query disposition");
            assert_eq!(
                previous.handler(),
                SigHandler::Handler(handler::crash_handler),
                "disposition for {sig}"
            );
        }
    }
}
