//! Process-wide installation state.
//!
//! Signal handlers cannot receive ordinary call parameters, so the
//! configuration captured at install time lives in process-scoped statics:
//! written once, outside signal context, and thereafter only read (atomic
//! loads, no allocation) from the handler path.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::flags::DebugFlags;

/// Environment opt-out: when set, installation and triggering are no-ops.
pub const DISABLED_ENV: &str = "CRASHSTOP_DISABLED";
/// Environment switch suppressing all signal-safe diagnostics.
pub const QUIET_ENV: &str = "CRASHSTOP_QUIET";

static FLAGS: AtomicU32 = AtomicU32::new(0);
static OPTS: OnceLock<String> = OnceLock::new();
static DISABLED: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);
static INSTALLED: AtomicBool = AtomicBool::new(false);
static ENV_READ: AtomicBool = AtomicBool::new(false);

/// Reads the administrative switches from the environment, once.
///
/// Must be called outside signal context (`getenv` is not signal-safe);
/// installation is the designated call site.
pub(crate) fn init_from_env() {
    if ENV_READ.swap(true, Ordering::AcqRel) {
        return;
    }
    DISABLED.store(env_switch(DISABLED_ENV), Ordering::Release);
    QUIET.store(env_switch(QUIET_ENV), Ordering::Release);
}

fn env_switch(name: &str) -> bool {
    matches!(std::env::var(name), Ok(v) if !v.is_empty() && v != "0")
}

/// Stores the debug configuration. The options string is kept only on the
/// first call; flags are refreshed.
pub(crate) fn set_config(flags: DebugFlags, opts: &str) {
    FLAGS.store(flags.bits(), Ordering::Release);
    if OPTS.set(opts.to_owned()).is_err() && OPTS.get().is_some_and(|kept| kept != opts) {
        log::debug!("launcher options already set; keeping the first value");
    }
}

pub(crate) fn flags() -> DebugFlags {
    DebugFlags::from_bits(FLAGS.load(Ordering::Acquire))
}

pub(crate) fn opts() -> &'static str {
    OPTS.get().map(String::as_str).unwrap_or("")
}

pub(crate) fn disabled() -> bool {
    DISABLED.load(Ordering::Acquire)
}

pub(crate) fn quiet() -> bool {
    QUIET.load(Ordering::Acquire)
}

pub(crate) fn set_installed() {
    INSTALLED.store(true, Ordering::Release);
}

/// Whether [`crate::install_signal_handlers`] has completed at least once.
pub fn installed() -> bool {
    INSTALLED.load(Ordering::Acquire)
}

#[cfg(test)]
pub(crate) fn set_disabled_for_test(value: bool) {
    DISABLED.store(value, Ordering::Release);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_string_frozen_after_first_install() {
        set_config(DebugFlags::ALT_STACK, "gdb:xterm");
        let first = opts().to_owned();
        set_config(DebugFlags::empty(), "ddd");
        assert_eq!(opts(), first);
    }
}
