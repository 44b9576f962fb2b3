//! Signal-safe diagnostic output.
//!
//! Everything here must remain callable from a signal handler with the rest
//! of the process assumed broken: one raw `write` syscall per message, no
//! allocation, no buffering, no formatting. This is the only output path the
//! handler is allowed to use.

use crate::state;

/// Start-of-message color marker (bold red), matching the fixed diagnostic
/// format on stderr.
pub(crate) const COLOR: &str = "\x1B[1;31m";
/// End-of-message color reset plus newline.
pub(crate) const RESET: &str = "\x1B[0m\n";

/// Writes the literal bytes directly to stderr.
///
/// Best effort: the return value is ignored since nothing deeper can be done
/// from handler context. Suppressed entirely when the quiet switch is set.
pub(crate) fn emit(msg: &str) {
    if state::quiet() {
        return;
    }
    unsafe {
        libc::write(libc::STDERR_FILENO, msg.as_ptr().cast(), msg.len());
    }
}

/// Emits a single diagnostic line bracketed by the fixed color markers.
pub(crate) fn emit_line(parts: &[&str]) {
    emit(COLOR);
    for part in parts {
        emit(part);
    }
    emit(RESET);
}
