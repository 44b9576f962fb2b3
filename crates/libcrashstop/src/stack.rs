//! Alternate signal stack provisioning.
//!
//! Reserves a static region large enough for the handler to run even when
//! the interrupted thread's stack is exhausted or corrupted, and registers
//! it with the kernel. Runs only at installation time, outside signal
//! context.

use std::ptr;

use nix::errno::Errno;

use crate::errors::{CrashStopError, CrashStopResult};

/// Size of the dedicated signal-delivery stack.
pub const SIG_STACK_SIZE: usize = 64 * 1024 * 1024;

#[repr(align(16))]
struct StackRegion([u8; SIG_STACK_SIZE]);

// Owned for the whole process lifetime; only ever handed to the kernel via
// sigaltstack, never read or written from Rust.
static mut SIG_STACK: StackRegion = StackRegion([0; SIG_STACK_SIZE]);

/// Registers the static region as the alternate signal stack.
///
/// On failure the caller proceeds without `SA_ONSTACK`: handlers then run on
/// the normal stack, which loses stack-overflow resilience but nothing else.
pub fn provision() -> CrashStopResult<()> {
    let ss = libc::stack_t {
        ss_sp: (&raw mut SIG_STACK).cast::<libc::c_void>(),
        ss_flags: 0,
        ss_size: SIG_STACK_SIZE,
    };
    let rc = unsafe { libc::sigaltstack(&ss, ptr::null_mut()) };
    if rc != 0 {
        return Err(CrashStopError::AltStack(Errno::last()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provision_registers_region() {
        provision().unwrap();

        let mut current = libc::stack_t {
            ss_sp: ptr::null_mut(),
            ss_flags: 0,
            ss_size: 0,
        };
        let rc = unsafe { libc::sigaltstack(ptr::null(), &mut current) };
        assert_eq!(rc, 0);
        assert_eq!(current.ss_size, SIG_STACK_SIZE);
    }
}
