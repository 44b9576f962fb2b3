//! Installation-time configuration flags.

use std::ops::{BitOr, BitOrAssign};

/// Bit-flag set supplied to [`crate::install_signal_handlers`] and
/// [`crate::trigger_debug`].
///
/// Held as process-wide state after installation so the signal handler can
/// read it without allocation or locking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugFlags(u32);

impl DebugFlags {
    /// Reserve a dedicated stack for signal delivery so handlers survive
    /// stack overflow.
    pub const ALT_STACK: Self = Self(1 << 0);

    /// After suspension, wait (bounded) for an external debugger to set the
    /// attach flag, then stop at a breakpoint.
    pub const WAIT_ATTACH: Self = Self(1 << 1);

    /// No flags set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Whether every flag in `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Raw bit representation, used for atomic process-wide storage.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Rebuild from the raw bit representation. Unknown bits are kept.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }
}

impl BitOr for DebugFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DebugFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_algebra() {
        let flags = DebugFlags::ALT_STACK | DebugFlags::WAIT_ATTACH;
        assert!(flags.contains(DebugFlags::ALT_STACK));
        assert!(flags.contains(DebugFlags::WAIT_ATTACH));
        assert!(!DebugFlags::empty().contains(DebugFlags::ALT_STACK));
        assert_eq!(DebugFlags::from_bits(flags.bits()), flags);
    }
}
