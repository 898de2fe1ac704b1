// SPDX-License-Identifier: MIT
use core::fmt::Formatter;
use core::marker::PhantomData;
use core::{fmt, ops};

/// A wrapper for usize with an integrated range bound check.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BoundedUsize<const MAX_INCLUSIVE: usize>(usize);

/// Typed view over a register block living at a fixed (virtual) address.
pub struct MMIODerefWrapper<T> {
    start_addr: usize,
    phantom: PhantomData<fn() -> T>,
}

impl<T> MMIODerefWrapper<T> {
    /// Create an instance.
    ///
    /// # Safety
    ///
    /// - `start_addr` must point to a mapped, suitably aligned region at least
    ///   `size_of::<T>()` bytes long for as long as the wrapper is used.
    pub const unsafe fn new(start_addr: usize) -> Self {
        Self {
            start_addr,
            phantom: PhantomData,
        }
    }

    /// The address the register block is accessed at.
    pub const fn start_addr(&self) -> usize {
        self.start_addr
    }
}

impl<T> ops::Deref for MMIODerefWrapper<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        unsafe { &*(self.start_addr as *const _) }
    }
}

impl<const MAX_INCLUSIVE: usize> BoundedUsize<{ MAX_INCLUSIVE }> {
    pub const MAX_INCLUSIVE: usize = MAX_INCLUSIVE;

    /// Create an instance.
    ///
    /// Out-of-range values fail const evaluation when used in a constant.
    pub const fn new(value: usize) -> Self {
        assert!(value <= MAX_INCLUSIVE);
        Self(value)
    }

    /// Create an instance, returning `None` if `value` is out of range.
    pub const fn checked(value: usize) -> Option<Self> {
        if value <= MAX_INCLUSIVE {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the value.
    pub const fn get(&self) -> usize {
        self.0
    }
}

/// Spins until `done` returns true, giving up after `limit` checks.
///
/// Returns whether the condition was met.
pub fn poll_until(limit: usize, mut done: impl FnMut() -> bool) -> bool {
    for _ in 0..limit {
        if done() {
            return true;
        }
        core::hint::spin_loop();
    }

    false
}

impl<const MAX_INCLUSIVE: usize> fmt::Display for BoundedUsize<{ MAX_INCLUSIVE }> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
