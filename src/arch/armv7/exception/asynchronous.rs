// SPDX-License-Identifier: MIT
//! Architectural asynchronous exception handling for ARMv7-A (Cortex-A7).

use core::arch::asm;

use critical_section::{set_impl, RawRestoreState};

// Public code
pub fn is_local_irq_masked() -> bool {
    read_cpsr() & cpsr_bits::I != 0
}

#[inline(always)]
pub fn local_irq_unmask() {
    unsafe {
        asm!("cpsie i", options(nomem, nostack, preserves_flags));
    }
}

#[inline(always)]
pub fn local_irq_mask() {
    unsafe {
        asm!("cpsid i", options(nomem, nostack, preserves_flags));
    }
}

/// Masks IRQs and reports whether they were unmasked before.
#[inline(always)]
pub fn local_irq_mask_save() -> bool {
    let was_unmasked = !is_local_irq_masked();
    local_irq_mask();

    was_unmasked
}

#[inline(always)]
pub fn local_irq_restore(was_unmasked: bool) {
    if was_unmasked {
        local_irq_unmask();
    }
}

struct CriticalSection;

set_impl!(CriticalSection);

unsafe impl critical_section::Impl for CriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        local_irq_mask_save()
    }

    unsafe fn release(restore_state: RawRestoreState) {
        local_irq_restore(restore_state);
    }
}

// Private code
mod cpsr_bits {
    pub const I: u32 = 1 << 7;
}

#[inline(always)]
fn read_cpsr() -> u32 {
    let cpsr: u32;
    unsafe {
        asm!("mrs {}, cpsr", out(reg) cpsr, options(nomem, nostack, preserves_flags));
    }

    cpsr
}
