// SPDX-License-Identifier: MIT
#[cfg(all(target_arch = "arm", target_os = "none"))]
#[path = "../arch/armv7/exception/asynchronous.rs"]
mod arch_asynchronous;

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub use arch_asynchronous::{
    is_local_irq_masked, local_irq_mask, local_irq_mask_save, local_irq_restore, local_irq_unmask,
};

/// Executes the provided closure with local interrupts masked.
///
/// On the bare-metal target this is backed by the CPSR based implementation in the arch
/// module; hosted builds use whatever `critical-section` implementation the binary links.
#[inline(always)]
pub fn exec_with_masked_irqs<T>(f: impl FnOnce() -> T) -> T {
    critical_section::with(|_| f())
}
