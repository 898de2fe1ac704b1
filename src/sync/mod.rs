// SPDX-License-Identifier: MIT
mod irq_safe_spin;

pub mod interface;

pub use self::irq_safe_spin::*;
