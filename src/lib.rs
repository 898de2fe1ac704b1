// SPDX-License-Identifier: MIT
//! Board support for the NXP i.MX6UL and i.MX6ULL.
//!
//! Provides the peripheral registry with base addresses and clock gates, the clock controller
//! primitives drivers rely on, and the chip identity and secure boot state accessors.
//!
//! Typical start-up:
//!
//! ```ignore
//! let mmio = unsafe { MmioMap::identity() };
//! let clocks = unsafe { Ccm::new(&mmio) };
//! let soc = Soc::bring_up(mmio, &clocks, ChipFamily::Imx6ull)?;
//!
//! log::info!("{} {}", soc.model(), soc.silicon_version());
//! ```
#![cfg_attr(not(test), no_std)]

pub mod bsp;
pub mod clock;
pub mod console;
pub mod driver;
pub mod error;
pub mod exception;
pub mod print;
pub mod sync;

pub use bsp::imx6ul::identity::{ChipFamily, SiliconVersion, UniqueId};
pub use bsp::imx6ul::mem::MmioMap;
pub use bsp::imx6ul::security::SecurityState;
pub use bsp::imx6ul::Soc;
pub use driver::ccm::Ccm;
pub use error::{Error, Result};
