// SPDX-License-Identifier: MIT
//! OCOTP Driver - On-Chip OTP controller, read access through the shadow registers.

use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use tock_registers::{
    interfaces::{Readable, Writeable},
    register_bitfields, register_structs,
    registers::{ReadOnly, ReadWrite, WriteOnly},
};

use crate::bsp::imx6ul::mem::MmioMap;
use crate::clock::interface::ClockGating;
use crate::clock::ClockGate;
use crate::driver::{self, poll_until, DriverMetadata, MMIODerefWrapper, PeripheralDescriptor};
use crate::error::{FuseError, RegistryError};
use crate::sync::interface::Mutex;
use crate::sync::IRQSafeSpinLock;

//--------------------------------------------------------------------------------------------------
// Private Definitions
//--------------------------------------------------------------------------------------------------

register_bitfields! {
    u32,

    /// OTP Controller Control Register
    CTRL [
        ADDR OFFSET(0) NUMBITS(7) [],
        BUSY OFFSET(8) NUMBITS(1) [],
        ERROR OFFSET(9) NUMBITS(1) [],
        RELOAD_SHADOWS OFFSET(10) NUMBITS(1) [],
        WR_UNLOCK OFFSET(16) NUMBITS(16) []
    ]
}

register_structs! {
    #[allow(non_snake_case)]
    pub RegisterBlock {
        (0x000 => CTRL: ReadOnly<u32, CTRL::Register>),
        (0x004 => CTRL_SET: WriteOnly<u32, CTRL::Register>),
        (0x008 => CTRL_CLR: WriteOnly<u32, CTRL::Register>),
        (0x00c => CTRL_TOG: WriteOnly<u32, CTRL::Register>),
        (0x010 => TIMING: ReadWrite<u32>),
        (0x014 => _reserved0),
        (0x090 => VERSION: ReadOnly<u32>),
        (0x094 => @END),
    }
}

register_structs! {
    /// One fuse word as mirrored by the controller, on a 16 byte stride.
    pub ShadowWord {
        (0x000 => value: ReadOnly<u32>),
        (0x004 => _reserved0),
        (0x010 => @END),
    }
}

register_structs! {
    #[allow(non_snake_case)]
    pub ShadowBlock {
        (0x000 => WORD: [ShadowWord; 128]),
        (0x800 => @END),
    }
}

/// Abstraction for the associated MMIO registers.
type Registers = MMIODerefWrapper<RegisterBlock>;
type Shadows = MMIODerefWrapper<ShadowBlock>;

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Number of fuse banks.
pub const BANK_COUNT: usize = 16;

/// Number of 32-bit words per bank.
pub const WORDS_PER_BANK: usize = 8;

/// Number of `CTRL.BUSY` polls before an access is abandoned.
pub const BUSY_POLL_LIMIT: usize = 0x1_0000;

/// Representation of the fuse box controller.
pub struct Ocotp<'c> {
    registers: Registers,
    shadows: Shadows,
    gate: ClockGate,
    clocks: &'c (dyn ClockGating + Sync),
    initialized: AtomicBool,
    lock: IRQSafeSpinLock<()>,
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl<'c> Ocotp<'c> {
    pub const COMPATIBLE: &'static str = "i.MX6UL OCOTP";

    /// Create an instance.
    ///
    /// # Safety
    ///
    /// - The user must ensure to provide correct MMIO start addresses for the controller and
    ///   its shadow register bank.
    pub const unsafe fn new(
        mmio_start_addr: usize,
        bank_start_addr: usize,
        gate: ClockGate,
        clocks: &'c (dyn ClockGating + Sync),
    ) -> Self {
        Self {
            registers: Registers::new(mmio_start_addr),
            shadows: Shadows::new(bank_start_addr),
            gate,
            clocks,
            initialized: AtomicBool::new(false),
            lock: IRQSafeSpinLock::new(()),
        }
    }

    /// Create an instance from its registry entry.
    pub fn from_descriptor(
        mmio: &MmioMap,
        descriptor: &PeripheralDescriptor,
        clocks: &'c (dyn ClockGating + Sync),
    ) -> Result<Self, RegistryError> {
        let missing = RegistryError::MissingMetadata {
            name: descriptor.name(),
        };

        let bank_base = match descriptor.metadata() {
            DriverMetadata::FuseBank { bank_base } => bank_base,
            _ => return Err(missing),
        };
        let gate = descriptor.clock_gate().ok_or(missing)?;

        // Safety: both addresses come from the peripheral table and go through the map.
        Ok(unsafe {
            Self::new(
                mmio.virt(descriptor.base()),
                mmio.virt(bank_base),
                gate,
                clocks,
            )
        })
    }

    /// Enables the controller clock and waits for it to settle.
    ///
    /// The gate is switched on at every call, so a clock disabled behind the driver's back is
    /// restored. A leftover error flag from an earlier access is cleared on first use.
    pub fn init(&self) -> Result<(), FuseError> {
        self.clocks.enable_gate(self.gate);

        if self.is_initialized() {
            return Ok(());
        }

        self.wait_idle()?;

        self.lock.lock(|_| {
            if self.initialized.load(Ordering::Acquire) {
                return Ok(());
            }

            self.wait_idle()?;
            self.clear_error();

            self.initialized.store(true, Ordering::Release);
            debug!("ready, version {:#010x}", self.registers.VERSION.get());

            Ok(())
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Reads one fuse word from its shadow register.
    ///
    /// Waiting for a busy controller happens before interrupts are masked. Only the final
    /// check and the shadow read run under the lock.
    pub fn read(&self, bank: usize, word: usize) -> Result<u32, FuseError> {
        if bank >= BANK_COUNT || word >= WORDS_PER_BANK {
            return Err(FuseError::InvalidAddress { bank, word });
        }

        if !self.is_initialized() {
            return Err(FuseError::NotInitialized);
        }

        self.clocks.enable_gate(self.gate);
        self.wait_idle()?;

        self.lock.lock(|_| {
            self.wait_idle()?;
            self.clear_error();

            Ok(self.shadows.WORD[bank * WORDS_PER_BANK + word].value.get())
        })
    }

    fn wait_idle(&self) -> Result<(), FuseError> {
        if poll_until(BUSY_POLL_LIMIT, || !self.registers.CTRL.is_set(CTRL::BUSY)) {
            return Ok(());
        }

        warn!("controller busy after {} polls", BUSY_POLL_LIMIT);
        Err(FuseError::Timeout {
            polls: BUSY_POLL_LIMIT,
        })
    }

    fn clear_error(&self) {
        if self.registers.CTRL.is_set(CTRL::ERROR) {
            self.registers.CTRL_CLR.write(CTRL::ERROR::SET);
        }
    }
}

//--------------------------------------------------------------------------------------------------
// OS Interface Code
//--------------------------------------------------------------------------------------------------

impl driver::interface::DeviceDriver for Ocotp<'_> {
    fn compatible(&self) -> &'static str {
        Self::COMPATIBLE
    }

    fn init(&self) -> Result<(), crate::error::Error> {
        Ocotp::init(self).map_err(Into::into)
    }
}
