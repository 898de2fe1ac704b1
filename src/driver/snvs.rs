// SPDX-License-Identifier: MIT
//! SNVS Driver - Secure Non-Volatile Storage, high power domain status.

use tock_registers::{
    interfaces::Readable,
    register_bitfields, register_structs,
    registers::{ReadOnly, ReadWrite},
};

use crate::driver::{self, MMIODerefWrapper};

//--------------------------------------------------------------------------------------------------
// Private Definitions
//--------------------------------------------------------------------------------------------------

register_bitfields! {
    u32,

    /// SNVS_HP Status Register
    HPSR [
        SSM_STATE OFFSET(8) NUMBITS(4) [
            Init = 0b0000,
            HardFail = 0b0001,
            SoftFail = 0b0011,
            InitIntermediate = 0b1000,
            Check = 0b1001,
            NonSecure = 0b1011,
            Trusted = 0b1101,
            Secure = 0b1111
        ],
        SYS_SECURITY_CFG OFFSET(12) NUMBITS(3) []
    ]
}

register_structs! {
    #[allow(non_snake_case)]
    pub RegisterBlock {
        (0x000 => HPLR: ReadWrite<u32>),
        (0x004 => HPCOMR: ReadWrite<u32>),
        (0x008 => HPCR: ReadWrite<u32>),
        (0x00c => _reserved0),
        (0x014 => HPSR: ReadOnly<u32, HPSR::Register>),
        (0x018 => @END),
    }
}

/// Abstraction for the associated MMIO registers.
type Registers = MMIODerefWrapper<RegisterBlock>;

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// State of the System Security Monitor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SsmState {
    Init,
    HardFail,
    SoftFail,
    InitIntermediate,
    Check,
    NonSecure,
    Trusted,
    Secure,
    /// Encoding not documented for this SoC.
    Undefined(u32),
}

/// Representation of the secure storage block.
pub struct Snvs {
    registers: Registers,
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl Snvs {
    pub const COMPATIBLE: &'static str = "i.MX6UL SNVS";

    /// Create an instance.
    ///
    /// # Safety
    ///
    /// - The user must ensure to provide a correct MMIO start address.
    pub const unsafe fn new(mmio_start_addr: usize) -> Self {
        Self {
            registers: Registers::new(mmio_start_addr),
        }
    }

    /// Reads the current System Security Monitor state.
    ///
    /// The register is read on every call: the state moves when the boot ROM or a security
    /// violation changes it.
    pub fn ssm_state(&self) -> SsmState {
        use HPSR::SSM_STATE::Value;

        let hpsr = self.registers.HPSR.extract();

        match hpsr.read_as_enum(HPSR::SSM_STATE) {
            Some(Value::Init) => SsmState::Init,
            Some(Value::HardFail) => SsmState::HardFail,
            Some(Value::SoftFail) => SsmState::SoftFail,
            Some(Value::InitIntermediate) => SsmState::InitIntermediate,
            Some(Value::Check) => SsmState::Check,
            Some(Value::NonSecure) => SsmState::NonSecure,
            Some(Value::Trusted) => SsmState::Trusted,
            Some(Value::Secure) => SsmState::Secure,
            None => SsmState::Undefined(hpsr.read(HPSR::SSM_STATE)),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// OS Interface Code
//--------------------------------------------------------------------------------------------------

impl driver::interface::DeviceDriver for Snvs {
    fn compatible(&self) -> &'static str {
        Self::COMPATIBLE
    }
}
