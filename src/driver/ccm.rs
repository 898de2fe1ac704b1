// SPDX-License-Identifier: MIT
//! CCM Driver - Clock Controller Module and the USB PLLs of the analog block.

use log::warn;
use tock_registers::{
    interfaces::{ReadWriteable, Readable, Writeable},
    register_bitfields, register_structs,
    registers::ReadWrite,
};

use crate::bsp::imx6ul::clock::{ccm, CCGR_COUNT};
use crate::bsp::imx6ul::mem::{map, MmioMap};
use crate::clock::interface::{ClockControl, ClockGating};
use crate::clock::{gate_setting_of, with_gate_setting, ClockGate, GateSetting};
use crate::driver::{self, poll_until, MMIODerefWrapper};
use crate::error::ClockError;
use crate::sync::interface::Mutex;
use crate::sync::IRQSafeSpinLock;

//--------------------------------------------------------------------------------------------------
// Private Definitions
//--------------------------------------------------------------------------------------------------

register_bitfields! {
    u32,

    /// CCM Serial Clock Multiplexer Register 1
    CSCMR1 [
        USDHC1_CLK_SEL OFFSET(16) NUMBITS(1) [],
        USDHC2_CLK_SEL OFFSET(17) NUMBITS(1) []
    ],

    /// CCM Serial Clock Divider Register 1
    CSCDR1 [
        UART_CLK_PODF OFFSET(0) NUMBITS(6) [],
        UART_CLK_SEL OFFSET(6) NUMBITS(1) [
            Pll3Div6 = 0,
            Osc = 1
        ],
        USDHC1_PODF OFFSET(11) NUMBITS(3) [],
        USDHC2_PODF OFFSET(16) NUMBITS(3) []
    ],

    /// Analog USB PLL Control Register
    PLL_USB [
        EN_USB_CLKS OFFSET(6) NUMBITS(1) [],
        POWER OFFSET(12) NUMBITS(1) [],
        ENABLE OFFSET(13) NUMBITS(1) [],
        BYPASS OFFSET(16) NUMBITS(1) [],
        LOCK OFFSET(31) NUMBITS(1) []
    ]
}

register_structs! {
    #[allow(non_snake_case)]
    pub RegisterBlock {
        (0x000 => _reserved0),
        (0x01c => CSCMR1: ReadWrite<u32, CSCMR1::Register>),
        (0x020 => _reserved1),
        (0x024 => CSCDR1: ReadWrite<u32, CSCDR1::Register>),
        (0x028 => _reserved2),
        (0x068 => CCGR: [ReadWrite<u32>; 7]),
        (0x084 => @END),
    }
}

register_structs! {
    #[allow(non_snake_case)]
    pub AnalogRegisterBlock {
        (0x000 => _reserved0),
        (0x010 => PLL_USB1: ReadWrite<u32, PLL_USB::Register>),
        (0x014 => _reserved1),
        (0x020 => PLL_USB2: ReadWrite<u32, PLL_USB::Register>),
        (0x024 => @END),
    }
}

/// Abstraction for the associated MMIO registers.
type Registers = MMIODerefWrapper<RegisterBlock>;
type AnalogRegisters = MMIODerefWrapper<AnalogRegisterBlock>;

const UNLOCKED: IRQSafeSpinLock<()> = IRQSafeSpinLock::new(());

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Number of lock polls before a PLL is declared dead.
pub const PLL_LOCK_POLL_LIMIT: usize = 0x1_0000;

/// Representation of the clock controller.
///
/// Every shared control register has its own lock: one per CCGR register, one for the
/// serial clock root registers and one per USB PLL.
pub struct Ccm {
    registers: Registers,
    analog: AnalogRegisters,
    gate_locks: [IRQSafeSpinLock<()>; CCGR_COUNT],
    root_lock: IRQSafeSpinLock<()>,
    pll_locks: [IRQSafeSpinLock<()>; 2],
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl Ccm {
    pub const COMPATIBLE: &'static str = "i.MX6UL CCM";

    /// Create an instance.
    ///
    /// # Safety
    ///
    /// - At most one instance may exist per address space. The gate and divider locks live in
    ///   the instance, so a second one would race on the shared control registers.
    pub unsafe fn new(mmio: &MmioMap) -> Self {
        Self {
            registers: mmio.registers(map::mmio::CCM_BASE),
            analog: mmio.registers(map::mmio::CCM_ANALOG_BASE),
            gate_locks: [UNLOCKED; CCGR_COUNT],
            root_lock: UNLOCKED,
            pll_locks: [UNLOCKED; 2],
        }
    }

    fn set_gate(&self, gate: ClockGate, setting: GateSetting) {
        let index = gate.register().index();
        let ccgr = &self.registers.CCGR[index];

        self.gate_locks[index].lock(|_| {
            let value = ccgr.get();
            ccgr.set(with_gate_setting(value, gate.bit_position(), setting));
        });
    }

    fn pll(&self, index: u8) -> Result<&ReadWrite<u32, PLL_USB::Register>, ClockError> {
        match index {
            1 => Ok(&self.analog.PLL_USB1),
            2 => Ok(&self.analog.PLL_USB2),
            _ => Err(ClockError::InvalidIndex { index }),
        }
    }
}

impl ClockGating for Ccm {
    fn enable_gate(&self, gate: ClockGate) {
        self.set_gate(gate, GateSetting::On);
    }

    fn disable_gate(&self, gate: ClockGate) {
        self.set_gate(gate, GateSetting::Off);
    }

    fn gate_setting(&self, gate: ClockGate) -> GateSetting {
        let value = self.registers.CCGR[gate.register().index()].get();

        gate_setting_of(value, gate.bit_position())
    }
}

impl ClockControl for Ccm {
    fn uart_clock(&self) -> u32 {
        let cscdr1 = self.registers.CSCDR1.extract();

        let freq = match cscdr1.read_as_enum(CSCDR1::UART_CLK_SEL) {
            Some(CSCDR1::UART_CLK_SEL::Value::Osc) => ccm::OSC_FREQ,
            // static /6 divider after PLL3 (p630, Figure 18-3. Clock Tree - Part 2, IMX6ULLRM)
            _ => ccm::PLL3_FREQ / 6,
        };

        freq / (cscdr1.read(CSCDR1::UART_CLK_PODF) + 1)
    }

    fn set_usdhc_clock(&self, index: u8, podf: u32, clksel: u32) -> Result<(), ClockError> {
        if podf > 0b111 {
            return Err(ClockError::DividerOutOfRange { podf });
        }

        if clksel > 1 {
            return Err(ClockError::SelectorOutOfRange { clksel });
        }

        let (podf_field, clksel_field) = match index {
            1 => (CSCDR1::USDHC1_PODF, CSCMR1::USDHC1_CLK_SEL),
            2 => (CSCDR1::USDHC2_PODF, CSCMR1::USDHC2_CLK_SEL),
            _ => return Err(ClockError::InvalidIndex { index }),
        };

        self.root_lock.lock(|_| {
            self.registers.CSCDR1.modify(podf_field.val(podf));
            self.registers.CSCMR1.modify(clksel_field.val(clksel));
        });

        Ok(())
    }

    /// The lock wait runs with interrupts enabled; only the register updates before and
    /// after it hold the PLL lock.
    fn enable_usb_pll(&self, index: u8) -> Result<(), ClockError> {
        let pll = self.pll(index)?;
        let lock = &self.pll_locks[usize::from(index - 1)];

        lock.lock(|_| {
            pll.modify(PLL_USB::POWER::SET);
            pll.modify(PLL_USB::EN_USB_CLKS::SET);
        });

        if !poll_until(PLL_LOCK_POLL_LIMIT, || pll.is_set(PLL_USB::LOCK)) {
            warn!("USB PLL{} did not lock", index);
            return Err(ClockError::PllLockTimeout { index });
        }

        lock.lock(|_| {
            pll.modify(PLL_USB::BYPASS::CLEAR);
            pll.modify(PLL_USB::ENABLE::SET);
        });

        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// OS Interface Code
//--------------------------------------------------------------------------------------------------

impl driver::interface::DeviceDriver for Ccm {
    fn compatible(&self) -> &'static str {
        Self::COMPATIBLE
    }
}
