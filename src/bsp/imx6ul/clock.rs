// SPDX-License-Identifier: MIT
//! Clock gate table (p656, 18.6 CCM Memory Map/Register Definition, IMX6ULLRM).

use core::fmt;

use crate::bsp::imx6ul::driver::PeripheralId;
use crate::bsp::imx6ul::mem::map::mmio;
use crate::clock::GATE_FIELD_WIDTH;
use crate::driver::BoundedUsize;

//--------------------------------------------------------------------------------------------------
// Public definitions
//--------------------------------------------------------------------------------------------------
#[rustfmt::skip]
pub mod ccm {
    use super::mmio;

    pub const CCM_CSCMR1:      usize = mmio::CCM_BASE + 0x1c;
    pub const CCM_CSCDR1:      usize = mmio::CCM_BASE + 0x24;

    pub const CCM_CCGR0:       usize = mmio::CCM_BASE + 0x68;
    pub const CCM_CCGR1:       usize = mmio::CCM_BASE + 0x6c;
    pub const CCM_CCGR2:       usize = mmio::CCM_BASE + 0x70;
    pub const CCM_CCGR3:       usize = mmio::CCM_BASE + 0x74;
    pub const CCM_CCGR4:       usize = mmio::CCM_BASE + 0x78;
    pub const CCM_CCGR5:       usize = mmio::CCM_BASE + 0x7c;
    pub const CCM_CCGR6:       usize = mmio::CCM_BASE + 0x80;

    pub const CCM_ANALOG_PLL_USB1: usize = mmio::CCM_ANALOG_BASE + 0x10;
    pub const CCM_ANALOG_PLL_USB2: usize = mmio::CCM_ANALOG_BASE + 0x20;

    /// 24 MHz crystal oscillator.
    pub const OSC_FREQ:        u32 = 24_000_000;
    /// PLL3 (USB1 PLL) output.
    pub const PLL3_FREQ:       u32 = 480_000_000;
}

/// Number of CCGR registers.
pub const CCGR_COUNT: usize = 7;

/// One of the CCM clock gating registers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Ccgr {
    Ccgr0,
    Ccgr1,
    Ccgr2,
    Ccgr3,
    Ccgr4,
    Ccgr5,
    Ccgr6,
}

/// Index of a 2-bit field (CG0..CG15) within a CCGR register.
pub type GateField = BoundedUsize<15>;

/// Clock gate reference: control register plus gate field.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ClockGate {
    register: Ccgr,
    field: GateField,
}

#[rustfmt::skip]
pub mod cg {
    use super::GateField;

    pub const CG0:  GateField = GateField::new(0);
    pub const CG1:  GateField = GateField::new(1);
    pub const CG2:  GateField = GateField::new(2);
    pub const CG3:  GateField = GateField::new(3);
    pub const CG4:  GateField = GateField::new(4);
    pub const CG5:  GateField = GateField::new(5);
    pub const CG6:  GateField = GateField::new(6);
    pub const CG7:  GateField = GateField::new(7);
    pub const CG8:  GateField = GateField::new(8);
    pub const CG9:  GateField = GateField::new(9);
    pub const CG10: GateField = GateField::new(10);
    pub const CG11: GateField = GateField::new(11);
    pub const CG12: GateField = GateField::new(12);
    pub const CG13: GateField = GateField::new(13);
    pub const CG14: GateField = GateField::new(14);
    pub const CG15: GateField = GateField::new(15);
}

/// The clock gates of the peripherals handled by this board support package.
#[rustfmt::skip]
pub mod gates {
    use super::{cg, Ccgr, ClockGate};

    pub const CSU:    ClockGate = ClockGate::new(Ccgr::Ccgr1, cg::CG14);
    pub const I2C1:   ClockGate = ClockGate::new(Ccgr::Ccgr2, cg::CG3);
    pub const I2C2:   ClockGate = ClockGate::new(Ccgr::Ccgr2, cg::CG5);
    pub const OCOTP:  ClockGate = ClockGate::new(Ccgr::Ccgr2, cg::CG6);
    /// Shared by both USB OTG controllers.
    pub const USBOH3: ClockGate = ClockGate::new(Ccgr::Ccgr6, cg::CG0);
    pub const USDHC1: ClockGate = ClockGate::new(Ccgr::Ccgr6, cg::CG1);
    pub const USDHC2: ClockGate = ClockGate::new(Ccgr::Ccgr6, cg::CG2);
}

//--------------------------------------------------------------------------------------------------
// Public code
//--------------------------------------------------------------------------------------------------
impl Ccgr {
    pub const ALL: [Ccgr; CCGR_COUNT] = [
        Ccgr::Ccgr0,
        Ccgr::Ccgr1,
        Ccgr::Ccgr2,
        Ccgr::Ccgr3,
        Ccgr::Ccgr4,
        Ccgr::Ccgr5,
        Ccgr::Ccgr6,
    ];

    /// Physical address of the register.
    pub const fn address(self) -> usize {
        match self {
            Ccgr::Ccgr0 => ccm::CCM_CCGR0,
            Ccgr::Ccgr1 => ccm::CCM_CCGR1,
            Ccgr::Ccgr2 => ccm::CCM_CCGR2,
            Ccgr::Ccgr3 => ccm::CCM_CCGR3,
            Ccgr::Ccgr4 => ccm::CCM_CCGR4,
            Ccgr::Ccgr5 => ccm::CCM_CCGR5,
            Ccgr::Ccgr6 => ccm::CCM_CCGR6,
        }
    }

    /// Position of the register in the CCGR bank.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl ClockGate {
    pub const fn new(register: Ccgr, field: GateField) -> Self {
        Self { register, field }
    }

    pub const fn register(&self) -> Ccgr {
        self.register
    }

    /// Physical address of the control register holding this gate.
    pub const fn register_address(&self) -> usize {
        self.register.address()
    }

    /// Position of the least significant bit of the gate field: one of 0, 2, .., 30.
    pub const fn bit_position(&self) -> u32 {
        self.field.get() as u32 * GATE_FIELD_WIDTH
    }
}

impl fmt::Display for ClockGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CCGR{} CG{}", self.register.index(), self.field)
    }
}

/// Looks up the clock gate of a peripheral, `None` for peripherals that are always clocked.
pub const fn gate_of(id: PeripheralId) -> Option<ClockGate> {
    match id {
        PeripheralId::Csu => Some(gates::CSU),
        PeripheralId::I2c1 => Some(gates::I2C1),
        PeripheralId::I2c2 => Some(gates::I2C2),
        PeripheralId::Ocotp => Some(gates::OCOTP),
        PeripheralId::Usb1 | PeripheralId::Usb2 => Some(gates::USBOH3),
        PeripheralId::Usdhc1 => Some(gates::USDHC1),
        PeripheralId::Usdhc2 => Some(gates::USDHC2),
        PeripheralId::Dcp
        | PeripheralId::Gic
        | PeripheralId::Gpio1
        | PeripheralId::Gpio2
        | PeripheralId::Gpio3
        | PeripheralId::Gpio4
        | PeripheralId::Gpio5
        | PeripheralId::Rngb
        | PeripheralId::Snvs
        | PeripheralId::Tzasc
        | PeripheralId::Uart1
        | PeripheralId::Uart2
        | PeripheralId::Digprog => None,
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_table_matches_datasheet() {
        assert_eq!(gates::CSU.register_address(), 0x020c_406c);
        assert_eq!(gates::CSU.bit_position(), 28);
        assert_eq!(gates::OCOTP.register_address(), 0x020c_4070);
        assert_eq!(gates::OCOTP.bit_position(), 12);
        assert_eq!(gates::USDHC2.register_address(), 0x020c_4080);
        assert_eq!(gates::USDHC2.bit_position(), 4);
    }

    #[test]
    fn usb_controllers_share_one_gate() {
        assert_eq!(gate_of(PeripheralId::Usb1), gate_of(PeripheralId::Usb2));
    }

    #[test]
    fn ungated_peripherals_have_no_gate() {
        assert_eq!(gate_of(PeripheralId::Snvs), None);
        assert_eq!(gate_of(PeripheralId::Digprog), None);
    }

    #[test]
    fn ccgr_registers_are_consecutive_words() {
        for (i, ccgr) in Ccgr::ALL.iter().enumerate() {
            assert_eq!(ccgr.index(), i);
            assert_eq!(ccgr.address(), ccm::CCM_CCGR0 + 4 * i);
        }
    }

    #[test]
    fn bit_positions_are_even_and_in_range() {
        assert_eq!(ClockGate::new(Ccgr::Ccgr0, cg::CG0).bit_position(), 0);
        assert_eq!(ClockGate::new(Ccgr::Ccgr0, cg::CG15).bit_position(), 30);
    }

    #[test]
    fn display_names_register_and_field() {
        assert_eq!(gates::I2C2.to_string(), "CCGR2 CG5");
    }
}
