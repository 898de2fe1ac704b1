// SPDX-License-Identifier: MIT
//! Clock gating and clock configuration capabilities.
//!
//! Drivers never poke the clock controller themselves. They receive one of the traits in
//! [`interface`] at construction and call it before their first register access.

pub use crate::bsp::imx6ul::clock::{ClockGate, Ccgr, GateField};

pub mod interface {
    use super::{ClockGate, GateSetting};
    use crate::error::ClockError;

    /// The clock-gate primitive every clock-gated driver uses before touching its registers.
    pub trait ClockGating {
        /// Switches the gate field to [`GateSetting::On`], leaving every other field of the
        /// shared control register untouched.
        fn enable_gate(&self, gate: ClockGate);

        /// Switches the gate field to [`GateSetting::Off`].
        fn disable_gate(&self, gate: ClockGate);

        /// Reads back the current setting of the gate field.
        fn gate_setting(&self, gate: ClockGate) -> GateSetting;
    }

    /// Narrow clock configuration hooks handed to the drivers that need them.
    pub trait ClockControl {
        /// Returns the UART serial clock in Hz.
        fn uart_clock(&self) -> u32;

        /// Sets the post divider and clock source of an SD/MMC controller.
        fn set_usdhc_clock(&self, index: u8, podf: u32, clksel: u32) -> Result<(), ClockError>;

        /// Powers up and locks the 480 MHz PLL feeding a USB controller.
        fn enable_usb_pll(&self, index: u8) -> Result<(), ClockError>;
    }
}

/// Width of a single CCGR gate field.
pub const GATE_FIELD_WIDTH: u32 = 2;

const GATE_FIELD_MASK: u32 = 0b11;

/// Encodings of a 2-bit CCGR gate field.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GateSetting {
    /// Clock is off in all modes.
    Off,
    /// Clock is on in run mode, off in WAIT and STOP.
    RunOnly,
    /// Encoding `0b10`, not used by the hardware.
    Reserved,
    /// Clock is on in all modes except STOP.
    On,
}

impl GateSetting {
    pub const fn bits(self) -> u32 {
        match self {
            GateSetting::Off => 0b00,
            GateSetting::RunOnly => 0b01,
            GateSetting::Reserved => 0b10,
            GateSetting::On => 0b11,
        }
    }

    pub const fn from_bits(bits: u32) -> Self {
        match bits & GATE_FIELD_MASK {
            0b00 => GateSetting::Off,
            0b01 => GateSetting::RunOnly,
            0b10 => GateSetting::Reserved,
            _ => GateSetting::On,
        }
    }
}

/// Returns `value` with the gate field at `bit_position` replaced by `setting`.
///
/// Only bits `[bit_position, bit_position + 1]` differ between input and output.
pub const fn with_gate_setting(value: u32, bit_position: u32, setting: GateSetting) -> u32 {
    let mask = GATE_FIELD_MASK << bit_position;

    (value & !mask) | (setting.bits() << bit_position)
}

/// Extracts the gate field at `bit_position` from a CCGR value.
pub const fn gate_setting_of(value: u32, bit_position: u32) -> GateSetting {
    GateSetting::from_bits(value >> bit_position)
}
