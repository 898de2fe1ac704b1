// SPDX-License-Identifier: MIT
//! Board peripheral table and registry population.

use log::debug;

use crate::bsp::imx6ul::clock::gate_of;
use crate::bsp::imx6ul::identity::ChipFamily;
use crate::bsp::imx6ul::mem::{address_of, map::mmio};
use crate::driver::{DriverMetadata, PeripheralDescriptor, PeripheralFlags, PeripheralRegistry};
use crate::error::RegistryError;

//--------------------------------------------------------------------------------------------------
// Public definitions
//--------------------------------------------------------------------------------------------------
/// Every peripheral the board support package knows a base address for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PeripheralId {
    Csu,
    Dcp,
    Gic,
    Gpio1,
    Gpio2,
    Gpio3,
    Gpio4,
    Gpio5,
    I2c1,
    I2c2,
    Ocotp,
    Rngb,
    Snvs,
    Tzasc,
    Uart1,
    Uart2,
    Usb1,
    Usb2,
    Usdhc1,
    Usdhc2,
    Digprog,
}

//--------------------------------------------------------------------------------------------------
// Public code
//--------------------------------------------------------------------------------------------------
impl PeripheralId {
    pub const COUNT: usize = 21;

    pub const ALL: [PeripheralId; Self::COUNT] = [
        PeripheralId::Csu,
        PeripheralId::Dcp,
        PeripheralId::Gic,
        PeripheralId::Gpio1,
        PeripheralId::Gpio2,
        PeripheralId::Gpio3,
        PeripheralId::Gpio4,
        PeripheralId::Gpio5,
        PeripheralId::I2c1,
        PeripheralId::I2c2,
        PeripheralId::Ocotp,
        PeripheralId::Rngb,
        PeripheralId::Snvs,
        PeripheralId::Tzasc,
        PeripheralId::Uart1,
        PeripheralId::Uart2,
        PeripheralId::Usb1,
        PeripheralId::Usb2,
        PeripheralId::Usdhc1,
        PeripheralId::Usdhc2,
        PeripheralId::Digprog,
    ];

    /// Registry name.
    pub const fn name(self) -> &'static str {
        match self {
            PeripheralId::Csu => "CSU",
            PeripheralId::Dcp => "DCP",
            PeripheralId::Gic => "GIC",
            PeripheralId::Gpio1 => "GPIO1",
            PeripheralId::Gpio2 => "GPIO2",
            PeripheralId::Gpio3 => "GPIO3",
            PeripheralId::Gpio4 => "GPIO4",
            PeripheralId::Gpio5 => "GPIO5",
            PeripheralId::I2c1 => "I2C1",
            PeripheralId::I2c2 => "I2C2",
            PeripheralId::Ocotp => "OCOTP",
            PeripheralId::Rngb => "RNGB",
            PeripheralId::Snvs => "SNVS",
            PeripheralId::Tzasc => "TZASC",
            PeripheralId::Uart1 => "UART1",
            PeripheralId::Uart2 => "UART2",
            PeripheralId::Usb1 => "USB1",
            PeripheralId::Usb2 => "USB2",
            PeripheralId::Usdhc1 => "USDHC1",
            PeripheralId::Usdhc2 => "USDHC2",
            PeripheralId::Digprog => "USB_ANALOG_DIGPROG",
        }
    }

    const fn index(self) -> Option<u8> {
        match self {
            PeripheralId::Gpio1
            | PeripheralId::I2c1
            | PeripheralId::Uart1
            | PeripheralId::Usb1
            | PeripheralId::Usdhc1 => Some(1),
            PeripheralId::Gpio2
            | PeripheralId::I2c2
            | PeripheralId::Uart2
            | PeripheralId::Usb2
            | PeripheralId::Usdhc2 => Some(2),
            PeripheralId::Gpio3 => Some(3),
            PeripheralId::Gpio4 => Some(4),
            PeripheralId::Gpio5 => Some(5),
            _ => None,
        }
    }

    const fn metadata(self) -> DriverMetadata {
        match self {
            PeripheralId::Ocotp => DriverMetadata::FuseBank {
                bank_base: mmio::OCOTP_BANK_BASE,
            },
            PeripheralId::Usb1 => DriverMetadata::Usb {
                analog: mmio::USB_ANALOG1_BASE,
                phy: mmio::USBPHY1_BASE,
            },
            PeripheralId::Usb2 => DriverMetadata::Usb {
                analog: mmio::USB_ANALOG2_BASE,
                phy: mmio::USBPHY2_BASE,
            },
            PeripheralId::Tzasc => DriverMetadata::Tzasc {
                bypass: mmio::TZASC_BYPASS,
                lock_register: mmio::IOMUXC_GPR_GPR1,
                lock_bit: mmio::GPR1_TZASC1_BOOT_LOCK,
            },
            _ => DriverMetadata::None,
        }
    }

    const fn flags(self) -> PeripheralFlags {
        match self {
            PeripheralId::Dcp | PeripheralId::Rngb => PeripheralFlags::ULL_ONLY,
            PeripheralId::Usb1 | PeripheralId::Usb2 => PeripheralFlags::SHARED_GATE,
            _ => PeripheralFlags::empty(),
        }
    }

    /// Composes the address table, the clock gate table and the construction metadata.
    pub const fn descriptor(self) -> PeripheralDescriptor {
        let descriptor = PeripheralDescriptor::new(self.name(), address_of(self))
            .with_clock_gate(gate_of(self))
            .with_metadata(self.metadata())
            .with_flags(self.flags());

        match self.index() {
            Some(index) => descriptor.with_index(index),
            None => descriptor,
        }
    }
}

/// Registers every peripheral present on `family`.
///
/// Bring-up only: no peripheral is clocked or touched.
pub fn register_peripherals(
    registry: &mut PeripheralRegistry,
    family: ChipFamily,
) -> Result<(), RegistryError> {
    for id in PeripheralId::ALL {
        let descriptor = id.descriptor();

        if descriptor.flags().contains(PeripheralFlags::ULL_ONLY) && family != ChipFamily::Imx6ull
        {
            debug!("skipping {}: not present on {}", id.name(), family.model());
            continue;
        }

        registry.register(descriptor)?;
    }

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::imx6ul::clock::gates;

    #[test]
    fn ull_registers_every_peripheral() {
        let mut registry = PeripheralRegistry::new();
        register_peripherals(&mut registry, ChipFamily::Imx6ull).unwrap();

        assert_eq!(registry.len(), PeripheralId::COUNT);
        assert!(registry.get("DCP").is_some());
        assert!(registry.get("RNGB").is_some());
    }

    #[test]
    fn ul_skips_ull_only_peripherals() {
        let mut registry = PeripheralRegistry::new();
        register_peripherals(&mut registry, ChipFamily::Imx6ul).unwrap();

        assert_eq!(registry.len(), PeripheralId::COUNT - 2);
        assert_eq!(registry.get("DCP"), None);
        assert_eq!(registry.get("RNGB"), None);
        assert!(registry.get("OCOTP").is_some());
    }

    #[test]
    fn population_runs_once() {
        let mut registry = PeripheralRegistry::new();
        register_peripherals(&mut registry, ChipFamily::Imx6ul).unwrap();

        let again = register_peripherals(&mut registry, ChipFamily::Imx6ul);
        assert_eq!(again, Err(RegistryError::AlreadyRegistered { name: "CSU" }));
    }

    #[test]
    fn descriptors_compose_both_tables() {
        let ocotp = PeripheralId::Ocotp.descriptor();
        assert_eq!(ocotp.base(), 0x021b_c000);
        assert_eq!(ocotp.clock_gate(), Some(gates::OCOTP));
        assert_eq!(
            ocotp.metadata(),
            DriverMetadata::FuseBank {
                bank_base: 0x021b_c400
            }
        );

        let uart2 = PeripheralId::Uart2.descriptor();
        assert_eq!(uart2.index(), Some(2));
        assert_eq!(uart2.clock_gate(), None);

        let usb2 = PeripheralId::Usb2.descriptor();
        assert!(usb2.flags().contains(PeripheralFlags::SHARED_GATE));
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in PeripheralId::ALL.iter().enumerate() {
            for b in &PeripheralId::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }
}
