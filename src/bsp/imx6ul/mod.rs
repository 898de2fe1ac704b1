// SPDX-License-Identifier: MIT
//! NXP i.MX6UL/i.MX6ULL board support.

use log::info;
use tock_registers::{interfaces::Readable, registers::ReadOnly};

use crate::clock::interface::{ClockControl, ClockGating};
use crate::driver::ccm::Ccm;
use crate::driver::ocotp::Ocotp;
use crate::driver::snvs::Snvs;
use crate::driver::{MMIODerefWrapper, PeripheralFlags, PeripheralHandle, PeripheralRegistry};
use crate::error::{ClockError, Error, FuseError, RegistryError};

use self::driver::PeripheralId;
use self::identity::{ChipFamily, SiliconVersion, UniqueId, DIGPROG};
use self::mem::MmioMap;
use self::security::SecurityState;

pub mod clock;
pub mod driver;
pub mod identity;
pub mod mem;
pub mod security;

#[cfg(test)]
pub(crate) mod scratch;

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// The brought-up SoC: registry, clock controller and the identity and security sources.
///
/// Constructed once at start-up and then shared by reference.
pub struct Soc<'c> {
    mmio: MmioMap,
    family: ChipFamily,
    clocks: &'c Ccm,
    registry: PeripheralRegistry,
    ocotp: Ocotp<'c>,
    snvs: Snvs,
    digprog: MMIODerefWrapper<ReadOnly<u32, DIGPROG::Register>>,
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl<'c> Soc<'c> {
    /// Wraps an already populated registry.
    ///
    /// The fuse box, the secure storage block and the identification register must be
    /// registered. Nothing is clocked or read here.
    pub fn new(
        mmio: MmioMap,
        clocks: &'c Ccm,
        registry: PeripheralRegistry,
        family: ChipFamily,
    ) -> Result<Self, RegistryError> {
        let base_of = |id: PeripheralId| -> Result<usize, RegistryError> {
            let handle = registry.require(id.name())?;
            let descriptor = registry
                .descriptor(handle)
                .ok_or(RegistryError::UnknownHandle)?;

            Ok(mmio.virt(descriptor.base()))
        };

        let snvs_base = base_of(PeripheralId::Snvs)?;
        let digprog_base = base_of(PeripheralId::Digprog)?;

        let ocotp_handle = registry.require(PeripheralId::Ocotp.name())?;
        let ocotp_descriptor = registry
            .descriptor(ocotp_handle)
            .ok_or(RegistryError::UnknownHandle)?;
        let ocotp = Ocotp::from_descriptor(&mmio, ocotp_descriptor, clocks)?;

        Ok(Self {
            mmio,
            family,
            clocks,
            // Safety: addresses come from the peripheral table and go through the map.
            snvs: unsafe { Snvs::new(snvs_base) },
            digprog: unsafe { MMIODerefWrapper::new(digprog_base) },
            ocotp,
            registry,
        })
    }

    /// Registers every peripheral of `family` and wraps the result.
    pub fn bring_up(
        mmio: MmioMap,
        clocks: &'c Ccm,
        family: ChipFamily,
    ) -> Result<Self, RegistryError> {
        let mut registry = PeripheralRegistry::new();
        driver::register_peripherals(&mut registry, family)?;

        info!("{} peripherals:", family.model());
        registry.enumerate();

        Self::new(mmio, clocks, registry, family)
    }

    pub fn registry(&self) -> &PeripheralRegistry {
        &self.registry
    }

    pub fn mmio(&self) -> MmioMap {
        self.mmio
    }

    pub fn family(&self) -> ChipFamily {
        self.family
    }

    pub fn model(&self) -> &'static str {
        identity::model(self.family)
    }

    pub fn clocks(&self) -> &'c Ccm {
        self.clocks
    }

    /// Clock configuration hooks, for handing to the UART, USB and SD/MMC drivers.
    pub fn clock_control(&self) -> &'c (dyn ClockControl + Sync) {
        self.clocks
    }

    pub fn gating(&self) -> &'c (dyn ClockGating + Sync) {
        self.clocks
    }

    pub fn ocotp(&self) -> &Ocotp<'c> {
        &self.ocotp
    }

    pub fn snvs(&self) -> &Snvs {
        &self.snvs
    }

    /// Address a driver uses to reach the registers of `handle`.
    pub fn peripheral_base(&self, handle: PeripheralHandle) -> Result<usize, RegistryError> {
        self.registry
            .descriptor(handle)
            .map(|d| self.mmio.virt(d.base()))
            .ok_or(RegistryError::UnknownHandle)
    }

    /// Enables the clock gate of a peripheral, if it has one.
    pub fn enable_clock(&self, handle: PeripheralHandle) -> Result<(), RegistryError> {
        let descriptor = self
            .registry
            .descriptor(handle)
            .ok_or(RegistryError::UnknownHandle)?;

        if let Some(gate) = descriptor.clock_gate() {
            self.clocks.enable_gate(gate);
        }

        Ok(())
    }

    /// Disables the clock gate of a peripheral.
    ///
    /// Gates feeding more than one controller are left alone.
    pub fn disable_clock(&self, handle: PeripheralHandle) -> Result<(), Error> {
        let descriptor = self
            .registry
            .descriptor(handle)
            .ok_or(RegistryError::UnknownHandle)?;

        if descriptor.flags().contains(PeripheralFlags::SHARED_GATE) {
            return Err(ClockError::SharedGate {
                name: descriptor.name(),
            }
            .into());
        }

        if let Some(gate) = descriptor.clock_gate() {
            self.clocks.disable_gate(gate);
        }

        Ok(())
    }

    pub fn silicon_version(&self) -> SiliconVersion {
        SiliconVersion::from_raw(self.digprog.get())
    }

    pub fn unique_id(&self) -> Result<UniqueId, FuseError> {
        UniqueId::read(&self.ocotp)
    }

    pub fn security_state(&self) -> SecurityState {
        SecurityState::read(&self.snvs)
    }

    /// Whether the SoC is in Trusted or Secure state, i.e. secure boot is enabled.
    pub fn hab_state(&self) -> bool {
        self.security_state().is_hab_enabled()
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::imx6ul::clock::{ccm::CCM_CCGR6, gates};
    use crate::bsp::imx6ul::mem::map::mmio;
    use crate::bsp::imx6ul::scratch::ScratchWindow;
    use crate::clock::GateSetting;
    use crate::driver::PeripheralDescriptor;

    #[test]
    fn bring_up_wires_identity_sources() {
        let window = ScratchWindow::new();
        let clocks = unsafe { Ccm::new(&window.map()) };
        let soc = Soc::bring_up(window.map(), &clocks, ChipFamily::Imx6ull).unwrap();
        window.write(mmio::USB_ANALOG_DIGPROG, 0x0065_0001);
        window.write(mmio::SNVS_BASE + 0x14, 0b1101 << 8);

        assert_eq!(soc.model(), "i.MX6ULL");
        assert_eq!(soc.silicon_version().family, 0x65);
        assert_eq!(soc.security_state(), SecurityState::Trusted);
        assert!(soc.hab_state());
    }

    #[test]
    fn new_requires_identity_peripherals() {
        let window = ScratchWindow::new();
        let clocks = unsafe { Ccm::new(&window.map()) };
        let mut registry = PeripheralRegistry::new();
        registry
            .register(PeripheralDescriptor::new("SNVS", mmio::SNVS_BASE))
            .unwrap();

        let result = Soc::new(window.map(), &clocks, registry, ChipFamily::Imx6ul);

        assert!(matches!(
            result,
            Err(RegistryError::NotRegistered {
                name: "USB_ANALOG_DIGPROG"
            })
        ));
    }

    #[test]
    fn enable_clock_sets_gate() {
        let window = ScratchWindow::new();
        let clocks = unsafe { Ccm::new(&window.map()) };
        let soc = Soc::bring_up(window.map(), &clocks, ChipFamily::Imx6ul).unwrap();
        let usdhc2 = soc.registry().get("USDHC2").unwrap();
        let uart1 = soc.registry().get("UART1").unwrap();

        soc.enable_clock(usdhc2).unwrap();
        soc.enable_clock(uart1).unwrap();

        assert_eq!(clocks.gate_setting(gates::USDHC2), GateSetting::On);
        assert_eq!(window.read(CCM_CCGR6), 0b11 << 4);

        soc.disable_clock(usdhc2).unwrap();
        assert_eq!(window.read(CCM_CCGR6), 0);
    }

    #[test]
    fn shared_gate_is_not_disabled() {
        let window = ScratchWindow::new();
        let clocks = unsafe { Ccm::new(&window.map()) };
        let soc = Soc::bring_up(window.map(), &clocks, ChipFamily::Imx6ul).unwrap();
        let usb1 = soc.registry().get("USB1").unwrap();

        soc.enable_clock(usb1).unwrap();

        assert_eq!(
            soc.disable_clock(usb1),
            Err(Error::Clock(ClockError::SharedGate { name: "USB1" }))
        );
        assert_eq!(clocks.gate_setting(gates::USBOH3), GateSetting::On);
    }

    #[test]
    fn peripheral_base_goes_through_map() {
        let window = ScratchWindow::new();
        let clocks = unsafe { Ccm::new(&window.map()) };
        let soc = Soc::bring_up(window.map(), &clocks, ChipFamily::Imx6ul).unwrap();
        let snvs = soc.registry().get("SNVS").unwrap();

        assert_eq!(
            soc.peripheral_base(snvs),
            Ok(window.map().virt(mmio::SNVS_BASE))
        );
    }
}
