// SPDX-License-Identifier: MIT
//! Peripheral address table (p174, Chapter 2 Memory Maps, IMX6ULLRM).

use static_assertions::const_assert;

use crate::bsp::imx6ul::driver::PeripheralId;
use crate::driver::MMIODerefWrapper;

//--------------------------------------------------------------------------------------------------
// Public definitions
//--------------------------------------------------------------------------------------------------
#[rustfmt::skip]
pub mod map {
    /// On-Chip RAM.
    pub const OCRAM_START:           usize =         0x0090_0000;
    pub const OCRAM_SIZE:            usize =         0x0002_0000;

    /// Physical devices.
    pub mod mmio {
        pub const GIC_BASE:              usize =         0x00a0_0000;

        pub const UART1_BASE:            usize =         0x0202_0000;
        pub const UART2_BASE:            usize =         0x021e_8000;
        pub const UART3_BASE:            usize =         0x021e_c000;
        pub const UART4_BASE:            usize =         0x021f_0000;

        pub const GPIO1_BASE:            usize =         0x0209_c000;
        pub const GPIO2_BASE:            usize =         0x020a_0000;
        pub const GPIO3_BASE:            usize =         0x020a_4000;
        pub const GPIO4_BASE:            usize =         0x020a_8000;
        pub const GPIO5_BASE:            usize =         0x020a_c000;

        pub const CCM_BASE:              usize =         0x020c_4000;
        pub const CCM_ANALOG_BASE:       usize =         0x020c_8000;

        pub const USB_ANALOG1_BASE:      usize =         0x020c_81a0;
        pub const USB_ANALOG2_BASE:      usize =         0x020c_8200;
        pub const USB_ANALOG_DIGPROG:    usize =         0x020c_8260;
        pub const USBPHY1_BASE:          usize =         0x020c_9000;
        pub const USBPHY2_BASE:          usize =         0x020c_a000;

        pub const SNVS_BASE:             usize =         0x020c_c000;

        pub const IOMUXC_GPR_GPR1:       usize =         0x020e_4004;
        pub const TZASC_BYPASS:          usize =         0x020e_4024;
        pub const GPR1_TZASC1_BOOT_LOCK: u32   =         23;

        pub const USB1_BASE:             usize =         0x0218_4000;
        pub const USB2_BASE:             usize =         0x0218_4200;

        pub const USDHC1_BASE:           usize =         0x0219_0000;
        pub const USDHC2_BASE:           usize =         0x0219_4000;

        pub const I2C1_BASE:             usize =         0x021a_0000;
        pub const I2C2_BASE:             usize =         0x021a_4000;

        pub const OCOTP_BASE:            usize =         0x021b_c000;
        pub const OCOTP_BANK_BASE:       usize =         0x021b_c400;

        pub const CSU_BASE:              usize =         0x021c_0000;
        pub const TZASC_BASE:            usize =         0x021d_0000;

        /// i.MX6ULL/ULZ only.
        pub const DCP_BASE:              usize =         0x0228_0000;
        /// i.MX6ULL/ULZ only.
        pub const RNGB_BASE:             usize =         0x0228_4000;
    }
}

/// Translation from the physical addresses of the tables to the addresses the CPU uses.
#[derive(Copy, Clone, Debug)]
pub struct MmioMap {
    offset: usize,
}

//--------------------------------------------------------------------------------------------------
// Public code
//--------------------------------------------------------------------------------------------------
impl MmioMap {
    /// Create a map adding `offset` (modulo the address width) to every physical address.
    ///
    /// # Safety
    ///
    /// - Every peripheral register of the SoC must be accessible at `phys + offset` for the
    ///   lifetime of the map and everything created from it.
    pub const unsafe fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// Create a map for an identity-mapped (or MMU-off) address space.
    ///
    /// # Safety
    ///
    /// - See [`MmioMap::new`].
    pub const unsafe fn identity() -> Self {
        Self::new(0)
    }

    pub const fn virt(&self, phys: usize) -> usize {
        phys.wrapping_add(self.offset)
    }

    /// Typed register block at physical address `phys`.
    pub(crate) fn registers<T>(&self, phys: usize) -> MMIODerefWrapper<T> {
        // Safety: guaranteed by the contract of `MmioMap::new`.
        unsafe { MMIODerefWrapper::new(self.virt(phys)) }
    }
}

/// Looks up the base address of a peripheral.
pub const fn address_of(id: PeripheralId) -> usize {
    use map::mmio::*;

    match id {
        PeripheralId::Csu => CSU_BASE,
        PeripheralId::Dcp => DCP_BASE,
        PeripheralId::Gic => GIC_BASE,
        PeripheralId::Gpio1 => GPIO1_BASE,
        PeripheralId::Gpio2 => GPIO2_BASE,
        PeripheralId::Gpio3 => GPIO3_BASE,
        PeripheralId::Gpio4 => GPIO4_BASE,
        PeripheralId::Gpio5 => GPIO5_BASE,
        PeripheralId::I2c1 => I2C1_BASE,
        PeripheralId::I2c2 => I2C2_BASE,
        PeripheralId::Ocotp => OCOTP_BASE,
        PeripheralId::Rngb => RNGB_BASE,
        PeripheralId::Snvs => SNVS_BASE,
        PeripheralId::Tzasc => TZASC_BASE,
        PeripheralId::Uart1 => UART1_BASE,
        PeripheralId::Uart2 => UART2_BASE,
        PeripheralId::Usb1 => USB1_BASE,
        PeripheralId::Usb2 => USB2_BASE,
        PeripheralId::Usdhc1 => USDHC1_BASE,
        PeripheralId::Usdhc2 => USDHC2_BASE,
        PeripheralId::Digprog => USB_ANALOG_DIGPROG,
    }
}

//--------------------------------------------------------------------------------------------------
// Private code
//--------------------------------------------------------------------------------------------------
const fn all_distinct_and_aligned(bases: &[usize]) -> bool {
    let mut i = 0;
    while i < bases.len() {
        if bases[i] % 4 != 0 {
            return false;
        }

        let mut j = i + 1;
        while j < bases.len() {
            if bases[i] == bases[j] {
                return false;
            }
            j += 1;
        }
        i += 1;
    }

    true
}

const fn all_bases() -> [usize; PeripheralId::COUNT] {
    let mut bases = [0; PeripheralId::COUNT];
    let mut i = 0;
    while i < PeripheralId::COUNT {
        bases[i] = address_of(PeripheralId::ALL[i]);
        i += 1;
    }

    bases
}

const_assert!(all_distinct_and_aligned(&all_bases()));
const_assert!(map::mmio::OCOTP_BANK_BASE > map::mmio::OCOTP_BASE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identification_register_is_at_digprog() {
        assert_eq!(address_of(PeripheralId::Digprog), 0x020c_8260);
    }

    #[test]
    fn address_table_matches_datasheet() {
        assert_eq!(address_of(PeripheralId::Ocotp), 0x021b_c000);
        assert_eq!(address_of(PeripheralId::Snvs), 0x020c_c000);
        assert_eq!(address_of(PeripheralId::Uart2), 0x021e_8000);
        assert_eq!(address_of(PeripheralId::Usb2), 0x0218_4200);
        assert_eq!(address_of(PeripheralId::Gpio5), 0x020a_c000);
    }

    #[test]
    fn mmio_map_applies_offset() {
        let map = unsafe { MmioMap::new(0x1000) };
        assert_eq!(map.virt(0x020c_c000), 0x020c_d000);

        let identity = unsafe { MmioMap::identity() };
        assert_eq!(identity.virt(0x020c_c000), 0x020c_c000);
    }

    #[test]
    fn mmio_map_offset_wraps() {
        let map = unsafe { MmioMap::new(0usize.wrapping_sub(0x100)) };
        assert_eq!(map.virt(0x1000), 0xf00);
    }
}
