// SPDX-License-Identifier: MIT
//! Chip identification (p3945, 57.4.11 Chip Silicon Version (USB_ANALOG_DIGPROG), IMX6ULLRM).

use core::fmt;

use tock_registers::{register_bitfields, LocalRegisterCopy};

use crate::driver::ocotp::Ocotp;
use crate::error::FuseError;

register_bitfields! {
    u32,

    /// Chip Silicon Version Register
    pub DIGPROG [
        MINOR OFFSET(0) NUMBITS(8) [],
        MAJOR OFFSET(8) NUMBITS(8) [],
        FAMILY OFFSET(16) NUMBITS(8) []
    ]
}

/// Fuse bank and words holding the 64-bit device unique identifier.
const UNIQUE_ID_BANK: usize = 0;
const UNIQUE_ID_WORDS: [usize; 2] = [1, 2];

/// Decoded content of the silicon version register.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SiliconVersion {
    /// Register value as read, including the reserved top byte.
    pub raw: u32,
    pub family: u32,
    pub major: u32,
    pub minor: u32,
}

/// 64-bit device unique identifier.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct UniqueId([u8; 8]);

/// SoC family, as resolved by whoever brings the board up.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChipFamily {
    Imx6ul,
    Imx6ull,
    Unknown(u8),
}

impl SiliconVersion {
    pub fn from_raw(raw: u32) -> Self {
        let value = LocalRegisterCopy::<u32, DIGPROG::Register>::new(raw);

        Self {
            raw,
            family: value.read(DIGPROG::FAMILY),
            major: value.read(DIGPROG::MAJOR),
            minor: value.read(DIGPROG::MINOR),
        }
    }
}

impl fmt::Display for SiliconVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "family {:#04x} rev {}.{} ({:#010x})",
            self.family, self.major, self.minor, self.raw
        )
    }
}

impl UniqueId {
    /// Assembles the identifier from its two fuse words, least significant byte first.
    pub fn from_fuse_words(low: u32, high: u32) -> Self {
        let mut bytes = [0u8; 8];
        bytes[..4].copy_from_slice(&low.to_le_bytes());
        bytes[4..].copy_from_slice(&high.to_le_bytes());

        Self(bytes)
    }

    /// Reads the identifier, bringing the fuse controller up first if needed.
    pub fn read(ocotp: &Ocotp<'_>) -> Result<Self, FuseError> {
        ocotp.init()?;

        let [low, high] = UNIQUE_ID_WORDS;
        let low = ocotp.read(UNIQUE_ID_BANK, low)?;
        let high = ocotp.read(UNIQUE_ID_BANK, high)?;

        Ok(Self::from_fuse_words(low, high))
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    pub fn to_u64(self) -> u64 {
        u64::from_le_bytes(self.0)
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }

        Ok(())
    }
}

impl ChipFamily {
    pub const IMX6UL_CODE: u8 = 0x64;
    pub const IMX6ULL_CODE: u8 = 0x65;

    pub const fn from_code(code: u8) -> Self {
        match code {
            Self::IMX6UL_CODE => ChipFamily::Imx6ul,
            Self::IMX6ULL_CODE => ChipFamily::Imx6ull,
            other => ChipFamily::Unknown(other),
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            ChipFamily::Imx6ul => Self::IMX6UL_CODE,
            ChipFamily::Imx6ull => Self::IMX6ULL_CODE,
            ChipFamily::Unknown(code) => code,
        }
    }

    pub const fn model(self) -> &'static str {
        model(self)
    }
}

/// Model name of a chip family.
pub const fn model(family: ChipFamily) -> &'static str {
    match family {
        ChipFamily::Imx6ul => "i.MX6UL",
        ChipFamily::Imx6ull => "i.MX6ULL",
        ChipFamily::Unknown(_) => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::imx6ul::clock::gates;
    use crate::bsp::imx6ul::mem::map::mmio::{OCOTP_BANK_BASE, OCOTP_BASE};
    use crate::bsp::imx6ul::scratch::ScratchWindow;
    use crate::driver::ccm::Ccm;

    #[test]
    fn silicon_version_fields() {
        let version = SiliconVersion::from_raw(0x0063_0105);

        assert_eq!(version.raw, 0x0063_0105);
        assert_eq!(version.family, 0x63);
        assert_eq!(version.major, 0x01);
        assert_eq!(version.minor, 0x05);
    }

    #[test]
    fn silicon_version_ignores_top_byte() {
        let version = SiliconVersion::from_raw(0xff63_0105);

        assert_eq!(version.raw, 0xff63_0105);
        assert_eq!(version.family, 0x63);
        assert_eq!(version.major, 0x01);
        assert_eq!(version.minor, 0x05);
    }

    #[test]
    fn unique_id_is_little_endian() {
        let uid = UniqueId::from_fuse_words(0x1234_5678, 0x9abc_def0);

        assert_eq!(
            uid.as_bytes(),
            &[0x78, 0x56, 0x34, 0x12, 0xf0, 0xde, 0xbc, 0x9a]
        );
        assert_eq!(uid.to_u64(), 0x9abc_def0_1234_5678);
        assert_eq!(uid.to_string(), "78563412f0debc9a");
    }

    #[test]
    fn unique_id_read_initializes_controller() {
        let window = ScratchWindow::new();
        let map = window.map();
        let clocks = unsafe { Ccm::new(&map) };
        let ocotp = unsafe {
            Ocotp::new(
                map.virt(OCOTP_BASE),
                map.virt(OCOTP_BANK_BASE),
                gates::OCOTP,
                &clocks,
            )
        };
        window.write(OCOTP_BANK_BASE + 0x10, 0x1234_5678);
        window.write(OCOTP_BANK_BASE + 0x20, 0x9abc_def0);

        let uid = UniqueId::read(&ocotp).unwrap();

        assert!(ocotp.is_initialized());
        assert_eq!(uid, UniqueId::from_fuse_words(0x1234_5678, 0x9abc_def0));
    }

    #[test]
    fn unique_id_read_reports_busy_controller() {
        let window = ScratchWindow::new();
        let map = window.map();
        let clocks = unsafe { Ccm::new(&map) };
        let ocotp = unsafe {
            Ocotp::new(
                map.virt(OCOTP_BASE),
                map.virt(OCOTP_BANK_BASE),
                gates::OCOTP,
                &clocks,
            )
        };
        window.write(OCOTP_BASE, 1 << 8);

        assert!(matches!(
            UniqueId::read(&ocotp),
            Err(FuseError::Timeout { .. })
        ));
    }

    #[test]
    fn model_names() {
        assert_eq!(model(ChipFamily::Imx6ul), "i.MX6UL");
        assert_eq!(model(ChipFamily::Imx6ull), "i.MX6ULL");
        assert_eq!(model(ChipFamily::Unknown(0x63)), "unknown");
        assert_eq!(ChipFamily::from_code(0x65).model(), "i.MX6ULL");
    }

    #[test]
    fn family_codes() {
        assert_eq!(ChipFamily::from_code(0x64), ChipFamily::Imx6ul);
        assert_eq!(ChipFamily::from_code(0x65), ChipFamily::Imx6ull);
        assert_eq!(ChipFamily::from_code(0x00), ChipFamily::Unknown(0x00));
        assert_eq!(ChipFamily::Unknown(0x42).code(), 0x42);
    }
}
