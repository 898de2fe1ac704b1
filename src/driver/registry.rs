// SPDX-License-Identifier: MIT
use core::fmt;

use bitflags::bitflags;
use log::{debug, info};

use crate::clock::ClockGate;
use crate::error::RegistryError;

const MAX_PERIPHERALS: usize = 32;

bitflags! {
    /// Properties of a peripheral that bring-up and clock handling care about.
    pub struct PeripheralFlags: u32 {
        /// Only present on the i.MX6ULL/ULZ.
        const ULL_ONLY = 1 << 0;
        /// The clock gate also feeds another controller.
        const SHARED_GATE = 1 << 1;
    }
}

/// Driver specific construction data beyond base address and clock gate.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DriverMetadata {
    None,
    /// Fuse box shadow register bank.
    FuseBank { bank_base: usize },
    /// USB controller companion blocks.
    Usb { analog: usize, phy: usize },
    /// TrustZone address space controller bypass and secure boot lock.
    Tzasc {
        bypass: usize,
        lock_register: usize,
        lock_bit: u32,
    },
}

#[derive(Copy, Clone, Debug)]
pub struct PeripheralDescriptor {
    name: &'static str,
    index: Option<u8>,
    base: usize,
    clock_gate: Option<ClockGate>,
    metadata: DriverMetadata,
    flags: PeripheralFlags,
}

/// Opaque token for a registered peripheral.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PeripheralHandle(usize);

/// The set of peripherals known to the system.
///
/// Populated during single-threaded bring-up through `&mut self`, then shared read-only.
pub struct PeripheralRegistry {
    next_index: usize,
    descriptors: [Option<PeripheralDescriptor>; MAX_PERIPHERALS],
}

impl PeripheralDescriptor {
    pub const fn new(name: &'static str, base: usize) -> Self {
        Self {
            name,
            index: None,
            base,
            clock_gate: None,
            metadata: DriverMetadata::None,
            flags: PeripheralFlags::empty(),
        }
    }

    pub const fn with_index(mut self, index: u8) -> Self {
        self.index = Some(index);
        self
    }

    pub const fn with_clock_gate(mut self, gate: Option<ClockGate>) -> Self {
        self.clock_gate = gate;
        self
    }

    pub const fn with_metadata(mut self, metadata: DriverMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub const fn with_flags(mut self, flags: PeripheralFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Instance number for peripherals that come in numbered sets (UART1, UART2, ..).
    pub fn index(&self) -> Option<u8> {
        self.index
    }

    /// Physical base address.
    pub fn base(&self) -> usize {
        self.base
    }

    pub fn clock_gate(&self) -> Option<ClockGate> {
        self.clock_gate
    }

    pub fn metadata(&self) -> DriverMetadata {
        self.metadata
    }

    pub fn flags(&self) -> PeripheralFlags {
        self.flags
    }
}

impl fmt::Display for PeripheralDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<18} @ {:#010x}", self.name, self.base)?;
        if let Some(gate) = self.clock_gate {
            write!(f, " ({})", gate)?;
        }

        Ok(())
    }
}

impl PeripheralRegistry {
    pub const fn new() -> Self {
        Self {
            next_index: 0,
            descriptors: [None; MAX_PERIPHERALS],
        }
    }

    /// Adds a descriptor and hands out its handle.
    ///
    /// No hardware is touched; the peripheral stays unclocked until its driver is initialised.
    pub fn register(
        &mut self,
        descriptor: PeripheralDescriptor,
    ) -> Result<PeripheralHandle, RegistryError> {
        if self.get(descriptor.name).is_some() {
            return Err(RegistryError::AlreadyRegistered {
                name: descriptor.name,
            });
        }

        if self.next_index >= MAX_PERIPHERALS {
            return Err(RegistryError::Full {
                capacity: MAX_PERIPHERALS,
            });
        }

        let handle = PeripheralHandle(self.next_index);
        debug!("registered {}", descriptor);
        self.descriptors[self.next_index] = Some(descriptor);
        self.next_index += 1;

        Ok(handle)
    }

    pub fn get(&self, name: &str) -> Option<PeripheralHandle> {
        self.descriptors[..self.next_index]
            .iter()
            .position(|x| x.as_ref().is_some_and(|d| d.name == name))
            .map(PeripheralHandle)
    }

    /// Like [`get`](Self::get), for peripherals bring-up cannot do without.
    pub fn require(&self, name: &'static str) -> Result<PeripheralHandle, RegistryError> {
        self.get(name).ok_or(RegistryError::NotRegistered { name })
    }

    pub fn descriptor(&self, handle: PeripheralHandle) -> Option<&PeripheralDescriptor> {
        self.descriptors.get(handle.0).and_then(|x| x.as_ref())
    }

    pub fn len(&self) -> usize {
        self.next_index
    }

    pub fn is_empty(&self) -> bool {
        self.next_index == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (PeripheralHandle, &PeripheralDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .filter_map(|(i, x)| x.as_ref().map(|d| (PeripheralHandle(i), d)))
    }

    /// Logs every registered peripheral.
    pub fn enumerate(&self) {
        for (i, (_, descriptor)) in self.iter().enumerate() {
            info!("    {}. {}", i + 1, descriptor);
        }
    }
}

impl Default for PeripheralRegistry {
    fn default() -> Self {
        Self::new()
    }
}
