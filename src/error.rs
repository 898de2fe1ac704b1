// SPDX-License-Identifier: MIT
//! Error types for bring-up, clock and fuse operations.

use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = core::result::Result<T, Error>;

/// Umbrella error for operations that touch more than one subsystem.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    Fuse(#[from] FuseError),
}

/// Errors raised while populating or querying the peripheral registry
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// No free descriptor slot left
    #[error("peripheral registry full ({capacity} entries)")]
    Full {
        /// Number of slots in the registry
        capacity: usize,
    },

    /// A descriptor with this name already owns a handle
    #[error("peripheral {name} already registered")]
    AlreadyRegistered {
        /// Name of the duplicate peripheral
        name: &'static str,
    },

    /// Bring-up needed a peripheral that was never registered
    #[error("peripheral {name} not registered")]
    NotRegistered {
        /// Name that was looked up
        name: &'static str,
    },

    /// The handle was not produced by this registry
    #[error("unknown peripheral handle")]
    UnknownHandle,

    /// The descriptor lacks the construction data its driver needs
    #[error("peripheral {name} has no driver metadata")]
    MissingMetadata {
        /// Peripheral being constructed
        name: &'static str,
    },
}

/// Errors raised by the clock controller hooks
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// The controller instance does not exist on this SoC
    #[error("invalid controller index {index}")]
    InvalidIndex {
        /// Requested instance
        index: u8,
    },

    /// Post divider outside 0..=7
    #[error("divider value {podf} out of range")]
    DividerOutOfRange {
        /// Requested divider
        podf: u32,
    },

    /// Clock selector outside 0..=1
    #[error("clock selector {clksel} out of range")]
    SelectorOutOfRange {
        /// Requested selector
        clksel: u32,
    },

    /// The PLL did not report lock within the poll budget
    #[error("USB PLL {index} failed to lock")]
    PllLockTimeout {
        /// PLL instance
        index: u8,
    },

    /// The gate also feeds another controller and must stay on
    #[error("clock gate of {name} is shared and cannot be disabled")]
    SharedGate {
        /// Peripheral whose gate was targeted
        name: &'static str,
    },
}

/// Errors raised by the on-chip OTP (fuse box) controller
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FuseError {
    /// `init()` has not been called on the controller
    #[error("fuse controller not initialized")]
    NotInitialized,

    /// Bank or word outside the shadow register map
    #[error("fuse address out of range (bank {bank}, word {word})")]
    InvalidAddress {
        /// Requested bank
        bank: usize,
        /// Requested word within the bank
        word: usize,
    },

    /// The controller stayed busy for the whole poll budget
    #[error("fuse controller busy after {polls} polls")]
    Timeout {
        /// Number of status polls performed
        polls: usize,
    },
}
