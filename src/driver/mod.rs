// SPDX-License-Identifier: MIT
pub use common::*;
pub use registry::*;

mod common;
mod registry;

pub mod ccm;
pub mod ocotp;
pub mod snvs;

pub mod interface {
    use crate::error::Error;

    pub trait DeviceDriver {
        /// A string describing the device driver.
        fn compatible(&self) -> &'static str;

        /// Brings up the device: enables its clock and readies the controller.
        ///
        /// Must be safe to call more than once.
        fn init(&self) -> Result<(), Error> {
            Ok(())
        }
    }
}
