// SPDX-License-Identifier: MIT
//! Conditional reexporting of Board Support Packages.

pub mod imx6ul;

pub use imx6ul::*;
