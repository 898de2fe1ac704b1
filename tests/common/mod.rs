// SPDX-License-Identifier: MIT
#![allow(dead_code)]

use imx6ul_bsp::bsp::imx6ul::mem;

#[path = "../../src/bsp/imx6ul/scratch.rs"]
mod scratch;

pub use scratch::*;
