// SPDX-License-Identifier: MIT
pub mod asynchronous;
