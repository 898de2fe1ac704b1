// SPDX-License-Identifier: MIT
//! Heap backed stand-in for the CCM..OCOTP part of the peripheral address space.
//!
//! Shared with the integration tests, which include this file from `tests/common`.

use core::ptr;

use super::mem::MmioMap;

pub const WINDOW_START: usize = 0x020c_0000;
pub const WINDOW_END: usize = 0x021c_0000;

const WORDS: usize = (WINDOW_END - WINDOW_START) / 4;

pub struct ScratchWindow {
    words: *mut u32,
}

// Accesses are volatile word reads and writes, like the hardware they replace.
unsafe impl Send for ScratchWindow {}
unsafe impl Sync for ScratchWindow {}

impl ScratchWindow {
    pub fn new() -> Self {
        let words = Box::into_raw(vec![0u32; WORDS].into_boxed_slice()) as *mut u32;

        Self { words }
    }

    pub fn map(&self) -> MmioMap {
        unsafe { MmioMap::new((self.words as usize).wrapping_sub(WINDOW_START)) }
    }

    pub fn read(&self, phys: usize) -> u32 {
        unsafe { ptr::read_volatile(self.slot(phys)) }
    }

    pub fn write(&self, phys: usize, value: u32) {
        unsafe { ptr::write_volatile(self.slot(phys), value) }
    }

    fn slot(&self, phys: usize) -> *mut u32 {
        assert!((WINDOW_START..WINDOW_END).contains(&phys) && phys % 4 == 0);

        unsafe { self.words.add((phys - WINDOW_START) / 4) }
    }
}

impl Drop for ScratchWindow {
    fn drop(&mut self) {
        unsafe {
            drop(Box::from_raw(ptr::slice_from_raw_parts_mut(self.words, WORDS)));
        }
    }
}
