// SPDX-License-Identifier: MIT
mod common;

use std::fmt;
use std::sync::Mutex;

use common::ScratchWindow;
use imx6ul_bsp::bsp::imx6ul::mem::map::mmio;
use imx6ul_bsp::console::interface::{All, Statistics, Write};
use imx6ul_bsp::console::register_console;
use imx6ul_bsp::print::init_logging;
use imx6ul_bsp::{Ccm, ChipFamily, Soc};
use log::LevelFilter;

struct RecordingConsole {
    output: Mutex<String>,
}

impl Write for RecordingConsole {
    fn write_char(&self, c: char) {
        if let Ok(mut output) = self.output.lock() {
            output.push(c);
        }
    }

    fn write_fmt(&self, args: fmt::Arguments) -> fmt::Result {
        let mut output = self.output.lock().map_err(|_| fmt::Error)?;
        fmt::Write::write_fmt(&mut *output, args)
    }

    fn flush(&self) {}
}

impl Statistics for RecordingConsole {
    fn get_tx_count(&self) -> usize {
        self.output.lock().map(|o| o.len()).unwrap_or(0)
    }
}

impl All for RecordingConsole {}

static CONSOLE: RecordingConsole = RecordingConsole {
    output: Mutex::new(String::new()),
};

#[test]
fn bring_up_and_fuse_timeout_are_logged() {
    register_console(&CONSOLE);
    init_logging(LevelFilter::Debug).unwrap();
    assert!(init_logging(LevelFilter::Info).is_err());

    let window = ScratchWindow::new();
    let clocks = unsafe { Ccm::new(&window.map()) };
    let soc = Soc::bring_up(window.map(), &clocks, ChipFamily::Imx6ul).unwrap();
    window.write(mmio::OCOTP_BASE, 1 << 8);
    assert!(soc.unique_id().is_err());

    imx6ul_bsp::println!("done");

    let output = CONSOLE.output.lock().unwrap().clone();
    assert!(output.contains("[I] imx6ul_bsp::bsp::imx6ul: i.MX6UL peripherals:\n"));
    assert!(output.contains("OCOTP"));
    assert!(output.contains("(CCGR2 CG6)"));
    assert!(output.contains("[D] imx6ul_bsp::bsp::imx6ul::driver: skipping DCP"));
    assert!(output.contains("[W] imx6ul_bsp::driver::ocotp: controller busy"));
    assert!(output.ends_with("done\n"));
    assert_eq!(CONSOLE.get_tx_count(), output.len());
}
