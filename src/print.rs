// SPDX-License-Identifier: MIT
//! Console printing and the `log` backend writing through it.

use core::fmt;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::console;

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    // Nowhere to report a failing console to.
    let _ = console::console().write_fmt(args);
}

/// Prints without a newline.
///
/// Carbon copy from <https://doc.rust-lang.org/src/std/macros.rs.html>
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::print::_print(format_args!($($arg)*)));
}

/// Prints with a newline.
///
/// Carbon copy from <https://doc.rust-lang.org/src/std/macros.rs.html>
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ({
        $crate::print::_print(format_args!("{}\n", format_args!($($arg)*)));
    })
}

/// `log` backend printing `[L] target: message` lines to the console.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

const fn level_tag(level: Level) -> char {
    match level {
        Level::Error => 'E',
        Level::Warn => 'W',
        Level::Info => 'I',
        Level::Debug => 'D',
        Level::Trace => 'T',
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        crate::println!(
            "[{}] {}: {}",
            level_tag(record.level()),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        console::console().flush();
    }
}

/// Installs the console logger. Fails if a logger is already installed.
pub fn init_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_tags() {
        assert_eq!(level_tag(Level::Error), 'E');
        assert_eq!(level_tag(Level::Warn), 'W');
        assert_eq!(level_tag(Level::Info), 'I');
        assert_eq!(level_tag(Level::Debug), 'D');
        assert_eq!(level_tag(Level::Trace), 'T');
    }
}
