//! Routes records of the `log` facade into the VM log.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::print::{_print, LogGuard, flush, print_newline};

/// Writes every record as one `[LEVEL] message` line under the log lock.
pub struct VmLogger;

impl Log for VmLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let _guard = LogGuard::acquire();
        _print(format_args!("[{}] {}", record.level(), record.args()));
        print_newline();
    }

    fn flush(&self) {
        flush();
    }
}

static LOGGER: VmLogger = VmLogger;

/// Installs [`VmLogger`] as the global `log` logger.
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Trace))
}
