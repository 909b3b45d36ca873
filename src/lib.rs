//! Process wide diagnostic log of the VM.
//!
//! One output stream, chosen once by [`initialize`], one lock, and a print
//! primitive for each value type the runtime handles. Printing never
//! allocates, so the log stays usable while the runtime is crashing.
//!
//! ```no_run
//! vmlog::initialize(None);
//! vmlog::log_println!("loaded {} classes", 42);
//!
//! let _guard = vmlog::LogGuard::acquire();
//! vmlog::print::print_buffer("sp=");
//! vmlog::print::print_word(0x7fff_0000);
//! vmlog::print::print_newline();
//! ```
//!
//! Without the `std` feature the crate targets bare metal guests: output goes
//! through an installed `GuestConsole` and there is no sink selection.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

pub mod config;
pub mod error;
pub mod fatal;
pub mod locks;
pub mod platform;
pub mod print;
#[cfg(feature = "std")]
pub mod sink;

#[cfg(feature = "log")]
pub mod bridge;

pub use error::{LogError, MutexError};
pub use print::{LogGuard, lock, unlock};

#[cfg(feature = "std")]
pub use platform::hosted::{current_sink, try_initialize};
#[cfg(feature = "std")]
pub use sink::LogSink;

#[cfg(not(feature = "std"))]
pub use platform::guest::{GuestConsole, install};

/// Sets up the log stream. Call once, before logging from several threads.
///
/// Hosted builds resolve the sink from `path`, the log file environment
/// variable or `stdout`, in that order, and terminate the process with
/// status 1 if a log file cannot be opened. Later calls are ignored.
pub fn initialize(path: Option<&platform::LogPath>) {
    platform::initialize(path);
}

/// Prints without taking the log lock.
#[macro_export]
macro_rules! log_print {
    ($($arg:tt)*) => {
        $crate::print::_print(format_args!($($arg)*));
    };
}

/// Prints one whole line under the log lock.
#[macro_export]
macro_rules! log_println {
    () => {{
        let _guard = $crate::print::LogGuard::acquire();
        $crate::print::print_newline();
    }};
    ($($arg:tt)*) => {{
        let _guard = $crate::print::LogGuard::acquire();
        $crate::print::_print(format_args!($($arg)*));
        $crate::print::print_newline();
    }};
}

/// Logs a line without locking and exits with the given status.
#[macro_export]
macro_rules! log_exit {
    ($code:expr, $($arg:tt)*) => {
        $crate::fatal::exit_with($code, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_assert {
    ($cond:expr) => {
        $crate::fatal::assert_condition($cond, stringify!($cond), file!(), line!() as i32)
    };
}
