//! Build-time configuration of the log stream.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "tele")] {
        /// Environment variable consulted when no explicit log path is given.
        pub const LOG_FILE_ENV: &str = "TELE_LOG_FILE";
    } else {
        /// Environment variable consulted when no explicit log path is given.
        pub const LOG_FILE_ENV: &str = "MAXINE_LOG_FILE";
    }
}

cfg_if! {
    if #[cfg(any(windows, feature = "crlf"))] {
        pub const NEWLINE: &str = "\r\n";
    } else {
        pub const NEWLINE: &str = "\n";
    }
}

pub const STDOUT_PATH: &str = "stdout";
pub const STDERR_PATH: &str = "stderr";
pub const DEFAULT_PATH: &str = STDOUT_PATH;

pub const EXIT_OPEN_FAILURE: i32 = 1;
pub const EXIT_MUTEX_FAILURE: i32 = -1;
pub const EXIT_ASSERTION_FAILURE: i32 = 1;

/// Printed in place of floating point values where the platform cannot format them.
pub const FLOAT_PLACEHOLDER: &str = "not supported";
