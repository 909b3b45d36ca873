//! Terminating paths. None of these take the log lock, and none wait on the
//! sink's writer: the caller may already hold either.

use core::fmt::{Arguments, Display};

use crate::{
    config::{EXIT_ASSERTION_FAILURE, NEWLINE},
    platform,
};

/// Logs `log_assert <file_name>[<line_number>]: <condition_text>` and exits
/// with status 1 unless `condition` holds.
pub fn assert_condition(
    condition: bool,
    condition_text: impl Display,
    file_name: impl Display,
    line_number: i32,
) {
    if !condition {
        exit_with(
            EXIT_ASSERTION_FAILURE,
            format_args!("log_assert {file_name}[{line_number}]: {condition_text}"),
        )
    }
}

/// Logs `args` as one line and exits with `code`.
pub fn exit_with(code: i32, args: Arguments) -> ! {
    platform::_raw_print(args);
    platform::_raw_print(format_args!("{NEWLINE}"));
    exit(code)
}

/// Flushes the log and terminates.
pub fn exit(code: i32) -> ! {
    platform::raw_flush();
    platform::exit(code)
}
