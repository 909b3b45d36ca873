//! Synchronized printing.
//!
//! The print primitives never take the log lock themselves. A statement made
//! of several values is kept whole by bracketing it with [`lock`] and
//! [`unlock`] (or holding a [`LogGuard`]); unbracketed prints may interleave
//! with other threads at any byte.

use core::{
    fmt::{self, Arguments, Display, Write},
    marker::PhantomData,
    mem::size_of,
};

use crate::{
    config::{EXIT_MUTEX_FAILURE, FLOAT_PLACEHOLDER, NEWLINE},
    error::MutexError,
    fatal,
    platform::{self, FLOAT_SUPPORTED, LogMutex},
};

static LOG_MUTEX: LogMutex = LogMutex::new();

/// Acquires the log lock, terminating the process if the mutex fails.
pub fn lock() {
    if let Err(err) = LOG_MUTEX.enter() {
        mutex_failure("lock", err)
    }
}

/// Releases the log lock, terminating the process if the mutex fails.
pub fn unlock() {
    if let Err(err) = LOG_MUTEX.exit() {
        mutex_failure("unlock", err)
    }
}

fn mutex_failure(op: &str, err: MutexError) -> ! {
    fatal::exit_with(
        EXIT_MUTEX_FAILURE,
        format_args!(
            "Thread {:#x} could not {} mutex {:p}: {}",
            platform::thread_self(),
            op,
            &LOG_MUTEX,
            err
        ),
    )
}

/// Holds the log lock until dropped.
///
/// Not `Send`: the lock has to be released by the thread that took it.
#[must_use = "the log lock is released as soon as the guard is dropped"]
pub struct LogGuard {
    _not_send: PhantomData<*const ()>,
}

impl LogGuard {
    pub fn acquire() -> Self {
        lock();
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        unlock()
    }
}

#[doc(hidden)]
pub fn _print(args: Arguments) {
    platform::_print(args);
}

/// Prints already captured format arguments, for wrappers forwarding their
/// caller's `format_args!`.
pub fn print_vformat(args: Arguments) {
    platform::_print(args);
}

pub fn print_int(val: i32) {
    _print(format_args!("{val}"));
}

pub fn print_long(val: i64) {
    _print(format_args!("{val}"));
}

pub fn print_bool(val: bool) {
    _print(format_args!("{val}"));
}

/// Prints the character with scalar value `val`, or U+FFFD if there is none.
pub fn print_char(val: i32) {
    let c = u32::try_from(val)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    _print(format_args!("{c}"));
}

pub fn print_word(address: usize) {
    _print(format_args!("{}", Word(address)));
}

pub fn print_newline() {
    _print(format_args!("{NEWLINE}"));
}

pub fn print_buffer(buffer: &str) {
    _print(format_args!("{buffer}"));
}

/// Prints raw text that may not be valid UTF-8.
pub fn print_bytes(buffer: &[u8]) {
    _print(format_args!("{}", Lossy(buffer)));
}

/// Six fractional digits, like C's `%f`. Output is not guaranteed to match
/// the legacy runtime bit for bit; non-finite values print as `inf` and `NaN`.
pub fn print_float(val: f32) {
    _print(format_args!("{}", Float(f64::from(val))));
}

pub fn print_double(val: f64) {
    _print(format_args!("{}", Float(val)));
}

/// Pushes out a partially written line.
pub fn flush() {
    platform::flush();
}

/// Native width hexadecimal, `0x` included.
struct Word(usize);

impl Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#0width$x}", self.0, width = 2 + 2 * size_of::<usize>())
    }
}

/// Displays bytes as text, each invalid UTF-8 sequence as U+FFFD.
pub struct Lossy<'a>(pub &'a [u8]);

impl Display for Lossy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.0.utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_char(char::REPLACEMENT_CHARACTER)?;
            }
        }
        Ok(())
    }
}

struct Float(f64);

impl Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if FLOAT_SUPPORTED {
            write!(f, "{:.6}", self.0)
        } else {
            f.write_str(FLOAT_PLACEHOLDER)
        }
    }
}
