//! C entry points of the VM log, for the native half of the runtime.
//!
//! Every function takes the same C types as the runtime's `log.h`. None of
//! the printers lock; callers bracket statements with `log_lock` and
//! `log_unlock`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

use core::ffi::{CStr, c_char, c_double, c_float, c_int};

use vmlog::{
    fatal,
    print::{self, Lossy},
};

const NULL_TEXT: &[u8] = b"(null)";

/// Borrows a C string as displayable text, `(null)` for a null pointer.
///
/// # Safety
/// `ptr` is null or points to a NUL terminated string that outlives `'a`.
unsafe fn text<'a>(ptr: *const c_char) -> Lossy<'a> {
    if ptr.is_null() {
        return Lossy(NULL_TEXT);
    }
    Lossy(unsafe { CStr::from_ptr(ptr) }.to_bytes())
}

fn truth(val: c_char) -> bool {
    val != 0
}

/// # Safety
/// `path` is null or a valid NUL terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn log_initialize(path: *const c_char) {
    unsafe { open_stream(path) }
}

#[cfg(all(feature = "std", unix))]
unsafe fn open_stream(path: *const c_char) {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    if path.is_null() {
        vmlog::initialize(None);
    } else {
        let path = unsafe { CStr::from_ptr(path) }.to_bytes();
        vmlog::initialize(Some(OsStr::from_bytes(path)));
    }
}

#[cfg(all(feature = "std", not(unix)))]
unsafe fn open_stream(path: *const c_char) {
    use std::ffi::OsStr;

    if path.is_null() {
        vmlog::initialize(None);
    } else {
        let path = unsafe { CStr::from_ptr(path) }.to_string_lossy();
        vmlog::initialize(Some(OsStr::new(path.as_ref())));
    }
}

// guests have a single console, the path is ignored
#[cfg(not(feature = "std"))]
unsafe fn open_stream(_path: *const c_char) {
    vmlog::initialize(None);
}

#[unsafe(no_mangle)]
pub extern "C" fn log_lock() {
    vmlog::lock();
}

#[unsafe(no_mangle)]
pub extern "C" fn log_unlock() {
    vmlog::unlock();
}

#[unsafe(no_mangle)]
pub extern "C" fn log_flush() {
    print::flush();
}

#[unsafe(no_mangle)]
pub extern "C" fn log_print_int(val: c_int) {
    print::print_int(val);
}

#[unsafe(no_mangle)]
pub extern "C" fn log_print_boolean(val: c_char) {
    print::print_bool(truth(val));
}

#[unsafe(no_mangle)]
pub extern "C" fn log_print_char(val: c_int) {
    print::print_char(val);
}

#[unsafe(no_mangle)]
pub extern "C" fn log_print_long(val: i64) {
    print::print_long(val);
}

/// # Safety
/// `buffer` is null or a valid NUL terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn log_print_buffer(buffer: *const c_char) {
    print::print_bytes(unsafe { text(buffer) }.0);
}

#[unsafe(no_mangle)]
pub extern "C" fn log_print_word(address: usize) {
    print::print_word(address);
}

#[unsafe(no_mangle)]
pub extern "C" fn log_print_newline() {
    print::print_newline();
}

#[unsafe(no_mangle)]
pub extern "C" fn log_print_float(val: c_float) {
    print::print_float(val);
}

#[unsafe(no_mangle)]
pub extern "C" fn log_print_double(val: c_double) {
    print::print_double(val);
}

/// # Safety
/// `condition_text` and `file_name` are null or valid NUL terminated strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn log_assert(
    condition: c_char,
    condition_text: *const c_char,
    file_name: *const c_char,
    line_number: c_int,
) {
    if truth(condition) {
        return;
    }
    let (condition_text, file_name) = unsafe { (text(condition_text), text(file_name)) };
    fatal::assert_condition(false, condition_text, file_name, line_number);
}
