mod stream;

pub use stream::{current_sink, try_initialize};
pub(crate) use stream::{_print, _raw_print, flush, initialize, raw_flush};

/// Log paths are OS strings, handed to the filesystem byte for byte.
pub type LogPath = std::ffi::OsStr;

pub(crate) type LogMutex = crate::locks::CheckedMutex<parking_lot::RawMutex>;

pub(crate) const FLOAT_SUPPORTED: bool = true;

std::thread_local! {
    static THREAD_TOKEN: u8 = const { 0 };
}

/// Token of the calling thread: the address of a thread local, unique among
/// live threads and available without allocating.
pub fn thread_self() -> usize {
    THREAD_TOKEN.with(|token| token as *const u8 as usize)
}

pub(crate) fn exit(code: i32) -> ! {
    std::process::exit(code)
}
