//! Bare metal guest mode.
//!
//! There is no environment, filesystem or process here. All output goes to
//! the raw print primitive of a [`GuestConsole`] installed by the embedding
//! runtime; output issued before installation is dropped.

use core::{
    fmt::{self, Arguments, Write},
    hint::spin_loop,
};

use conquer_once::spin::OnceCell;

use crate::{error::LogError, locks::ANONYMOUS};

pub type LogPath = str;

pub(crate) type LogMutex = crate::locks::CheckedMutex<crate::locks::RawSpinLock>;

pub(crate) const FLOAT_SUPPORTED: bool = false;

/// Low level services the guest environment provides to the log.
pub trait GuestConsole: Sync {
    /// Writes `text` verbatim.
    fn print(&self, text: &str);

    /// Identifies the calling thread, distinct for every live thread. The two
    /// largest `usize` values are reserved.
    fn thread_id(&self) -> usize;

    /// Stops the guest. The default parks the calling CPU.
    fn halt(&self, _code: i32) -> ! {
        loop {
            spin_loop()
        }
    }
}

static CONSOLE: OnceCell<&'static dyn GuestConsole> = OnceCell::uninit();

/// Installs the console all log output is routed through. Only the first
/// installation takes effect.
pub fn install(console: &'static dyn GuestConsole) -> Result<(), LogError> {
    CONSOLE
        .try_init_once(|| console)
        .map_err(|_| LogError::ConsoleInstalled)
}

struct ConsoleWriter(&'static dyn GuestConsole);

impl Write for ConsoleWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.print(s);
        Ok(())
    }
}

/// Nothing to resolve without a filesystem; the log mutex is ready statically.
pub(crate) fn initialize(_path: Option<&LogPath>) {}

pub(crate) fn _print(args: Arguments) {
    if let Some(console) = CONSOLE.get() {
        _ = ConsoleWriter(*console).write_fmt(args);
    }
}

pub(crate) fn flush() {}

// the console has no lock of its own to contend on
pub(crate) use self::{_print as _raw_print, flush as raw_flush};

/// Token of the calling thread, [`ANONYMOUS`] until a console is installed.
pub fn thread_self() -> usize {
    CONSOLE.get().map_or(ANONYMOUS, |console| console.thread_id())
}

pub(crate) fn exit(code: i32) -> ! {
    match CONSOLE.get() {
        Some(console) => console.halt(code),
        None => loop {
            spin_loop()
        },
    }
}
