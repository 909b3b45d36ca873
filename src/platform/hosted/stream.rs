//! The process wide log stream of hosted builds.

use core::fmt::Arguments;
use std::{
    env,
    ffi::OsStr,
    fs::File,
    io::{self, LineWriter, Write},
    process,
};

use conquer_once::spin::OnceCell;
use spin::Mutex;

use crate::{
    config::{EXIT_OPEN_FAILURE, LOG_FILE_ENV},
    error::{LogError, OpenError},
    sink::{LogSink, resolve_path},
};

static STREAM: OnceCell<Stream> = OnceCell::uninit();
static UNRESOLVED: LogSink = LogSink::Unresolved;

#[derive(Debug)]
struct Stream {
    sink: LogSink,
    out: Output,
}

#[derive(Debug)]
enum Output {
    Stdout,
    Stderr,
    File(Mutex<LineWriter<File>>),
}

impl Stream {
    fn open(sink: LogSink) -> Result<Self, OpenError> {
        let out = match &sink {
            LogSink::Unresolved | LogSink::StandardOut => Output::Stdout,
            LogSink::StandardError => Output::Stderr,
            LogSink::File(path) => {
                let file = File::create(path).map_err(|source| OpenError {
                    path: path.clone(),
                    source,
                })?;
                Output::File(Mutex::new(LineWriter::new(file)))
            }
        };
        Ok(Self { sink, out })
    }

    fn write_fmt(&self, args: Arguments) {
        // failed writes are dropped, there is nowhere left to report them
        _ = match &self.out {
            Output::Stdout => io::stdout().write_fmt(args),
            Output::Stderr => io::stderr().write_fmt(args),
            Output::File(file) => file.lock().write_fmt(args),
        };
    }

    fn flush(&self) {
        _ = match &self.out {
            Output::Stdout => io::stdout().flush(),
            Output::Stderr => io::stderr().flush(),
            Output::File(file) => file.lock().flush(),
        };
    }

    /// Like [`Stream::write_fmt`], but never waits on the file writer. If the
    /// calling thread is already inside a write (a fatal call from a
    /// `Display` impl being logged) the text goes to standard error.
    fn try_write_fmt(&self, args: Arguments) {
        let Output::File(file) = &self.out else {
            return self.write_fmt(args);
        };
        _ = match file.try_lock() {
            Some(mut file) => file.write_fmt(args),
            None => io::stderr().write_fmt(args),
        };
    }

    fn try_flush(&self) {
        let Output::File(file) = &self.out else {
            return self.flush();
        };
        if let Some(mut file) = file.try_lock() {
            _ = file.flush();
        }
    }
}

/// Resolves and opens the log stream.
///
/// The path is `path` if given, else the value of [`LOG_FILE_ENV`], else
/// `stdout`. Fails if the stream is already set up or the file cannot be
/// created; the stream stays unresolved in both cases.
pub fn try_initialize(path: Option<&OsStr>) -> Result<&'static LogSink, LogError> {
    if current_sink().is_resolved() {
        return Err(LogError::AlreadyInitialized);
    }
    let path = resolve_path(path, env::var_os(LOG_FILE_ENV));
    let stream = Stream::open(LogSink::from_path(&path))?;
    STREAM
        .try_init_once(|| stream)
        .map_err(|_| LogError::AlreadyInitialized)?;
    Ok(current_sink())
}

pub(crate) fn initialize(path: Option<&OsStr>) {
    match try_initialize(path) {
        Ok(_) | Err(LogError::AlreadyInitialized) => {}
        Err(err) => {
            _ = writeln!(io::stderr(), "{err}");
            process::exit(EXIT_OPEN_FAILURE)
        }
    }
}

/// The active sink, [`LogSink::Unresolved`] before initialization.
pub fn current_sink() -> &'static LogSink {
    STREAM.get().map_or(&UNRESOLVED, |stream| &stream.sink)
}

pub(crate) fn _print(args: Arguments) {
    match STREAM.get() {
        Some(stream) => stream.write_fmt(args),
        None => {
            _ = io::stdout().write_fmt(args);
        }
    }
}

pub(crate) fn flush() {
    match STREAM.get() {
        Some(stream) => stream.flush(),
        None => {
            _ = io::stdout().flush();
        }
    }
}

pub(crate) fn _raw_print(args: Arguments) {
    match STREAM.get() {
        Some(stream) => stream.try_write_fmt(args),
        None => _print(args),
    }
}

pub(crate) fn raw_flush() {
    match STREAM.get() {
        Some(stream) => stream.try_flush(),
        None => flush(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn file_stream_is_line_buffered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vm.log");
        let stream = Stream::open(LogSink::File(path.clone())).unwrap();
        assert_eq!(stream.sink, LogSink::File(path.clone()));

        stream.write_fmt(format_args!("{} ", 42));
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        stream.write_fmt(format_args!("done\n"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "42 done\n");

        stream.write_fmt(format_args!("partial"));
        stream.flush();
        assert_eq!(fs::read_to_string(&path).unwrap(), "42 done\npartial");
    }

    #[test]
    fn held_writer_diverts_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vm.log");
        let stream = Stream::open(LogSink::File(path.clone())).unwrap();
        let Output::File(file) = &stream.out else {
            panic!("file sink without a file writer");
        };

        let held = file.lock();
        stream.try_write_fmt(format_args!("diverted\n"));
        stream.try_flush();
        drop(held);
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        stream.try_write_fmt(format_args!("kept"));
        stream.try_flush();
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept");
    }

    #[test]
    fn file_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vm.log");
        fs::write(&path, "stale contents\n").unwrap();
        let stream = Stream::open(LogSink::File(path.clone())).unwrap();
        stream.flush();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("vm.log");
        let err = Stream::open(LogSink::File(path.clone())).unwrap_err();
        assert_eq!(err.path, path);
        assert!(err.to_string().contains(path.to_str().unwrap()));
    }

    #[test]
    fn resolves_once() {
        assert!(!current_sink().is_resolved());
        let sink = try_initialize(Some(OsStr::new("stdout"))).unwrap();
        assert_eq!(*sink, LogSink::StandardOut);
        assert!(current_sink().is_resolved());
        assert!(matches!(
            try_initialize(Some(OsStr::new("stderr"))),
            Err(LogError::AlreadyInitialized)
        ));
        assert_eq!(*current_sink(), LogSink::StandardOut);
    }

    #[test]
    fn standard_streams_need_no_file() {
        let stream = Stream::open(LogSink::StandardError).unwrap();
        assert!(matches!(stream.out, Output::Stderr));
        let stream = Stream::open(LogSink::StandardOut).unwrap();
        assert!(matches!(stream.out, Output::Stdout));
    }
}
