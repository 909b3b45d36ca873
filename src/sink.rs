use std::{
    borrow::Cow,
    ffi::{OsStr, OsString},
    path::PathBuf,
};

use crate::config::{DEFAULT_PATH, STDERR_PATH, STDOUT_PATH};

/// Destination of the log stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Not initialized yet. Printers fall back to standard output.
    Unresolved,
    StandardOut,
    StandardError,
    File(PathBuf),
}

impl LogSink {
    /// Maps a resolved log path onto a sink. Only the exact strings `stdout`
    /// and `stderr` name the standard streams.
    pub fn from_path(path: &OsStr) -> Self {
        if path == STDOUT_PATH {
            Self::StandardOut
        } else if path == STDERR_PATH {
            Self::StandardError
        } else {
            Self::File(PathBuf::from(path))
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

/// Picks the log path: the explicit one, else the environment value, else `stdout`.
pub fn resolve_path(explicit: Option<&OsStr>, env: Option<OsString>) -> Cow<'_, OsStr> {
    match (explicit, env) {
        (Some(path), _) => Cow::Borrowed(path),
        (None, Some(path)) => Cow::Owned(path),
        (None, None) => Cow::Borrowed(OsStr::new(DEFAULT_PATH)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_streams() {
        assert_eq!(LogSink::from_path(OsStr::new("stdout")), LogSink::StandardOut);
        assert_eq!(LogSink::from_path(OsStr::new("stderr")), LogSink::StandardError);
    }

    #[test]
    fn near_misses_are_files() {
        for path in ["STDOUT", "stdout ", "stdout.log", "./stderr", ""] {
            assert_eq!(
                LogSink::from_path(OsStr::new(path)),
                LogSink::File(PathBuf::from(path)),
                "{path:?}"
            );
        }
    }

    #[test]
    fn explicit_path_wins() {
        let resolved = resolve_path(Some(OsStr::new("vm.log")), Some("env.log".into()));
        assert_eq!(resolved, OsStr::new("vm.log"));
    }

    #[test]
    fn env_before_default() {
        assert_eq!(resolve_path(None, Some("stderr".into())), OsStr::new("stderr"));
        assert_eq!(resolve_path(None, None), OsStr::new("stdout"));
    }

    #[test]
    fn unresolved() {
        assert!(!LogSink::Unresolved.is_resolved());
        assert!(LogSink::StandardOut.is_resolved());
    }
}
