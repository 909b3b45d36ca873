use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum MutexError {
    #[error("resource deadlock avoided")]
    Deadlock,
    #[error("operation not permitted")]
    NotOwner,
}

#[derive(Error, Debug)]
pub enum LogError {
    #[error("log stream already initialized")]
    AlreadyInitialized,
    #[error("guest console already installed")]
    ConsoleInstalled,
    #[error(transparent)]
    Open(#[from] OpenError),
}

#[cfg(feature = "std")]
#[derive(Error, Debug)]
#[error("Could not open file for VM output stream: {}", path.display())]
pub struct OpenError {
    pub path: std::path::PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Guest builds have no filesystem, so nothing can fail to open.
#[cfg(not(feature = "std"))]
#[derive(Error, Debug)]
pub enum OpenError {}
