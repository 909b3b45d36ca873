//! Execution mode specific capabilities.
//!
//! Exactly one strategy is active per build: `hosted` with the `std` feature,
//! `guest` (bare metal, no OS) without it. Both expose the same set of items,
//! which the printer and the fatal path use without further conditionals.

#[cfg(any(not(feature = "std"), test))]
pub mod guest;
#[cfg(feature = "std")]
pub mod hosted;

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        pub(crate) use hosted as active;
    } else {
        pub(crate) use guest as active;
    }
}

pub use active::LogPath;
pub(crate) use active::{
    FLOAT_SUPPORTED, LogMutex, _print, _raw_print, exit, flush, initialize, raw_flush, thread_self,
};
