//! Error checking mutex guarding a log statement.
//!
//! A log statement spans several independent print calls, so the lock is
//! entered and exited explicitly instead of through a guard. The raw lock is
//! any [`lock_api::RawMutex`]; [`CheckedMutex`] adds the owner tracking that
//! turns a relock by the owner or an unlock by anyone else into an error.

mod primitive;

pub use primitive::RawSpinLock;

use core::sync::atomic::{AtomicUsize, Ordering};

use lock_api::RawMutex;

use crate::{error::MutexError, platform::thread_self};

/// Owner value of an unowned mutex. Never handed out as a thread token.
pub(crate) const NO_OWNER: usize = usize::MAX;

/// Token of a thread whose identity is unknown, such as a guest thread before
/// a console is installed. Anonymous threads still exclude each other but are
/// not checked for relocking or foreign unlocks.
pub const ANONYMOUS: usize = usize::MAX - 1;

pub struct CheckedMutex<R: RawMutex> {
    raw: R,
    owner: AtomicUsize,
}

impl<R: RawMutex> CheckedMutex<R> {
    pub const fn new() -> Self {
        Self {
            raw: R::INIT,
            owner: AtomicUsize::new(NO_OWNER),
        }
    }

    /// Blocks until the calling thread owns the mutex.
    pub fn enter(&self) -> Result<(), MutexError> {
        self.enter_as(thread_self())
    }

    /// Releases the mutex. The calling thread must own it.
    pub fn exit(&self) -> Result<(), MutexError> {
        self.exit_as(thread_self())
    }

    pub(crate) fn enter_as(&self, me: usize) -> Result<(), MutexError> {
        // the owner is cleared before the raw lock is released, so only the
        // holder can find its own token here
        if me != ANONYMOUS && self.owner.load(Ordering::Acquire) == me {
            return Err(MutexError::Deadlock);
        }
        self.raw.lock();
        self.owner.store(me, Ordering::Release);
        Ok(())
    }

    pub(crate) fn exit_as(&self, me: usize) -> Result<(), MutexError> {
        if !self.raw.is_locked() {
            return Err(MutexError::NotOwner);
        }
        let owner = self.owner.load(Ordering::Acquire);
        if me != ANONYMOUS && owner != ANONYMOUS && owner != me {
            return Err(MutexError::NotOwner);
        }
        self.owner.store(NO_OWNER, Ordering::Release);
        unsafe { self.raw.unlock() };
        Ok(())
    }
}

impl<R: RawMutex> Default for CheckedMutex<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicBool, AtomicUsize, Ordering},
        },
        thread,
        time::Duration,
        vec::Vec,
    };

    use super::*;

    type SpinChecked = CheckedMutex<RawSpinLock>;

    #[test]
    fn enter_exit() {
        let m = SpinChecked::new();
        assert_eq!(m.enter_as(1), Ok(()));
        assert_eq!(m.exit_as(1), Ok(()));
        assert_eq!(m.enter_as(2), Ok(()));
        assert_eq!(m.exit_as(2), Ok(()));
    }

    #[test]
    fn relock_is_deadlock() {
        let m = SpinChecked::new();
        m.enter_as(7).unwrap();
        assert_eq!(m.enter_as(7), Err(MutexError::Deadlock));
        assert_eq!(m.exit_as(7), Ok(()));
    }

    #[test]
    fn foreign_unlock() {
        let m = SpinChecked::new();
        assert_eq!(m.exit_as(3), Err(MutexError::NotOwner));
        m.enter_as(3).unwrap();
        assert_eq!(m.exit_as(4), Err(MutexError::NotOwner));
        assert_eq!(m.exit_as(3), Ok(()));
        assert_eq!(m.exit_as(3), Err(MutexError::NotOwner));
    }

    #[test]
    fn anonymous_unlock_needs_a_holder() {
        let m = SpinChecked::new();
        assert_eq!(m.exit_as(ANONYMOUS), Err(MutexError::NotOwner));
        m.enter_as(ANONYMOUS).unwrap();
        assert_eq!(m.exit_as(ANONYMOUS), Ok(()));
    }

    type Op = fn(&SpinChecked) -> Result<(), MutexError>;

    fn second_thread_waits(m: Arc<SpinChecked>, enter: Op, exit: Op) {
        enter(&m).unwrap();
        let entered = Arc::new(AtomicBool::new(false));
        let handle = {
            let m = m.clone();
            let entered = entered.clone();
            thread::spawn(move || {
                let res = enter(&m);
                entered.store(true, Ordering::SeqCst);
                res.and_then(|()| exit(&m))
            })
        };
        thread::sleep(Duration::from_millis(50));
        assert!(!entered.load(Ordering::SeqCst));
        exit(&m).unwrap();
        assert_eq!(handle.join().unwrap(), Ok(()));
        assert!(entered.load(Ordering::SeqCst));
    }

    #[test]
    fn contention_blocks() {
        second_thread_waits(
            Arc::new(SpinChecked::new()),
            SpinChecked::enter,
            SpinChecked::exit,
        );
    }

    #[test]
    fn anonymous_contention_blocks() {
        second_thread_waits(
            Arc::new(SpinChecked::new()),
            |m| m.enter_as(ANONYMOUS),
            |m| m.exit_as(ANONYMOUS),
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn parking_lot_backed() {
        let m = CheckedMutex::<parking_lot::RawMutex>::new();
        m.enter().unwrap();
        assert_eq!(m.enter(), Err(MutexError::Deadlock));
        m.exit().unwrap();
        assert_eq!(m.exit(), Err(MutexError::NotOwner));
    }

    #[test]
    fn concurrent() {
        let m = Arc::new(SpinChecked::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let count = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let m = m.clone();
            let inside = inside.clone();
            let count = count.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..500 {
                    m.enter().unwrap();
                    assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                    count.fetch_add(1, Ordering::Relaxed);
                    inside.fetch_sub(1, Ordering::SeqCst);
                    m.exit().unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(count.load(Ordering::Relaxed), 2000);
    }
}
