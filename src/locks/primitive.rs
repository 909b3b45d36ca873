use core::{
    hint::spin_loop,
    sync::atomic::{AtomicBool, Ordering},
};

use lock_api::{GuardSend, RawMutex};

/// Busy waiting raw lock for guests without an OS to block on.
#[derive(Debug)]
pub struct RawSpinLock {
    lock: AtomicBool,
}

unsafe impl RawMutex for RawSpinLock {
    const INIT: Self = Self {
        lock: AtomicBool::new(false),
    };
    type GuardMarker = GuardSend;

    fn lock(&self) {
        while self.lock.swap(true, Ordering::Acquire) {
            spin_loop()
        }
    }

    fn try_lock(&self) -> bool {
        !self.lock.swap(true, Ordering::Acquire)
    }

    unsafe fn unlock(&self) {
        self.lock.store(false, Ordering::Release)
    }

    fn is_locked(&self) -> bool {
        self.lock.load(Ordering::Acquire)
    }
}
