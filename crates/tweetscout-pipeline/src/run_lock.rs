//! Single-flight run lock.

use std::sync::atomic::{AtomicBool, Ordering};

/// Guards against overlapping scout runs.
///
/// Acquired with a compare-exchange before a run starts; the guard releases
/// the lock on drop, so every exit path — completion, early return, panic
/// unwind — clears the flag. An overlapping trigger observes the held lock
/// and is skipped, never queued.
#[derive(Debug, Default)]
pub struct RunLock {
    in_flight: AtomicBool,
}

impl RunLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to take the lock; `None` means a run is already in flight.
    #[must_use]
    pub fn try_acquire(&self) -> Option<RunGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunGuard { lock: self })
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Releases the [`RunLock`] when dropped.
#[derive(Debug)]
pub struct RunGuard<'a> {
    lock: &'a RunLock,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.lock.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_while_guard_is_held() {
        let lock = RunLock::new();
        let guard = lock.try_acquire().expect("first acquire should succeed");
        assert!(lock.try_acquire().is_none(), "lock must be exclusive");
        drop(guard);
        assert!(lock.try_acquire().is_some(), "lock must be reusable");
    }

    #[test]
    fn guard_releases_on_drop() {
        let lock = RunLock::new();
        {
            let _guard = lock.try_acquire().unwrap();
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }
}
