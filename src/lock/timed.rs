//
//  timed.rs
//  Junction
//

use parking_lot::{Mutex, MutexGuard};
use std::time::Duration;

use crate::error::{GraphError, Result};

/// Ceiling (and default) for a single lock-acquisition wait.
pub const MAX_LOCK_WAIT: Duration = Duration::from_secs(120);

/// Clamp a requested wait into `[0, MAX_LOCK_WAIT]`.
pub fn clamp_wait(wait: Duration) -> Duration {
    wait.min(MAX_LOCK_WAIT)
}

/// A mutex whose acquisition is bounded by a per-instance wait.
///
/// Wraps `parking_lot::Mutex`: the guard releases on drop, and the lock
/// never poisons, so there is no abandoned-lock state to surface.
#[derive(Debug)]
pub struct TimedMutex<T> {
    inner: Mutex<T>,
    wait: Duration,
    collection: String,
}

impl<T> TimedMutex<T> {
    /// Wrap `value`, bounding every acquisition by `wait` (clamped).
    /// `collection` names the guarded collection in timeout errors.
    pub fn new(value: T, wait: Duration, collection: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(value),
            wait: clamp_wait(wait),
            collection: collection.into(),
        }
    }

    /// Acquire the lock, waiting up to the configured bound.
    pub fn lock(&self) -> Result<MutexGuard<'_, T>> {
        self.inner
            .try_lock_for(self.wait)
            .ok_or_else(|| GraphError::LockTimeout {
                collection: self.collection.clone(),
                waited: self.wait,
            })
    }

    /// The configured wait bound.
    pub fn wait(&self) -> Duration {
        self.wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lock_and_mutate() {
        let mutex = TimedMutex::new(0usize, Duration::from_secs(1), "counter");
        {
            let mut guard = mutex.lock().unwrap();
            *guard += 1;
        }
        assert_eq!(*mutex.lock().unwrap(), 1);
    }

    #[test]
    fn test_zero_wait_uncontended() {
        let mutex = TimedMutex::new(5, Duration::ZERO, "counter");
        assert_eq!(*mutex.lock().unwrap(), 5);
    }

    #[test]
    fn test_wait_clamped_to_ceiling() {
        let mutex = TimedMutex::new((), Duration::from_secs(600), "counter");
        assert_eq!(mutex.wait(), MAX_LOCK_WAIT);
    }

    #[test]
    fn test_contended_lock_times_out() {
        let mutex = Arc::new(TimedMutex::new((), Duration::from_millis(50), "counter"));
        let held = Arc::new(AtomicBool::new(false));

        let m = mutex.clone();
        let h = held.clone();
        let holder = thread::spawn(move || {
            let _guard = m.lock().unwrap();
            h.store(true, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(300));
        });

        while !held.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(5));
        }

        let err = mutex.lock().unwrap_err();
        match err {
            GraphError::LockTimeout { collection, waited } => {
                assert_eq!(collection, "counter");
                assert_eq!(waited, Duration::from_millis(50));
            }
            other => panic!("expected LockTimeout, got {other:?}"),
        }

        holder.join().unwrap();
        assert!(mutex.lock().is_ok(), "lock should be free after holder exits");
    }
}
