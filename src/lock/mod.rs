//! Bounded-wait locking for the graph's collections.
//!
//! Every collection — the graph's node registry and each node's edge
//! registry — is guarded by exactly one [`TimedMutex`]. Acquisition waits
//! up to a configured bound and fails with `GraphError::LockTimeout`
//! instead of blocking forever. Release is guard-scoped: once acquired,
//! the lock is freed on every exit path, success or error.
//!
//! Lock order is strict where locks compose: the graph lock is always
//! taken before any node lock, and no two node locks are ever held at
//! the same time.

mod timed;

pub use timed::{clamp_wait, TimedMutex, MAX_LOCK_WAIT};
