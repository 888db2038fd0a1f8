// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! Locking for structures that are shared between connections, such as
//! process-wide tables and counters. The request parser itself never locks.
//!
//! A [`Guarded`] value is a [`lock_api::Mutex`] over one of two raw locks:
//! * [`NoopLock`] for single-threaded deployments. It is `!Sync`, so the type
//!   system refuses to share anything it guards between threads, and locking
//!   it only flips a flag that rejects re-entrant use.
//! * [`MutexLock`] for multi-threaded deployments, the raw lock of
//!   [`parking_lot::Mutex`].
//!
//! [`DefaultLock`] is selected at build time with the `multi-thread` feature.

use std::cell::Cell;

use parking_lot::lock_api;

pub use lock_api::RawMutex as Lock;

/// The lock used when the caller doesn't pick one explicitly.
#[cfg(feature = "multi-thread")]
pub type DefaultLock = MutexLock;

/// The lock used when the caller doesn't pick one explicitly.
#[cfg(not(feature = "multi-thread"))]
pub type DefaultLock = NoopLock;

/// The lock for multi-threaded builds.
pub type MutexLock = parking_lot::RawMutex;

/// A value that is only reachable while its lock is held.
pub type Guarded<T, L = DefaultLock> = lock_api::Mutex<L, T>;

/// Exclusive access to the value of a [`Guarded`]. Dropping it unlocks.
pub type GuardedRef<'a, T, L = DefaultLock> = lock_api::MutexGuard<'a, L, T>;

/// The lock for single-threaded builds.
#[derive(Debug)]
pub struct NoopLock {
    held: Cell<bool>,
}

unsafe impl Lock for NoopLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: NoopLock = NoopLock { held: Cell::new(false) };

    type GuardMarker = lock_api::GuardNoSend;

    #[inline]
    fn lock(&self) {
        assert!(!self.held.replace(true), "NoopLock acquired while already held");
    }

    #[inline]
    fn try_lock(&self) -> bool {
        !self.held.replace(true)
    }

    #[inline]
    unsafe fn unlock(&self) {
        self.held.set(false);
    }

    #[inline]
    fn is_locked(&self) -> bool {
        self.held.get()
    }
}

/// Release the lock held by `guard`.
#[inline]
pub fn unlock<T, L: Lock>(guard: GuardedRef<'_, T, L>) {
    drop(guard);
}
