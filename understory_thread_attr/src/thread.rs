// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thread identity and the current/primary thread context.
//!
//! An [`AttributeStore`](crate::AttributeStore) never asks the platform which
//! thread is running. It asks its [`ThreadContext`], which answers two
//! questions: which thread is calling, and which thread is primary.
//!
//! - [`OsThreads`] answers from real OS threads.
//! - [`ManualThreads`] simulates threads on a single OS thread, so the
//!   inheritance and backfill rules can be exercised deterministically.

use core::cell::Cell;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_THREAD: AtomicU64 = AtomicU64::new(1);

std::thread_local! {
    static CURRENT: ThreadKey = ThreadKey::fresh();
}

/// A process-wide unique thread identity.
///
/// Keys are drawn from a monotonic counter and are never reused, including
/// after the thread they were assigned to has exited.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadKey(u64);

impl ThreadKey {
    /// Returns the key of the calling OS thread, assigning one on first use.
    #[must_use]
    pub fn current() -> Self {
        CURRENT.with(|key| *key)
    }

    /// Allocates a key that is not bound to any OS thread.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_THREAD.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw value of this key.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ThreadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ThreadKey").field(&self.0).finish()
    }
}

/// Supplies the calling thread and the primary thread to a store.
pub trait ThreadContext {
    /// Returns the key of the thread performing the current operation.
    fn current(&self) -> ThreadKey;

    /// Returns the key of the primary thread.
    ///
    /// Must return the same key for the whole lifetime of the context.
    fn primary(&self) -> ThreadKey;

    /// Returns `true` if the calling thread is the primary thread.
    #[inline]
    fn is_primary(&self) -> bool {
        self.current() == self.primary()
    }
}

/// A [`ThreadContext`] backed by real OS threads.
///
/// # Example
///
/// ```rust
/// use understory_thread_attr::{OsThreads, ThreadContext, ThreadKey};
///
/// let threads = OsThreads::new();
/// assert!(threads.is_primary());
///
/// std::thread::spawn(move || {
///     assert!(!threads.is_primary());
///     assert_eq!(threads.current(), ThreadKey::current());
/// })
/// .join()
/// .unwrap();
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OsThreads {
    primary: ThreadKey,
}

impl OsThreads {
    /// Creates a context whose primary thread is the calling thread.
    ///
    /// Call this from the thread that owns the process, typically `main`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_primary(ThreadKey::current())
    }

    /// Creates a context with an explicit primary thread.
    #[must_use]
    pub const fn with_primary(primary: ThreadKey) -> Self {
        Self { primary }
    }
}

impl Default for OsThreads {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadContext for OsThreads {
    #[inline]
    fn current(&self) -> ThreadKey {
        ThreadKey::current()
    }

    #[inline]
    fn primary(&self) -> ThreadKey {
        self.primary
    }
}

/// A [`ThreadContext`] that simulates threads on one OS thread.
///
/// The context starts out "on" the primary thread. [`spawn`](Self::spawn)
/// allocates new simulated threads and [`enter`](Self::enter) switches
/// between them.
///
/// # Example
///
/// ```rust
/// use understory_thread_attr::{ManualThreads, ThreadContext};
///
/// let threads = ManualThreads::new();
/// let worker = threads.spawn();
///
/// assert!(threads.is_primary());
/// threads.enter(worker);
/// assert_eq!(threads.current(), worker);
/// assert!(!threads.is_primary());
/// ```
#[derive(Debug)]
pub struct ManualThreads {
    primary: ThreadKey,
    current: Cell<ThreadKey>,
}

impl ManualThreads {
    /// Creates a simulation with a fresh primary thread as the current thread.
    #[must_use]
    pub fn new() -> Self {
        let primary = ThreadKey::fresh();
        Self {
            primary,
            current: Cell::new(primary),
        }
    }

    /// Allocates a new simulated thread without switching to it.
    #[must_use]
    pub fn spawn(&self) -> ThreadKey {
        ThreadKey::fresh()
    }

    /// Makes `thread` the current thread.
    pub fn enter(&self, thread: ThreadKey) {
        self.current.set(thread);
    }

    /// Runs `f` with `thread` as the current thread, then restores the previous one.
    pub fn on<R>(&self, thread: ThreadKey, f: impl FnOnce() -> R) -> R {
        let previous = self.current.replace(thread);
        let result = f();
        self.current.set(previous);
        result
    }
}

impl Default for ManualThreads {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadContext for ManualThreads {
    #[inline]
    fn current(&self) -> ThreadKey {
        self.current.get()
    }

    #[inline]
    fn primary(&self) -> ThreadKey {
        self.primary
    }
}
