// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-thread attribute storage with primary-thread fallback.
//!
//! This module provides [`AttributeStore`], which keeps one table per thread,
//! keyed by owner and attribute. A thread sees only its own table, with two
//! exceptions involving the primary thread:
//!
//! - **Inheritance copy**: a thread reading an entry it has never defined
//!   receives a duplicate of the primary thread's value, which becomes the
//!   thread's own entry. Later primary writes do not reach it.
//! - **Backfill**: a thread writing an entry the primary thread has never
//!   defined also writes the same value into the primary's table.
//!
//! # Locking
//!
//! Each table sits behind its own [`Mutex`]. A non-primary table is locked
//! only by its own thread, so that lock is never contended. The primary
//! table is the one table other threads write to, and only for backfill.
//!
//! # Retention
//!
//! Tables are never compacted. Every `(owner, attribute)` pair touched on a
//! thread stays in that thread's table for the life of the store, including
//! after the owner is dropped or the thread exits. [`AttributeStore::entry_count`]
//! and [`AttributeStore::thread_count`] expose the growth.

use alloc::sync::Arc;
use core::any::{TypeId, type_name};
use core::fmt;

use hashbrown::HashMap;
use parking_lot::{Mutex, RwLock};

use crate::id::{Attribute, AttributeId, OwnerId};
use crate::metadata::AttributeMetadata;
use crate::registry::{AttributeRegistration, AttributeRegistry};
use crate::thread::{ThreadContext, ThreadKey};
use crate::value::ErasedValue;

type SlotKey = (OwnerId, AttributeId);

/// How a write on a non-primary thread backfills an undefined primary entry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BackfillPolicy {
    /// The primary entry is checked and written under one lock acquisition.
    ///
    /// When several threads race to backfill the same entry, the first write
    /// to land is kept and the others leave the primary untouched.
    #[default]
    FirstWriterWins,
    /// The primary entry is checked and written under separate lock acquisitions.
    ///
    /// Threads racing to backfill the same entry may all observe it as
    /// undefined, and the last write to land is kept.
    LastWriterWins,
}

#[cold]
fn wrong_type<T>(id: AttributeId) -> ! {
    panic!(
        "Attribute {id} is not declared with type `{}`",
        type_name::<T>()
    )
}

/// One thread's entries. Presence of a key is the defined flag.
#[derive(Debug, Default)]
struct ThreadTable {
    slots: Mutex<HashMap<SlotKey, ErasedValue>>,
}

impl ThreadTable {
    fn read<T: Clone + 'static>(&self, key: SlotKey) -> Option<T> {
        let slots = self.slots.lock();
        let value = slots.get(&key)?;
        match value.downcast_ref::<T>() {
            Some(value) => Some(value.clone()),
            None => wrong_type::<T>(key.1),
        }
    }

    fn contains(&self, key: SlotKey) -> bool {
        self.slots.lock().contains_key(&key)
    }

    fn write(&self, key: SlotKey, value: ErasedValue) {
        self.slots.lock().insert(key, value);
    }

    fn insert_if_absent(&self, key: SlotKey, value: ErasedValue) -> bool {
        let mut slots = self.slots.lock();
        if slots.contains_key(&key) {
            false
        } else {
            slots.insert(key, value);
            true
        }
    }

    fn len(&self) -> usize {
        self.slots.lock().len()
    }
}

/// Thread-local attribute values for any number of owners.
///
/// # Example
///
/// ```rust
/// use understory_thread_attr::{AttributeMetadata, AttributeRegistry, AttributeStore, OsThreads, OwnerId};
///
/// let mut registry = AttributeRegistry::new();
/// let page_size = registry.declare("page_size", AttributeMetadata::new(Option::<u32>::None));
/// let store = AttributeStore::new(registry, OsThreads::new());
/// let sheet = OwnerId::next();
///
/// store.set(sheet, page_size, Some(10));
///
/// std::thread::scope(|s| {
///     s.spawn(|| {
///         // Inherited from the primary thread, then owned by this thread.
///         assert_eq!(store.get(sheet, page_size), Some(10));
///         store.set(sheet, page_size, Some(20));
///         assert_eq!(store.get(sheet, page_size), Some(20));
///     });
/// });
///
/// // The primary thread already had a value, so it was not backfilled.
/// assert_eq!(store.get(sheet, page_size), Some(10));
/// ```
pub struct AttributeStore<C> {
    registry: AttributeRegistry,
    threads: C,
    backfill: BackfillPolicy,
    tables: RwLock<HashMap<ThreadKey, Arc<ThreadTable>>>,
}

impl<C: ThreadContext> AttributeStore<C> {
    /// Creates a store with the default [`BackfillPolicy`].
    #[must_use]
    pub fn new(registry: AttributeRegistry, threads: C) -> Self {
        Self::builder(registry, threads).build()
    }

    /// Returns a builder for configuring a store.
    #[must_use]
    pub fn builder(registry: AttributeRegistry, threads: C) -> AttributeStoreBuilder<C> {
        AttributeStoreBuilder {
            registry,
            threads,
            backfill: BackfillPolicy::default(),
        }
    }

    /// Returns the registry of declared attributes.
    #[must_use]
    #[inline]
    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    /// Returns the thread context.
    #[must_use]
    #[inline]
    pub fn threads(&self) -> &C {
        &self.threads
    }

    /// Returns the backfill policy.
    #[must_use]
    #[inline]
    pub fn backfill_policy(&self) -> BackfillPolicy {
        self.backfill
    }

    fn existing_table(&self, thread: ThreadKey) -> Option<Arc<ThreadTable>> {
        self.tables.read().get(&thread).cloned()
    }

    fn table(&self, thread: ThreadKey) -> Arc<ThreadTable> {
        if let Some(table) = self.existing_table(thread) {
            return table;
        }
        Arc::clone(self.tables.write().entry(thread).or_default())
    }

    /// Checks that `attribute` was declared in this store's registry with type `T`.
    fn registration<T: 'static>(&self, attribute: Attribute<T>) -> &AttributeRegistration {
        let Some(registration) = self.registry.get(attribute.id()) else {
            panic!(
                "Attribute {} is not declared in this store's registry",
                attribute.id()
            )
        };
        if registration.type_id() != TypeId::of::<T>() {
            wrong_type::<T>(attribute.id());
        }
        registration
    }

    fn metadata<T: Clone + Send + Sync + 'static>(
        &self,
        attribute: Attribute<T>,
    ) -> &AttributeMetadata<T> {
        match self.registration(attribute).metadata::<T>() {
            Some(metadata) => metadata,
            None => wrong_type::<T>(attribute.id()),
        }
    }

    /// Reads the calling thread's value without falling back to the default.
    ///
    /// 1. If the calling thread has an entry, it is returned as is.
    /// 2. Otherwise, if the primary thread has an entry, it is duplicated with
    ///    [`AttributeMetadata::duplicate`], the duplicate becomes the calling
    ///    thread's entry, and the duplicate is returned.
    /// 3. Otherwise `None` is returned and nothing is stored.
    ///
    /// # Panics
    ///
    /// Panics if `attribute` is not declared in this store's registry, or
    /// was declared with a type other than `T`.
    #[must_use]
    pub fn lookup<T: Clone + Send + Sync + 'static>(
        &self,
        owner: OwnerId,
        attribute: Attribute<T>,
    ) -> Option<T> {
        let metadata = self.metadata(attribute);
        let key = (owner, attribute.id());
        let current = self.threads.current();
        if let Some(value) = self
            .existing_table(current)
            .and_then(|table| table.read::<T>(key))
        {
            return Some(value);
        }

        let inherited = self
            .existing_table(self.threads.primary())?
            .read::<T>(key)?;
        let copy = metadata.duplicate(&inherited);
        self.table(current).write(key, ErasedValue::new(copy.clone()));
        log::trace!(
            "{current:?} inherited `{}` of {owner:?} from the primary thread",
            self.registration(attribute).name(),
        );
        Some(copy)
    }

    /// Reads the calling thread's value, storing the declared default if no
    /// value exists on this thread or the primary thread.
    ///
    /// The default is stored with [`set`](Self::set), so it may also backfill
    /// the primary thread.
    ///
    /// # Panics
    ///
    /// Panics if `attribute` is not declared in this store's registry, or
    /// was declared with a type other than `T`.
    #[must_use]
    pub fn get<T: Clone + Send + Sync + 'static>(
        &self,
        owner: OwnerId,
        attribute: Attribute<T>,
    ) -> T {
        if let Some(value) = self.lookup(owner, attribute) {
            return value;
        }
        let default = self.metadata(attribute).default_value().clone();
        log::trace!(
            "{:?} filled `{}` of {owner:?} with its default",
            self.threads.current(),
            self.registration(attribute).name(),
        );
        self.set(owner, attribute, default.clone());
        default
    }

    /// Writes the calling thread's value.
    ///
    /// The value replaces whatever the calling thread held. If the primary
    /// thread has no entry yet, the same value is written there too.
    ///
    /// Returns `true` if the write was also backfilled into the primary
    /// thread, which only happens for writes from other threads. Under
    /// [`BackfillPolicy::FirstWriterWins`] at most one write per
    /// `(owner, attribute)` returns `true`.
    ///
    /// # Panics
    ///
    /// Panics if `attribute` is not declared in this store's registry, or
    /// was declared with a type other than `T`.
    pub fn set<T: Clone + Send + Sync + 'static>(
        &self,
        owner: OwnerId,
        attribute: Attribute<T>,
        value: T,
    ) -> bool {
        let name = self.registration(attribute).name();
        let key = (owner, attribute.id());
        let value = ErasedValue::new(value);
        self.table(self.threads.current()).write(key, value.clone());

        let primary = self.table(self.threads.primary());
        let backfilled = match self.backfill {
            BackfillPolicy::FirstWriterWins => primary.insert_if_absent(key, value),
            BackfillPolicy::LastWriterWins => {
                if primary.contains(key) {
                    false
                } else {
                    primary.write(key, value);
                    true
                }
            }
        };
        if backfilled {
            log::debug!(
                "{:?} backfilled `{name}` of {owner:?} into the primary thread",
                self.threads.current(),
            );
        }
        backfilled
    }

    /// Returns `true` if the calling thread has an entry, or if it is not the
    /// primary thread and the primary thread has one.
    ///
    /// Unlike [`get`](Self::get), this never copies the primary's value.
    #[must_use]
    pub fn is_defined<T>(&self, owner: OwnerId, attribute: Attribute<T>) -> bool {
        let key = (owner, attribute.id());
        let defined_here = self
            .existing_table(self.threads.current())
            .is_some_and(|table| table.contains(key));
        defined_here
            || (!self.threads.is_primary()
                && self
                    .existing_table(self.threads.primary())
                    .is_some_and(|table| table.contains(key)))
    }

    /// Returns the number of entries the calling thread holds across all owners.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.existing_table(self.threads.current())
            .map_or(0, |table| table.len())
    }

    /// Returns the number of threads that have a table in this store.
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.tables.read().len()
    }
}

impl<C: fmt::Debug> fmt::Debug for AttributeStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeStore")
            .field("registry", &self.registry)
            .field("threads", &self.threads)
            .field("backfill", &self.backfill)
            .field("thread_count", &self.tables.read().len())
            .finish()
    }
}

/// Builder for [`AttributeStore`].
///
/// # Example
///
/// ```rust
/// use understory_thread_attr::{AttributeRegistry, AttributeStore, BackfillPolicy, ManualThreads};
///
/// let store = AttributeStore::builder(AttributeRegistry::new(), ManualThreads::new())
///     .backfill(BackfillPolicy::LastWriterWins)
///     .build();
/// assert_eq!(store.backfill_policy(), BackfillPolicy::LastWriterWins);
/// ```
pub struct AttributeStoreBuilder<C> {
    registry: AttributeRegistry,
    threads: C,
    backfill: BackfillPolicy,
}

impl<C: ThreadContext> AttributeStoreBuilder<C> {
    /// Sets the [`BackfillPolicy`].
    #[must_use]
    pub fn backfill(mut self, policy: BackfillPolicy) -> Self {
        self.backfill = policy;
        self
    }

    /// Builds the [`AttributeStore`].
    #[must_use]
    pub fn build(self) -> AttributeStore<C> {
        AttributeStore {
            registry: self.registry,
            threads: self.threads,
            backfill: self.backfill,
            tables: RwLock::new(HashMap::new()),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for AttributeStoreBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeStoreBuilder")
            .field("registry", &self.registry)
            .field("threads", &self.threads)
            .field("backfill", &self.backfill)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::AttributeMetadataBuilder;
    use crate::thread::ManualThreads;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use alloc::{format, vec};
    use std::sync::Mutex as StdMutex;

    struct Fixture {
        store: AttributeStore<ManualThreads>,
        page_size: Attribute<Option<u32>>,
        title: Attribute<String>,
    }

    fn fixture(backfill: BackfillPolicy) -> Fixture {
        let mut registry = AttributeRegistry::new();
        let page_size = registry.declare("page_size", AttributeMetadata::new(None));
        let title = registry.declare("title", AttributeMetadata::new(String::from("Sheet1")));
        Fixture {
            store: AttributeStore::builder(registry, ManualThreads::new())
                .backfill(backfill)
                .build(),
            page_size,
            title,
        }
    }

    #[test]
    fn default_fill_on_primary_counts_as_set() {
        let Fixture {
            store, page_size, ..
        } = fixture(BackfillPolicy::default());
        let owner = OwnerId::next();

        assert!(!store.is_defined(owner, page_size));
        assert_eq!(store.get(owner, page_size), None);
        assert!(store.is_defined(owner, page_size));
        assert_eq!(store.lookup(owner, page_size), Some(None));
    }

    #[test]
    fn page_size_walkthrough() {
        let Fixture {
            store, page_size, ..
        } = fixture(BackfillPolicy::default());
        let threads = store.threads();
        let owner = OwnerId::next();

        // Primary fills the nil default.
        assert_eq!(store.get(owner, page_size), None);

        // A worker inherits the nil.
        let first = threads.spawn();
        threads.on(first, || {
            assert!(store.is_defined(owner, page_size));
            assert_eq!(store.get(owner, page_size), None);
            assert_eq!(store.entry_count(), 1);
        });

        // Primary moves on; a fresh worker sees the new value.
        store.set(owner, page_size, Some(10));
        let second = threads.spawn();
        threads.on(second, || {
            assert_eq!(store.get(owner, page_size), Some(10));
            store.set(owner, page_size, Some(20));
            assert_eq!(store.get(owner, page_size), Some(20));
        });

        // The first worker kept its copy; the primary was not overwritten.
        threads.on(first, || assert_eq!(store.get(owner, page_size), None));
        assert_eq!(store.get(owner, page_size), Some(10));
    }

    #[test]
    fn write_on_worker_backfills_undefined_primary() {
        let Fixture { store, title, .. } = fixture(BackfillPolicy::default());
        let threads = store.threads();
        let owner = OwnerId::next();
        let t = threads.spawn();
        let u = threads.spawn();

        threads.on(t, || store.set(owner, title, String::from("Totals")));
        assert!(store.is_defined(owner, title));
        assert_eq!(store.get(owner, title), "Totals");

        threads.on(u, || {
            store.set(owner, title, String::from("Other"));
            assert_eq!(store.get(owner, title), "Other");
        });
        assert_eq!(store.get(owner, title), "Totals", "primary keeps first backfill");
    }

    #[test]
    fn sequential_backfill_is_identical_under_both_policies() {
        for policy in [BackfillPolicy::FirstWriterWins, BackfillPolicy::LastWriterWins] {
            let Fixture { store, title, .. } = fixture(policy);
            let threads = store.threads();
            let owner = OwnerId::next();
            let t = threads.spawn();
            let u = threads.spawn();

            threads.on(t, || store.set(owner, title, String::from("t")));
            threads.on(u, || store.set(owner, title, String::from("u")));
            assert_eq!(store.get(owner, title), "t", "{policy:?}");
        }
    }

    #[test]
    fn worker_writes_are_isolated_once_primary_is_defined() {
        let Fixture {
            store, page_size, ..
        } = fixture(BackfillPolicy::default());
        let threads = store.threads();
        let owner = OwnerId::next();
        store.set(owner, page_size, Some(1));

        let t = threads.spawn();
        let u = threads.spawn();
        threads.on(t, || store.set(owner, page_size, Some(2)));
        threads.on(u, || assert_eq!(store.get(owner, page_size), Some(1)));
        threads.on(t, || assert_eq!(store.get(owner, page_size), Some(2)));
    }

    #[test]
    fn worker_default_fill_backfills_primary() {
        let Fixture { store, title, .. } = fixture(BackfillPolicy::default());
        let threads = store.threads();
        let owner = OwnerId::next();
        let t = threads.spawn();

        threads.on(t, || assert_eq!(store.get(owner, title), "Sheet1"));
        assert!(store.is_defined(owner, title));
        assert_eq!(store.lookup(owner, title).as_deref(), Some("Sheet1"));
    }

    #[test]
    fn is_defined_does_not_copy() {
        let Fixture {
            store, page_size, ..
        } = fixture(BackfillPolicy::default());
        let threads = store.threads();
        let owner = OwnerId::next();
        store.set(owner, page_size, Some(3));

        let t = threads.spawn();
        threads.on(t, || {
            assert!(store.is_defined(owner, page_size));
            assert_eq!(store.entry_count(), 0);
            assert_eq!(store.lookup(owner, page_size), Some(Some(3)));
            assert_eq!(store.entry_count(), 1);
        });
    }

    #[test]
    fn lookup_without_any_value_stores_nothing() {
        let Fixture {
            store, page_size, ..
        } = fixture(BackfillPolicy::default());
        let threads = store.threads();
        let owner = OwnerId::next();
        let t = threads.spawn();

        threads.on(t, || assert_eq!(store.lookup(owner, page_size), None));
        assert_eq!(store.lookup(owner, page_size), None);
        assert!(!store.is_defined(owner, page_size));
        assert_eq!(store.entry_count(), 0);
    }

    #[test]
    fn falsy_values_are_defined() {
        let mut registry = AttributeRegistry::new();
        let flag = registry.declare("flag", AttributeMetadata::new(true));
        let count = registry.declare("count", AttributeMetadata::new(7_u32));
        let store = AttributeStore::new(registry, ManualThreads::new());
        let owner = OwnerId::next();

        store.set(owner, flag, false);
        store.set(owner, count, 0);
        assert!(store.is_defined(owner, flag));
        assert!(!store.get(owner, flag), "a stored false is not replaced by the default");
        assert_eq!(store.get(owner, count), 0);
    }

    #[test]
    fn inherited_copy_is_independent() {
        let mut registry = AttributeRegistry::new();
        let columns = registry.declare(
            "columns",
            AttributeMetadataBuilder::new(Arc::new(StdMutex::new(Vec::<u32>::new())))
                .duplicate(|list| Arc::new(StdMutex::new(list.lock().unwrap().clone())))
                .build(),
        );
        let store = AttributeStore::new(registry, ManualThreads::new());
        let threads = store.threads();
        let owner = OwnerId::next();
        store.set(owner, columns, Arc::new(StdMutex::new(vec![1, 2])));

        let t = threads.spawn();
        let copy = threads.on(t, || store.get(owner, columns));
        assert_eq!(*copy.lock().unwrap(), vec![1, 2]);

        store.get(owner, columns).lock().unwrap().push(3);
        store.set(owner, columns, Arc::new(StdMutex::new(vec![9])));
        threads.on(t, || {
            assert_eq!(*store.get(owner, columns).lock().unwrap(), vec![1, 2]);
        });
    }

    #[test]
    fn clone_duplicate_keeps_nested_state_shared() {
        let mut registry = AttributeRegistry::new();
        let styles = registry.declare(
            "styles",
            AttributeMetadata::new(Arc::new(StdMutex::new(Vec::<&'static str>::new()))),
        );
        let store = AttributeStore::new(registry, ManualThreads::new());
        let threads = store.threads();
        let owner = OwnerId::next();
        let shared = Arc::new(StdMutex::new(vec!["bold"]));
        store.set(owner, styles, Arc::clone(&shared));

        let t = threads.spawn();
        let inherited = threads.on(t, || store.get(owner, styles));
        assert!(Arc::ptr_eq(&inherited, &shared));
    }

    #[test]
    fn default_value_is_shared_between_owners() {
        let mut registry = AttributeRegistry::new();
        let fonts = registry.declare(
            "fonts",
            AttributeMetadata::new(Arc::new(StdMutex::new(Vec::<String>::new()))),
        );
        let store = AttributeStore::new(registry, ManualThreads::new());
        let a = OwnerId::next();
        let b = OwnerId::next();

        let from_a = store.get(a, fonts);
        let from_b = store.get(b, fonts);
        assert!(Arc::ptr_eq(&from_a, &from_b));

        from_a.lock().unwrap().push(String::from("Arial"));
        assert_eq!(store.get(b, fonts).lock().unwrap().len(), 1);

        store.set(b, fonts, Arc::new(StdMutex::new(Vec::new())));
        assert!(store.get(b, fonts).lock().unwrap().is_empty());
        assert_eq!(store.get(a, fonts).lock().unwrap().len(), 1);
    }

    #[test]
    fn owners_do_not_share_entries() {
        let Fixture {
            store, page_size, ..
        } = fixture(BackfillPolicy::default());
        let a = OwnerId::next();
        let b = OwnerId::next();

        store.set(a, page_size, Some(5));
        assert!(!store.is_defined(b, page_size));
        assert_eq!(store.get(b, page_size), None);
    }

    #[test]
    fn tables_grow_and_are_never_compacted() {
        let Fixture {
            store, page_size, ..
        } = fixture(BackfillPolicy::default());
        let threads = store.threads();
        let t = threads.spawn();

        for _ in 0..16 {
            let owner = OwnerId::next();
            threads.on(t, || store.set(owner, page_size, Some(1)));
        }
        threads.on(t, || assert_eq!(store.entry_count(), 16));
        assert_eq!(store.entry_count(), 16, "every write also backfilled");
        assert_eq!(store.thread_count(), 2);
    }

    #[test]
    fn set_reports_backfill() {
        for policy in [BackfillPolicy::FirstWriterWins, BackfillPolicy::LastWriterWins] {
            let Fixture { store, title, .. } = fixture(policy);
            let threads = store.threads();
            let (t, u) = (threads.spawn(), threads.spawn());

            let owner = OwnerId::next();
            assert!(threads.on(t, || store.set(owner, title, String::from("T"))));
            assert!(!threads.on(u, || store.set(owner, title, String::from("U"))));
            assert!(!store.set(owner, title, String::from("P")), "{policy:?}");

            let fresh = OwnerId::next();
            assert!(
                !store.set(fresh, title, String::from("P")),
                "primary writes never count as backfill"
            );
            assert!(!threads.on(t, || store.set(fresh, title, String::from("T"))));
        }
    }

    #[test]
    #[should_panic(expected = "not declared with type `u64`")]
    fn set_with_wrong_type_panics() {
        let Fixture { store, title, .. } = fixture(BackfillPolicy::default());
        let wrong: Attribute<u64> = Attribute::from_id(title.id());
        store.set(OwnerId::next(), wrong, 7);
    }

    #[test]
    #[should_panic(expected = "not declared with type `u64`")]
    fn lookup_with_wrong_type_panics() {
        let Fixture {
            store, page_size, ..
        } = fixture(BackfillPolicy::default());
        let owner = OwnerId::next();
        store.set(owner, page_size, Some(4));

        let wrong: Attribute<u64> = Attribute::from_id(page_size.id());
        let threads = store.threads();
        let worker = threads.spawn();
        threads.on(worker, || store.lookup(owner, wrong));
    }

    #[test]
    #[should_panic(expected = "not declared with type `u64`")]
    fn get_of_filled_entry_with_wrong_type_panics() {
        let Fixture { store, title, .. } = fixture(BackfillPolicy::default());
        let owner = OwnerId::next();
        let _ = store.get(owner, title);
        let _ = store.get(owner, Attribute::<u64>::from_id(title.id()));
    }

    #[test]
    #[should_panic(expected = "not declared in this store's registry")]
    fn foreign_attribute_panics() {
        let store = AttributeStore::new(AttributeRegistry::new(), ManualThreads::new());
        let foreign: Attribute<u8> = Attribute::from_id(AttributeId::new(0));
        store.set(OwnerId::next(), foreign, 1);
    }

    #[test]
    fn store_debug() {
        let Fixture { store, .. } = fixture(BackfillPolicy::LastWriterWins);
        let debug = format!("{:?}", store);
        assert!(debug.contains("AttributeStore"));
        assert!(debug.contains("LastWriterWins"));
    }
}
