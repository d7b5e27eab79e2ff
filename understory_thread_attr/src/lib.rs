// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Thread Attr: per-thread object attributes with a primary fallback.
//!
//! This crate gives every thread its own view of an object's attributes,
//! while letting one distinguished *primary* thread act as the source of
//! truth for threads that have not yet touched an attribute.
//!
//! ## Core Concepts
//!
//! - **Owner** ([`OwnerId`]): the object an attribute belongs to. Identities
//!   are allocated from a monotonic counter and never reused.
//! - **Attribute** ([`Attribute<T>`]): a typed slot declared once per owner
//!   type in an [`AttributeRegistry`], with a default evaluated at declaration.
//! - **Thread context** ([`ThreadContext`]): tells the store which thread is
//!   calling and which thread is primary. [`OsThreads`] uses real threads;
//!   [`ManualThreads`] simulates them for deterministic tests.
//! - **Store** ([`AttributeStore`]): one table per thread, keyed by
//!   `(owner, attribute)`.
//!
//! ## Rules
//!
//! Reading with [`AttributeStore::get`] on thread `T`:
//!
//! 1. `T`'s own entry, if it has one.
//! 2. Otherwise a duplicate of the primary thread's entry, which becomes `T`'s
//!    own entry. Later primary writes do not reach it.
//! 3. Otherwise the declared default, stored as if by `set`.
//!
//! Writing with [`AttributeStore::set`] on thread `T` replaces `T`'s entry and,
//! if the primary thread has no entry yet, writes the same value there
//! ("backfill"). An existing primary entry is never overwritten by another thread.
//!
//! [`AttributeStore::is_defined`] reports whether `T` or, for non-primary
//! threads, the primary has an entry, without copying anything.
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_thread_attr::{
//!     AttributeMetadata, AttributeRegistry, AttributeStore, ManualThreads, OwnerId,
//! };
//!
//! let mut registry = AttributeRegistry::new();
//! let page_size = registry.declare("page_size", AttributeMetadata::new(Option::<u32>::None));
//!
//! let store = AttributeStore::new(registry, ManualThreads::new());
//! let threads = store.threads();
//! let sheet = OwnerId::next();
//!
//! // A worker writes first, which also establishes the primary's value.
//! let worker = threads.spawn();
//! threads.on(worker, || store.set(sheet, page_size, Some(10)));
//! assert_eq!(store.get(sheet, page_size), Some(10));
//!
//! // A second worker inherits it, and its own write stays its own.
//! let other = threads.spawn();
//! threads.on(other, || {
//!     assert_eq!(store.get(sheet, page_size), Some(10));
//!     store.set(sheet, page_size, Some(20));
//! });
//! assert_eq!(store.get(sheet, page_size), Some(10));
//! ```
//!
//! ## Sharing
//!
//! Values are returned by clone. For attributes whose callers expect to
//! share and mutate one object, use a shared handle such as `Arc<Mutex<_>>`:
//! the default is then one object aliased by every owner that falls back to
//! it, and inheritance copies alias the primary's object unless the
//! attribute declares a [`duplicate`](AttributeMetadataBuilder::duplicate)
//! callback.
//!
//! ## Declaring Accessors
//!
//! [`thread_attributes!`] generates a struct of handles with a named getter,
//! setter, and defined-check per attribute, for use with any
//! [`AttributeOwner`].

extern crate alloc;

mod id;
mod metadata;
mod owner;
mod registry;
mod store;
mod thread;
mod value;

pub use id::{Attribute, AttributeId, OwnerId};
pub use metadata::{AttributeMetadata, AttributeMetadataBuilder, DuplicateCallback};
pub use owner::{AttributeOwner, AttributeOwnerExt};
pub use registry::{AttributeRegistration, AttributeRegistry};
pub use store::{AttributeStore, AttributeStoreBuilder, BackfillPolicy};
pub use thread::{ManualThreads, OsThreads, ThreadContext, ThreadKey};
pub use value::ErasedValue;
