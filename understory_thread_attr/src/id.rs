// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handles naming what an attribute belongs to and which attribute it is.
//!
//! Every table entry is keyed by an ([`OwnerId`], [`AttributeId`]) pair. Callers
//! hold [`Attribute<T>`] handles, returned by
//! [`AttributeRegistry::declare`](crate::AttributeRegistry::declare), which
//! carry the value type along with the ID.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::sync::atomic::{AtomicU64, Ordering};

/// The position of an attribute in its [`AttributeRegistry`](crate::AttributeRegistry).
///
/// IDs are handed out in declaration order starting at zero. An ID is only
/// meaningful together with the registry that issued it.
///
/// ```rust
/// use understory_thread_attr::{AttributeId, AttributeMetadata, AttributeRegistry};
///
/// let mut registry = AttributeRegistry::new();
/// registry.declare("page_size", AttributeMetadata::new(Option::<u32>::None));
/// let zoom = registry.declare("zoom", AttributeMetadata::new(100_u16));
///
/// assert_eq!(zoom.id(), AttributeId::new(1));
/// assert_eq!(zoom.id().to_string(), "#1");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeId(u16);

impl AttributeId {
    /// Wraps a declaration index.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// The declaration index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AttributeId").field(&self.0).finish()
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A typed handle to a declared attribute.
///
/// The handle is just an [`AttributeId`]; `T` tells the store which type to
/// expect when it reads an entry back. A handle rebuilt with
/// [`from_id`](Self::from_id) under a different `T` makes the store panic.
pub struct Attribute<T> {
    id: AttributeId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Attribute<T> {
    /// Rebuilds a handle from an ID, for example one found with
    /// [`AttributeRegistry::by_name`](crate::AttributeRegistry::by_name).
    #[must_use]
    #[inline]
    pub const fn from_id(id: AttributeId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// The attribute's ID.
    #[must_use]
    #[inline]
    pub const fn id(self) -> AttributeId {
        self.id
    }
}

impl<T> Copy for Attribute<T> {}

impl<T> Clone for Attribute<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Attribute<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Attribute<T> {}

impl<T> Hash for Attribute<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Attribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("id", &self.id)
            .field("type", &core::any::type_name::<T>())
            .finish()
    }
}

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

/// Identifies one object whose attributes live in an
/// [`AttributeStore`](crate::AttributeStore).
///
/// Allocate one per object with [`next`](Self::next) and keep it for the
/// object's lifetime. The counter behind it is process-wide and only counts
/// up, so a new object never sees the entries of a dropped one.
///
/// ```rust
/// use understory_thread_attr::OwnerId;
///
/// let workbook = OwnerId::next();
/// let sheet = OwnerId::next();
/// assert!(workbook.get() < sheet.get());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Allocates an identity no other call has returned.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_OWNER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnerId").field(&self.0).finish()
    }
}
