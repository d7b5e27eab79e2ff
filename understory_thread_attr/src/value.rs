// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entries of a thread table.
//!
//! One table holds every attribute of every owner a thread has touched, so an
//! entry forgets its value type and gets it back from the typed
//! [`Attribute<T>`](crate::Attribute) handle on read.

use alloc::sync::Arc;
use core::any::{Any, TypeId, type_name};
use core::fmt;

/// An attribute value with its type erased.
///
/// Cloning an entry is cheap and never clones the value: a worker's write and
/// its backfill into the primary thread point at the same allocation. Readers
/// clone the value itself out of the entry, so the sharing is not observable
/// through an [`AttributeStore`](crate::AttributeStore).
///
/// # Example
///
/// ```rust
/// use understory_thread_attr::ErasedValue;
///
/// let entry = ErasedValue::new(Some(10_u32));
/// assert_eq!(entry.downcast_ref::<Option<u32>>(), Some(&Some(10)));
/// assert_eq!(entry.downcast_ref::<u32>(), None);
/// assert!(entry.type_name().ends_with("Option<u32>"));
/// ```
#[derive(Clone)]
pub struct ErasedValue {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ErasedValue {
    /// Wraps `value`.
    #[must_use]
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// The [`TypeId`] of the wrapped value.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        Any::type_id(&*self.value)
    }

    /// The name of the wrapped value's type, for diagnostics.
    #[must_use]
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrows the value as a `T`, or `None` if it holds another type.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErasedValue").field(&self.type_name).finish()
    }
}
