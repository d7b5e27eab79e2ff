// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute metadata definitions.
//!
//! This module provides [`AttributeMetadata`] for the declaration-time
//! configuration of an attribute and [`AttributeMetadataBuilder`] for
//! constructing it.

use alloc::boxed::Box;

/// Callback producing the copy a thread receives when it inherits the
/// primary thread's value.
pub type DuplicateCallback<T> = Box<dyn Fn(&T) -> T + Send + Sync>;

/// Metadata for a thread-local attribute.
///
/// The default value is evaluated once, when the metadata is built, and every
/// owner that falls back to the default receives a clone of that single
/// value. For shared handles such as `Arc<Mutex<_>>` all those owners alias
/// the same object.
///
/// # Example
///
/// ```rust
/// use understory_thread_attr::AttributeMetadataBuilder;
///
/// let metadata = AttributeMetadataBuilder::new(Option::<u32>::None).build();
/// assert_eq!(metadata.default_value(), &None);
/// assert_eq!(metadata.duplicate(&Some(3)), Some(3));
/// ```
pub struct AttributeMetadata<T: Clone + Send + Sync + 'static> {
    default_value: T,
    duplicate_callback: Option<DuplicateCallback<T>>,
}

impl<T: Clone + Send + Sync + 'static> AttributeMetadata<T> {
    /// Creates metadata with the given default and clone-based inheritance copies.
    #[must_use]
    pub fn new(default_value: T) -> Self {
        Self {
            default_value,
            duplicate_callback: None,
        }
    }

    /// Returns a reference to the default value.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    /// Produces the copy handed to a thread inheriting `value` from the primary.
    ///
    /// Uses the duplicate callback if one is set and `Clone::clone` otherwise.
    #[must_use]
    #[inline]
    pub fn duplicate(&self, value: &T) -> T {
        match &self.duplicate_callback {
            Some(callback) => callback(value),
            None => value.clone(),
        }
    }

    /// Returns whether a duplicate callback is set.
    #[must_use]
    #[inline]
    pub fn has_duplicate_callback(&self) -> bool {
        self.duplicate_callback.is_some()
    }
}

impl<T: Clone + Send + Sync + core::fmt::Debug + 'static> core::fmt::Debug
    for AttributeMetadata<T>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AttributeMetadata")
            .field("default_value", &self.default_value)
            .field("has_duplicate_callback", &self.duplicate_callback.is_some())
            .finish()
    }
}

/// Builder for [`AttributeMetadata`].
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use understory_thread_attr::AttributeMetadataBuilder;
///
/// // Threads inheriting this attribute get their own list rather than
/// // an alias of the primary thread's list.
/// let metadata = AttributeMetadataBuilder::new(Arc::new(Mutex::new(Vec::<u32>::new())))
///     .duplicate(|list| Arc::new(Mutex::new(list.lock().unwrap().clone())))
///     .build();
///
/// let primary = Arc::new(Mutex::new(vec![1, 2]));
/// let copy = metadata.duplicate(&primary);
/// assert!(!Arc::ptr_eq(&primary, &copy));
/// assert_eq!(*copy.lock().unwrap(), vec![1, 2]);
/// ```
pub struct AttributeMetadataBuilder<T: Clone + Send + Sync + 'static> {
    default_value: T,
    duplicate_callback: Option<DuplicateCallback<T>>,
}

impl<T: Clone + Send + Sync + core::fmt::Debug + 'static> core::fmt::Debug
    for AttributeMetadataBuilder<T>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AttributeMetadataBuilder")
            .field("default_value", &self.default_value)
            .field("has_duplicate_callback", &self.duplicate_callback.is_some())
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> AttributeMetadataBuilder<T> {
    /// Creates a new builder with the given default value.
    #[must_use]
    pub fn new(default_value: T) -> Self {
        Self {
            default_value,
            duplicate_callback: None,
        }
    }

    /// Sets how the primary thread's value is copied into an inheriting thread.
    ///
    /// The callback should make a shallow copy: a new top-level value whose
    /// nested shared state may still alias the primary's.
    ///
    /// It is called with every inherited value, including `None` for
    /// `Option` attributes. Use [`duplicate_some`](Self::duplicate_some) to
    /// copy only the `Some` payload.
    #[must_use]
    pub fn duplicate<F>(mut self, callback: F) -> Self
    where
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        self.duplicate_callback = Some(Box::new(callback));
        self
    }

    /// Builds the [`AttributeMetadata`].
    #[must_use]
    pub fn build(self) -> AttributeMetadata<T> {
        AttributeMetadata {
            default_value: self.default_value,
            duplicate_callback: self.duplicate_callback,
        }
    }
}

impl<U: Clone + Send + Sync + 'static> AttributeMetadataBuilder<Option<U>> {
    /// Like [`duplicate`](Self::duplicate), but `callback` only sees the
    /// payload of a `Some`. An inherited `None` stays `None`.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use understory_thread_attr::AttributeMetadataBuilder;
    ///
    /// let metadata = AttributeMetadataBuilder::new(Option::<Arc<String>>::None)
    ///     .duplicate_some(|name| Arc::new(String::clone(name)))
    ///     .build();
    ///
    /// assert_eq!(metadata.duplicate(&None), None);
    /// let name = Some(Arc::new(String::from("Sheet1")));
    /// assert_eq!(metadata.duplicate(&name), name);
    /// ```
    #[must_use]
    pub fn duplicate_some<F>(self, callback: F) -> Self
    where
        F: Fn(&U) -> U + Send + Sync + 'static,
    {
        self.duplicate(move |value| value.as_ref().map(&callback))
    }
}
