// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute declaration registry.
//!
//! This module provides [`AttributeRegistry`], where an owner type declares
//! its thread-local attributes once, at type-definition time.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use hashbrown::HashMap;

use crate::id::{Attribute, AttributeId};
use crate::metadata::AttributeMetadata;

/// A registration entry for an attribute.
pub struct AttributeRegistration {
    name: &'static str,
    type_id: TypeId,
    metadata: Box<dyn ErasedMetadata>,
}

impl AttributeRegistration {
    /// Returns the attribute name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`TypeId`] of the attribute's value type.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the typed metadata, or `None` if `T` is not the declared type.
    pub(crate) fn metadata<T: Clone + Send + Sync + 'static>(
        &self,
    ) -> Option<&AttributeMetadata<T>> {
        self.metadata.as_any().downcast_ref()
    }
}

impl core::fmt::Debug for AttributeRegistration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AttributeRegistration")
            .field("name", &self.name)
            .field("type_id", &self.type_id)
            .finish_non_exhaustive()
    }
}

/// The attributes declared for an owner type.
///
/// # Example
///
/// ```rust
/// use understory_thread_attr::{AttributeMetadata, AttributeRegistry};
///
/// let mut registry = AttributeRegistry::new();
/// let page_size = registry.declare("page_size", AttributeMetadata::new(Option::<u32>::None));
///
/// assert_eq!(registry.name(page_size.id()), Some("page_size"));
/// assert_eq!(registry.by_name("page_size"), Some(page_size.id()));
/// ```
#[derive(Default)]
pub struct AttributeRegistry {
    attributes: Vec<AttributeRegistration>,
    by_name: HashMap<&'static str, AttributeId>,
}

impl AttributeRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an attribute with the given name and metadata.
    ///
    /// Returns the typed [`Attribute<T>`] handle used to read and write it.
    ///
    /// # Panics
    ///
    /// Panics if an attribute with the same name is already declared,
    /// or if more than 65,535 attributes are declared.
    pub fn declare<T: Clone + Send + Sync + 'static>(
        &mut self,
        name: &'static str,
        metadata: AttributeMetadata<T>,
    ) -> Attribute<T> {
        assert!(
            !self.by_name.contains_key(name),
            "Attribute '{name}' is already declared"
        );
        assert!(
            self.attributes.len() < u16::MAX as usize,
            "Too many attributes declared (max {})",
            u16::MAX
        );

        #[expect(clippy::cast_possible_truncation, reason = "checked above")]
        let id = AttributeId::new(self.attributes.len() as u16);

        self.attributes.push(AttributeRegistration {
            name,
            type_id: TypeId::of::<T>(),
            metadata: Box::new(metadata),
        });
        self.by_name.insert(name, id);
        log::debug!("declared thread attribute `{name}` as {id}");

        Attribute::from_id(id)
    }

    /// Returns the number of declared attributes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if no attributes are declared.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<AttributeId> {
        self.by_name.get(name).copied()
    }

    /// Returns the name of an attribute.
    #[must_use]
    pub fn name(&self, id: AttributeId) -> Option<&'static str> {
        self.attributes.get(id.index() as usize).map(|r| r.name)
    }

    /// Returns the registration for an attribute.
    #[must_use]
    pub fn get(&self, id: AttributeId) -> Option<&AttributeRegistration> {
        self.attributes.get(id.index() as usize)
    }

    /// Returns the metadata for a typed attribute.
    ///
    /// Returns `None` if the attribute is not declared or the type doesn't match.
    #[must_use]
    pub fn get_metadata<T: Clone + Send + Sync + 'static>(
        &self,
        attribute: Attribute<T>,
    ) -> Option<&AttributeMetadata<T>> {
        self.attributes
            .get(attribute.id().index() as usize)
            .and_then(|r| r.metadata::<T>())
    }

    /// Returns an iterator over all declared attributes.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeId, &AttributeRegistration)> {
        self.attributes.iter().enumerate().map(|(i, r)| {
            #[expect(clippy::cast_possible_truncation, reason = "index < len < u16::MAX")]
            (AttributeId::new(i as u16), r)
        })
    }
}

impl core::fmt::Debug for AttributeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AttributeRegistry")
            .field("count", &self.attributes.len())
            .field(
                "attributes",
                &self.attributes.iter().map(|r| r.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

trait ErasedMetadata: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Clone + Send + Sync + 'static> ErasedMetadata for AttributeMetadata<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
