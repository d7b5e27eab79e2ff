// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute owner traits and the [`thread_attributes!`](crate::thread_attributes) macro.
//!
//! An owner type implements [`AttributeOwner`] to name its identity and the
//! store holding its attributes. [`AttributeOwnerExt`] then provides
//! field-like access, and [`thread_attributes!`](crate::thread_attributes)
//! generates named accessors for each declared attribute.

use crate::id::{Attribute, OwnerId};
use crate::store::AttributeStore;
use crate::thread::ThreadContext;

/// An object carrying thread-local attributes.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use understory_thread_attr::{AttributeOwner, AttributeStore, OsThreads, OwnerId};
///
/// struct Workbook {
///     id: OwnerId,
///     store: Arc<AttributeStore<OsThreads>>,
/// }
///
/// impl AttributeOwner for Workbook {
///     type Threads = OsThreads;
///
///     fn owner_id(&self) -> OwnerId {
///         self.id
///     }
///
///     fn attribute_store(&self) -> &AttributeStore<OsThreads> {
///         &self.store
///     }
/// }
/// ```
pub trait AttributeOwner {
    /// The thread context of the store.
    type Threads: ThreadContext;

    /// Returns the identity this object's entries are keyed by.
    ///
    /// Must return the same value for the whole life of the object.
    fn owner_id(&self) -> OwnerId;

    /// Returns the store holding this object's attributes.
    fn attribute_store(&self) -> &AttributeStore<Self::Threads>;
}

/// Extension methods for [`AttributeOwner`].
pub trait AttributeOwnerExt: AttributeOwner {
    /// Reads an attribute for the calling thread, filling in the default if needed.
    ///
    /// See [`AttributeStore::get`].
    fn attribute<T: Clone + Send + Sync + 'static>(&self, attribute: Attribute<T>) -> T {
        self.attribute_store().get(self.owner_id(), attribute)
    }

    /// Writes an attribute for the calling thread.
    ///
    /// See [`AttributeStore::set`].
    fn set_attribute<T: Clone + Send + Sync + 'static>(&self, attribute: Attribute<T>, value: T) {
        self.attribute_store().set(self.owner_id(), attribute, value);
    }

    /// Returns whether an attribute is defined for the calling thread.
    ///
    /// See [`AttributeStore::is_defined`].
    fn attribute_defined<T>(&self, attribute: Attribute<T>) -> bool {
        self.attribute_store().is_defined(self.owner_id(), attribute)
    }
}

impl<O: AttributeOwner + ?Sized> AttributeOwnerExt for O {}

/// Declares a set of thread-local attributes and their accessors.
///
/// Each line names the getter, setter, and defined-check for one attribute,
/// followed by its type and default. The default expression is evaluated
/// once, in `declare`.
///
/// The macro generates a `Copy` struct of [`Attribute`] handles with:
///
/// - `declare(&mut AttributeRegistry) -> Self`, declaring every attribute;
/// - per attribute, the three named methods, each taking the owner.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use understory_thread_attr::{
///     AttributeOwner, AttributeRegistry, AttributeStore, OsThreads, OwnerId, thread_attributes,
/// };
///
/// thread_attributes! {
///     /// Per-thread settings of a workbook.
///     pub struct WorkbookAttributes {
///         /// Rows per printed page.
///         page_size, set_page_size, page_size_defined: Option<u32> = None;
///         /// Whether cell text goes through the shared string table.
///         shared_strings, set_shared_strings, shared_strings_defined: bool = false;
///     }
/// }
///
/// struct Workbook {
///     id: OwnerId,
///     store: Arc<AttributeStore<OsThreads>>,
/// }
///
/// impl AttributeOwner for Workbook {
///     type Threads = OsThreads;
///
///     fn owner_id(&self) -> OwnerId {
///         self.id
///     }
///
///     fn attribute_store(&self) -> &AttributeStore<OsThreads> {
///         &self.store
///     }
/// }
///
/// let mut registry = AttributeRegistry::new();
/// let attrs = WorkbookAttributes::declare(&mut registry);
/// let store = Arc::new(AttributeStore::new(registry, OsThreads::new()));
/// let book = Workbook { id: OwnerId::next(), store };
///
/// assert!(!attrs.page_size_defined(&book));
/// assert_eq!(attrs.page_size(&book), None);
/// assert!(attrs.page_size_defined(&book));
///
/// attrs.set_shared_strings(&book, true);
/// assert!(attrs.shared_strings(&book));
/// ```
#[macro_export]
macro_rules! thread_attributes {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $get:ident, $set:ident, $defined:ident : $ty:ty = $default:expr;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $get: $crate::Attribute<$ty>,
            )*
        }

        impl $name {
            /// Declares every attribute in `registry` and returns their handles.
            ///
            /// # Panics
            ///
            /// Panics if any of the names is already declared in `registry`.
            #[must_use]
            pub fn declare(registry: &mut $crate::AttributeRegistry) -> Self {
                Self {
                    $(
                        $get: registry.declare(
                            stringify!($get),
                            $crate::AttributeMetadata::<$ty>::new($default),
                        ),
                    )*
                }
            }

            $(
                #[doc = concat!("Reads `", stringify!($get), "` for the calling thread.")]
                #[must_use]
                pub fn $get<O: $crate::AttributeOwner + ?Sized>(&self, owner: &O) -> $ty {
                    $crate::AttributeOwnerExt::attribute(owner, self.$get)
                }

                #[doc = concat!("Writes `", stringify!($get), "` for the calling thread.")]
                pub fn $set<O: $crate::AttributeOwner + ?Sized>(&self, owner: &O, value: $ty) {
                    $crate::AttributeOwnerExt::set_attribute(owner, self.$get, value);
                }

                #[doc = concat!("Returns whether `", stringify!($get), "` is defined for the calling thread.")]
                #[must_use]
                pub fn $defined<O: $crate::AttributeOwner + ?Sized>(&self, owner: &O) -> bool {
                    $crate::AttributeOwnerExt::attribute_defined(owner, self.$get)
                }
            )*
        }
    };
}
