//! Class Hierarchy
//!
//! Polymorphic dispatch types form single-inheritance chains. A derived class
//! embeds its parent in a `#[class(base)]` field, and every class exposes a
//! static [`ClassInfo`] describing its place in the chain.
//!
//! ```text
//! Asteroid ──base──> Thing ──> (root)
//!    |                 |
//!    ClassInfo         ClassInfo
//! ```
//!
//! Narrowing a `dyn Object` to a concrete class walks the embedded parents
//! through [`Object::upcast_ref`], so a `Spaceship` can be viewed as its `Thing`
//! part without any unsafe pointer casts.

use core::any::{Any, TypeId};
use core::fmt;

use super::view::{View, ViewMut};

// =============================================================================
// ClassInfo
// =============================================================================

/// Static descriptor of one class in a dispatch hierarchy.
///
/// Generated by `#[derive(Class)]` as a `static` inside [`Class::class`].
pub struct ClassInfo {
    name: &'static str,
    type_id: fn() -> TypeId,
    parent: Option<fn() -> &'static ClassInfo>,
}

impl ClassInfo {
    pub const fn new<T: ?Sized + 'static>(
        name: &'static str,
        parent: Option<fn() -> &'static ClassInfo>,
    ) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>,
            parent,
        }
    }

    /// Fully qualified name (`module::path::Type`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of [`name`](Self::name).
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }

    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    pub fn parent(&self) -> Option<&'static ClassInfo> {
        self.parent.map(|parent| parent())
    }

    /// Iterate this class and its ancestors, nearest first.
    pub fn ancestors(&'static self) -> Ancestors {
        Ancestors { next: Some(self) }
    }

    /// Reflexive: every class is a subclass of itself.
    pub fn is_subclass_of(&'static self, other: &ClassInfo) -> bool {
        let target = other.type_id();
        self.ancestors().any(|class| class.type_id() == target)
    }

    /// Number of ancestors above this class (roots are at depth 0).
    pub fn depth(&'static self) -> usize {
        self.ancestors().count() - 1
    }
}

impl PartialEq for ClassInfo {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for ClassInfo {}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("parent", &self.parent().map(ClassInfo::name))
            .finish()
    }
}

/// Iterator over a class chain, see [`ClassInfo::ancestors`].
#[derive(Clone)]
pub struct Ancestors {
    next: Option<&'static ClassInfo>,
}

impl Iterator for Ancestors {
    type Item = &'static ClassInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

// =============================================================================
// Object / Class
// =============================================================================

/// Dynamically typed root of every dispatch hierarchy.
///
/// `&dyn Object` is the universal dispatch ancestor: a parameter declared as
/// `&dyn Object` accepts any class instance and keeps its dynamic type, so the
/// body can dispatch again on it.
pub trait Object: Any {
    fn class_info(&self) -> &'static ClassInfo;

    /// View the part of `self` whose type id is `target` (self or an embedded ancestor).
    fn upcast_ref(&self, target: TypeId) -> Option<&dyn Any>;

    fn upcast_mut(&mut self, target: TypeId) -> Option<&mut dyn Any>;
}

/// Statically known class. Implemented by `#[derive(Class)]`.
pub trait Class: Object + Sized {
    fn class() -> &'static ClassInfo;
}

impl dyn Object {
    /// Whether this object is a `T` or derives from it.
    pub fn is<T: Class>(&self) -> bool {
        self.upcast_ref(TypeId::of::<T>()).is_some()
    }

    pub fn as_class<T: Class>(&self) -> Option<&T> {
        self.upcast_ref(TypeId::of::<T>())?.downcast_ref()
    }

    pub fn as_class_mut<T: Class>(&mut self) -> Option<&mut T> {
        self.upcast_mut(TypeId::of::<T>())?.downcast_mut()
    }
}

impl fmt::Debug for dyn Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Object({})", self.class_info().short_name())
    }
}

// =============================================================================
// Narrowing helpers (used by generated Dispatch impls)
// =============================================================================

/// Narrow a shared view to class `T` through the embedded ancestor chain.
pub fn narrow_ref<'a, T: Class>(view: View<'a>) -> Option<&'a T> {
    match view {
        View::Object(object) => object.as_class::<T>(),
        View::Value(_) => None,
    }
}

pub fn narrow_mut<'a, T: Class>(view: ViewMut<'a>) -> Option<&'a mut T> {
    match view {
        ViewMut::Object(object) => object.as_class_mut::<T>(),
        ViewMut::Value(_) => None,
    }
}
