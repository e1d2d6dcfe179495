//! Type Descriptors and Relations
//!
//! Pure predicates used by the one-time ranking pass and by definition checks:
//! "is A an ancestor of B", "are A and B the same type", "is this declaration
//! shared or exclusive".

use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt::{self, Write as _};

use super::class::{Class, ClassInfo, Object};

// =============================================================================
// TypeDesc
// =============================================================================

/// What kind of type a descriptor names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// `dyn Object`, ancestor of every class.
    Root,
    Class(&'static ClassInfo),
    /// Plain value type, matched by exact identity.
    Value,
    /// The fallback marker.
    Sentinel,
}

/// Identity and kind of one declared parameter type.
#[derive(Clone, Copy, Debug)]
pub struct TypeDesc {
    id: TypeId,
    name: &'static str,
    kind: Kind,
}

impl TypeDesc {
    pub fn root() -> Self {
        Self {
            id: TypeId::of::<dyn Object>(),
            name: "dyn Object",
            kind: Kind::Root,
        }
    }

    pub fn class<T: Class>() -> Self {
        let info = T::class();
        Self {
            id: TypeId::of::<T>(),
            name: info.name(),
            kind: Kind::Class(info),
        }
    }

    pub fn value<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
            kind: Kind::Value,
        }
    }

    pub fn sentinel<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: "fallback",
            kind: Kind::Sentinel,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self.kind, Kind::Sentinel)
    }

    /// How `self` relates to `other` in the class hierarchy.
    ///
    /// Values and the sentinel are only ever `Same` or `Unrelated`.
    pub fn relation(&self, other: &TypeDesc) -> Relation {
        if self.id == other.id {
            return Relation::Same;
        }
        match (self.kind, other.kind) {
            (Kind::Root, Kind::Class(_)) => Relation::Ancestor,
            (Kind::Class(_), Kind::Root) => Relation::Descendant,
            (Kind::Class(a), Kind::Class(b)) if b.is_subclass_of(a) => Relation::Ancestor,
            (Kind::Class(a), Kind::Class(b)) if a.is_subclass_of(b) => Relation::Descendant,
            _ => Relation::Unrelated,
        }
    }

    /// Whether a parameter of this type may be declared at a position whose
    /// dispatch ancestor is `base`.
    pub fn accepts(&self, base: &TypeDesc) -> bool {
        match (base.kind, self.kind) {
            (_, Kind::Sentinel) => true,
            (Kind::Root, Kind::Root | Kind::Class(_)) => true,
            (Kind::Class(base), Kind::Class(class)) => class.is_subclass_of(base),
            (Kind::Value, Kind::Value) => true,
            _ => false,
        }
    }
}

impl PartialEq for TypeDesc {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Kind::Class(info) => f.write_str(info.short_name()),
            _ => write_unqualified(f, self.name),
        }
    }
}

/// Writes a `type_name` with every path prefix removed: `alloc::vec::Vec<u8>` as `Vec<u8>`.
fn write_unqualified(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let mut start = 0;
    for (i, c) in name.char_indices() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            continue;
        }
        f.write_str(last_segment(&name[start..i]))?;
        f.write_char(c)?;
        start = i + c.len_utf8();
    }
    f.write_str(last_segment(&name[start..]))
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Result of [`TypeDesc::relation`]. `Ancestor` means the left side is the ancestor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Same,
    Ancestor,
    Descendant,
    Unrelated,
}

// =============================================================================
// ParamDesc / Signature
// =============================================================================

/// Declared access of a parameter: `&T` is shared, `&mut T` is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    Shared,
    Exclusive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamDesc {
    pub ty: TypeDesc,
    pub access: Access,
}

impl ParamDesc {
    pub fn new(ty: TypeDesc, access: Access) -> Self {
        Self { ty, access }
    }
}

impl fmt::Display for ParamDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ty.is_sentinel() {
            return write!(f, "{}", self.ty);
        }
        match self.access {
            Access::Shared => write!(f, "&{}", self.ty),
            Access::Exclusive => write!(f, "&mut {}", self.ty),
        }
    }
}

/// Ordered parameter list of one implementation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature(Vec<ParamDesc>);

impl Signature {
    pub fn new(params: Vec<ParamDesc>) -> Self {
        Self(params)
    }

    pub fn params(&self) -> &[ParamDesc] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exactly one parameter, and it is the sentinel.
    pub fn is_fallback(&self) -> bool {
        matches!(self.0.as_slice(), [only] if only.ty.is_sentinel())
    }

    pub fn has_sentinel(&self) -> bool {
        self.0.iter().any(|param| param.ty.is_sentinel())
    }
}

impl From<Vec<ParamDesc>> for Signature {
    fn from(params: Vec<ParamDesc>) -> Self {
        Self(params)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}
