//! Type-Identity Capability
//!
//! Every type that takes part in dispatch implements [`Dispatch`]. The trait
//! exposes the type's descriptor and two narrowing functions that recover
//! `&Self` / `&mut Self` from a type-erased [`View`].
//!
//! | Implementor | Erased as | Narrowing |
//! |-------------|-----------|-----------|
//! | `#[derive(Class)]` types | `View::Object` | ancestor chain walk |
//! | `dyn Object` | `View::Object` | identity (keeps dynamic type) |
//! | values (`i32`, `String`, `#[derive(Value)]`) | `View::Value` | exact `TypeId` |

use core::any::Any;

use super::class::Object;
use super::desc::TypeDesc;

/// Shared, type-erased view of one argument.
#[derive(Clone, Copy)]
pub enum View<'a> {
    Object(&'a (dyn Object + 'static)),
    Value(&'a (dyn Any + 'static)),
}

/// Exclusive, type-erased view of one argument.
pub enum ViewMut<'a> {
    Object(&'a mut (dyn Object + 'static)),
    Value(&'a mut (dyn Any + 'static)),
}

impl ViewMut<'_> {
    pub fn as_view(&self) -> View<'_> {
        match self {
            ViewMut::Object(object) => View::Object(&**object),
            ViewMut::Value(value) => View::Value(&**value),
        }
    }

    pub fn reborrow(&mut self) -> ViewMut<'_> {
        match self {
            ViewMut::Object(object) => ViewMut::Object(&mut **object),
            ViewMut::Value(value) => ViewMut::Value(&mut **value),
        }
    }
}

/// Explicit type-identity capability of dispatch-participating types.
pub trait Dispatch: 'static {
    fn describe() -> TypeDesc;

    fn view(&self) -> View<'_>;

    fn view_mut(&mut self) -> ViewMut<'_>;

    fn narrow<'a>(view: View<'a>) -> Option<&'a Self>;

    fn narrow_mut<'a>(view: ViewMut<'a>) -> Option<&'a mut Self>;
}

// The dispatch root: any class instance narrows to `dyn Object` unchanged.
impl Dispatch for dyn Object {
    fn describe() -> TypeDesc {
        TypeDesc::root()
    }

    fn view(&self) -> View<'_> {
        View::Object(self)
    }

    fn view_mut(&mut self) -> ViewMut<'_> {
        ViewMut::Object(self)
    }

    fn narrow<'a>(view: View<'a>) -> Option<&'a Self> {
        match view {
            View::Object(object) => Some(object),
            View::Value(_) => None,
        }
    }

    fn narrow_mut<'a>(view: ViewMut<'a>) -> Option<&'a mut Self> {
        match view {
            ViewMut::Object(object) => Some(object),
            ViewMut::Value(_) => None,
        }
    }
}
