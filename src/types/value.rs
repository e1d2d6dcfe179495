//! Value Types
//!
//! Non-polymorphic types dispatch on exact identity: an `i64` argument never
//! narrows to `i32`, and a `#[derive(Value)]` struct never narrows to anything
//! but itself.

use core::any::Any;

use super::view::{View, ViewMut};

pub fn narrow_ref<'a, T: Any>(view: View<'a>) -> Option<&'a T> {
    match view {
        View::Value(value) => value.downcast_ref(),
        View::Object(_) => None,
    }
}

pub fn narrow_mut<'a, T: Any>(view: ViewMut<'a>) -> Option<&'a mut T> {
    match view {
        ViewMut::Value(value) => value.downcast_mut(),
        ViewMut::Object(_) => None,
    }
}

// =============================================================================
// Built-in value types
// =============================================================================

crate::__impl_value!(
    bool, char, (),
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
    &'static str,
);

mod collections {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::{Dispatch, TypeDesc, View, ViewMut};

    crate::__impl_value!(String);

    macro_rules! impl_generic_value {
        ($($ty:ident),*) => {$(
            impl<T: 'static> Dispatch for $ty<T> {
                fn describe() -> TypeDesc {
                    TypeDesc::value::<Self>()
                }

                fn view(&self) -> View<'_> {
                    View::Value(self)
                }

                fn view_mut(&mut self) -> ViewMut<'_> {
                    ViewMut::Value(self)
                }

                fn narrow<'a>(view: View<'a>) -> Option<&'a Self> {
                    super::narrow_ref(view)
                }

                fn narrow_mut<'a>(view: ViewMut<'a>) -> Option<&'a mut Self> {
                    super::narrow_mut(view)
                }
            }
        )*};
    }

    impl_generic_value!(Vec, Option, Box);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dispatch, Kind};

    #[test]
    fn test_exact_identity_only() {
        let n = 7_i64;
        assert_eq!(narrow_ref::<i64>(n.view()), Some(&7));
        assert!(narrow_ref::<i32>(n.view()).is_none());
        assert!(<i32 as Dispatch>::narrow(n.view()).is_none());
    }

    #[test]
    fn test_narrow_mut_writes_through() {
        let mut s = String::from("a");
        if let Some(s) = <String as Dispatch>::narrow_mut(s.view_mut()) {
            s.push('b');
        }
        assert_eq!(s, "ab");
    }

    #[test]
    fn test_describe_values() {
        assert_eq!(<u8 as Dispatch>::describe().kind(), Kind::Value);
        assert!(<Vec<u8> as Dispatch>::describe().name().ends_with("Vec<u8>"));
        assert_ne!(<Option<u8> as Dispatch>::describe(), <Option<u16> as Dispatch>::describe());
    }

    #[test]
    fn test_alloc_values() {
        let boxed: Box<i32> = Box::new(4);
        assert_eq!(<Box<i32> as Dispatch>::narrow(boxed.view()).map(|b| **b), Some(4));
        assert!(<i32 as Dispatch>::narrow(boxed.view()).is_none());
        assert_eq!(<Box<i32> as Dispatch>::describe().to_string(), "Box<i32>");
    }
}
