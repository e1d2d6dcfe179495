use crate::arg::Arg;
use crate::types::{Access, Dispatch, ParamDesc, TypeDesc};

/// A declarable parameter type: `&T`, `&mut T`, or the [`Fallback`] marker.
pub trait Param {
    type Item<'a>;

    fn describe() -> ParamDesc;

    fn narrow<'a>(arg: &'a mut Arg<'_>) -> Option<Self::Item<'a>>;
}

pub type ParamItem<'a, P> = <P as Param>::Item<'a>;

impl<T: Dispatch + ?Sized> Param for &T {
    type Item<'a> = &'a T;

    fn describe() -> ParamDesc {
        ParamDesc::new(T::describe(), Access::Shared)
    }

    fn narrow<'a>(arg: &'a mut Arg<'_>) -> Option<&'a T> {
        arg.narrow_ref::<T>()
    }
}

impl<T: Dispatch + ?Sized> Param for &mut T {
    type Item<'a> = &'a mut T;

    fn describe() -> ParamDesc {
        ParamDesc::new(T::describe(), Access::Exclusive)
    }

    fn narrow<'a>(arg: &'a mut Arg<'_>) -> Option<&'a mut T> {
        arg.narrow_mut::<T>()
    }
}

/// Marker parameter of the fallback implementation. Accepts any argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fallback;

impl Param for Fallback {
    type Item<'a> = Fallback;

    fn describe() -> ParamDesc {
        ParamDesc::new(TypeDesc::sentinel::<Fallback>(), Access::Shared)
    }

    fn narrow<'a>(_arg: &'a mut Arg<'_>) -> Option<Fallback> {
        Some(Fallback)
    }
}
