//! Heterogeneous type lists.
//!
//! Representation matrices are lists of types rather than values: walking one
//! instantiates a generic function per entry, so each representation gets its
//! own statically dispatched benchmark loop.

use std::marker::PhantomData;

pub trait List {
    const LEN: usize;
}

#[derive(Default, Debug, Clone, Copy)]
pub struct Nil;

#[derive(Default, Debug, Clone, Copy)]
pub struct Cons<H, T>(PhantomData<fn() -> (H, T)>);

impl List for Nil {
    const LEN: usize = 0;
}

impl<H, T: List> List for Cons<H, T> {
    const LEN: usize = 1 + T::LEN;
}

/// `HList!(A, B, C)` is `Cons<A, Cons<B, Cons<C, Nil>>>`.
#[macro_export]
macro_rules! HList {
    () => { $crate::hlist::Nil };
    ($t:ty $(,)?) => {
        $crate::hlist::Cons<$t, $crate::hlist::Nil>
    };
    ($t:ty, $($tn:ty),+ $(,)?) => {
        $crate::hlist::Cons<$t, $crate::HList!($($tn),+)>
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_length() {
        assert_eq!(<HList!()>::LEN, 0);
        assert_eq!(<HList!(u8)>::LEN, 1);
        assert_eq!(<HList!(u8, [f32; 3], (i8, i16),)>::LEN, 3);
    }

    #[test]
    fn macro_builds_nested_cons() {
        fn same<A: 'static, B: 'static>() -> bool {
            std::any::TypeId::of::<A>() == std::any::TypeId::of::<B>()
        }
        assert!(same::<HList!(u8, u16), Cons<u8, Cons<u16, Nil>>>());
        assert!(!same::<HList!(u16, u8), Cons<u8, Cons<u16, Nil>>>());
    }
}
