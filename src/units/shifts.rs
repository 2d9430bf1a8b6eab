use std::any::TypeId;
use std::marker::PhantomData;

use crate::context::BenchContext;
use crate::dispatch::{Benchmark, Run};
use crate::repr::{Element, IntRepr, Representation};
use crate::timing::time_mean;
use crate::{fake_modify, fake_read};

use super::{LAT_THR, RETRIES};

/// Shift amount used by the scalar-amount kinds and by bare scalars.
pub const SCALAR_AMOUNT: u32 = 6;

/// Direction and operand shape of a shift.
pub trait ShiftKind: 'static {
    const NAME: &'static str;
    const LEFT: bool;
    /// The amount is a compile-time constant.
    const CONST_RHS: bool;
    /// The amount has one value per lane.
    const PER_LANE: bool;
}

macro_rules! shift_kind {
    ($($kind:ident => $name:literal, $left:literal, $const_rhs:literal, $per_lane:literal;)*) => {$(
        pub struct $kind;

        impl ShiftKind for $kind {
            const NAME: &'static str = $name;
            const LEFT: bool = $left;
            const CONST_RHS: bool = $const_rhs;
            const PER_LANE: bool = $per_lane;
        }
    )*};
}

shift_kind! {
    LeftVec => "`x << v`", true, false, true;
    LeftVecConst => "`x << const v`", true, true, true;
    LeftInt => "`x << i`", true, false, false;
    LeftIntConst => "`x << 6`", true, true, false;
    RightVec => "`x >> v`", false, false, true;
    RightVecConst => "`x >> const v`", false, true, true;
    RightInt => "`x >> i`", false, false, false;
    RightIntConst => "`x >> 6`", false, true, false;
}

/// Per-lane amounts `(i % 31) + 1`; a bare scalar gets [`SCALAR_AMOUNT`].
#[inline(always)]
pub fn lane_amounts<R: IntRepr>() -> R {
    if TypeId::of::<R>() == TypeId::of::<R::Elem>() {
        R::splat(R::Elem::from_elem(SCALAR_AMOUNT))
    } else {
        R::from_fn(|i| R::Elem::from_elem((i % 31 + 1) as u8))
    }
}

/// Integer shifts. Throughput restarts from the same value every call;
/// latency feeds the result (and a non-constant amount) back in.
pub struct Shift<K>(PhantomData<K>);

impl<K: ShiftKind> Benchmark for Shift<K> {
    type Times = [f64; 2];
    const INFO: &'static [&'static str] = LAT_THR;
    const NAME: &'static str = K::NAME;
}

impl<K: ShiftKind> Shift<K> {
    #[inline(always)]
    fn by_lanes<R: IntRepr, const LATENCY: bool>() -> f64 {
        let mut a_init = R::splat(R::Elem::from_elem(23u8));
        let mut b_init: R = lane_amounts();
        time_mean::<50_000_000, RETRIES>(|| {
            let mut a = a_init;
            let mut b = b_init;
            fake_modify!(a);
            if K::CONST_RHS {
                b = lane_amounts();
            } else {
                fake_modify!(b);
            }
            let r = if K::LEFT { a.vshl(b) } else { a.vshr(b) };
            if LATENCY {
                a_init = r;
                if !K::CONST_RHS {
                    fake_modify!(b, b_init);
                    b_init = b;
                }
            } else {
                fake_read!(r);
            }
        })
    }

    #[inline(always)]
    fn by_int<R: IntRepr, const LATENCY: bool>() -> f64 {
        let mut a_init = R::splat(R::Elem::from_elem(23u8));
        let mut b_init = SCALAR_AMOUNT;
        time_mean::<50_000_000, RETRIES>(|| {
            let mut a = a_init;
            let mut b = b_init;
            fake_modify!(a);
            if K::CONST_RHS {
                b = SCALAR_AMOUNT;
            } else {
                fake_modify!(b);
            }
            let r = if K::LEFT { a.vshl_by(b) } else { a.vshr_by(b) };
            if LATENCY {
                a_init = r;
                if !K::CONST_RHS {
                    fake_modify!(b, b_init);
                    b_init = b;
                }
            } else {
                fake_read!(r);
            }
        })
    }

    fn measure<R: IntRepr, const LATENCY: bool>() -> f64 {
        if K::PER_LANE {
            Self::by_lanes::<R, LATENCY>()
        } else {
            Self::by_int::<R, LATENCY>()
        }
    }
}

impl<R: IntRepr, K: ShiftKind> Run<R> for Shift<K> {
    fn run(_ctx: &mut BenchContext) -> [f64; 2] {
        [
            Self::measure::<R, true>(),
            Self::measure::<R, false>(),
        ]
    }
}
