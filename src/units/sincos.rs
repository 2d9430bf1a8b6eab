use std::marker::PhantomData;

use crate::context::BenchContext;
use crate::dispatch::{Benchmark, Run};
use crate::repr::FloatRepr;
use crate::timing::time_mean;
use crate::{fake_modify, fake_read};

use super::{LAT_THR, RETRIES, UnaryOp, elem};

pub struct SinOp;

impl UnaryOp for SinOp {
    const NAME: &'static str = "sin(x)";

    #[inline(always)]
    fn apply<R: FloatRepr>(x: R) -> R {
        x.vsin()
    }
}

pub struct CosOp;

impl UnaryOp for CosOp {
    const NAME: &'static str = "cos(x)";

    #[inline(always)]
    fn apply<R: FloatRepr>(x: R) -> R {
        x.vcos()
    }
}

pub struct SinCos<Op>(PhantomData<Op>);

impl<Op: UnaryOp> Benchmark for SinCos<Op> {
    type Times = [f64; 2];
    const INFO: &'static [&'static str] = LAT_THR;
    const NAME: &'static str = Op::NAME;
}

impl<R: FloatRepr, Op: UnaryOp> Run<R> for SinCos<Op> {
    fn run(_ctx: &mut BenchContext) -> [f64; 2] {
        let [mut a0, mut a1, mut a2, mut a3]: [R; 4] =
            std::array::from_fn(|i| R::splat(elem(i as f64 + 2.0)));
        [
            0.25 * time_mean::<5_000_000, RETRIES>(|| {
                a0 = Op::apply(a0);
                a0 = Op::apply(a0);
                a0 = Op::apply(a0);
                a0 = Op::apply(a0);
                fake_read!(a0);
            }),
            0.25 * time_mean::<5_000_000, RETRIES>(|| {
                fake_modify!(a0, a1, a2, a3);
                let r0 = Op::apply(a0);
                let r1 = Op::apply(a1);
                let r2 = Op::apply(a2);
                let r3 = Op::apply(a3);
                fake_read!(r0, r1, r2, r3);
            }),
        ]
    }
}
