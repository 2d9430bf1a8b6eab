use std::marker::PhantomData;

use crate::context::BenchContext;
use crate::dispatch::{Benchmark, Run};
use crate::repr::FloatRepr;
use crate::timing::time_mean;
use crate::{fake_modify, fake_read};

use super::{LAT_THR, RETRIES, UnaryOp, ramp};

pub struct ExpOp;

impl UnaryOp for ExpOp {
    const NAME: &'static str = "exp(x)";

    #[inline(always)]
    fn apply<R: FloatRepr>(x: R) -> R {
        x.vexp()
    }
}

pub struct Expm1Op;

impl UnaryOp for Expm1Op {
    const NAME: &'static str = "expm1(x)";

    #[inline(always)]
    fn apply<R: FloatRepr>(x: R) -> R {
        x.vexpm1()
    }
}

/// Exponentials. The latency chain flips the sign between calls so the
/// argument neither overflows nor settles.
pub struct Exp<Op>(PhantomData<Op>);

impl<Op: UnaryOp> Benchmark for Exp<Op> {
    type Times = [f64; 2];
    const INFO: &'static [&'static str] = LAT_THR;
    const NAME: &'static str = Op::NAME;
}

impl<R: FloatRepr, Op: UnaryOp> Run<R> for Exp<Op> {
    fn run(_ctx: &mut BenchContext) -> [f64; 2] {
        let [mut a0, mut a1, mut a2, mut a3] = ramp::<R>();
        [
            0.25 * time_mean::<5_000_000, RETRIES>(|| {
                a0 = Op::apply(a0);
                a0 = Op::apply(a0.vneg());
                a0 = Op::apply(a0);
                a0 = Op::apply(a0.vneg());
                fake_read!(a0);
            }),
            0.25 * time_mean::<5_000_000, RETRIES>(|| {
                let r0 = Op::apply(a0);
                let r1 = Op::apply(a1);
                let r2 = Op::apply(a2);
                let r3 = Op::apply(a3);
                fake_read!(r0, r1, r2, r3);
                fake_modify!(a0, a1, a2, a3);
            }),
        ]
    }
}
