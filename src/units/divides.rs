use num_traits::Bounded;

use crate::context::BenchContext;
use crate::dispatch::{Benchmark, Run};
use crate::repr::{Element, Representation};
use crate::timing::time_mean;
use crate::{fake_modify, fake_read};

use super::{LAT_THR, RETRIES};

/// Division, four per call: a dependent chain and four independent quotients.
pub struct Divides;

impl Benchmark for Divides {
    type Times = [f64; 2];
    const INFO: &'static [&'static str] = LAT_THR;
}

impl<R: Representation> Run<R> for Divides {
    fn run(_ctx: &mut BenchContext) -> [f64; 2] {
        // large dividends keep integer quotients away from zero
        let top = <R::Elem as Bounded>::max_value().upper_half();
        let mut a0 = R::splat(top);
        let mut a1 = R::splat(top);
        let mut a2 = R::splat(top);
        let mut a3 = R::splat(top);
        let mut b = R::splat(R::Elem::from_elem(7u8));

        [
            0.25 * time_mean::<1_000_000, RETRIES>(|| {
                fake_modify!(a0, b);
                let mut r = a0.vdiv(b);
                r = a0.vdiv(r);
                r = a0.vdiv(r);
                r = a0.vdiv(r);
                b = r;
            }),
            0.25 * time_mean::<1_000_000, RETRIES>(|| {
                fake_modify!(a0, a1, a2, a3, b);
                let r0 = a0.vdiv(b);
                let r1 = a1.vdiv(b);
                let r2 = a2.vdiv(b);
                let r3 = a3.vdiv(b);
                fake_read!(r0, r1, r2, r3);
            }),
        ]
    }
}
