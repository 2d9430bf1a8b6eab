use crate::context::BenchContext;
use crate::dispatch::{Benchmark, Run};
use crate::repr::FloatRepr;
use crate::timing::time_mean;
use crate::{fake_modify, fake_read};

use super::{LAT_THR, RETRIES, elem, ramp};

/// Results at or above this restart the latency chain from its negation.
const OVERFLOW_GUARD: f64 = 1e38;

/// `scalbn(x, n)`: `x * 2^n` for a runtime `n`.
pub struct Scalbn;

impl Benchmark for Scalbn {
    type Times = [f64; 2];
    const INFO: &'static [&'static str] = LAT_THR;
    const NAME: &'static str = "scalbn";
}

impl<R: FloatRepr> Run<R> for Scalbn {
    fn run(_ctx: &mut BenchContext) -> [f64; 2] {
        let [mut a0, mut a1, mut a2, mut a3] = ramp::<R>();
        let mut n = 8i32;
        fake_modify!(n);

        let mut a = a0;
        let latency = time_mean::<5_000_000, RETRIES>(|| {
            let r = a.vscalbn(n);
            fake_read!(r);
            a = r.vclamp_below(elem(OVERFLOW_GUARD), elem(-OVERFLOW_GUARD));
        });

        let (mut n0, mut n1, mut n2, mut n3) = (8i32, -9i32, 100i32, 2000i32);
        fake_modify!(n0, n1, n2, n3);
        let throughput = 0.25
            * time_mean::<5_000_000, RETRIES>(|| {
                let r0 = a0.vscalbn(n0);
                let r1 = a1.vscalbn(n1);
                let r2 = a2.vscalbn(n2);
                let r3 = a3.vscalbn(n3);
                fake_read!(r0, r1, r2, r3);
                fake_modify!(a0, a1, a2, a3);
            });

        [latency, throughput]
    }
}
