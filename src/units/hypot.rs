use crate::context::BenchContext;
use crate::dispatch::{Benchmark, Run};
use crate::repr::FloatRepr;
use crate::timing::time_mean;
use crate::{fake_modify, fake_read};

use super::{LAT_THR, RETRIES};

const A: f32 = f32::from_bits(0x3aff_4111);
const B: f32 = f32::from_bits(0x3b41_525e);
const C: f32 = f32::from_bits(0x40f9_91f3);

#[inline(always)]
fn input<R: FloatRepr>(x: f32) -> R {
    R::splat(super::elem(x as f64))
}

/// `hypot(a, b)`.
pub struct Hypot2;

impl Benchmark for Hypot2 {
    type Times = [f64; 2];
    const INFO: &'static [&'static str] = LAT_THR;
}

impl Hypot2 {
    #[inline(always)]
    fn measure<R: FloatRepr, const LATENCY: bool>() -> f64 {
        let mut a: R = input(A);
        let mut b: R = input(B);
        time_mean::<50_000_000, RETRIES>(|| {
            fake_modify!(a, b);
            let r = a.vhypot(b);
            if LATENCY {
                a = r;
            } else {
                fake_read!(r);
            }
        })
    }
}

impl<R: FloatRepr> Run<R> for Hypot2 {
    fn run(_ctx: &mut BenchContext) -> [f64; 2] {
        [Self::measure::<R, true>(), Self::measure::<R, false>()]
    }
}

/// `hypot(a, b, c)`.
pub struct Hypot3;

impl Benchmark for Hypot3 {
    type Times = [f64; 2];
    const INFO: &'static [&'static str] = LAT_THR;
}

impl Hypot3 {
    #[inline(always)]
    fn measure<R: FloatRepr, const LATENCY: bool>() -> f64 {
        let mut a: R = input(A);
        let mut b: R = input(B);
        let mut c: R = input(C);
        time_mean::<50_000_000, RETRIES>(|| {
            fake_modify!(a, b, c);
            let r = a.vhypot3(b, c);
            if LATENCY {
                a = r;
            } else {
                fake_read!(r);
            }
        })
    }
}

impl<R: FloatRepr> Run<R> for Hypot3 {
    fn run(_ctx: &mut BenchContext) -> [f64; 2] {
        [Self::measure::<R, true>(), Self::measure::<R, false>()]
    }
}
