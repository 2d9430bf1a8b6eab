use std::marker::PhantomData;

use rand::Rng;

use crate::context::BenchContext;
use crate::dispatch::{Benchmark, Run};
use crate::repr::{FloatRepr, Representation};
use crate::timing::time_mean;
use crate::{fake_modify, fake_read};

use super::{LAT_THR, RETRIES, UnaryOp, elem};

const INPUTS: usize = 1024;

macro_rules! rounding_op {
    ($($op:ident => $name:literal, $method:ident;)*) => {$(
        pub struct $op;

        impl UnaryOp for $op {
            const NAME: &'static str = $name;

            #[inline(always)]
            fn apply<R: FloatRepr>(x: R) -> R {
                x.$method()
            }
        }
    )*};
}

rounding_op! {
    Floor => "std::floor", vfloor;
    Ceil => "std::ceil", vceil;
    Round => "std::round", vround;
    Rint => "std::rint", vrint;
    // the default rounding mode is the only one, so it is rint without the
    // inexact flag
    Nearbyint => "std::nearbyint", vrint;
}

/// Rounds an accumulator that keeps adding fresh inputs, so neither channel
/// can be folded to a constant.
pub struct Rounding<Op>(PhantomData<Op>);

impl<Op: UnaryOp> Benchmark for Rounding<Op> {
    type Times = [f64; 2];
    const INFO: &'static [&'static str] = LAT_THR;
    const NAME: &'static str = Op::NAME;
}

impl<Op: UnaryOp> Rounding<Op> {
    /// Uniform in `[-10, 20)`, drawn lane by lane.
    fn inputs<R: FloatRepr, G: Rng>(rng: &mut G) -> Vec<R> {
        (0..INPUTS)
            .map(|_| R::from_fn(|_| rng.random_range(elem(-10.0)..elem(20.0))))
            .collect()
    }

    #[inline(always)]
    fn measure<R: FloatRepr, const LATENCY: bool>(input: &[R]) -> f64 {
        let mut a = R::zero();
        let mut i = 0;
        time_mean::<5_000_000, RETRIES>(|| {
            a = a.vadd(input[i]);
            i = (i + 1) % input.len();
            fake_modify!(a);
            let r = Op::apply(a);
            if LATENCY {
                a = r;
            } else {
                a = R::zero();
                fake_read!(r);
            }
        })
    }
}

impl<R: FloatRepr, Op: UnaryOp> Run<R> for Rounding<Op> {
    fn run(ctx: &mut BenchContext) -> [f64; 2] {
        let input = Self::inputs::<R, _>(&mut ctx.rng);
        [
            Self::measure::<R, true>(&input),
            Self::measure::<R, false>(&input),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::simd::Simd;

    use super::*;

    #[test]
    fn inputs_cover_the_range() {
        let mut ctx = BenchContext::seeded(1);
        let input = Rounding::<Floor>::inputs::<Simd<f32, 8>, _>(&mut ctx.rng);
        assert_eq!(input.len(), INPUTS);
        let lanes: Vec<f32> = input.iter().flat_map(|v| v.to_array()).collect();
        assert!(lanes.iter().all(|x| (-10.0..20.0).contains(x)));
        assert!(lanes.iter().any(|&x| x < -5.0));
        assert!(lanes.iter().any(|&x| x > 15.0));
        // lanes are drawn independently
        assert!(input.iter().any(|v| v[0] != v[1]));
    }

    #[test]
    fn same_seed_same_inputs() {
        let a = Rounding::<Rint>::inputs::<[f64; 4], _>(&mut BenchContext::seeded(1).rng);
        let b = Rounding::<Rint>::inputs::<[f64; 4], _>(&mut BenchContext::seeded(1).rng);
        assert_eq!(a, b);
    }

    #[test]
    fn operations_round_as_named() {
        let x = <[f64; 4] as Representation>::from_fn(|i| [-2.5, -0.5, 0.5, 2.5][i]);
        assert_eq!(Floor::apply(x), [-3.0, -1.0, 0.0, 2.0]);
        assert_eq!(Ceil::apply(x), [-2.0, -0.0, 1.0, 3.0]);
        assert_eq!(Round::apply(x), [-3.0, -1.0, 1.0, 3.0]);
        assert_eq!(Rint::apply(x), [-2.0, -0.0, 0.0, 2.0]);
        assert_eq!(Nearbyint::apply(x), Rint::apply(x));
        assert_eq!(<Rounding<Nearbyint> as Benchmark>::NAME, "std::nearbyint");
        assert_eq!(<Rounding<Floor> as Benchmark>::NAME, "std::floor");
    }
}
