use std::marker::PhantomData;

use crate::context::BenchContext;
use crate::dispatch::{Benchmark, Run};
use crate::repr::{Candidate, ConvertTo, Element, Kind, NATIVE_VECTOR_BYTES, bitcast};
use crate::timing::{time_latency, time_throughput};

use super::LAT_THR;

/// Value conversion of every lane to `To`. The placebo moves the same bytes
/// through a `To` representation without converting.
pub struct Convert<To>(PhantomData<To>);

impl<To: Element> Benchmark for Convert<To> {
    type Times = [f64; 2];
    const INFO: &'static [&'static str] = LAT_THR;
    const NAME: &'static str = To::NAME;

    fn accepts(candidate: &Candidate) -> bool {
        let from_int = !(candidate.elem_is::<f32>() || candidate.elem_is::<f64>());
        // a single lane, or a cast between integers of one width, copied back
        // into the source type is the placebo's byte move
        let plain_move = from_int
            && To::KIND != Kind::Float
            && (candidate.lanes == 1 || size_of::<To>() == candidate.elem_size);
        !candidate.elem_is::<To>()
            && candidate.lanes * size_of::<To>() <= NATIVE_VECTOR_BYTES
            && !plain_move
    }
}

impl<R, To> Run<R> for Convert<To>
where
    R: ConvertTo<To>,
    To: Element,
{
    fn run(_ctx: &mut BenchContext) -> [f64; 2] {
        let mut data = [R::zero(); 8];
        let op = |x: R| bitcast::<R, _>(&x.convert());
        let placebo = |x: R| bitcast::<R, _>(&bitcast::<<R as ConvertTo<To>>::Output, _>(&x));
        [
            time_latency(&mut data, op, placebo),
            time_throughput(&mut data, op, placebo),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::simd::Simd;

    use super::*;
    use crate::repr::{Representation, Strategy};

    fn accepts<R: Representation, To: Element>() -> bool {
        <Convert<To> as Benchmark>::accepts(&Candidate::of::<R>(Strategy::Lanes))
    }

    #[test]
    fn rejects_identity_and_oversized_targets() {
        assert!(!accepts::<f64, f64>());
        assert!(!accepts::<Simd<i32, 4>, i32>());
        assert!(accepts::<f64, f32>());
        assert!(accepts::<Simd<f32, 2>, f64>());
        // 64 lanes of anything wider than a byte never fit
        assert!(!accepts::<Simd<f32, 64>, i16>());
        assert!(!accepts::<[f64; 16], f64>());
        let widest = NATIVE_VECTOR_BYTES / size_of::<f64>();
        assert_eq!(
            accepts::<Simd<f32, 16>, f64>(),
            16 <= widest,
            "{NATIVE_VECTOR_BYTES} byte registers"
        );
    }

    #[test]
    fn integer_moves_are_not_conversions() {
        assert!(!accepts::<i32, i8>());
        assert!(!accepts::<i32, u32>());
        assert!(!accepts::<i32, i64>());
        assert!(!accepts::<[i32; 1], i16>());
        assert!(!accepts::<Simd<i32, 4>, u32>());
        assert!(!accepts::<Simd<u64, 2>, i64>());
        assert!(accepts::<i32, f32>());
        assert!(accepts::<f32, u8>());
    }

    #[test]
    fn vector_integer_casts_are_conversions() {
        assert!(accepts::<Simd<u8, 2>, u64>());
        assert!(accepts::<Simd<i32, 4>, i16>());
        assert!(accepts::<Simd<i32, 2>, i64>());
        assert!(accepts::<[i32; 4], u8>());
    }

    #[test]
    fn narrowing_packs_lanes_the_placebo_does_not() {
        let x = <Simd<i32, 4> as Representation>::from_fn(|i| [0x0102_0304, -5, 7, 9][i]);
        let converted: Simd<i32, 4> = bitcast(&ConvertTo::<i16>::convert(x));
        let moved: Simd<i32, 4> = bitcast(&bitcast::<Simd<i16, 4>, _>(&x));
        assert_eq!(converted.as_lanes(), &[0xfffb_0304_u32 as i32, 0x0009_0007, 0, 0]);
        assert_eq!(moved.as_lanes(), &[0x0102_0304, -5, 0, 0]);
        assert_ne!(converted, moved);
    }

    #[test]
    fn operation_and_placebo_keep_the_source_type() {
        let x = <Simd<f64, 2> as Representation>::splat(-2.75);
        let converted: Simd<f64, 2> = bitcast(&ConvertTo::<i32>::convert(x));
        let moved: Simd<f64, 2> = bitcast(&bitcast::<Simd<i32, 2>, _>(&x));
        // two i32 lanes fill the low half of one f64 lane
        assert_eq!(bytemuck::cast::<f64, [i32; 2]>(converted[0]), [-2, -2]);
        assert_eq!(converted[1], 0.0);
        assert_eq!(moved[0], -2.75);
        assert_eq!(moved[1], 0.0);
    }
}
