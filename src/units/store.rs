use crate::barrier::fake_read_memory;
use crate::context::BenchContext;
use crate::dispatch::{Benchmark, Run};
use crate::fake_modify;
use crate::repr::Representation;
use crate::timing::time_mean2;

use super::RETRIES;

const STORES_PER_ITERATION: usize = 16;

/// Plain stores of a whole representation to consecutive slots.
pub struct Store;

impl Benchmark for Store {
    type Times = [f64; 1];
    const INFO: &'static [&'static str] = &["Throughput"];
}

/// Stores `obj` into slot `k` of `mem`, one representation wide.
#[inline(always)]
fn store_at<R: Representation>(obj: &mut R, mem: &mut [R::Elem], k: usize) {
    fake_modify!(*obj);
    obj.store(&mut mem[k * R::LANES..]);
    fake_read_memory(&*mem);
}

impl<R: Representation> Run<R> for Store {
    fn run(ctx: &mut BenchContext) -> [f64; 1] {
        let mem = ctx.scratch.as_mut_slice::<R::Elem>();
        debug_assert!(STORES_PER_ITERATION * R::LANES <= mem.len());
        [
            time_mean2::<400_000, RETRIES>(|gate| {
                let mut obj = R::zero();
                while gate.more() {
                    for k in 0..STORES_PER_ITERATION {
                        store_at(&mut obj, mem, k);
                    }
                }
            }) / STORES_PER_ITERATION as f64,
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::simd::Simd;

    use super::*;
    use crate::context::SCRATCH_BYTES;

    #[test]
    fn slots_are_one_representation_apart() {
        let mut mem = vec![0u16; 64];
        let mut obj = <Simd<u16, 8> as Representation>::splat(5);
        store_at(&mut obj, &mut mem, 2);
        assert!(mem[..16].iter().all(|&x| x == 0));
        assert!(mem[16..24].iter().all(|&x| x == 5));
        assert!(mem[24..].iter().all(|&x| x == 0));

        let mut arr = [1i8, 2, 3];
        let mut mem = [0i8; 12];
        store_at(&mut arr, &mut mem, 3);
        assert_eq!(mem[9..], [1, 2, 3]);
    }

    #[test]
    fn widest_representation_fits_the_scratch_buffer() {
        assert!(STORES_PER_ITERATION * size_of::<Simd<f64, 32>>() <= SCRATCH_BYTES);
        assert!(STORES_PER_ITERATION * size_of::<[f64; 16]>() <= SCRATCH_BYTES);
        assert!(STORES_PER_ITERATION * size_of::<Simd<u8, 64>>() <= SCRATCH_BYTES);
    }
}
