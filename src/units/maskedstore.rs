use num_traits::Bounded;
use rand::Rng;

use crate::barrier::{fake_modify_memory, fake_read_memory};
use crate::context::BenchContext;
use crate::dispatch::{Benchmark, Run};
use crate::fake_modify;
use crate::repr::{Candidate, Element, Kind, Representation, Strategy};
use crate::timing::time_mean2;

use super::RETRIES;

/// Elements the channels walk through before wrapping around.
const SPAN: usize = 1024;

/// Stores that only write the lanes selected by a mask.
pub struct MaskedStore;

impl Benchmark for MaskedStore {
    type Times = [f64; 4];
    const INFO: &'static [&'static str] =
        &["Random Mask", "Epilogue Mask", "Transform", "read-modify-write"];

    fn accepts(candidate: &Candidate) -> bool {
        matches!(candidate.strategy, Strategy::Native | Strategy::Lanes)
    }
}

/// Ones and zeros with equal odds.
fn mask_buffer<T: Element, G: Rng>(rng: &mut G, len: usize) -> Vec<T> {
    (0..len)
        .map(|_| {
            let bit = if rng.random::<u32>() & 0x100 == 0 { 1u8 } else { 0 };
            T::from_elem(bit)
        })
        .collect()
}

/// Lanes above the middle of the value range: `> 0.5` for floats, `>= 0`
/// for signed and `> MAX / 2` for unsigned integers.
#[inline(always)]
fn upper_lanes<R: Representation>(obj: &R) -> u64 {
    match R::Elem::KIND {
        Kind::Float => obj.gt_mask(R::Elem::from_elem(0.5)),
        Kind::Signed => obj.ge_mask(R::Elem::default()),
        Kind::Unsigned => {
            obj.gt_mask(<R::Elem as Bounded>::max_value() / R::Elem::from_elem(2u8))
        }
    }
}

#[inline(always)]
fn store_masked<R: Representation>(obj: &mut R, mask: u64, mem: &mut [R::Elem]) {
    fake_modify!(*obj);
    obj.store_select(mem, mask);
    fake_read_memory(&*mem);
}

#[inline(always)]
fn offset<R: Representation>(it: u64) -> usize {
    (it as usize).wrapping_mul(R::LANES) % SPAN
}

impl<R: Representation> Run<R> for MaskedStore {
    fn run(ctx: &mut BenchContext) -> [f64; 4] {
        let len = SPAN + R::LANES;
        let mut masks: Vec<R::Elem> = mask_buffer(&mut ctx.rng, len);
        let mut input: Vec<R::Elem> = (0..len)
            .map(|_| <R::Elem as Element>::random(&mut ctx.rng))
            .collect();
        let mut output = vec![R::Elem::default(); len];
        let mem = ctx.scratch.as_mut_slice::<R::Elem>();

        let random_mask = time_mean2::<800_000, RETRIES>(|gate| {
            let mut obj = R::zero();
            while gate.more() {
                fake_modify_memory(masks.as_mut_slice());
                let i = offset::<R>(gate.it());
                let mask = R::load(&masks[i..]).eq_mask(R::Elem::default());
                store_masked(&mut obj, mask, mem);
            }
        });

        let epilogue_mask = time_mean2::<800_000, RETRIES>(|gate| {
            let mut obj = R::zero();
            let mut iota = R::from_fn(|i| R::Elem::from_elem(i as u8));
            fake_modify!(iota);
            while gate.more() {
                let n = R::Elem::from_elem((gate.it() % R::LANES as u64) as u8);
                store_masked(&mut obj, iota.lt_mask(n), mem);
            }
        });

        let transform = time_mean2::<1_000_000, RETRIES>(|gate| {
            while gate.more() {
                fake_modify_memory(output.as_mut_slice());
                fake_modify_memory(input.as_mut_slice());
                let i = offset::<R>(gate.it());
                let obj = R::load(&input[i..]);
                obj.store_select(&mut output[i..], upper_lanes(&obj));
            }
        });

        let read_modify_write = time_mean2::<1_000_000, RETRIES>(|gate| {
            while gate.more() {
                fake_modify_memory(output.as_mut_slice());
                fake_modify_memory(input.as_mut_slice());
                let i = offset::<R>(gate.it());
                let obj = R::load(&input[i..]);
                let mut out = R::load(&output[i..]);
                obj.store_select(out.as_lanes_mut(), upper_lanes(&obj));
                out.store(&mut output[i..]);
            }
        });

        [random_mask, epilogue_mask, transform, read_modify_write]
    }
}

#[cfg(test)]
mod tests {
    use std::simd::Simd;

    use super::*;

    #[test]
    fn only_portable_vectors_are_accepted() {
        let accepts = |strategy| MaskedStore::accepts(&Candidate::of::<Simd<i32, 4>>(strategy));
        assert!(accepts(Strategy::Native));
        assert!(accepts(Strategy::Lanes));
        assert!(!accepts(Strategy::Register));
        assert!(!MaskedStore::accepts(&Candidate::of::<[i32; 4]>(Strategy::FixedSize)));
        assert!(!MaskedStore::accepts(&Candidate::of::<i32>(Strategy::Scalar)));
    }

    #[test]
    fn masks_are_balanced_bits() {
        let mut ctx = BenchContext::seeded(7);
        let masks: Vec<i16> = mask_buffer(&mut ctx.rng, 4096);
        assert!(masks.iter().all(|&m| m == 0 || m == 1));
        let ones = masks.iter().filter(|&&m| m == 1).count();
        assert!((1600..2500).contains(&ones), "{ones}");
    }

    #[test]
    fn upper_lanes_split_each_kind() {
        let f = Simd::<f32, 4>::from_array([0.25, 0.75, 0.5, 1.0]);
        assert_eq!(upper_lanes(&f), 0b1010);
        let s = Simd::<i8, 4>::from_array([-1, 0, 5, -128]);
        assert_eq!(upper_lanes(&s), 0b0110);
        let u = Simd::<u16, 4>::from_array([0, 40_000, 32_767, 32_768]);
        assert_eq!(upper_lanes(&u), 0b1010);
    }

    #[test]
    fn masked_store_leaves_disabled_lanes() {
        let mut mem = [9u64; 4];
        let mut obj = Simd::<u64, 4>::from_array([1, 2, 3, 4]);
        store_masked(&mut obj, 0b0101, &mut mem);
        assert_eq!(mem, [1, 9, 3, 9]);

        let iota = <Simd<u8, 8> as Representation>::from_fn(|i| i as u8);
        assert_eq!(iota.lt_mask(3), 0b111);
        assert_eq!(iota.lt_mask(0), 0);
    }

    #[test]
    fn offsets_stay_inside_the_buffer() {
        for it in [1, 2, 63, 64, 65, 1 << 20] {
            let i = offset::<Simd<u8, 64>>(it);
            assert!(i + 64 <= SPAN + 64);
            assert_eq!(i % 64, 0);
        }
        assert_eq!(offset::<Simd<f64, 2>>(3), 6);
    }
}
