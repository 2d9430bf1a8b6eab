//! State shared by every benchmark of one run.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::repr::Element;

pub const SCRATCH_BYTES: usize = 64 * 64;

/// Somewhere for stores to land. The contents are never meaningful.
#[repr(C, align(64))]
pub struct Scratch([u8; SCRATCH_BYTES]);

impl Scratch {
    pub fn new() -> Box<Self> {
        Box::new(Self([0; SCRATCH_BYTES]))
    }

    /// The whole buffer as elements of `T`.
    pub fn as_mut_slice<T: Element>(&mut self) -> &mut [T] {
        bytemuck::cast_slice_mut(&mut self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

pub struct BenchContext {
    pub scratch: Box<Scratch>,
    pub rng: StdRng,
}

impl BenchContext {
    /// Seeded from the operating system; runs are not repeatable.
    pub fn new() -> Self {
        Self {
            scratch: Scratch::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            scratch: Scratch::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for BenchContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn scratch_is_cache_line_aligned() {
        let mut scratch = Scratch::new();
        assert_eq!(scratch.as_bytes().as_ptr() as usize % 64, 0);
        assert_eq!(scratch.as_mut_slice::<f64>().len(), SCRATCH_BYTES / 8);
        assert_eq!(scratch.as_mut_slice::<i16>().len(), SCRATCH_BYTES / 2);
    }

    #[test]
    fn seeded_contexts_repeat() {
        let mut a = BenchContext::seeded(1);
        let mut b = BenchContext::seeded(1);
        let xs: Vec<u32> = (0..8).map(|_| a.rng.random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.rng.random()).collect();
        assert_eq!(xs, ys);
    }
}
