//! Cycle counters.

/// A monotonic, serializing, high resolution tick source.
///
/// Timing primitives are generic over this so tests can script the clock.
pub trait CycleSource {
    fn now(&mut self) -> u64;
}

/// The processor's own cycle counter.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tsc;

impl CycleSource for Tsc {
    #[inline(always)]
    fn now(&mut self) -> u64 {
        read_cycle_counter()
    }
}

/// `rdtscp` waits for all prior instructions to retire before reading the
/// time stamp counter.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn read_cycle_counter() -> u64 {
    let mut aux = 0u32;
    // SAFETY: rdtscp is available on every x86_64 CPU this crate targets and
    // only writes the processor id into `aux`.
    #[allow(unused_unsafe)]
    unsafe {
        std::arch::x86_64::__rdtscp(&mut aux)
    }
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub fn read_cycle_counter() -> u64 {
    let c: u64;
    // SAFETY: cntvct_el0 is readable from EL0 on every supported OS; `isb`
    // keeps earlier instructions from drifting past the read.
    unsafe {
        std::arch::asm!("isb", "mrs {}, cntvct_el0", out(reg) c, options(nomem, nostack, preserves_flags));
    }
    c
}

/// Nanoseconds since the first call, for targets without a usable counter.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
pub fn read_cycle_counter() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = EPOCH.get_or_init(Instant::now);
    epoch.elapsed().as_nanos() as u64
}
