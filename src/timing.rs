//! Cycle-counted timing loops.
//!
//! Every estimate is the minimum over several windows: interrupts, frequency
//! changes and cache misses only ever add cycles, so the fastest window is the
//! closest to the steady-state cost.

use tracing::error;

use crate::barrier::Opaque;
use crate::clock::{CycleSource, Tsc};
use crate::error::{BenchError, Result};

/// Latency results below this many cycles mean the real and placebo loops
/// were optimized differently.
pub const MIN_PLAUSIBLE_LATENCY: f64 = 0.5;

/// Window shape used by [`time_latency`] and [`time_throughput`].
pub const LAT_THR_SCHEDULE: Schedule = Schedule::new(500_000, 5);

/// How many calls per window and how many windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub iterations: u64,
    pub retries: u32,
}

impl Schedule {
    pub const fn new(iterations: u64, retries: u32) -> Self {
        assert!(iterations > 0, "a window needs at least one iteration");
        assert!(retries > 0, "at least one window must be measured");
        Self { iterations, retries }
    }
}

/// Times closures against a [`CycleSource`].
#[derive(Debug, Default, Clone)]
pub struct Timer<C = Tsc> {
    clock: C,
}

impl Timer<Tsc> {
    pub fn new() -> Self {
        Self { clock: Tsc }
    }
}

impl<C: CycleSource> Timer<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Minimum cycles per call of `f` over `schedule.retries` windows of
    /// `schedule.iterations` calls.
    #[inline(always)]
    pub fn mean(&mut self, schedule: Schedule, mut f: impl FnMut()) -> f64 {
        let mut best = f64::INFINITY;
        for _ in 0..schedule.retries {
            let start = self.clock.now();
            for _ in 0..schedule.iterations {
                f();
            }
            let end = self.clock.now();
            let per_call = end.wrapping_sub(start) as f64 / schedule.iterations as f64;
            best = best.min(per_call);
        }
        best
    }

    /// Like [`Timer::mean`], but the closure owns the loop and asks the
    /// [`Gate`] whether to continue. One extra window runs first and is
    /// discarded.
    #[inline(always)]
    pub fn mean2(&mut self, schedule: Schedule, f: impl FnOnce(&mut Gate<'_, C>)) -> f64 {
        let mut gate = Gate::new(&mut self.clock, schedule);
        f(&mut gate);
        gate.best
    }

    /// Latency of one call of `op`, as a dependency chain rotating through
    /// `data`, minus the same chain through `placebo`.
    pub fn try_latency<R, const N: usize>(
        &mut self,
        schedule: Schedule,
        data: &mut [R; N],
        mut op: impl FnMut(R) -> R,
        mut placebo: impl FnMut(R) -> R,
    ) -> Result<f64>
    where
        R: Opaque + Copy,
    {
        const { assert!(N > 0) };
        data.fake_modify();

        let mut i = 0;
        let real = self.mean(schedule, || {
            let next = if i + 1 == N { 0 } else { i + 1 };
            let mut r = op(data[i]);
            r.fake_modify();
            data[next] = r;
            i = next;
        });

        let mut i = 0;
        let fake = self.mean(schedule, || {
            let next = if i + 1 == N { 0 } else { i + 1 };
            let mut r = placebo(data[i]);
            r.fake_modify();
            data[next] = r;
            i = next;
        });

        check_latency(real - fake)
    }

    /// [`Timer::try_latency`], aborting the process on an implausible result.
    pub fn latency<R, const N: usize>(
        &mut self,
        schedule: Schedule,
        data: &mut [R; N],
        op: impl FnMut(R) -> R,
        placebo: impl FnMut(R) -> R,
    ) -> f64
    where
        R: Opaque + Copy,
    {
        match self.try_latency(schedule, data, op, placebo) {
            Ok(cycles) => cycles,
            Err(e) => abort_on(&e),
        }
    }

    /// Cost per element of applying `op` to all of `data` at once, minus the
    /// same batch through `placebo`.
    pub fn throughput<R, const N: usize>(
        &mut self,
        schedule: Schedule,
        data: &mut [R; N],
        mut op: impl FnMut(R) -> R,
        mut placebo: impl FnMut(R) -> R,
    ) -> f64
    where
        R: Opaque + Copy,
    {
        const { assert!(N > 0) };
        data.fake_modify();

        let real = self.mean(schedule, || {
            data.fake_modify();
            let r: [R; N] = std::array::from_fn(|k| op(data[k]));
            r.fake_read();
        });
        let fake = self.mean(schedule, || {
            data.fake_modify();
            let r: [R; N] = std::array::from_fn(|k| placebo(data[k]));
            r.fake_read();
        });

        (real - fake) / N as f64
    }
}

/// Loop condition handed to [`Timer::mean2`] closures.
///
/// Each window yields `iterations` times `true`; the call after that reads the
/// counter once, both to close the window and to open the next one.
pub struct Gate<'a, C> {
    clock: &'a mut C,
    schedule: Schedule,
    remaining: u64,
    it: u64,
    completed: u32,
    started: bool,
    start: u64,
    best: f64,
}

impl<'a, C: CycleSource> Gate<'a, C> {
    fn new(clock: &'a mut C, schedule: Schedule) -> Self {
        Self {
            clock,
            schedule,
            remaining: 0,
            it: 0,
            completed: 0,
            started: false,
            start: 0,
            best: f64::INFINITY,
        }
    }

    /// Whether the closure should run its body once more.
    #[inline(always)]
    pub fn more(&mut self) -> bool {
        if self.remaining != 0 {
            self.remaining -= 1;
            self.it = self.it.wrapping_add(1);
            return true;
        }
        self.boundary()
    }

    #[inline(never)]
    fn boundary(&mut self) -> bool {
        let now = self.clock.now();
        if self.started {
            self.completed += 1;
            // the first window pays for warm-up
            if self.completed > 1 {
                let per_call = now.wrapping_sub(self.start) as f64 / self.schedule.iterations as f64;
                if per_call < self.best {
                    self.best = per_call;
                }
            }
        }
        if self.completed > self.schedule.retries {
            return false;
        }
        self.started = true;
        self.start = now;
        self.remaining = self.schedule.iterations - 1;
        self.it = self.it.wrapping_add(1);
        true
    }

    /// Iterations started so far, counting from 1.
    #[inline(always)]
    pub fn it(&self) -> u64 {
        self.it
    }
}

pub fn check_latency(cycles: f64) -> Result<f64> {
    if cycles >= MIN_PLAUSIBLE_LATENCY {
        Ok(cycles)
    } else {
        Err(BenchError::ImplausibleLatency {
            cycles,
            floor: MIN_PLAUSIBLE_LATENCY,
        })
    }
}

/// Report `e` and abort. A corrupted comparison has no safe fallback value.
pub fn abort_on(e: &BenchError) -> ! {
    error!("{e}");
    eprintln!("{e}");
    std::process::abort()
}

/// Minimum cycles per call over `RETRIES` windows of `ITERATIONS` calls.
#[inline(always)]
pub fn time_mean<const ITERATIONS: u64, const RETRIES: u32>(f: impl FnMut()) -> f64 {
    Timer::new().mean(Schedule::new(ITERATIONS, RETRIES), f)
}

/// Gate-driven variant of [`time_mean`].
#[inline(always)]
pub fn time_mean2<const ITERATIONS: u64, const RETRIES: u32>(
    f: impl FnOnce(&mut Gate<'_, Tsc>),
) -> f64 {
    Timer::new().mean2(Schedule::new(ITERATIONS, RETRIES), f)
}

pub fn time_latency<R: Opaque + Copy, const N: usize>(
    data: &mut [R; N],
    op: impl FnMut(R) -> R,
    placebo: impl FnMut(R) -> R,
) -> f64 {
    Timer::new().latency(LAT_THR_SCHEDULE, data, op, placebo)
}

pub fn time_throughput<R: Opaque + Copy, const N: usize>(
    data: &mut [R; N],
    op: impl FnMut(R) -> R,
    placebo: impl FnMut(R) -> R,
) -> f64 {
    Timer::new().throughput(LAT_THR_SCHEDULE, data, op, placebo)
}
