//! Drives a benchmark unit over a representation matrix.

use std::io::{self, Stdout, Write};

use tracing::{debug, info};

use crate::context::BenchContext;
use crate::error::Result;
use crate::hlist::{Cons, List, Nil};
use crate::repr::tag::Tag;
use crate::repr::{Candidate, Element, Rep, Representation, Strategy};
use crate::report::{Cell, Report, Tier, id_width, row_id, speedup};

/// Static description of a benchmark unit.
pub trait Benchmark {
    /// One value per channel, in cycles per call.
    type Times: Copy + AsRef<[f64]>;

    /// Channel names.
    const INFO: &'static [&'static str];

    /// Appended to every row id.
    const NAME: &'static str = "";

    fn accepts(_candidate: &Candidate) -> bool {
        true
    }
}

/// A benchmark unit instantiated for representation `R`.
pub trait Run<R: Representation>: Benchmark {
    fn run(ctx: &mut BenchContext) -> Self::Times;
}

/// A measured representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row<T> {
    pub times: T,
    pub lanes: usize,
    pub speedup_lanes: usize,
}

/// A type list of [`Rep`] entries that `B` can run on.
pub trait BenchList<B: Benchmark>: List {
    /// Benchmarks every entry in order and returns the reference for whatever
    /// comes next: `reference` if there was one, else the first measured row.
    fn bench_each<W: Write>(
        suite: &mut Suite<W>,
        reference: Option<Row<B::Times>>,
    ) -> Result<Option<Row<B::Times>>>;
}

impl<B: Benchmark> BenchList<B> for Nil {
    fn bench_each<W: Write>(
        _suite: &mut Suite<W>,
        reference: Option<Row<B::Times>>,
    ) -> Result<Option<Row<B::Times>>> {
        Ok(reference)
    }
}

impl<B, R, S, T> BenchList<B> for Cons<Rep<R, S>, T>
where
    B: Run<R>,
    R: Representation,
    S: Tag,
    T: BenchList<B>,
{
    fn bench_each<W: Write>(
        suite: &mut Suite<W>,
        reference: Option<Row<B::Times>>,
    ) -> Result<Option<Row<B::Times>>> {
        let measured = suite.bench_lat_thr::<R, B>(S::STRATEGY, reference)?;
        T::bench_each(suite, reference.or(measured))
    }
}

pub struct Suite<W: Write = Stdout> {
    ctx: BenchContext,
    report: Report<W>,
}

impl Suite<Stdout> {
    pub fn stdout(ctx: BenchContext) -> Self {
        Self::with_writer(ctx, io::stdout())
    }
}

impl<W: Write> Suite<W> {
    pub fn with_writer(ctx: BenchContext, out: W) -> Self {
        Self {
            ctx,
            report: Report::new(out),
        }
    }

    /// One table: `B` over every representation of `T`.
    pub fn bench_all<T, B>(&mut self) -> Result<()>
    where
        T: Element,
        B: Benchmark,
        T::Matrix: BenchList<B>,
    {
        self.bench_all_with::<T, B, Nil>()
    }

    /// Like [`Suite::bench_all`], followed by the `Extra` representations
    /// measured against the same reference.
    pub fn bench_all_with<T, B, Extra>(&mut self) -> Result<()>
    where
        T: Element,
        B: Benchmark,
        T::Matrix: BenchList<B>,
        Extra: BenchList<B>,
    {
        info!(
            elem = T::NAME.trim_start(),
            unit = B::NAME,
            representations = <T::Matrix as List>::LEN + Extra::LEN,
            "benchmarking"
        );

        let width = id_width(B::NAME);
        self.report.header(width, B::INFO)?;
        let reference = <T::Matrix as BenchList<B>>::bench_each(self, None)?;
        Extra::bench_each(self, reference)?;
        self.report.separator(width, B::INFO.len())?;
        Ok(())
    }

    /// Rows for `L` only, measured against a reference from an earlier call.
    pub fn bench_list<B, L>(
        &mut self,
        reference: Option<Row<B::Times>>,
    ) -> Result<Option<Row<B::Times>>>
    where
        B: Benchmark,
        L: BenchList<B>,
    {
        L::bench_each(self, reference)
    }

    /// Measures and prints one representation. `None` if it was skipped.
    pub fn bench_lat_thr<R, B>(
        &mut self,
        strategy: Strategy,
        reference: Option<Row<B::Times>>,
    ) -> Result<Option<Row<B::Times>>>
    where
        R: Representation,
        B: Run<R>,
    {
        let candidate = Candidate::of::<R>(strategy);
        if !candidate.is_available() {
            debug!(
                elem = candidate.elem_name.trim_start(),
                repr = %candidate.label(),
                "wider than the native vector register"
            );
            return Ok(None);
        }
        if !B::accepts(&candidate) {
            debug!(
                elem = candidate.elem_name.trim_start(),
                repr = %candidate.label(),
                unit = B::NAME,
                "rejected"
            );
            return Ok(None);
        }

        let times = B::run(&mut self.ctx);
        debug_assert_eq!(times.as_ref().len(), B::INFO.len());
        let row = Row {
            times,
            lanes: candidate.lanes,
            speedup_lanes: candidate.speedup_lanes(),
        };

        let reference_lanes = reference.map_or(row.speedup_lanes, |r| r.speedup_lanes);
        let cells: Vec<Cell> = times
            .as_ref()
            .iter()
            .enumerate()
            .map(|(i, &cycles)| {
                let ref_cost = reference.map(|r| (r.times.as_ref()[i], r.lanes));
                let speedup = speedup(ref_cost, cycles, row.lanes);
                Cell {
                    cycles,
                    speedup,
                    tier: Tier::classify(speedup, row.speedup_lanes, reference_lanes),
                }
            })
            .collect();

        let id = row_id(candidate.elem_name, candidate.label(), B::NAME);
        self.report.row(&id, &cells)?;
        Ok(Some(row))
    }

    pub fn into_writer(self) -> W {
        self.report.into_inner()
    }
}
