#![feature(portable_simd)]

//! Cycle-counted latency and throughput microbenchmarks for scalar and SIMD
//! numeric operations.
//!
//! A benchmark unit implements [`Benchmark`] and [`Run`]; [`Suite::bench_all`]
//! runs it for every representation of an element type and prints one table
//! row per representation, with the speedup over the first row.

pub mod barrier;
pub mod clock;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod hlist;
pub mod logging;
pub mod repr;
pub mod report;
pub mod timing;
pub mod units;

pub use barrier::{Opaque, fake_modify_memory, fake_read_memory};
pub use context::BenchContext;
pub use dispatch::{BenchList, Benchmark, Row, Run, Suite};
pub use error::{BenchError, Result};
pub use logging::setup_logging;
pub use repr::{
    Candidate, ConvertTo, Element, FloatElement, FloatRepr, IntElement, IntRepr, Kind,
    NATIVE_VECTOR_BYTES, Rep, Representation, Strategy, tag,
};
pub use timing::{
    MIN_PLAUSIBLE_LATENCY, Schedule, Timer, time_latency, time_mean, time_mean2, time_throughput,
};
