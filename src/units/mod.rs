//! Benchmark units.
//!
//! Each unit is generic over the representation and measures one operation
//! with the timing primitives. Iteration counts are per unit; every
//! measurement keeps the best of [`RETRIES`] windows.

pub mod conversion;
pub mod divides;
pub mod exp;
pub mod hypot;
pub mod maskedstore;
pub mod rounding;
pub mod scalbn;
pub mod shifts;
pub mod sincos;
pub mod store;

pub use conversion::Convert;
pub use divides::Divides;
pub use exp::{Exp, ExpOp, Expm1Op};
pub use hypot::{Hypot2, Hypot3};
pub use maskedstore::MaskedStore;
pub use rounding::{Ceil, Floor, Nearbyint, Rint, Round, Rounding};
pub use scalbn::Scalbn;
pub use shifts::{
    LeftInt, LeftIntConst, LeftVec, LeftVecConst, RightInt, RightIntConst, RightVec,
    RightVecConst, Shift,
};
pub use sincos::{CosOp, SinCos, SinOp};
pub use store::Store;

use crate::repr::{Element, FloatRepr};

pub const RETRIES: u32 = 3;

pub const LAT_THR: &[&str] = &["Latency", "Throughput"];

/// A one-argument floating point function.
pub trait UnaryOp: 'static {
    const NAME: &'static str;

    fn apply<R: FloatRepr>(x: R) -> R;
}

#[inline(always)]
fn elem<T: Element>(x: f64) -> T {
    T::from_elem(x)
}

/// The four inputs `i * 0.83 - 16`, `i` in `0..4`.
#[inline(always)]
fn ramp<R: FloatRepr>() -> [R; 4] {
    std::array::from_fn(|i| R::splat(elem(i as f64 * 0.83 - 16.0)))
}
