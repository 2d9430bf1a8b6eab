//! Numeric representations under test.
//!
//! A representation is a concrete storage type for one or more values of an
//! [`Element`] type: the bare scalar, a portable SIMD vector, or a fixed-size
//! array. Benchmark units are written once against [`Representation`] (and
//! [`FloatRepr`] / [`IntRepr`] / [`ConvertTo`]) and instantiated for every
//! entry of [`Element::Matrix`].

use std::any::TypeId;
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::ops::Div;
use std::simd::prelude::*;
use std::simd::{SimdElement, StdFloat};

use bytemuck::Pod;
use num_traits::{AsPrimitive, Bounded, Float, PrimInt, WrappingShl, WrappingShr};
use rand::Rng;
use rand::distr::uniform::SampleUniform;

use crate::HList;
use crate::barrier::Opaque;

/// Widest vector register the build targets, in bytes.
pub const NATIVE_VECTOR_BYTES: usize = if cfg!(target_feature = "avx512f") {
    64
} else if cfg!(target_feature = "avx") {
    32
} else {
    16
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Signed,
    Unsigned,
    Float,
}

/// A scalar type that representations are built from.
pub trait Element:
    Copy
    + Default
    + PartialOrd
    + Debug
    + Pod
    + Opaque
    + Bounded
    + SampleUniform
    + Div<Output = Self>
    + SimdElement
    + AsPrimitive<i8>
    + AsPrimitive<u8>
    + AsPrimitive<i16>
    + AsPrimitive<u16>
    + AsPrimitive<i32>
    + AsPrimitive<u32>
    + AsPrimitive<i64>
    + AsPrimitive<u64>
    + AsPrimitive<f32>
    + AsPrimitive<f64>
    + 'static
{
    /// Right-aligned, six columns wide.
    const NAME: &'static str;
    const KIND: Kind;

    /// Every representation of this element, in report order.
    type Matrix;

    /// `as`-cast from another element type.
    fn from_elem<S: Element>(s: S) -> Self;

    /// Full range for integers, `[0, 1)` for floats.
    fn random<G: Rng>(rng: &mut G) -> Self;

    /// Integers shifted left by half their width; floats unchanged.
    fn upper_half(self) -> Self;
}

pub trait IntElement: Element + PrimInt + WrappingShl + WrappingShr {}

pub trait FloatElement: Element + Float {
    /// Round half to even, the default floating point rounding mode.
    fn rint(self) -> Self;

    /// Powers of two whose product is `2^n`, each of them a normal number.
    fn scalbn_factors(n: i32) -> [Self; 3];
}

/// Storage type for [`Self::LANES`] values of [`Self::Elem`].
pub trait Representation: Copy + Opaque + 'static {
    type Elem: Element;
    const LANES: usize;

    /// All lanes zero.
    fn zero() -> Self;

    fn as_lanes(&self) -> &[Self::Elem];
    fn as_lanes_mut(&mut self) -> &mut [Self::Elem];

    fn vdiv(self, rhs: Self) -> Self;

    #[inline(always)]
    fn splat(x: Self::Elem) -> Self {
        Self::from_fn(|_| x)
    }

    #[inline(always)]
    fn from_fn(mut f: impl FnMut(usize) -> Self::Elem) -> Self {
        let mut r = Self::zero();
        for (i, x) in r.as_lanes_mut().iter_mut().enumerate() {
            *x = f(i);
        }
        r
    }

    #[inline(always)]
    fn lane(&self, i: usize) -> Self::Elem {
        self.as_lanes()[i]
    }

    #[inline(always)]
    fn map(mut self, f: impl Fn(Self::Elem) -> Self::Elem) -> Self {
        for x in self.as_lanes_mut() {
            *x = f(*x);
        }
        self
    }

    #[inline(always)]
    fn zip_map(mut self, rhs: Self, f: impl Fn(Self::Elem, Self::Elem) -> Self::Elem) -> Self {
        for (x, &y) in self.as_lanes_mut().iter_mut().zip(rhs.as_lanes()) {
            *x = f(*x, y);
        }
        self
    }

    /// Reads the first [`Self::LANES`] values of `src`.
    #[inline(always)]
    fn load(src: &[Self::Elem]) -> Self {
        let mut r = Self::zero();
        r.as_lanes_mut().copy_from_slice(&src[..Self::LANES]);
        r
    }

    #[inline(always)]
    fn store(self, dst: &mut [Self::Elem]) {
        dst[..Self::LANES].copy_from_slice(self.as_lanes());
    }

    /// Stores lane `i` only where bit `i` of `enable` is set.
    #[inline(always)]
    fn store_select(self, dst: &mut [Self::Elem], enable: u64) {
        for (i, (d, &x)) in dst.iter_mut().zip(self.as_lanes()).enumerate() {
            if (enable >> i) & 1 != 0 {
                *d = x;
            }
        }
    }

    #[inline(always)]
    fn mask_where(&self, pred: impl Fn(Self::Elem) -> bool) -> u64 {
        self.as_lanes()
            .iter()
            .enumerate()
            .fold(0, |m, (i, &x)| if pred(x) { m | (1 << i) } else { m })
    }

    #[inline(always)]
    fn eq_mask(&self, v: Self::Elem) -> u64 {
        self.mask_where(|x| x == v)
    }

    #[inline(always)]
    fn lt_mask(&self, v: Self::Elem) -> u64 {
        self.mask_where(|x| x < v)
    }

    #[inline(always)]
    fn gt_mask(&self, v: Self::Elem) -> u64 {
        self.mask_where(|x| x > v)
    }

    #[inline(always)]
    fn ge_mask(&self, v: Self::Elem) -> u64 {
        self.mask_where(|x| x >= v)
    }
}

/// Floating point math. The provided methods work lane by lane; vector types
/// override what has a vector instruction.
pub trait FloatRepr: Representation<Elem: FloatElement> {
    #[inline(always)]
    fn vneg(self) -> Self {
        self.map(|x| -x)
    }

    #[inline(always)]
    fn vadd(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a + b)
    }

    #[inline(always)]
    fn vexp(self) -> Self {
        self.map(Float::exp)
    }

    #[inline(always)]
    fn vexpm1(self) -> Self {
        self.map(Float::exp_m1)
    }

    #[inline(always)]
    fn vsin(self) -> Self {
        self.map(Float::sin)
    }

    #[inline(always)]
    fn vcos(self) -> Self {
        self.map(Float::cos)
    }

    #[inline(always)]
    fn vfloor(self) -> Self {
        self.map(Float::floor)
    }

    #[inline(always)]
    fn vceil(self) -> Self {
        self.map(Float::ceil)
    }

    /// Half away from zero.
    #[inline(always)]
    fn vround(self) -> Self {
        self.map(Float::round)
    }

    /// Half to even.
    #[inline(always)]
    fn vrint(self) -> Self {
        self.map(FloatElement::rint)
    }

    #[inline(always)]
    fn vhypot(self, b: Self) -> Self {
        self.zip_map(b, Float::hypot)
    }

    #[inline(always)]
    fn vhypot3(self, b: Self, c: Self) -> Self {
        let mut r = self;
        for ((x, &y), &z) in r.as_lanes_mut().iter_mut().zip(b.as_lanes()).zip(c.as_lanes()) {
            *x = hypot3(*x, y, z);
        }
        r
    }

    /// `x * 2^n` without forming an overflowing factor.
    #[inline(always)]
    fn vscalbn(self, n: i32) -> Self {
        let [f0, f1, f2] = <Self::Elem as FloatElement>::scalbn_factors(n);
        self.map(|x| x * f0 * f1 * f2)
    }

    /// Lanes below `limit` are kept, the rest become `fallback`.
    #[inline(always)]
    fn vclamp_below(self, limit: Self::Elem, fallback: Self::Elem) -> Self {
        self.map(|x| if x < limit { x } else { fallback })
    }
}

/// Wrapping integer shifts; the amount is taken modulo the bit width.
pub trait IntRepr: Representation<Elem: IntElement> {
    #[inline(always)]
    fn vshl(self, amount: Self) -> Self {
        self.zip_map(amount, |x, s| x.wrapping_shl(AsPrimitive::<u32>::as_(s)))
    }

    #[inline(always)]
    fn vshr(self, amount: Self) -> Self {
        self.zip_map(amount, |x, s| x.wrapping_shr(AsPrimitive::<u32>::as_(s)))
    }

    #[inline(always)]
    fn vshl_by(self, n: u32) -> Self {
        self.map(|x| x.wrapping_shl(n))
    }

    #[inline(always)]
    fn vshr_by(self, n: u32) -> Self {
        self.map(|x| x.wrapping_shr(n))
    }
}

/// Value conversion to the same number of lanes of `U`.
pub trait ConvertTo<U: Element>: Representation {
    type Output: Representation<Elem = U>;

    fn convert(self) -> Self::Output;
}

/// Copies the bytes of `src` into a zeroed `D`, truncating whichever is
/// longer. Costs the same data movement as a conversion without computing one.
#[inline(always)]
pub fn bitcast<D: Representation, S: Representation>(src: &S) -> D {
    let mut out = D::zero();
    let from: &[u8] = bytemuck::cast_slice(src.as_lanes());
    let to: &mut [u8] = bytemuck::cast_slice_mut(out.as_lanes_mut());
    let n = from.len().min(to.len());
    to[..n].copy_from_slice(&from[..n]);
    out
}

fn hypot3<T: Float>(a: T, b: T, c: T) -> T {
    let (a, b, c) = (a.abs(), b.abs(), c.abs());
    let hi = a.max(b).max(c);
    if hi.is_infinite() {
        return hi;
    }
    let hi = hi.max(T::min_positive_value());
    let (a, b, c) = (a / hi, b / hi, c / hi);
    hi * (a * a + b * b + c * c).sqrt()
}

macro_rules! matrix {
    ($t:ty) => {
        HList!(
            Rep<$t, tag::Scalar>,
            Rep<Simd<$t, { NATIVE_VECTOR_BYTES / size_of::<$t>() }>, tag::Native>,
            Rep<Simd<$t, 1>, tag::Lanes>,
            Rep<Simd<$t, 2>, tag::Lanes>,
            Rep<Simd<$t, 4>, tag::Lanes>,
            Rep<Simd<$t, 8>, tag::Lanes>,
            Rep<Simd<$t, 16>, tag::Lanes>,
            Rep<Simd<$t, 32>, tag::Lanes>,
            Rep<[$t; 4], tag::FixedSize>,
            Rep<[$t; 12], tag::FixedSize>,
            Rep<[$t; 16], tag::FixedSize>,
            Rep<Simd<$t, { 16 / size_of::<$t>() }>, tag::Register>,
            Rep<Simd<$t, { 32 / size_of::<$t>() }>, tag::Register>,
            Rep<Simd<$t, { 64 / size_of::<$t>() }>, tag::Register>,
        )
    };
}

macro_rules! int_element {
    ($($t:ident => $name:literal, $kind:ident;)*) => {$(
        impl Element for $t {
            const NAME: &'static str = $name;
            const KIND: Kind = Kind::$kind;

            type Matrix = matrix!($t);

            #[inline(always)]
            fn from_elem<S: Element>(s: S) -> Self {
                <S as AsPrimitive<$t>>::as_(s)
            }

            fn random<G: Rng>(rng: &mut G) -> Self {
                rng.random()
            }

            #[inline(always)]
            fn upper_half(self) -> Self {
                self.wrapping_shl(<$t>::BITS / 2)
            }
        }

        impl IntElement for $t {}
    )*};
}

int_element! {
    i8 => "  int8", Signed;
    u8 => " uint8", Unsigned;
    i16 => " int16", Signed;
    u16 => "uint16", Unsigned;
    i32 => " int32", Signed;
    u32 => "uint32", Unsigned;
    i64 => " int64", Signed;
    u64 => "uint64", Unsigned;
}

macro_rules! float_element {
    ($($t:ident => $name:literal;)*) => {$(
        impl Element for $t {
            const NAME: &'static str = $name;
            const KIND: Kind = Kind::Float;

            type Matrix = matrix!($t);

            #[inline(always)]
            fn from_elem<S: Element>(s: S) -> Self {
                <S as AsPrimitive<$t>>::as_(s)
            }

            fn random<G: Rng>(rng: &mut G) -> Self {
                rng.random()
            }

            #[inline(always)]
            fn upper_half(self) -> Self {
                self
            }
        }

        impl FloatElement for $t {
            #[inline(always)]
            fn rint(self) -> Self {
                self.round_ties_even()
            }

            #[inline(always)]
            fn scalbn_factors(n: i32) -> [Self; 3] {
                let (lo, hi) = (<$t>::MIN_EXP - 1, <$t>::MAX_EXP - 1);
                let a = n.clamp(lo, hi);
                let b = (n - a).clamp(lo, hi);
                let c = (n - a - b).clamp(lo, hi);
                [(2.0 as $t).powi(a), (2.0 as $t).powi(b), (2.0 as $t).powi(c)]
            }
        }
    )*};
}

float_element! {
    f32 => " float";
    f64 => "double";
}

impl<T: Element> Representation for T {
    type Elem = T;
    const LANES: usize = 1;

    #[inline(always)]
    fn zero() -> Self {
        T::default()
    }

    #[inline(always)]
    fn as_lanes(&self) -> &[T] {
        std::slice::from_ref(self)
    }

    #[inline(always)]
    fn as_lanes_mut(&mut self) -> &mut [T] {
        std::slice::from_mut(self)
    }

    #[inline(always)]
    fn vdiv(self, rhs: Self) -> Self {
        self / rhs
    }

    #[inline(always)]
    fn splat(x: T) -> Self {
        x
    }
}

impl<T: FloatElement> FloatRepr for T {}

impl<T: IntElement> IntRepr for T {}

impl<T: Element, U: Element> ConvertTo<U> for T {
    type Output = U;

    #[inline(always)]
    fn convert(self) -> U {
        U::from_elem(self)
    }
}

impl<T: Element, const N: usize> Representation for [T; N] {
    type Elem = T;
    const LANES: usize = N;

    #[inline(always)]
    fn zero() -> Self {
        [T::default(); N]
    }

    #[inline(always)]
    fn as_lanes(&self) -> &[T] {
        self
    }

    #[inline(always)]
    fn as_lanes_mut(&mut self) -> &mut [T] {
        self
    }

    #[inline(always)]
    fn vdiv(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a / b)
    }

    #[inline(always)]
    fn splat(x: T) -> Self {
        [x; N]
    }
}

impl<T: FloatElement, const N: usize> FloatRepr for [T; N] {}

impl<T: IntElement, const N: usize> IntRepr for [T; N] {}

impl<T: Element, U: Element, const N: usize> ConvertTo<U> for [T; N] {
    type Output = [U; N];

    #[inline(always)]
    fn convert(self) -> [U; N] {
        self.map(U::from_elem)
    }
}

macro_rules! simd_representation {
    (@one $t:ident; [$($n:literal),*]) => {$(
        impl Opaque for Simd<$t, $n> {
            #[inline(always)]
            fn fake_modify(&mut self) {
                self.as_mut_array().fake_modify();
            }

            #[inline(always)]
            fn fake_read(&self) {
                self.as_array().fake_read();
            }
        }

        impl Representation for Simd<$t, $n> {
            type Elem = $t;
            const LANES: usize = $n;

            #[inline(always)]
            fn zero() -> Self {
                Simd::splat(<$t>::default())
            }

            #[inline(always)]
            fn as_lanes(&self) -> &[$t] {
                self.as_array()
            }

            #[inline(always)]
            fn as_lanes_mut(&mut self) -> &mut [$t] {
                self.as_mut_array()
            }

            #[inline(always)]
            fn vdiv(self, rhs: Self) -> Self {
                self / rhs
            }

            #[inline(always)]
            fn splat(x: $t) -> Self {
                Simd::splat(x)
            }

            #[inline(always)]
            fn load(src: &[$t]) -> Self {
                Simd::from_slice(src)
            }

            #[inline(always)]
            fn store(self, dst: &mut [$t]) {
                self.copy_to_slice(dst);
            }

            #[inline(always)]
            fn store_select(self, dst: &mut [$t], enable: u64) {
                Simd::store_select(self, dst, Mask::from_bitmask(enable));
            }

            #[inline(always)]
            fn eq_mask(&self, v: $t) -> u64 {
                self.simd_eq(Simd::splat(v)).to_bitmask()
            }

            #[inline(always)]
            fn lt_mask(&self, v: $t) -> u64 {
                self.simd_lt(Simd::splat(v)).to_bitmask()
            }

            #[inline(always)]
            fn gt_mask(&self, v: $t) -> u64 {
                self.simd_gt(Simd::splat(v)).to_bitmask()
            }

            #[inline(always)]
            fn ge_mask(&self, v: $t) -> u64 {
                self.simd_ge(Simd::splat(v)).to_bitmask()
            }
        }
    )*};
    ([$($t:ident),*]; $lanes:tt) => {
        $( simd_representation!(@one $t; $lanes); )*
    };
}

simd_representation!([i8, u8, i16, u16, i32, u32, i64, u64, f32, f64]; [1, 2, 4, 8, 16, 32, 64]);

macro_rules! simd_float {
    (@one $t:ident; [$($n:literal),*]) => {$(
        impl FloatRepr for Simd<$t, $n> {
            #[inline(always)]
            fn vneg(self) -> Self {
                -self
            }

            #[inline(always)]
            fn vadd(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline(always)]
            fn vexp(self) -> Self {
                StdFloat::exp(self)
            }

            #[inline(always)]
            fn vsin(self) -> Self {
                StdFloat::sin(self)
            }

            #[inline(always)]
            fn vcos(self) -> Self {
                StdFloat::cos(self)
            }

            #[inline(always)]
            fn vfloor(self) -> Self {
                StdFloat::floor(self)
            }

            #[inline(always)]
            fn vceil(self) -> Self {
                StdFloat::ceil(self)
            }

            #[inline(always)]
            fn vround(self) -> Self {
                StdFloat::round(self)
            }

            #[inline(always)]
            fn vhypot(self, b: Self) -> Self {
                let (a, b) = (self.abs(), b.abs());
                let hi = a.simd_max(b);
                let lo = a.simd_min(b);
                let r = lo / hi.simd_max(Simd::splat(<$t>::MIN_POSITIVE));
                let mut out = hi * StdFloat::sqrt(Simd::splat(1.0) + r * r);
                hi.store_select(out.as_mut_array(), hi.is_infinite());
                out
            }

            #[inline(always)]
            fn vhypot3(self, b: Self, c: Self) -> Self {
                let (a, b, c) = (self.abs(), b.abs(), c.abs());
                let hi = a.simd_max(b).simd_max(c);
                let scale = hi.simd_max(Simd::splat(<$t>::MIN_POSITIVE));
                let (a, b, c) = (a / scale, b / scale, c / scale);
                let mut out = scale * StdFloat::sqrt(a * a + b * b + c * c);
                hi.store_select(out.as_mut_array(), hi.is_infinite());
                out
            }

            #[inline(always)]
            fn vscalbn(self, n: i32) -> Self {
                let [f0, f1, f2] = <$t as FloatElement>::scalbn_factors(n);
                self * Simd::splat(f0) * Simd::splat(f1) * Simd::splat(f2)
            }

            #[inline(always)]
            fn vclamp_below(self, limit: $t, fallback: $t) -> Self {
                let mut out = Simd::splat(fallback);
                self.store_select(out.as_mut_array(), self.simd_lt(Simd::splat(limit)));
                out
            }
        }
    )*};
    ([$($t:ident),*]; $lanes:tt) => {
        $( simd_float!(@one $t; $lanes); )*
    };
}

simd_float!([f32, f64]; [1, 2, 4, 8, 16, 32, 64]);

macro_rules! simd_int {
    (@one $t:ident; [$($n:literal),*]) => {$(
        impl IntRepr for Simd<$t, $n> {
            #[inline(always)]
            fn vshl(self, amount: Self) -> Self {
                self << amount
            }

            #[inline(always)]
            fn vshr(self, amount: Self) -> Self {
                self >> amount
            }

            #[inline(always)]
            fn vshl_by(self, n: u32) -> Self {
                self << Simd::splat(n as $t)
            }

            #[inline(always)]
            fn vshr_by(self, n: u32) -> Self {
                self >> Simd::splat(n as $t)
            }
        }
    )*};
    ([$($t:ident),*]; $lanes:tt) => {
        $( simd_int!(@one $t; $lanes); )*
    };
}

simd_int!([i8, u8, i16, u16, i32, u32, i64, u64]; [1, 2, 4, 8, 16, 32, 64]);

macro_rules! simd_convert {
    (@pair $n:literal; $from:ident; [$($to:ident),*]) => {$(
        impl ConvertTo<$to> for Simd<$from, $n> {
            type Output = Simd<$to, $n>;

            #[inline(always)]
            fn convert(self) -> Simd<$to, $n> {
                self.cast::<$to>()
            }
        }
    )*};
    (@width $n:literal; [$($from:ident),*]; $to:tt) => {
        $( simd_convert!(@pair $n; $from; $to); )*
    };
    ([$($n:literal),*]; $from:tt; $to:tt) => {
        $( simd_convert!(@width $n; $from; $to); )*
    };
}

simd_convert!(
    [1, 2, 4, 8, 16, 32, 64];
    [i8, u8, i16, u16, i32, u32, i64, u64, f32, f64];
    [i8, u8, i16, u16, i32, u32, i64, u64, f32, f64]
);

/// Storage family of a representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The element type itself.
    Scalar,
    /// Portable SIMD vector filling the native vector register.
    Native,
    /// Portable SIMD vector with an explicit lane count.
    Lanes,
    /// Plain array, left to the autovectorizer.
    FixedSize,
    /// Portable SIMD vector sized in bytes; only built when it fits a register.
    Register,
}

/// Type-level [`Strategy`] markers.
pub mod tag {
    use super::Strategy;

    pub trait Tag: 'static {
        const STRATEGY: Strategy;
    }

    pub struct Scalar;
    pub struct Native;
    pub struct Lanes;
    pub struct FixedSize;
    pub struct Register;

    impl Tag for Scalar {
        const STRATEGY: Strategy = Strategy::Scalar;
    }

    impl Tag for Native {
        const STRATEGY: Strategy = Strategy::Native;
    }

    impl Tag for Lanes {
        const STRATEGY: Strategy = Strategy::Lanes;
    }

    impl Tag for FixedSize {
        const STRATEGY: Strategy = Strategy::FixedSize;
    }

    impl Tag for Register {
        const STRATEGY: Strategy = Strategy::Register;
    }
}

/// A matrix entry: representation `R` benchmarked under strategy `S`.
pub struct Rep<R, S>(PhantomData<fn() -> (R, S)>);

/// Runtime description of a representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub elem: TypeId,
    pub elem_name: &'static str,
    pub elem_size: usize,
    pub lanes: usize,
    pub bytes: usize,
    pub strategy: Strategy,
}

impl Candidate {
    pub fn of<R: Representation>(strategy: Strategy) -> Self {
        Self {
            elem: TypeId::of::<R::Elem>(),
            elem_name: R::Elem::NAME,
            elem_size: size_of::<R::Elem>(),
            lanes: R::LANES,
            bytes: size_of::<R>(),
            strategy,
        }
    }

    pub fn elem_is<T: 'static>(&self) -> bool {
        self.elem == TypeId::of::<T>()
    }

    /// Whether the target can hold this representation at all.
    pub fn is_available(&self) -> bool {
        match self.strategy {
            Strategy::Register => self.bytes <= NATIVE_VECTOR_BYTES,
            _ => true,
        }
    }

    /// Lanes a perfectly vectorized operation would process per instruction.
    /// Arrays only ever get the widest power of two native chunk.
    pub fn speedup_lanes(&self) -> usize {
        match self.strategy {
            Strategy::FixedSize => {
                let native = (NATIVE_VECTOR_BYTES / self.elem_size).max(1);
                let n = self.lanes.min(native).max(1);
                1 << n.ilog2()
            }
            _ => self.lanes,
        }
    }

    pub fn label(&self) -> Label<'_> {
        Label(self)
    }
}

pub struct Label<'a>(&'a Candidate);

impl fmt::Display for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        let s = match c.strategy {
            Strategy::Scalar => String::new(),
            Strategy::Native => format!("native<{}>", c.lanes),
            Strategy::Lanes => format!("lanes<{}>", c.lanes),
            Strategy::FixedSize => format!("fixed_size<{}>", c.lanes),
            Strategy::Register => format!("vector_size({})", c.bytes),
        };
        f.pad(&s)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::hlist::List;

    #[test]
    fn lanes_and_splat() {
        let v = <Simd<i16, 8>>::splat(3);
        assert_eq!(v.as_lanes(), &[3; 8]);
        assert_eq!(<[f32; 12]>::splat(1.5).lane(11), 1.5);
        assert_eq!(<u8 as Representation>::splat(9), 9);
        assert_eq!(<Simd<f64, 4>>::zero().as_lanes(), &[0.0; 4]);
    }

    #[test]
    fn from_fn_fills_lanes_in_order() {
        let v = <Simd<u32, 4> as Representation>::from_fn(|i| i as u32 * 10);
        assert_eq!(v.as_lanes(), &[0, 10, 20, 30]);
        let a = <[i8; 4]>::from_fn(|i| -(i as i8));
        assert_eq!(a, [0, -1, -2, -3]);
    }

    #[test]
    fn load_and_store_use_leading_lanes() {
        let src = [1.0f32, 2.0, 3.0, 4.0, 5.0];
        let v = <Simd<f32, 4> as Representation>::load(&src);
        let mut dst = [0.0f32; 6];
        v.store(&mut dst[1..]);
        assert_eq!(dst, [0.0, 1.0, 2.0, 3.0, 4.0, 0.0]);
    }

    #[test]
    fn masks_agree_between_vectors_and_arrays() {
        let lanes = [5i32, -1, 0, 7, 3, -8, 0, 9];
        let v = <Simd<i32, 8> as Representation>::load(&lanes);
        let a = <[i32; 8]>::load(&lanes);
        assert_eq!(v.gt_mask(0), 0b1001_1001);
        assert_eq!(v.gt_mask(0), a.gt_mask(0));
        assert_eq!(v.ge_mask(0), a.ge_mask(0));
        assert_eq!(v.eq_mask(0), 0b0100_0100);
        assert_eq!(v.lt_mask(3), a.lt_mask(3));
    }

    #[test]
    fn store_select_skips_disabled_lanes() {
        let v = <Simd<u8, 4>>::splat(7);
        let mut dst = [1u8; 4];
        Representation::store_select(v, &mut dst, 0b0101);
        assert_eq!(dst, [7, 1, 7, 1]);

        let mut dst = [1u8; 4];
        [7u8; 4].store_select(&mut dst, 0b1010);
        assert_eq!(dst, [1, 7, 1, 7]);
    }

    #[test]
    fn division_matches_scalar() {
        let a = <Simd<i32, 4>>::splat(i32::MAX.upper_half());
        let b = <Simd<i32, 4>>::splat(7);
        assert_eq!(a.vdiv(b).lane(2), i32::MAX.upper_half() / 7);
        assert_eq!(i32::MAX.upper_half(), -65536);
        assert_eq!(u8::MAX.upper_half(), 240);
        assert_eq!(f32::MAX.upper_half(), f32::MAX);
    }

    #[test]
    fn float_vectors_match_scalar_math() {
        let x = <Simd<f64, 4>>::from_array([-1.5, 0.25, 2.5, 3.7]);
        let a = <[f64; 4]>::load(x.as_lanes());
        for (v, s) in [
            (x.vfloor(), a.vfloor()),
            (x.vceil(), a.vceil()),
            (x.vround(), a.vround()),
            (x.vrint(), a.vrint()),
        ] {
            assert_eq!(v.as_lanes(), s.as_lanes());
        }
        assert_eq!(x.vround().as_lanes(), &[-2.0, 0.0, 3.0, 4.0]);
        assert_eq!(x.vrint().as_lanes(), &[-2.0, 0.0, 2.0, 4.0]);
        let e = x.vexp();
        for i in 0..4 {
            assert!((e.lane(i) - a.lane(i).exp()).abs() < 1e-12);
        }
    }

    #[test]
    fn hypot_handles_scale_and_infinity() {
        let a = <Simd<f32, 4>>::from_array([3.0, 0.0, 1e30, f32::INFINITY]);
        let b = <Simd<f32, 4>>::from_array([4.0, 0.0, 1e30, f32::INFINITY]);
        let h = a.vhypot(b);
        assert_eq!(h.lane(0), 5.0);
        assert_eq!(h.lane(1), 0.0);
        assert!((h.lane(2) / 1.414_213_5e30 - 1.0).abs() < 1e-6);
        assert_eq!(h.lane(3), f32::INFINITY);

        let c = <Simd<f32, 4>>::from_array([12.0, 0.0, 0.0, 1.0]);
        let h3 = a.vhypot3(b, c);
        assert!((h3.lane(0) - 13.0).abs() < 1e-5);
        assert_eq!(h3.lane(1), 0.0);
        assert_eq!(h3.lane(3), f32::INFINITY);
        assert!((hypot3(2.0f64, 3.0, 6.0) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn scalbn_never_forms_infinite_factor() {
        assert_eq!(3.0f32.vscalbn(8), 768.0);
        assert_eq!(1.0f64.vscalbn(-9), 1.0 / 512.0);
        assert_eq!(1.0f32.vscalbn(200), f32::INFINITY);
        assert_eq!(0.0f64.vscalbn(2000), 0.0);
        assert_eq!(f64::MIN_POSITIVE.vscalbn(1100), 2f64.powi(78));
        let v = <Simd<f64, 2>>::from_array([0.0, 0.5]).vscalbn(2000);
        assert_eq!(v.as_lanes(), &[0.0, f64::INFINITY]);
    }

    #[test]
    fn clamp_below_replaces_large_lanes() {
        let v = <Simd<f32, 4>>::from_array([1.0, 2e38, -5.0, f32::INFINITY]);
        let c = v.vclamp_below(1e38, -1e38);
        assert_eq!(c.as_lanes(), &[1.0, -1e38, -5.0, -1e38]);
        assert_eq!(2e38f32.vclamp_below(1e38, -1e38), -1e38);
    }

    #[test]
    fn shifts_wrap_amount() {
        let v = <Simd<u8, 4>>::from_array([1, 2, 3, 0x80]);
        let s = <Simd<u8, 4>>::from_array([1, 9, 0, 7]);
        assert_eq!(v.vshl(s).as_lanes(), &[2, 4, 3, 0]);
        assert_eq!(v.vshr_by(1).as_lanes(), &[0, 1, 1, 0x40]);
        let a = [1u8, 2, 3, 0x80];
        assert_eq!(a.vshl([1, 9, 0, 7]), [2, 4, 3, 0]);
        assert_eq!((-16i8).vshr_by(2), -4);
        assert_eq!(23i64.vshl_by(6), 23 << 6);
    }

    #[test]
    fn conversions_saturate_like_casts() {
        let v = <Simd<f64, 4>>::from_array([-1.5, 300.0, 1e10, f64::NAN]);
        let c: Simd<u8, 4> = ConvertTo::<u8>::convert(v);
        assert_eq!(c.as_lanes(), &[0, 255, 255, 0]);
        let a: [u8; 4] = ConvertTo::<u8>::convert(<[f64; 4]>::load(v.as_lanes()));
        assert_eq!(a.as_slice(), c.as_lanes());
        let s: i16 = ConvertTo::<i16>::convert(70000i32);
        assert_eq!(s, 70000i32 as i16);
    }

    #[test]
    fn bitcast_truncates_or_zero_extends() {
        let v = <Simd<u16, 4>>::from_array([0x0102, 0x0304, 0x0506, 0x0708]);
        let narrow: Simd<u8, 4> = bitcast(&v);
        assert_eq!(narrow.as_lanes(), &[0x02, 0x01, 0x04, 0x03]);
        let wide: Simd<u32, 4> = bitcast(&narrow);
        assert_eq!(wide.lane(0), 0x0304_0102);
        assert_eq!(wide.lane(1), 0);
    }

    #[test]
    fn random_floats_are_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let x = f32::random(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn candidates_describe_representations() {
        let c = Candidate::of::<Simd<f32, 8>>(Strategy::Lanes);
        assert!(c.elem_is::<f32>());
        assert_eq!((c.lanes, c.bytes, c.elem_size), (8, 32, 4));
        assert_eq!(c.label().to_string(), "lanes<8>");
        assert_eq!(format!("{:<12}|", c.label()), "lanes<8>    |");

        let s = Candidate::of::<u16>(Strategy::Scalar);
        assert_eq!(s.label().to_string(), "");
        assert_eq!(s.speedup_lanes(), 1);

        let r = Candidate::of::<Simd<u8, 64>>(Strategy::Register);
        assert_eq!(r.label().to_string(), "vector_size(64)");
        assert_eq!(r.is_available(), NATIVE_VECTOR_BYTES == 64);
        assert!(Candidate::of::<Simd<u8, 16>>(Strategy::Register).is_available());
    }

    #[test]
    fn fixed_size_speedup_is_native_chunk() {
        let native = NATIVE_VECTOR_BYTES / 4;
        let c = Candidate::of::<[f32; 12]>(Strategy::FixedSize);
        assert_eq!(c.speedup_lanes(), if native >= 8 { 8 } else { native });
        let c = Candidate::of::<[f32; 4]>(Strategy::FixedSize);
        assert_eq!(c.speedup_lanes(), 4);
        let c = Candidate::of::<[f64; 16]>(Strategy::FixedSize);
        assert_eq!(c.speedup_lanes(), NATIVE_VECTOR_BYTES / 8);
    }

    #[test]
    fn every_element_has_fourteen_representations() {
        assert_eq!(<<i8 as Element>::Matrix as List>::LEN, 14);
        assert_eq!(<<f64 as Element>::Matrix as List>::LEN, 14);
        assert_eq!(i8::NAME.len(), 6);
        assert_eq!(u64::NAME.len(), 6);
        assert_eq!(f32::NAME.len(), 6);
    }
}
