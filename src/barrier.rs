//! Optimizer barriers.
//!
//! [`Opaque::fake_modify`] makes the optimizer forget everything it knows about
//! a value, as if it had been rewritten behind its back. [`Opaque::fake_read`]
//! makes it believe the value is consumed, so the computation producing it
//! cannot be dropped. Both expand to an empty inline assembly block per scalar:
//! the only cost is that the value has to live in a register at that point.
//!
//! Aggregates decompose into their lanes, recursively, so any representation
//! built from supported scalars is covered. A type with no [`Opaque`] impl
//! cannot be benchmarked at all.

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use std::arch::asm;

/// A value the optimizer can be told to forget or to keep alive.
pub trait Opaque {
    /// Pretend `self` was modified through means invisible to the compiler.
    fn fake_modify(&mut self);

    /// Pretend `self` is observed by an invisible consumer.
    fn fake_read(&self);
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
macro_rules! opaque_scalar {
    ($class:ident => $($t:ty),*) => {$(
        impl Opaque for $t {
            #[inline(always)]
            #[allow(asm_sub_register)]
            fn fake_modify(&mut self) {
                // SAFETY: the template is a comment; the operand is handed back
                // unchanged and no memory, stack or flags are touched.
                unsafe {
                    asm!("/* {0} */", inout($class) *self, options(nomem, nostack, preserves_flags));
                }
            }

            #[inline(always)]
            #[allow(asm_sub_register)]
            fn fake_read(&self) {
                // SAFETY: as above, the operand is only named in a comment.
                unsafe {
                    asm!("/* {0} */", in($class) *self, options(nomem, nostack, preserves_flags));
                }
            }
        }
    )*};
}

#[cfg(target_arch = "x86_64")]
opaque_scalar!(reg_byte => i8, u8);
#[cfg(target_arch = "x86_64")]
opaque_scalar!(reg => i16, u16, i32, u32, i64, u64, isize, usize);
#[cfg(target_arch = "x86_64")]
opaque_scalar!(xmm_reg => f32, f64);

#[cfg(target_arch = "aarch64")]
opaque_scalar!(reg => i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);
#[cfg(target_arch = "aarch64")]
opaque_scalar!(vreg => f32, f64);

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
macro_rules! opaque_scalar {
    ($($t:ty),*) => {$(
        impl Opaque for $t {
            #[inline(always)]
            fn fake_modify(&mut self) {
                *self = std::hint::black_box(*self);
            }

            #[inline(always)]
            fn fake_read(&self) {
                std::hint::black_box(*self);
            }
        }
    )*};
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
opaque_scalar!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64);

impl<T: Opaque, const N: usize> Opaque for [T; N] {
    #[inline(always)]
    fn fake_modify(&mut self) {
        for x in self {
            x.fake_modify();
        }
    }

    #[inline(always)]
    fn fake_read(&self) {
        for x in self {
            x.fake_read();
        }
    }
}

impl<T: Opaque> Opaque for [T] {
    #[inline(always)]
    fn fake_modify(&mut self) {
        for x in self {
            x.fake_modify();
        }
    }

    #[inline(always)]
    fn fake_read(&self) {
        for x in self {
            x.fake_read();
        }
    }
}

#[inline(always)]
pub fn fake_modify<T: Opaque + ?Sized>(x: &mut T) {
    x.fake_modify();
}

#[inline(always)]
pub fn fake_read<T: Opaque + ?Sized>(x: &T) {
    x.fake_read();
}

/// Pretend the memory behind `x` was rewritten. Forces pending stores to `x`
/// to happen and later loads from it to be repeated.
#[inline(always)]
pub fn fake_modify_memory<T: ?Sized>(x: &mut T) {
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    {
        let ptr = (x as *mut T).cast::<u8>();
        // SAFETY: the pointer is only named in a comment; the block is merely
        // declared as possibly reading and writing memory.
        unsafe {
            asm!("/* {0} */", in(reg) ptr, options(nostack, preserves_flags));
        }
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    std::hint::black_box(x);
}

/// Pretend the memory behind `x` is read, so stores into it are not dead.
#[inline(always)]
pub fn fake_read_memory<T: ?Sized>(x: &T) {
    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    {
        let ptr = (x as *const T).cast::<u8>();
        // SAFETY: see `fake_modify_memory`; this block only claims to read.
        unsafe {
            asm!("/* {0} */", in(reg) ptr, options(nostack, preserves_flags, readonly));
        }
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    std::hint::black_box(x);
}

/// [`Opaque::fake_modify`] for every argument.
#[macro_export]
macro_rules! fake_modify {
    ($($x:expr),+ $(,)?) => {
        $( $crate::barrier::Opaque::fake_modify(&mut $x); )+
    };
}

/// [`Opaque::fake_read`] for every argument.
#[macro_export]
macro_rules! fake_read {
    ($($x:expr),+ $(,)?) => {
        $( $crate::barrier::Opaque::fake_read(&$x); )+
    };
}
