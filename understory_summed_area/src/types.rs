// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric abstractions for table planes and input samples.

use core::fmt::Debug;

/// Numeric accumulator stored in the table planes and returned by sum queries.
///
/// The accumulator must be wide enough to hold `width * height * max_sample`;
/// this is not checked. Integer implementations use wrapping arithmetic, so a
/// rectangle sum is still exact whenever the rectangle's own sum fits in the
/// type, even if the cumulative plane has wrapped. Floating-point
/// implementations use ordinary IEEE arithmetic.
pub trait Accumulator: Copy + PartialOrd + Debug {
    /// Additive identity.
    fn zero() -> Self;

    /// Value added to the non-zero plane for each positive sample.
    fn one() -> Self;

    /// Add two accumulator values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two accumulator values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Convert to `f64` for averages.
    fn to_f64(self) -> f64;
}

macro_rules! impl_int_accumulator {
    ($($t:ty),* $(,)?) => {
        $(
            impl Accumulator for $t {
                #[inline(always)]
                fn zero() -> Self {
                    0
                }

                #[inline(always)]
                fn one() -> Self {
                    1
                }

                #[inline]
                fn add(a: Self, b: Self) -> Self {
                    a.wrapping_add(b)
                }

                #[inline]
                fn sub(a: Self, b: Self) -> Self {
                    a.wrapping_sub(b)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_int_accumulator!(u32, u64, u128, usize, i32, i64, i128);

impl Accumulator for f32 {
    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline(always)]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Accumulator for f64 {
    #[inline(always)]
    fn zero() -> Self {
        0.0
    }

    #[inline(always)]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }
}

/// A single input sample.
///
/// Samples are converted into the table's [`Accumulator`] with `From`, so only
/// lossless sample/accumulator pairings compile (for example `u8` into `u32`,
/// or `f32` into `f64`).
pub trait Sample: Copy {
    /// Whether the sample counts towards the non-zero plane.
    ///
    /// Only strictly positive values count. `NaN` does not.
    fn is_positive(self) -> bool;
}

macro_rules! impl_sample {
    ($zero:literal => $($t:ty),* $(,)?) => {
        $(
            impl Sample for $t {
                #[inline(always)]
                fn is_positive(self) -> bool {
                    self > $zero
                }
            }
        )*
    };
}

impl_sample!(0 => u8, u16, u32, u64, usize, i8, i16, i32, i64);
impl_sample!(0.0 => f32, f64);

/// Value contributed by `sample` to the non-zero plane.
#[inline]
pub(crate) fn indicator<S: Sample, T: Accumulator>(sample: S) -> T {
    if sample.is_positive() {
        T::one()
    } else {
        T::zero()
    }
}
