//! Division, modulo and divisibility by a runtime constant.
//!
//! A [`Reciprocal`] is computed once for a divisor `d` and then answers
//! `n / d`, `n % d` and `n % d == 0` with multiplications, shifts and masks
//! only. Powers of two (including `1`) are stored as a shift and a mask;
//! every other divisor is stored as the rounded-up fixed-point reciprocal
//! `ceil(2^(2N) / d)` of an `N`-bit divisor, which is exact for all `N`-bit
//! dividends.
//!
//! ```
//! use fastdiv::Reciprocal16;
//!
//! let by7 = Reciprocal16::new(7)?;
//! assert_eq!(by7.quotient_and_remainder(100), (14, 2));
//! assert!(!by7.is_divisible(100));
//! assert_eq!(100u16 / &by7, 14);
//! assert_eq!(100u16 % &by7, 2);
//! # Ok::<(), fastdiv::DividerError>(())
//! ```

use num_traits::{Bounded, One, PrimInt, Unsigned, WrappingMul};
use std::fmt::Debug;
use std::hash::Hash;

/// Error returned when a reciprocal cannot be computed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DividerError {
    #[error("divider must be != 0")]
    Zero,
}

/// Unsigned integers that can be divided through a [`Reciprocal`].
///
/// `Wide` must be exactly twice as wide as `Self`: the reciprocal keeps
/// `2N` bits of fraction, which is what makes the quotient and the
/// remainder exact for every `N`-bit dividend.
pub trait DividerInt: PrimInt + Unsigned + Debug + Hash {
    type Wide: PrimInt + Unsigned + WrappingMul + From<Self> + Debug + Hash;

    /// Full product of `x` and `y`, as `(high, low)` halves.
    fn mul_wide(x: Self::Wide, y: Self::Wide) -> (Self::Wide, Self::Wide);

    #[inline]
    fn mullhi(x: Self::Wide, y: Self::Wide) -> Self::Wide {
        Self::mul_wide(x, y).0
    }

    fn truncate(wide: Self::Wide) -> Self;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Path<T: DividerInt> {
    PowerOfTwo { shift: u32, mask: T },
    General { multiplier: T::Wide, divisor: T::Wide },
}

/// Precomputed state for dividing by a fixed nonzero divisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Reciprocal<T: DividerInt> {
    path: Path<T>,
}

/// Reciprocal of an 8-bit divisor.
pub type Reciprocal8 = Reciprocal<u8>;
/// Reciprocal of a 16-bit divisor.
pub type Reciprocal16 = Reciprocal<u16>;
/// Reciprocal of a 32-bit divisor.
pub type Reciprocal32 = Reciprocal<u32>;

impl<T: DividerInt> Reciprocal<T> {
    /// Computes the reciprocal of `d`, or [`DividerError::Zero`] if `d` is zero.
    pub fn new(d: T) -> Result<Self, DividerError> {
        if d.is_zero() {
            return Err(DividerError::Zero);
        }

        let path = if d.count_ones() == 1 {
            // 1 lands here too, with shift 0 and mask 0.
            Path::PowerOfTwo {
                shift: d.trailing_zeros(),
                mask: d - T::one(),
            }
        } else {
            let divisor: T::Wide = d.into();
            // ceil(2^(2N) / d) without needing 2N + 1 bits; d is not a power
            // of two, so it never divides 2^(2N) exactly.
            Path::General {
                multiplier: <T::Wide as Bounded>::max_value() / divisor
                    + <T::Wide as One>::one(),
                divisor,
            }
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(divisor = ?d, ?path, "computed reciprocal");

        Ok(Self { path })
    }

    /// Returns the divisor this reciprocal was computed for.
    pub fn divisor(&self) -> T {
        match self.path {
            Path::PowerOfTwo { mask, .. } => mask + T::one(),
            Path::General { divisor, .. } => T::truncate(divisor),
        }
    }

    /// Whether `d` took the shift-and-mask path.
    #[inline]
    pub fn is_power_of_two(&self) -> bool {
        matches!(self.path, Path::PowerOfTwo { .. })
    }

    /// Computes `n / d`.
    #[inline]
    pub fn quotient(&self, n: T) -> T {
        match self.path {
            Path::PowerOfTwo { shift, .. } => n >> shift as usize,
            Path::General { multiplier, .. } => T::truncate(T::mullhi(multiplier, n.into())),
        }
    }

    /// Computes `n % d`.
    #[inline]
    pub fn remainder(&self, n: T) -> T {
        match self.path {
            Path::PowerOfTwo { mask, .. } => n & mask,
            Path::General {
                multiplier,
                divisor,
            } => {
                let n: T::Wide = n.into();
                // Wrapping is intended: the low half is the fraction n/d - q.
                let fraction = multiplier.wrapping_mul(&n);
                T::truncate(T::mullhi(fraction, divisor))
            }
        }
    }

    /// Computes `(n / d, n % d)` with a single reciprocal multiply.
    #[inline]
    pub fn quotient_and_remainder(&self, n: T) -> (T, T) {
        match self.path {
            Path::PowerOfTwo { shift, mask } => (n >> shift as usize, n & mask),
            Path::General {
                multiplier,
                divisor,
            } => {
                let (quotient, fraction) = T::mul_wide(multiplier, n.into());
                (
                    T::truncate(quotient),
                    T::truncate(T::mullhi(fraction, divisor)),
                )
            }
        }
    }

    /// Returns whether `n % d == 0`.
    #[inline]
    pub fn is_divisible(&self, n: T) -> bool {
        match self.path {
            Path::PowerOfTwo { mask, .. } => (n & mask).is_zero(),
            Path::General { multiplier, .. } => {
                let n: T::Wide = n.into();
                // The fraction of an exact multiple is below the rounding
                // slack added by taking the ceiling of 2^(2N) / d.
                multiplier.wrapping_mul(&n) <= multiplier - <T::Wide as One>::one()
            }
        }
    }
}

impl<T: DividerInt> From<T> for Reciprocal<T> {
    /// # Panics
    ///
    /// Panics if `d` is zero.
    fn from(d: T) -> Self {
        match Self::new(d) {
            Ok(reciprocal) => reciprocal,
            Err(err) => panic!("{}", err),
        }
    }
}

macro_rules! divider_int {
    ($narrow:ty, $wide:ty, $double:ty) => {
        impl DividerInt for $narrow {
            type Wide = $wide;

            #[inline]
            fn mul_wide(x: $wide, y: $wide) -> ($wide, $wide) {
                let r = <$double>::from(x) * <$double>::from(y);
                ((r >> <$wide>::BITS) as $wide, r as $wide)
            }

            #[inline]
            fn truncate(wide: $wide) -> Self {
                wide as $narrow
            }
        }

        impl std::ops::Div<&Reciprocal<Self>> for $narrow {
            type Output = Self;

            fn div(self, denom: &Reciprocal<Self>) -> Self::Output {
                denom.quotient(self)
            }
        }

        impl std::ops::Rem<&Reciprocal<Self>> for $narrow {
            type Output = Self;

            fn rem(self, denom: &Reciprocal<Self>) -> Self::Output {
                denom.remainder(self)
            }
        }
    };
}

divider_int!(u8, u16, u32);
divider_int!(u16, u32, u64);
divider_int!(u32, u64, u128);
