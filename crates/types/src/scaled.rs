//! Fixed-point lengths.
//!
//! Every length the layout engine manipulates is a [`Scaled`]: a signed
//! integer mantissa with a binary point fixed at compile time. Arithmetic is
//! exact for additions and integer multiplications; products and quotients
//! by floating point factors truncate toward zero, like a C cast.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Number of fractional bits used by [`Scaled`].
pub const SCALED_PRECISION: u32 = 10;

/// The length type used throughout the engine (1/1024 unit resolution).
pub type Scaled = Fixed<SCALED_PRECISION>;

/// A signed fixed-point number with `PRECISION` fractional bits.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed<const PRECISION: u32>(i32);

impl<const PRECISION: u32> Fixed<PRECISION> {
    const FRACTION_MASK: i32 = (1 << PRECISION) - 1;

    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << PRECISION);
    pub const HALF: Self = Self(1 << (PRECISION - 1));
    pub const MIN: Self = Self(i32::MIN);
    pub const MAX: Self = Self(i32::MAX);

    /// Creates a value from its raw mantissa.
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw mantissa.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn from_int(value: i32) -> Self {
        Self(value << PRECISION)
    }

    /// Converts a float, truncating the bits below the precision.
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self((value as f64 * (1i64 << PRECISION) as f64) as i32)
    }

    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self((value * (1i64 << PRECISION) as f64) as i32)
    }

    /// Integer part, rounded toward negative infinity.
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 >> PRECISION
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1i64 << PRECISION) as f64
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    pub const fn one() -> Self {
        Self::ONE
    }

    #[inline]
    pub const fn half() -> Self {
        Self::HALF
    }

    pub const fn precision() -> u32 {
        PRECISION
    }

    #[inline]
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    const fn has_fraction(self) -> bool {
        self.0 & Self::FRACTION_MASK != 0
    }

    /// Drops the fractional part of the magnitude, moving toward zero.
    #[must_use]
    pub const fn trunc(self) -> Self {
        let floor = self.0 & !Self::FRACTION_MASK;
        if self.0 < 0 && self.has_fraction() {
            Self(floor + Self::ONE.0)
        } else {
            Self(floor)
        }
    }

    /// Rounds to the nearest integer, halves away from zero. Values whose
    /// rounding does not fit saturate to the nearest representable integer.
    #[must_use]
    pub const fn round(self) -> Self {
        if self.0 >= 0 {
            Self(self.0.saturating_add(Self::HALF.0)).trunc()
        } else {
            Self(self.0.saturating_sub(Self::HALF.0)).trunc()
        }
    }

    /// Rounds toward positive infinity, saturating like [`Fixed::round`].
    #[must_use]
    pub const fn ceil(self) -> Self {
        if self.0 > 0 && self.has_fraction() {
            Self(self.trunc().0.saturating_add(Self::ONE.0)).trunc()
        } else {
            self.trunc()
        }
    }

    #[must_use]
    pub const fn floor(self) -> Self {
        if self.0 < 0 && self.has_fraction() {
            Self(self.trunc().0 - Self::ONE.0)
        } else {
            self.trunc()
        }
    }
}

impl<const P: u32> fmt::Debug for Fixed<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl<const P: u32> fmt::Display for Fixed<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(digits) => write!(f, "{:.*}", digits, self.to_f64()),
            None => write!(f, "{}", self.to_f64()),
        }
    }
}

impl<const P: u32> Add for Fixed<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<const P: u32> AddAssign for Fixed<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl<const P: u32> Sub for Fixed<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl<const P: u32> SubAssign for Fixed<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl<const P: u32> Neg for Fixed<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl<const P: u32> Mul<i32> for Fixed<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self(self.0 * rhs)
    }
}

impl<const P: u32> Mul<Fixed<P>> for i32 {
    type Output = Fixed<P>;

    #[inline]
    fn mul(self, rhs: Fixed<P>) -> Fixed<P> {
        rhs * self
    }
}

impl<const P: u32> Mul<f32> for Fixed<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self((self.0 as f64 * rhs as f64) as i32)
    }
}

impl<const P: u32> Mul<Fixed<P>> for f32 {
    type Output = Fixed<P>;

    #[inline]
    fn mul(self, rhs: Fixed<P>) -> Fixed<P> {
        rhs * self
    }
}

impl<const P: u32> Mul<f64> for Fixed<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self((self.0 as f64 * rhs) as i32)
    }
}

impl<const P: u32> Mul<Fixed<P>> for f64 {
    type Output = Fixed<P>;

    #[inline]
    fn mul(self, rhs: Fixed<P>) -> Fixed<P> {
        rhs * self
    }
}

impl<const P: u32> Div<i32> for Fixed<P> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: i32) -> Self {
        Self(self.0 / rhs)
    }
}

impl<const P: u32> Div<f32> for Fixed<P> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self((self.0 as f64 / rhs as f64) as i32)
    }
}

impl<const P: u32> Div<f64> for Fixed<P> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self((self.0 as f64 / rhs) as i32)
    }
}

impl<const P: u32> MulAssign<i32> for Fixed<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: i32) {
        self.0 *= rhs;
    }
}

impl<const P: u32> MulAssign<f32> for Fixed<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl<const P: u32> MulAssign<f64> for Fixed<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl<const P: u32> DivAssign<i32> for Fixed<P> {
    #[inline]
    fn div_assign(&mut self, rhs: i32) {
        self.0 /= rhs;
    }
}

impl<const P: u32> DivAssign<f32> for Fixed<P> {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl<const P: u32> DivAssign<f64> for Fixed<P> {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl<const P: u32> Sum for Fixed<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a, const P: u32> Sum<&'a Fixed<P>> for Fixed<P> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl<const P: u32> From<i32> for Fixed<P> {
    fn from(value: i32) -> Self {
        Self::from_int(value)
    }
}

impl<const P: u32> Serialize for Fixed<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de, const P: u32> Deserialize<'de> for Fixed<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(Self::from_f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn s(v: f64) -> Scaled {
        Scaled::from_f64(v)
    }

    #[test]
    fn test_unit_constants() {
        assert_eq!(Scaled::ONE.raw(), 1024);
        assert_eq!(Scaled::HALF.raw(), 512);
        assert_eq!(Scaled::ZERO, Scaled::default());
        assert_eq!(Scaled::from_int(3).to_int(), 3);
        assert_eq!(Scaled::from_int(-3).to_int(), -3);
    }

    #[test]
    fn test_float_conversion_is_lossy_but_stable() {
        assert_eq!(s(2.5).to_f64(), 2.5);
        assert_eq!(Scaled::from_f32(0.25).to_f32(), 0.25);
        // 1/3 is not representable; the mantissa truncates.
        assert_eq!(s(1.0 / 3.0).raw(), 341);
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(s(1.5) + s(2.25), s(3.75));
        assert_eq!(s(1.5) - s(2.25), s(-0.75));
        assert_eq!(-s(1.5), s(-1.5));
        assert_eq!(s(1.5) * 3, s(4.5));
        assert_eq!(3 * s(1.5), s(4.5));
        assert_eq!(s(3.0) * 0.5f32, s(1.5));
        assert_eq!(s(3.0) * 0.5f64, s(1.5));
        assert_eq!(s(4.5) / 3, s(1.5));
        assert_eq!(s(3.0) / 0.5f32, s(6.0));

        let mut v = s(1.0);
        v += s(1.0);
        v *= 3;
        v /= 2;
        v -= s(0.5);
        assert_eq!(v, s(2.5));
    }

    #[test]
    fn test_rounding_positive() {
        assert_eq!(s(2.75).trunc(), s(2.0));
        assert_eq!(s(2.75).round(), s(3.0));
        assert_eq!(s(2.25).round(), s(2.0));
        assert_eq!(s(2.5).round(), s(3.0));
        assert_eq!(s(2.25).ceil(), s(3.0));
        assert_eq!(s(2.0).ceil(), s(2.0));
        assert_eq!(s(2.75).floor(), s(2.0));
    }

    #[test]
    fn test_rounding_negative() {
        assert_eq!(s(-2.75).trunc(), s(-2.0));
        assert_eq!(s(-2.75).round(), s(-3.0));
        assert_eq!(s(-2.5).round(), s(-3.0));
        assert_eq!(s(-2.25).ceil(), s(-2.0));
        assert_eq!(s(-2.25).floor(), s(-3.0));
        assert_eq!(s(-2.0).floor(), s(-2.0));
    }

    #[test]
    fn test_rounding_saturates_at_the_extremes() {
        let top = Scaled::from_raw(i32::MAX - 1023);
        assert_eq!(Scaled::MIN.trunc(), Scaled::MIN);
        assert_eq!(Scaled::MIN.round(), Scaled::MIN);
        assert_eq!(Scaled::MIN.floor(), Scaled::MIN);
        assert_eq!(Scaled::from_raw(i32::MIN + 1).trunc(), Scaled::from_raw(i32::MIN + 1024));
        assert_eq!(Scaled::MAX.trunc(), top);
        assert_eq!(Scaled::MAX.round(), top);
        assert_eq!(Scaled::MAX.ceil(), top);
    }

    #[test]
    fn test_ordering_and_sum() {
        assert!(s(-1.0) < s(0.5));
        assert_eq!(s(1.0).max(s(2.0)), s(2.0));
        assert_eq!(s(1.0).min(s(2.0)), s(1.0));
        let total: Scaled = [s(1.0), s(2.5), s(-0.5)].iter().sum();
        assert_eq!(total, s(3.0));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&s(1.5)).unwrap();
        assert_eq!(json, "1.5");
        let back: Scaled = serde_json::from_str("2.25").unwrap();
        assert_eq!(back, s(2.25));
    }

    proptest! {
        #[test]
        fn floor_and_ceil_bracket_the_value(raw in -1_000_000i32..1_000_000) {
            let x = Scaled::from_raw(raw);
            prop_assert!(x.floor() <= x, "floor({x}) = {}", x.floor());
            prop_assert!(x <= x.ceil(), "ceil({x}) = {}", x.ceil());
            prop_assert!(x.ceil() - x.floor() <= Scaled::ONE);
        }

        #[test]
        fn trunc_never_grows_the_magnitude(raw in -1_000_000i32..1_000_000) {
            let x = Scaled::from_raw(raw);
            prop_assert!(x.trunc().abs() <= x.abs());
            prop_assert_eq!(x.trunc().raw() & ((1 << SCALED_PRECISION) - 1), 0);
        }

        #[test]
        fn rounding_is_symmetric_around_zero(raw in -1_000_000i32..1_000_000) {
            let x = Scaled::from_raw(raw);
            prop_assert_eq!((-x).round(), -x.round());
            prop_assert_eq!((-x).ceil(), -x.floor());
        }
    }
}
