// ============================================================================
// Big Integer
// Sign-magnitude arbitrary-precision integer over base-10^7 limbs
// ============================================================================

use super::division::{div_mod_abs, div_mod_small};
use super::errors::{IntegerError, IntegerResult};
use super::limbs::{self, Limbs, BASE};
use smallvec::smallvec;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest integer a 64-bit float represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Arbitrary-precision signed integer.
///
/// Stored as a sign flag and a magnitude of base-10^7 limbs, least
/// significant first. The representation is canonical: the magnitude has
/// no high-order zero limbs and zero is never negative, so derived
/// equality and hashing agree with numeric equality.
///
/// Values are immutable; every operation returns a new value.
///
/// # Example
/// ```
/// use arbnum::BigInteger;
///
/// let a: BigInteger = "123456789012345678901234567890".parse()?;
/// let b = BigInteger::from(987_654_321);
/// let (q, r) = a.div_mod(&b)?;
/// assert_eq!(q.times(&b).plus(&r), a);
/// # Ok::<(), arbnum::IntegerError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct BigInteger {
    pub(crate) negative: bool,
    pub(crate) magnitude: Limbs,
}

impl BigInteger {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build from a magnitude and sign, normalizing the representation.
    pub(crate) fn from_limbs(mut magnitude: Limbs, negative: bool) -> Self {
        limbs::trim(&mut magnitude);
        let negative = negative && !limbs::is_zero(&magnitude);
        Self { negative, magnitude }
    }

    pub(crate) fn from_i128(value: i128) -> Self {
        Self::from_limbs(limbs::from_u128(value.unsigned_abs()), value < 0)
    }

    /// Zero.
    #[inline]
    pub fn zero() -> Self {
        Self { negative: false, magnitude: smallvec![0] }
    }

    /// One.
    #[inline]
    pub fn one() -> Self {
        Self { negative: false, magnitude: smallvec![1] }
    }

    /// Negative one.
    #[inline]
    pub fn minus_one() -> Self {
        Self { negative: true, magnitude: smallvec![1] }
    }

    // ========================================================================
    // Sign Queries
    // ========================================================================

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.magnitude.len() == 1 && self.magnitude[0] == 0
    }

    /// True for `1` and `-1`.
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.magnitude.len() == 1 && self.magnitude[0] == 1
    }

    /// Strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        self.magnitude[0] % 2 == 0
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    /// -1, 0 or 1.
    pub fn signum(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    /// Value as `i64` when it fits the two-limb fast path (|v| < 10^14).
    #[inline]
    pub(crate) fn as_small(&self) -> Option<i64> {
        if self.magnitude.len() > 2 {
            return None;
        }
        let mut value = self.magnitude[0] as i64;
        if self.magnitude.len() == 2 {
            value += self.magnitude[1] as i64 * BASE as i64;
        }
        Some(if self.negative { -value } else { value })
    }

    // ========================================================================
    // Unary Operations
    // ========================================================================

    pub fn negate(&self) -> Self {
        Self::from_limbs(self.magnitude.clone(), !self.negative)
    }

    pub fn abs(&self) -> Self {
        Self { negative: false, magnitude: self.magnitude.clone() }
    }

    /// `self + 1`.
    pub fn next(&self) -> Self {
        if self.negative {
            Self::from_limbs(limbs::subtract_small(&self.magnitude, 1), true)
        } else {
            Self::from_limbs(limbs::add_small(&self.magnitude, 1), false)
        }
    }

    /// `self - 1`.
    pub fn prev(&self) -> Self {
        if self.negative || self.is_zero() {
            Self::from_limbs(limbs::add_small(&self.magnitude, 1), true)
        } else {
            Self::from_limbs(limbs::subtract_small(&self.magnitude, 1), false)
        }
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Sum. Values under 10^14 take a native fast path.
    pub fn plus(&self, other: &BigInteger) -> BigInteger {
        if let (Some(a), Some(b)) = (self.as_small(), other.as_small()) {
            return Self::from_i128(a as i128 + b as i128);
        }
        if self.negative != other.negative {
            return self.minus(&other.negate());
        }
        Self::from_limbs(limbs::add(&self.magnitude, &other.magnitude), self.negative)
    }

    /// Difference.
    pub fn minus(&self, other: &BigInteger) -> BigInteger {
        if let (Some(a), Some(b)) = (self.as_small(), other.as_small()) {
            return Self::from_i128(a as i128 - b as i128);
        }
        if self.negative != other.negative {
            return self.plus(&other.negate());
        }
        match limbs::compare_abs(&self.magnitude, &other.magnitude) {
            Ordering::Less => {
                Self::from_limbs(limbs::subtract(&other.magnitude, &self.magnitude), !self.negative)
            },
            _ => Self::from_limbs(limbs::subtract(&self.magnitude, &other.magnitude), self.negative),
        }
    }

    /// Product. Chooses between the single-limb, schoolbook and Karatsuba
    /// kernels by operand length; multiplying a value by itself squares it.
    pub fn times(&self, other: &BigInteger) -> BigInteger {
        if std::ptr::eq(self, other) {
            return self.square();
        }
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        if let (Some(a), Some(b)) = (self.as_small(), other.as_small()) {
            return Self::from_i128(a as i128 * b as i128);
        }

        let negative = self.negative != other.negative;
        let (a, b) = (&self.magnitude, &other.magnitude);
        let product = if b.len() == 1 {
            limbs::multiply_small(a, b[0] as u64)
        } else if a.len() == 1 {
            limbs::multiply_small(b, a[0] as u64)
        } else if limbs::use_karatsuba(a.len(), b.len()) {
            tracing::trace!(l1 = a.len(), l2 = b.len(), "karatsuba multiply");
            limbs::multiply_karatsuba(a, b)
        } else {
            limbs::multiply_long(a, b)
        };
        Self::from_limbs(product, negative)
    }

    /// `self * self` using the dedicated squaring kernel.
    pub fn square(&self) -> BigInteger {
        if let Some(a) = self.as_small() {
            return Self::from_i128(a as i128 * a as i128);
        }
        Self::from_limbs(limbs::square(&self.magnitude), false)
    }

    /// Truncating division: the quotient rounds toward zero and the
    /// remainder takes the dividend's sign, so `q * d + r == self`.
    pub fn div_mod(&self, divisor: &BigInteger) -> IntegerResult<(BigInteger, BigInteger)> {
        if divisor.is_zero() {
            return Err(IntegerError::DivisionByZero);
        }
        if let (Some(a), Some(b)) = (self.as_small(), divisor.as_small()) {
            return Ok((Self::from_i128((a / b) as i128), Self::from_i128((a % b) as i128)));
        }

        let (quotient, remainder) = div_mod_abs(&self.magnitude, &divisor.magnitude);
        Ok((
            Self::from_limbs(quotient, self.negative != divisor.negative),
            Self::from_limbs(remainder, self.negative),
        ))
    }

    /// Truncating quotient.
    pub fn checked_div(&self, divisor: &BigInteger) -> IntegerResult<BigInteger> {
        self.div_mod(divisor).map(|(q, _)| q)
    }

    /// Remainder with the dividend's sign.
    pub fn checked_rem(&self, divisor: &BigInteger) -> IntegerResult<BigInteger> {
        self.div_mod(divisor).map(|(_, r)| r)
    }

    /// Divide by a small positive divisor, returning the native remainder.
    pub(crate) fn div_mod_u64(&self, divisor: u64) -> (BigInteger, u64) {
        let (q, r) = div_mod_small(&self.magnitude, divisor);
        (Self::from_limbs(q, self.negative), r)
    }

    /// `self^exponent` by repeated squaring.
    ///
    /// A zero exponent yields 1 (including `0^0`), a negative exponent
    /// yields 0 unless the base is a unit, and exponents beyond 2^53 - 1 are
    /// rejected.
    pub fn pow(&self, exponent: &BigInteger) -> IntegerResult<BigInteger> {
        if exponent.is_zero() {
            return Ok(Self::one());
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        if self.is_unit() {
            if !self.negative || exponent.is_even() {
                return Ok(Self::one());
            }
            return Ok(Self::minus_one());
        }
        if exponent.negative {
            return Ok(Self::zero());
        }

        let exp = exponent
            .to_u64()
            .filter(|&e| e <= MAX_SAFE_INTEGER)
            .ok_or_else(|| IntegerError::ExponentTooLarge(exponent.to_string()))?;

        if let Some(base) = self.as_small() {
            if let Some(value) = u32::try_from(exp).ok().and_then(|e| (base as i128).checked_pow(e)) {
                return Ok(Self::from_i128(value));
            }
        }

        let mut result = Self::one();
        let mut base = self.clone();
        let mut e = exp;
        loop {
            if e & 1 == 1 {
                result = result.times(&base);
            }
            e >>= 1;
            if e == 0 {
                break;
            }
            base = base.square();
        }
        Ok(result)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compare magnitudes, ignoring sign.
    pub fn compare_abs(&self, other: &BigInteger) -> Ordering {
        limbs::compare_abs(&self.magnitude, &other.magnitude)
    }

    /// True when `divisor` divides `self` exactly. Zero divides nothing.
    pub fn is_divisible_by(&self, divisor: &BigInteger) -> bool {
        if divisor.is_zero() {
            return false;
        }
        if divisor.is_unit() {
            return true;
        }
        self.checked_rem(divisor).map(|r| r.is_zero()).unwrap_or(false)
    }

    pub fn min(a: &BigInteger, b: &BigInteger) -> BigInteger {
        if a <= b { a.clone() } else { b.clone() }
    }

    pub fn max(a: &BigInteger, b: &BigInteger) -> BigInteger {
        if a >= b { a.clone() } else { b.clone() }
    }

    // ========================================================================
    // Native Conversion
    // ========================================================================

    pub fn to_i64(&self) -> Option<i64> {
        let magnitude = limbs::to_u128(&self.magnitude)?;
        let value = if self.negative { -(magnitude as i128) } else { magnitude as i128 };
        i64::try_from(value).ok()
    }

    pub fn to_u64(&self) -> Option<u64> {
        if self.negative {
            return None;
        }
        limbs::to_u128(&self.magnitude).and_then(|m| u64::try_from(m).ok())
    }

    pub fn to_i128(&self) -> Option<i128> {
        let magnitude = i128::try_from(limbs::to_u128(&self.magnitude)?).ok()?;
        Some(if self.negative { -magnitude } else { magnitude })
    }

    /// Nearest `f64`. Values beyond the float range become infinite.
    pub fn to_f64(&self) -> f64 {
        if let Some(v) = self.as_small() {
            return v as f64;
        }
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Build from an integral float. Fractional or non-finite input is rejected.
    pub fn from_f64(value: f64) -> IntegerResult<BigInteger> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(IntegerError::InvalidInteger(value.to_string()));
        }
        format!("{:.0}", value).parse()
    }
}

// ============================================================================
// Native Conversions
// ============================================================================

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInteger {
            #[inline]
            fn from(value: $t) -> Self {
                Self::from_i128(value as i128)
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInteger {
            #[inline]
            fn from(value: $t) -> Self {
                Self::from_limbs(limbs::from_u128(value as u128), false)
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64, i128, isize);
impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl TryFrom<f64> for BigInteger {
    type Error = IntegerError;

    fn try_from(value: f64) -> IntegerResult<Self> {
        Self::from_f64(value)
    }
}

impl TryFrom<String> for BigInteger {
    type Error = IntegerError;

    fn try_from(value: String) -> IntegerResult<Self> {
        value.parse()
    }
}

impl From<BigInteger> for String {
    fn from(value: BigInteger) -> Self {
        value.to_string()
    }
}

#[cfg(feature = "num-bigint")]
impl From<&num_bigint::BigInt> for BigInteger {
    fn from(value: &num_bigint::BigInt) -> Self {
        let (sign, words) = value.to_u32_digits();
        let magnitude = words.iter().rev().fold(Limbs::from_elem(0, 1), |acc, &word| {
            limbs::add_small(&limbs::multiply_small(&acc, 1 << 32), word as u64)
        });
        Self::from_limbs(magnitude, sign == num_bigint::Sign::Minus)
    }
}

#[cfg(feature = "num-bigint")]
impl BigInteger {
    /// Convert to a `num_bigint::BigInt`.
    pub fn to_num_bigint(&self) -> num_bigint::BigInt {
        let base = num_bigint::BigInt::from(BASE);
        let magnitude = self
            .magnitude
            .iter()
            .rev()
            .fold(num_bigint::BigInt::from(0), |acc, &limb| acc * &base + limb);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl Default for BigInteger {
    fn default() -> Self {
        Self::zero()
    }
}

// ============================================================================
// Ordering
// ============================================================================

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.compare_abs(other),
            (true, true) => other.compare_abs(self),
        }
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInteger({}, limbs={})", self, self.magnitude.len())
    }
}

// ============================================================================
// Operator Traits
// ============================================================================

// Infallible operators for ergonomics (Div and Rem panic on a zero divisor).
// Use `div_mod` / `checked_div` / `checked_rem` to handle errors.

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $body:expr) => {
        impl $trait<&BigInteger> for &BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, rhs: &BigInteger) -> BigInteger {
                let f: fn(&BigInteger, &BigInteger) -> BigInteger = $body;
                f(self, rhs)
            }
        }

        impl $trait<BigInteger> for BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, rhs: BigInteger) -> BigInteger {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&BigInteger> for BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, rhs: &BigInteger) -> BigInteger {
                (&self).$method(rhs)
            }
        }

        impl $trait<BigInteger> for &BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, rhs: BigInteger) -> BigInteger {
                self.$method(&rhs)
            }
        }
    };
}

forward_binop!(Add, add, |a, b| a.plus(b));
forward_binop!(Sub, sub, |a, b| a.minus(b));
forward_binop!(Mul, mul, |a, b| a.times(b));
forward_binop!(Div, div, |a, b| match a.checked_div(b) {
    Ok(q) => q,
    Err(e) => panic!("BigInteger division failed: {}", e),
});
forward_binop!(Rem, rem, |a, b| match a.checked_rem(b) {
    Ok(r) => r,
    Err(e) => panic!("BigInteger remainder failed: {}", e),
});

impl Neg for BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        self.negate()
    }
}

impl Neg for &BigInteger {
    type Output = BigInteger;

    fn neg(self) -> BigInteger {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigInteger {
        s.parse().unwrap()
    }

    #[test]
    fn test_zero_is_canonical() {
        let z = BigInteger::from(5).minus(&BigInteger::from(5));
        assert_eq!(z, BigInteger::zero());
        assert!(!z.is_negative());
        assert_eq!(BigInteger::zero().negate(), BigInteger::zero());
    }

    #[test]
    fn test_sign_queries() {
        assert!(BigInteger::from(-3).is_negative());
        assert!(BigInteger::from(3).is_positive());
        assert!(!BigInteger::zero().is_positive());
        assert!(BigInteger::minus_one().is_unit());
        assert!(BigInteger::from(10_000_000).is_even());
        assert_eq!(BigInteger::from(-9).signum(), -1);
    }

    #[test]
    fn test_plus_minus_across_limbs() {
        let a = big("99999999999999999999");
        let one = BigInteger::one();
        assert_eq!(a.plus(&one).to_string(), "100000000000000000000");
        assert_eq!(big("100000000000000000000").minus(&one), a);
        assert_eq!(one.minus(&big("100000000000000000000")), a.negate());
        assert_eq!(a.negate().plus(&a), BigInteger::zero());
    }

    #[test]
    fn test_times_mixed_signs() {
        let a = big("-123456789012345678901234567890");
        let b = big("987654321098765432109876543210");
        assert_eq!(
            a.times(&b).to_string(),
            "-121932631137021795226185032733622923332237463801111263526900"
        );
        assert_eq!(a.times(&BigInteger::from(-1)), a.negate());
    }

    #[test]
    fn test_square_same_reference() {
        let a = big("31415926535897932384626433832795");
        assert_eq!(a.times(&a), a.times(&a.clone()));
        assert_eq!(a.square(), a.times(&a.clone()));
    }

    #[test]
    fn test_div_mod_truncates() {
        let (q, r) = BigInteger::from(-7).div_mod(&BigInteger::from(2)).unwrap();
        assert_eq!(q, BigInteger::from(-3));
        assert_eq!(r, BigInteger::from(-1));

        let (q, r) = BigInteger::from(7).div_mod(&BigInteger::from(-2)).unwrap();
        assert_eq!(q, BigInteger::from(-3));
        assert_eq!(r, BigInteger::from(1));
    }

    #[test]
    fn test_div_mod_large() {
        let a = big("1000000000000000000000000000000000000007");
        let b = big("3333333333333333333");
        let (q, r) = a.div_mod(&b).unwrap();
        assert_eq!(q.times(&b).plus(&r), a);
        assert!(r.compare_abs(&b) == Ordering::Less);
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(
            BigInteger::from(1).div_mod(&BigInteger::zero()),
            Err(IntegerError::DivisionByZero)
        );
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_div_operator_panics_on_zero() {
        let _ = BigInteger::from(1) / BigInteger::zero();
    }

    #[test]
    fn test_pow_edge_cases() {
        let two = BigInteger::from(2);
        assert_eq!(two.pow(&BigInteger::zero()).unwrap(), BigInteger::one());
        assert_eq!(BigInteger::zero().pow(&BigInteger::zero()).unwrap(), BigInteger::one());
        assert_eq!(BigInteger::zero().pow(&two).unwrap(), BigInteger::zero());
        assert_eq!(two.pow(&BigInteger::from(-1)).unwrap(), BigInteger::zero());
        assert_eq!(BigInteger::minus_one().pow(&BigInteger::from(-3)).unwrap(), BigInteger::minus_one());
        assert_eq!(
            two.pow(&BigInteger::from(100)).unwrap().to_string(),
            "1267650600228229401496703205376"
        );
        assert!(matches!(
            two.pow(&big("9007199254740992")),
            Err(IntegerError::ExponentTooLarge(_))
        ));
    }

    #[test]
    fn test_next_prev_cross_zero() {
        assert_eq!(BigInteger::zero().prev(), BigInteger::minus_one());
        assert_eq!(BigInteger::minus_one().next(), BigInteger::zero());
        assert_eq!(big("-10000000").next().to_string(), "-9999999");
        assert_eq!(big("9999999").next().to_string(), "10000000");
    }

    #[test]
    fn test_ordering() {
        let mut values = vec![
            BigInteger::from(5),
            big("-100000000000000000000"),
            BigInteger::zero(),
            big("100000000000000000000"),
            BigInteger::from(-5),
        ];
        values.sort();
        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["-100000000000000000000", "-5", "0", "5", "100000000000000000000"]
        );
    }

    #[test]
    fn test_native_conversions() {
        assert_eq!(BigInteger::from(i64::MIN).to_i64(), Some(i64::MIN));
        assert_eq!(BigInteger::from(u64::MAX).to_i64(), None);
        assert_eq!(BigInteger::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!(BigInteger::from_f64(1e21).unwrap().to_string(), "1000000000000000000000");
        assert!(BigInteger::from_f64(1.5).is_err());
        assert_eq!(big("12345678901234567890").to_f64(), 12345678901234567890.0);
    }

    #[test]
    fn test_operators() {
        let a = BigInteger::from(17);
        let b = BigInteger::from(5);
        assert_eq!(&a + &b, BigInteger::from(22));
        assert_eq!(&a - &b, BigInteger::from(12));
        assert_eq!(&a * &b, BigInteger::from(85));
        assert_eq!(&a / &b, BigInteger::from(3));
        assert_eq!(&a % &b, BigInteger::from(2));
        assert_eq!(-a, BigInteger::from(-17));
    }

    #[cfg(feature = "num-bigint")]
    #[test]
    fn test_num_bigint_interop() {
        let a = big("-123456789012345678901234567890123");
        let other = a.to_num_bigint();
        assert_eq!(other.to_string(), a.to_string());
        assert_eq!(BigInteger::from(&other), a);
    }
}
