// ============================================================================
// Decimal
// Arbitrary-precision decimal over base-10^7 digit words
// ============================================================================

use super::arithmetic;
use super::context::{DecimalContext, RoundingMode, MAX_DIGITS};
use super::errors::{DecimalError, DecimalResult};
use super::round::rounded;
use super::transcendental;
use super::words::{digit_count, BASE, LOG_BASE};
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Arbitrary-precision signed decimal.
///
/// The value is `sign × 0.d₀d₁d₂… × (10^7)^(exponent + 1)` where each `dᵢ`
/// is a base-10^7 word, most significant first. The stored form is
/// canonical (no trailing zero words, a single zero representation), so
/// derived equality and hashing agree with numeric equality.
///
/// Values are immutable. Operations that round take a [`DecimalContext`]
/// describing the precision and rounding policy to apply.
///
/// # Example
/// ```
/// use arbnum::{Decimal, DecimalContext};
///
/// let ctx = DecimalContext::default();
/// let price: Decimal = "19.99".parse()?;
/// let total = price.times(&Decimal::from(3), &ctx)?;
/// assert_eq!(total.to_fixed(2, ctx.rounding)?, "59.97");
/// # Ok::<(), arbnum::DecimalError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Decimal {
    pub(crate) sign: i8,
    pub(crate) digits: Vec<u32>,
    pub(crate) exponent: i64,
}

/// Validate a digit-count argument (decimal places or significant digits).
pub(crate) fn check_digits_arg(value: u32, min: u32) -> DecimalResult<i64> {
    if value < min || value > MAX_DIGITS {
        return Err(DecimalError::InvalidArgument(format!(
            "{} outside {}..={}",
            value, min, MAX_DIGITS
        )));
    }
    Ok(value as i64)
}

impl Decimal {
    // ========================================================================
    // Construction
    // ========================================================================

    pub(crate) fn from_parts(sign: i8, digits: Vec<u32>, exponent: i64) -> Self {
        Self { sign, digits, exponent }
    }

    pub(crate) fn from_i128(value: i128) -> Self {
        if value == 0 {
            return Self::zero();
        }
        let mut magnitude = value.unsigned_abs();
        let mut words = Vec::new();
        while magnitude > 0 {
            words.push((magnitude % BASE as u128) as u32);
            magnitude /= BASE as u128;
        }
        let exponent = words.len() as i64 - 1;
        words.reverse();
        while words.len() > 1 && words[words.len() - 1] == 0 {
            words.pop();
        }
        Self {
            sign: if value < 0 { -1 } else { 1 },
            digits: words,
            exponent,
        }
    }

    /// Zero.
    #[inline]
    pub fn zero() -> Self {
        Self { sign: 0, digits: vec![0], exponent: 0 }
    }

    /// One.
    #[inline]
    pub fn one() -> Self {
        Self { sign: 1, digits: vec![1], exponent: 0 }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign == 0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign < 0
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.sign > 0
    }

    pub(crate) fn is_one(&self) -> bool {
        self.sign == 1 && self.exponent == 0 && self.digits == [1]
    }

    /// Whether the value has no fractional part.
    pub fn is_integer(&self) -> bool {
        self.exponent > self.digits.len() as i64 - 2
    }

    /// Power of ten of the most significant digit.
    pub(crate) fn base10_exponent(&self) -> i64 {
        self.exponent * LOG_BASE + digit_count(self.digits[0]) - 1
    }

    /// Base-10 exponent of the most significant digit (`0` for zero).
    ///
    /// `123.4` has exponent 2, `0.001` has exponent -3.
    pub fn exponent(&self) -> i64 {
        self.base10_exponent()
    }

    /// Number of digits after the decimal point.
    pub fn decimal_places(&self) -> u64 {
        let last = self.digits.len() - 1;
        let mut dp = (last as i64 - self.exponent) * LOG_BASE;
        let mut w = self.digits[last];
        if w != 0 {
            while w % 10 == 0 {
                w /= 10;
                dp -= 1;
            }
        }
        dp.max(0) as u64
    }

    /// Number of significant digits.
    ///
    /// With `count_integer_zeros`, trailing zeros of the integer part count
    /// as significant (`1e3` has 4 rather than 1).
    pub fn significant_digits(&self, count_integer_zeros: bool) -> u64 {
        let integer_digits = self.base10_exponent() + 1;
        let last = self.digits.len() - 1;
        let mut sd = last as i64 * LOG_BASE + 1;
        let mut w = self.digits[last];
        if w != 0 {
            while w % 10 == 0 {
                w /= 10;
                sd -= 1;
            }
            sd += digit_count(self.digits[0]) - 1;
        }
        if count_integer_zeros && integer_digits > sd {
            integer_digits as u64
        } else {
            sd as u64
        }
    }

    /// Absolute value.
    pub fn abs(&self) -> Decimal {
        let mut r = self.clone();
        if r.sign < 0 {
            r.sign = 1;
        }
        r
    }

    /// Negation.
    pub fn neg(&self) -> Decimal {
        let mut r = self.clone();
        r.sign = -r.sign;
        r
    }

    /// Lossy conversion to the nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// `self + y`, rounded to the context precision.
    pub fn plus(&self, y: &Decimal, ctx: &DecimalContext) -> DecimalResult<Decimal> {
        arithmetic::plus(self, y, ctx.working()?)
    }

    /// `self - y`, rounded to the context precision.
    pub fn minus(&self, y: &Decimal, ctx: &DecimalContext) -> DecimalResult<Decimal> {
        arithmetic::minus(self, y, ctx.working()?)
    }

    /// `self * y`, rounded to the context precision.
    pub fn times(&self, y: &Decimal, ctx: &DecimalContext) -> DecimalResult<Decimal> {
        arithmetic::multiply(self, y, ctx.working()?)
    }

    /// `self / y`, rounded to the context precision.
    pub fn divided_by(&self, y: &Decimal, ctx: &DecimalContext) -> DecimalResult<Decimal> {
        let w = ctx.working()?;
        arithmetic::divide(self, y, w, None, false, w.rounding)
    }

    /// Integer part of `self / y` (truncated toward zero).
    pub fn divided_to_integer_by(&self, y: &Decimal, ctx: &DecimalContext) -> DecimalResult<Decimal> {
        arithmetic::divide_to_integer(self, y, ctx.working()?)
    }

    /// Remainder of truncating division; the result has the sign of `self`.
    pub fn modulo(&self, y: &Decimal, ctx: &DecimalContext) -> DecimalResult<Decimal> {
        arithmetic::modulo(self, y, ctx.working()?)
    }

    /// Square root.
    pub fn sqrt(&self, ctx: &DecimalContext) -> DecimalResult<Decimal> {
        transcendental::sqrt(self, ctx.working()?)
    }

    /// Natural logarithm.
    pub fn ln(&self, ctx: &DecimalContext) -> DecimalResult<Decimal> {
        transcendental::ln(self, ctx.working()?)
    }

    /// `e^self`.
    pub fn exp(&self, ctx: &DecimalContext) -> DecimalResult<Decimal> {
        transcendental::exp(self, ctx.working()?)
    }

    /// Logarithm to `base` (10 when `None`).
    pub fn log(&self, base: Option<&Decimal>, ctx: &DecimalContext) -> DecimalResult<Decimal> {
        transcendental::log(self, base, ctx.working()?)
    }

    /// `self^y`.
    pub fn pow(&self, y: &Decimal, ctx: &DecimalContext) -> DecimalResult<Decimal> {
        transcendental::pow(self, y, ctx.working()?)
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Round to `dp` decimal places.
    pub fn to_decimal_places(&self, dp: u32, rm: RoundingMode) -> DecimalResult<Decimal> {
        let dp = check_digits_arg(dp, 0)?;
        rounded(self.clone(), dp + self.base10_exponent() + 1, Some(rm), true)
    }

    /// Round to `sd` significant digits.
    pub fn to_significant_digits(&self, sd: u32, rm: RoundingMode) -> DecimalResult<Decimal> {
        let sd = check_digits_arg(sd, 1)?;
        rounded(self.clone(), sd, Some(rm), true)
    }

    /// Round to a whole number.
    pub fn to_integer(&self, rm: RoundingMode) -> DecimalResult<Decimal> {
        rounded(self.clone(), self.base10_exponent() + 1, Some(rm), true)
    }
}

// ============================================================================
// Conversions from primitives
// ============================================================================

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                fn from(value: $t) -> Self {
                    Decimal::from_i128(value as i128)
                }
            }
        )*
    };
}

impl_from_int!(i32, i64, u32, u64);

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

// ============================================================================
// Ordering
// ============================================================================

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.sign != other.sign {
            return self.sign.cmp(&other.sign);
        }
        let negative = self.sign < 0;
        let flip = |o: Ordering| if negative { o.reverse() } else { o };

        if self.exponent != other.exponent {
            return flip(self.exponent.cmp(&other.exponent));
        }
        for (a, b) in self.digits.iter().zip(other.digits.iter()) {
            if a != b {
                return flip(a.cmp(b));
            }
        }
        flip(self.digits.len().cmp(&other.digits.len()))
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_integers() {
        assert_eq!(Decimal::from(0).to_string(), "0");
        assert_eq!(Decimal::from(10_000_000).digits, vec![1]);
        assert_eq!(Decimal::from(10_000_000).exponent, 1);
        assert_eq!(Decimal::from(-123_456_789_012i64).to_string(), "-123456789012");
        assert_eq!(Decimal::from(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn test_queries() {
        assert_eq!(dec("123.4500").decimal_places(), 2);
        assert_eq!(dec("1e3").decimal_places(), 0);
        assert_eq!(dec("0.00012").significant_digits(false), 2);
        assert_eq!(dec("1e3").significant_digits(false), 1);
        assert_eq!(dec("1e3").significant_digits(true), 4);
        assert_eq!(dec("12345678.9").significant_digits(false), 9);
        assert_eq!(dec("123.4").exponent(), 2);
        assert_eq!(dec("0.001").exponent(), -3);
        assert!(dec("1e20").is_integer());
        assert!(!dec("1.5").is_integer());
        assert!(Decimal::zero().is_integer());
    }

    #[test]
    fn test_ordering() {
        let mut values = vec![dec("2"), dec("-1.5"), dec("0"), dec("1e-10"), dec("-30"), dec("1.99999999")];
        values.sort();
        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, ["-30", "-1.5", "0", "1e-10", "1.99999999", "2"]);
        assert!(dec("-1.00000001") < dec("-1"));
        assert_eq!(dec("1.50").cmp(&dec("1.5")), Ordering::Equal);
    }

    #[test]
    fn test_public_arithmetic_uses_context() {
        let ctx = DecimalContext::default().with_precision(5);
        let a = dec("1.23456789");
        assert_eq!(a.plus(&dec("1"), &ctx).unwrap().to_string(), "2.2346");
        assert_eq!(a.minus(&dec("1"), &ctx).unwrap().to_string(), "0.23457");
        let down = ctx.with_rounding(RoundingMode::Down);
        assert_eq!(a.times(&dec("2"), &down).unwrap().to_string(), "2.4691");
    }

    #[test]
    fn test_invalid_context_rejected() {
        let ctx = DecimalContext::default().with_precision(0);
        assert!(matches!(
            Decimal::one().plus(&Decimal::one(), &ctx),
            Err(DecimalError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rounding_helpers() {
        let x = dec("-1234.5678");
        assert_eq!(x.to_decimal_places(2, RoundingMode::HalfUp).unwrap().to_string(), "-1234.57");
        assert_eq!(x.to_decimal_places(0, RoundingMode::Ceil).unwrap().to_string(), "-1234");
        assert_eq!(x.to_significant_digits(3, RoundingMode::Down).unwrap().to_string(), "-1230");
        assert_eq!(x.to_integer(RoundingMode::Floor).unwrap().to_string(), "-1235");
        assert!(x.to_significant_digits(0, RoundingMode::Down).is_err());
        assert!(x.to_decimal_places(MAX_DIGITS + 1, RoundingMode::Down).is_err());
    }

    #[test]
    fn test_abs_neg_and_to_f64() {
        assert_eq!(dec("-2.5").abs(), dec("2.5"));
        assert_eq!(dec("2.5").neg(), dec("-2.5"));
        assert_eq!(Decimal::zero().neg(), Decimal::zero());
        assert_eq!(dec("0.125").to_f64(), 0.125);
        assert_eq!(dec("-1e40").to_f64(), -1e40);
    }
}
