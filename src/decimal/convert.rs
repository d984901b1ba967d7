// ============================================================================
// Decimal Conversions
// Interop with BigInteger and rust_decimal
// ============================================================================

use super::decimal::Decimal;
use super::errors::{DecimalError, DecimalResult};
use super::parse::pack_digits;
use crate::integer::limbs::Limbs;
use crate::integer::BigInteger;

// Both engines use base-10^7 words, so conversion is a reordering:
// integer limbs are least significant first, decimal words most significant first.

impl From<&BigInteger> for Decimal {
    fn from(value: &BigInteger) -> Self {
        if value.is_zero() {
            return Decimal::zero();
        }
        let mut digits: Vec<u32> = value.magnitude.iter().rev().copied().collect();
        let exponent = digits.len() as i64 - 1;
        while digits.len() > 1 && digits[digits.len() - 1] == 0 {
            digits.pop();
        }
        let sign = if value.is_negative() { -1 } else { 1 };
        Decimal::from_parts(sign, digits, exponent)
    }
}

impl From<BigInteger> for Decimal {
    fn from(value: BigInteger) -> Self {
        Decimal::from(&value)
    }
}

impl Decimal {
    /// Integer part as a `BigInteger`, truncated toward zero.
    pub fn to_big_integer(&self) -> BigInteger {
        if self.is_zero() || self.exponent < 0 {
            return BigInteger::zero();
        }
        let magnitude: Limbs = (0..=self.exponent as usize)
            .rev()
            .map(|i| self.digits.get(i).copied().unwrap_or(0))
            .collect();
        BigInteger::from_limbs(magnitude, self.is_negative())
    }

    /// Exact conversion from a `rust_decimal::Decimal`.
    pub fn from_rust_decimal(value: &rust_decimal::Decimal) -> Decimal {
        let mantissa = value.mantissa();
        let digits = mantissa.unsigned_abs().to_string();
        let point = digits.len() as i64 - value.scale() as i64;
        let sign = if mantissa < 0 { -1 } else { 1 };
        pack_digits(sign, &digits, point)
    }

    /// Exact conversion to a `rust_decimal::Decimal`.
    ///
    /// Fails when the value needs more than 28 fractional digits or exceeds
    /// the 96-bit mantissa.
    pub fn to_rust_decimal(&self) -> DecimalResult<rust_decimal::Decimal> {
        let plain = self.to_plain_string();
        rust_decimal::Decimal::from_str_exact(&plain)
            .map_err(|e| DecimalError::InvalidArgument(format!("{}: {}", plain, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_big_integer() {
        let n: BigInteger = "-123456789012345678900000000".parse().unwrap();
        let d = Decimal::from(&n);
        assert_eq!(d.to_plain_string(), "-123456789012345678900000000");
        assert_eq!(Decimal::from(BigInteger::zero()), Decimal::zero());
        assert_eq!(Decimal::from(BigInteger::from(10_000_000)), dec("1e7"));
    }

    #[test]
    fn test_to_big_integer_truncates() {
        assert_eq!(dec("12345678.999").to_big_integer(), BigInteger::from(12_345_678));
        assert_eq!(dec("-7.9").to_big_integer(), BigInteger::from(-7));
        assert_eq!(dec("0.9").to_big_integer(), BigInteger::zero());
        assert_eq!(dec("1e30").to_big_integer().to_string(), format!("1{}", "0".repeat(30)));
    }

    #[test]
    fn test_rust_decimal_interop() {
        let rd = rust_decimal::Decimal::new(-123_456, 3);
        let d = Decimal::from_rust_decimal(&rd);
        assert_eq!(d.to_string(), "-123.456");
        assert_eq!(d.to_rust_decimal().unwrap(), rd);

        let zero = Decimal::from_rust_decimal(&rust_decimal::Decimal::new(0, 5));
        assert!(zero.is_zero());
        assert_eq!(dec("1e-40").to_rust_decimal().map_err(|_| ()), Err(()));
    }
}
