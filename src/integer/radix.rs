// ============================================================================
// Radix Conversion
// Decimal display and digit expansion in arbitrary (including negative) bases
// ============================================================================

use super::big_integer::BigInteger;
use super::errors::{IntegerError, IntegerResult};
use super::parse::DEFAULT_ALPHABET;
use std::fmt;

/// Largest value that may be expanded in unary (bases 1 and -1).
const MAX_UNARY_DIGITS: u64 = 10_000_000;

/// Digits of a value in some base, most significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadixDigits {
    pub digits: Vec<u64>,
    pub negative: bool,
}

impl BigInteger {
    /// Expand into digits of `radix`.
    ///
    /// Positive bases produce the digits of `|self|` plus a sign flag.
    /// Negative bases represent every integer without a sign, each digit
    /// in `0..|radix|`. Base 1 is tally notation; base -1 alternates ones
    /// and zeros. Base 0 can only represent zero.
    pub fn to_radix_digits(&self, radix: i64) -> IntegerResult<RadixDigits> {
        let zero = || RadixDigits { digits: vec![0], negative: false };

        if radix == 0 {
            if self.is_zero() {
                return Ok(zero());
            }
            return Err(IntegerError::InvalidRadix(
                "cannot convert nonzero numbers to base 0".to_string(),
            ));
        }
        if self.is_zero() {
            return Ok(zero());
        }

        if radix == -1 {
            let count = self.unary_length()?;
            let digits = if self.negative {
                [1, 0].repeat(count)
            } else {
                let mut digits = vec![1];
                digits.extend([0, 1].repeat(count - 1));
                digits
            };
            return Ok(RadixDigits { digits, negative: false });
        }

        let negative = self.negative && radix > 0;
        if radix == 1 {
            let count = self.unary_length()?;
            return Ok(RadixDigits { digits: vec![1; count], negative });
        }

        let mut out = Vec::new();
        if radix > 0 && radix <= u32::MAX as i64 {
            let mut left = self.abs();
            let base = radix as u64;
            let limit = BigInteger::from(base);
            while left.compare_abs(&limit).is_ge() {
                let (quotient, digit) = left.div_mod_u64(base);
                out.push(digit);
                left = quotient;
            }
            out.push(left.to_u64().unwrap_or(0));
        } else {
            let base = BigInteger::from(radix);
            let mut left = if radix > 0 { self.abs() } else { self.clone() };
            while left.is_negative() || left.compare_abs(&base).is_ge() {
                let (quotient, mut digit) = left.div_mod(&base)?;
                left = quotient;
                if digit.is_negative() {
                    digit = base.minus(&digit).abs();
                    left = left.next();
                }
                out.push(digit.to_u64().unwrap_or(0));
            }
            out.push(left.to_u64().unwrap_or(0));
        }

        out.reverse();
        Ok(RadixDigits { digits: out, negative })
    }

    fn unary_length(&self) -> IntegerResult<usize> {
        self.abs()
            .to_u64()
            .filter(|&n| n <= MAX_UNARY_DIGITS)
            .map(|n| n as usize)
            .ok_or_else(|| {
                IntegerError::InvalidRadix(format!("{} is too large for unary notation", self))
            })
    }

    /// Render in `radix` with the default `0-9a-z` alphabet.
    pub fn to_string_radix(&self, radix: i64) -> IntegerResult<String> {
        self.to_string_radix_with(radix, DEFAULT_ALPHABET)
    }

    /// Render in `radix` with a custom alphabet. Digits past the end of the
    /// alphabet are written as `<value>`.
    pub fn to_string_radix_with(&self, radix: i64, alphabet: &str) -> IntegerResult<String> {
        if radix == 10 && alphabet == DEFAULT_ALPHABET {
            return Ok(self.to_string());
        }
        let expanded = self.to_radix_digits(radix)?;
        let symbols: Vec<char> = alphabet.chars().collect();

        let mut out = String::with_capacity(expanded.digits.len() + 1);
        if expanded.negative {
            out.push('-');
        }
        for digit in expanded.digits {
            match symbols.get(digit as usize) {
                Some(&symbol) => out.push(symbol),
                None => {
                    out.push('<');
                    out.push_str(&digit.to_string());
                    out.push('>');
                },
            }
        }
        Ok(out)
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.magnitude.len() * 7 + 1);
        if self.negative {
            out.push('-');
        }
        let mut limbs = self.magnitude.iter().rev();
        if let Some(first) = limbs.next() {
            out.push_str(&first.to_string());
        }
        for limb in limbs {
            out.push_str(&format!("{:07}", limb));
        }
        f.pad(&out)
    }
}
