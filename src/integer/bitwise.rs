// ============================================================================
// Bitwise Operations
// Two's-complement semantics over sign-magnitude values
// ============================================================================
//
// Negative values behave as if stored in infinite-width two's complement.
// Operands are processed in chunks of 23 bits, the largest power of two
// that fits in one limb.

use super::big_integer::BigInteger;
use super::errors::{IntegerError, IntegerResult};
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// Largest power of two not exceeding the limb base.
const HIGHEST_POWER2: u64 = 1 << 23;

/// Bits per chunk.
const CHUNK_BITS: i64 = 23;

/// Largest supported shift distance in either direction.
pub const MAX_SHIFT: i64 = 10_000_000;

fn bitwise(x: &BigInteger, y: &BigInteger, op: fn(u64, u64) -> u64) -> BigInteger {
    let x_sign = x.is_negative();
    let y_sign = y.is_negative();
    let mut x_rem = if x_sign { x.bit_not() } else { x.clone() };
    let mut y_rem = if y_sign { y.bit_not() } else { y.clone() };

    let mut chunks = Vec::new();
    while !x_rem.is_zero() || !y_rem.is_zero() {
        let (x_next, mut x_digit) = x_rem.div_mod_u64(HIGHEST_POWER2);
        let (y_next, mut y_digit) = y_rem.div_mod_u64(HIGHEST_POWER2);
        if x_sign {
            x_digit = HIGHEST_POWER2 - 1 - x_digit;
        }
        if y_sign {
            y_digit = HIGHEST_POWER2 - 1 - y_digit;
        }
        chunks.push(op(x_digit, y_digit));
        x_rem = x_next;
        y_rem = y_next;
    }

    // Infinite sign extension: all-ones above the last chunk reads as -1.
    let mut sum = if op(x_sign as u64, y_sign as u64) != 0 {
        BigInteger::minus_one()
    } else {
        BigInteger::zero()
    };
    let chunk_base = BigInteger::from(HIGHEST_POWER2);
    for &chunk in chunks.iter().rev() {
        sum = sum.times(&chunk_base).plus(&BigInteger::from(chunk));
    }
    sum
}

/// Largest `(base^(2^k))`-power not exceeding `value`, as `(power, exponent)`.
fn integer_logarithm(value: &BigInteger, base: &BigInteger) -> (BigInteger, u64) {
    if base <= value {
        let (p, e) = integer_logarithm(value, &base.square());
        let t = p.times(base);
        if &t <= value {
            return (t, e * 2 + 1);
        }
        return (p, e * 2);
    }
    (BigInteger::one(), 0)
}

impl BigInteger {
    /// `!x == -x - 1`.
    pub fn bit_not(&self) -> BigInteger {
        self.negate().prev()
    }

    pub fn bit_and(&self, other: &BigInteger) -> BigInteger {
        bitwise(self, other, |a, b| a & b)
    }

    pub fn bit_or(&self, other: &BigInteger) -> BigInteger {
        bitwise(self, other, |a, b| a | b)
    }

    pub fn bit_xor(&self, other: &BigInteger) -> BigInteger {
        bitwise(self, other, |a, b| a ^ b)
    }

    /// Multiply by `2^n`. Negative `n` shifts right.
    pub fn shift_left(&self, n: i64) -> IntegerResult<BigInteger> {
        if n.unsigned_abs() > MAX_SHIFT as u64 {
            return Err(IntegerError::ShiftTooLarge(n.to_string()));
        }
        if n < 0 {
            return self.shift_right(-n);
        }

        let mut result = self.clone();
        if result.is_zero() {
            return Ok(result);
        }
        let mut n = n;
        let chunk = BigInteger::from(HIGHEST_POWER2);
        while n > CHUNK_BITS {
            result = result.times(&chunk);
            n -= CHUNK_BITS;
        }
        Ok(result.times(&BigInteger::from(1u64 << n)))
    }

    /// Floor division by `2^n`, so negative values round toward negative
    /// infinity (`-5 >> 1 == -3`). Negative `n` shifts left.
    pub fn shift_right(&self, n: i64) -> IntegerResult<BigInteger> {
        if n.unsigned_abs() > MAX_SHIFT as u64 {
            return Err(IntegerError::ShiftTooLarge(n.to_string()));
        }
        if n < 0 {
            return self.shift_left(-n);
        }

        let floor_div = |value: &BigInteger, divisor: u64| {
            let (quotient, remainder) = value.div_mod_u64(divisor);
            if value.is_negative() && remainder != 0 {
                quotient.prev()
            } else {
                quotient
            }
        };

        let mut result = self.clone();
        let mut n = n;
        while n > CHUNK_BITS {
            if result.is_zero() || (result.is_negative() && result.is_unit()) {
                return Ok(result);
            }
            result = floor_div(&result, HIGHEST_POWER2);
            n -= CHUNK_BITS;
        }
        Ok(floor_div(&result, 1u64 << n))
    }

    /// Bits needed to represent the value in two's complement, excluding
    /// the sign bit. Zero and -1 have length 0.
    pub fn bit_length(&self) -> u64 {
        let n = if self.is_negative() { self.negate().prev() } else { self.clone() };
        if n.is_zero() {
            return 0;
        }
        integer_logarithm(&n, &BigInteger::from(2)).1 + 1
    }
}

// ============================================================================
// Operator Traits
// ============================================================================

macro_rules! forward_bitop {
    ($trait:ident, $method:ident, $inherent:ident) => {
        impl $trait<&BigInteger> for &BigInteger {
            type Output = BigInteger;

            fn $method(self, rhs: &BigInteger) -> BigInteger {
                self.$inherent(rhs)
            }
        }

        impl $trait<BigInteger> for BigInteger {
            type Output = BigInteger;

            fn $method(self, rhs: BigInteger) -> BigInteger {
                self.$inherent(&rhs)
            }
        }
    };
}

forward_bitop!(BitAnd, bitand, bit_and);
forward_bitop!(BitOr, bitor, bit_or);
forward_bitop!(BitXor, bitxor, bit_xor);

impl Not for BigInteger {
    type Output = BigInteger;

    fn not(self) -> BigInteger {
        self.bit_not()
    }
}

impl Not for &BigInteger {
    type Output = BigInteger;

    fn not(self) -> BigInteger {
        self.bit_not()
    }
}
