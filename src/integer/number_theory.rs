// ============================================================================
// Number Theory
// GCD, LCM, modular exponentiation and modular inverse
// ============================================================================

use super::big_integer::BigInteger;
use super::errors::{IntegerError, IntegerResult};
use super::limbs::BASE;

/// A power of two dividing `n`, exact for small values.
///
/// Only the two low limbs are inspected. Since 10^14 is divisible by 2^14,
/// higher limbs cannot disturb the low 14 bits, so wide values are capped
/// at 2^14 and narrow ones at 2^30.
fn rough_lowest_bit(n: &BigInteger) -> u64 {
    let magnitude = &n.magnitude;
    let low = magnitude[0] as u64 + magnitude.get(1).map_or(0, |&l| l as u64 * BASE as u64);
    let mask = if magnitude.len() <= 2 { 1u64 << 30 } else { 1u64 << 14 };
    let x = low | mask;
    x & x.wrapping_neg()
}

impl BigInteger {
    /// Greatest common divisor by the binary algorithm. Always nonnegative;
    /// `gcd(0, 0) == 0`.
    pub fn gcd(&self, other: &BigInteger) -> BigInteger {
        let mut a = self.abs();
        let mut b = other.abs();
        if a == b {
            return a;
        }
        if a.is_zero() {
            return b;
        }
        if b.is_zero() {
            return a;
        }

        let mut common = BigInteger::one();
        while a.is_even() && b.is_even() {
            let d = rough_lowest_bit(&a).min(rough_lowest_bit(&b));
            a = a.div_mod_u64(d).0;
            b = b.div_mod_u64(d).0;
            common = common.times(&BigInteger::from(d));
        }
        while a.is_even() {
            a = a.div_mod_u64(rough_lowest_bit(&a)).0;
        }
        loop {
            while b.is_even() {
                b = b.div_mod_u64(rough_lowest_bit(&b)).0;
            }
            if a > b {
                std::mem::swap(&mut a, &mut b);
            }
            b = b.minus(&a);
            if b.is_zero() {
                break;
            }
        }

        if common.is_unit() {
            a
        } else {
            a.times(&common)
        }
    }

    /// Least common multiple, nonnegative. Zero when either operand is zero.
    pub fn lcm(&self, other: &BigInteger) -> BigInteger {
        if self.is_zero() || other.is_zero() {
            return BigInteger::zero();
        }
        let a = self.abs();
        let b = other.abs();
        match a.checked_div(&a.gcd(&b)) {
            Ok(q) => q.times(&b),
            Err(_) => BigInteger::zero(),
        }
    }

    /// `self^exponent mod modulus` by square-and-multiply.
    ///
    /// Remainders are truncating, so the result carries the sign of
    /// `self^exponent` exactly as `pow(..).checked_rem(..)` would. A zero
    /// exponent yields `1 mod modulus`; a negative exponent raises the
    /// modular inverse.
    pub fn mod_pow(&self, exponent: &BigInteger, modulus: &BigInteger) -> IntegerResult<BigInteger> {
        if modulus.is_zero() {
            return Err(IntegerError::DivisionByZero);
        }

        let mut base = if exponent.is_negative() {
            self.mod_inv(modulus)?
        } else {
            self.checked_rem(modulus)?
        };
        let mut exp = exponent.abs();
        let mut result = BigInteger::one().checked_rem(modulus)?;

        while exp.is_positive() {
            if base.is_zero() {
                return Ok(BigInteger::zero());
            }
            if exp.is_odd() {
                result = result.times(&base).checked_rem(modulus)?;
            }
            exp = exp.div_mod_u64(2).0;
            base = base.square().checked_rem(modulus)?;
        }
        Ok(result)
    }

    /// Multiplicative inverse modulo `n` by the extended Euclidean
    /// algorithm, in `[0, |n|)` for nonnegative `self`. A negative receiver
    /// yields the negated inverse of its magnitude.
    pub fn mod_inv(&self, n: &BigInteger) -> IntegerResult<BigInteger> {
        if n.is_zero() {
            return Err(IntegerError::DivisionByZero);
        }
        let n = n.abs();
        let mut t = BigInteger::zero();
        let mut new_t = BigInteger::one();
        let mut r = n.clone();
        let mut new_r = self.abs();

        while !new_r.is_zero() {
            let q = r.checked_div(&new_r)?;
            let next_t = t.minus(&q.times(&new_t));
            let next_r = r.minus(&q.times(&new_r));
            t = std::mem::replace(&mut new_t, next_t);
            r = std::mem::replace(&mut new_r, next_r);
        }

        if !r.is_unit() {
            return Err(IntegerError::NotCoprime {
                value: self.to_string(),
                modulus: n.to_string(),
            });
        }
        if t.is_negative() {
            t = t.plus(&n);
        }
        if self.is_negative() {
            return Ok(t.negate());
        }
        Ok(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> BigInteger {
        BigInteger::from(v)
    }

    fn big(s: &str) -> BigInteger {
        s.parse().unwrap()
    }

    #[test]
    fn test_gcd_small() {
        assert_eq!(int(12).gcd(&int(18)), int(6));
        assert_eq!(int(-12).gcd(&int(18)), int(6));
        assert_eq!(int(0).gcd(&int(-7)), int(7));
        assert_eq!(int(0).gcd(&int(0)), int(0));
        assert_eq!(int(17).gcd(&int(5)), int(1));
        assert_eq!(int(1 << 40).gcd(&int(3 << 20)), int(1 << 20));
    }

    #[test]
    fn test_gcd_large() {
        let p = big("170141183460469231731687303715884105727"); // 2^127 - 1
        let a = p.times(&big("1000000007"));
        let b = p.times(&big("998244353")).times(&int(1 << 16));
        assert_eq!(a.gcd(&b), p);
    }

    #[test]
    fn test_lcm() {
        assert_eq!(int(4).lcm(&int(6)), int(12));
        assert_eq!(int(-4).lcm(&int(6)), int(12));
        assert_eq!(int(0).lcm(&int(6)), int(0));
    }

    #[test]
    fn test_mod_pow_known_values() {
        assert_eq!(int(4).mod_pow(&int(13), &int(497)).unwrap(), int(445));
        assert_eq!(int(2).mod_pow(&int(0), &int(7)).unwrap(), int(1));
        assert_eq!(int(2).mod_pow(&int(0), &int(1)).unwrap(), int(0));
        assert_eq!(int(-2).mod_pow(&int(3), &int(5)).unwrap(), int(-3));
        assert_eq!(int(5).mod_pow(&int(3), &int(0)), Err(IntegerError::DivisionByZero));
    }

    #[test]
    fn test_mod_pow_matches_pow_then_rem() {
        for a in [-7i64, -2, 0, 3, 10, 123] {
            for e in [0i64, 1, 2, 5, 17] {
                for m in [1i64, 2, 7, 1000, -13] {
                    let expected = int(a).pow(&int(e)).unwrap().checked_rem(&int(m)).unwrap();
                    assert_eq!(int(a).mod_pow(&int(e), &int(m)).unwrap(), expected, "{}^{} mod {}", a, e, m);
                }
            }
        }
    }

    #[test]
    fn test_mod_pow_negative_exponent() {
        // 3^-1 mod 7 == 5, so 3^-2 mod 7 == 25 mod 7 == 4
        assert_eq!(int(3).mod_pow(&int(-2), &int(7)).unwrap(), int(4));
        assert!(matches!(
            int(2).mod_pow(&int(-1), &int(4)),
            Err(IntegerError::NotCoprime { .. })
        ));
    }

    #[test]
    fn test_mod_inv() {
        assert_eq!(int(3).mod_inv(&int(11)).unwrap(), int(4));
        assert_eq!(int(-3).mod_inv(&int(11)).unwrap(), int(-4));
        assert_eq!(int(10).mod_inv(&int(17)).unwrap().times(&int(10)).checked_rem(&int(17)).unwrap(), int(1));
        assert!(matches!(int(6).mod_inv(&int(9)), Err(IntegerError::NotCoprime { .. })));
    }
}
