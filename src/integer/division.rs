// ============================================================================
// Limb Division
// Truncating quotient/remainder kernels over base-10^7 magnitudes
// ============================================================================

use super::limbs::{compare_abs, multiply_small, subtract, trim, trimmed, Limbs, BASE};
use smallvec::smallvec;
use std::cmp::Ordering;

/// Combined operand length above which the guess-and-check kernel is used.
const SCHOOLBOOK_THRESHOLD: usize = 200;

/// Divide a magnitude by a native divisor, returning quotient and remainder.
///
/// The divisor must be nonzero and small enough that `divisor * BASE` fits
/// in a `u64`.
pub(crate) fn div_mod_small(value: &[u32], divisor: u64) -> (Limbs, u64) {
    let base = BASE as u64;
    let mut quotient: Limbs = smallvec![0; value.len()];
    let mut remainder = 0u64;

    for i in (0..value.len()).rev() {
        let dividend = remainder * base + value[i] as u64;
        let q = dividend / divisor;
        remainder = dividend - q * divisor;
        quotient[i] = q as u32;
    }

    trim(&mut quotient);
    (quotient, remainder)
}

/// Normalized long division (Knuth algorithm D).
///
/// Both operands are scaled by `lambda` so the divisor's leading limb is at
/// least `BASE / 2`, which keeps each trial quotient digit within two of the
/// true digit. Requires a divisor of at least two limbs and `|a| >= |b|`.
pub(crate) fn div_mod_knuth(a: &[u32], b: &[u32]) -> (Limbs, Limbs) {
    let base = BASE as i64;
    let a_len = a.len();
    let b_len = b.len();
    let lambda = (BASE as u64).div_ceil(2 * b[b_len - 1] as u64);

    let mut remainder: Vec<i64> = multiply_small(a, lambda).iter().map(|&d| d as i64).collect();
    let mut divisor: Vec<i64> = multiply_small(b, lambda).iter().map(|&d| d as i64).collect();
    remainder.resize(a_len + 1, 0);
    divisor.resize(b_len + 1, 0);

    let divisor_msd = divisor[b_len - 1];
    let mut result: Limbs = smallvec![0; a_len - b_len + 1];

    for shift in (0..=a_len - b_len).rev() {
        let mut quotient_digit = base - 1;
        if remainder[shift + b_len] != divisor_msd {
            quotient_digit =
                (remainder[shift + b_len] * base + remainder[shift + b_len - 1]) / divisor_msd;
        }

        let mut carry = 0i64;
        let mut borrow = 0i64;
        for i in 0..=b_len {
            carry += quotient_digit * divisor[i];
            let q = carry / base;
            borrow += remainder[shift + i] - (carry - q * base);
            carry = q;
            if borrow < 0 {
                remainder[shift + i] = borrow + base;
                borrow = -1;
            } else {
                remainder[shift + i] = borrow;
                borrow = 0;
            }
        }

        // Trial digit was too large: add the divisor back until the remainder is nonnegative.
        while borrow != 0 {
            quotient_digit -= 1;
            let mut carry = 0i64;
            for i in 0..=b_len {
                carry += remainder[shift + i] - base + divisor[i];
                if carry < 0 {
                    remainder[shift + i] = carry + base;
                    carry = 0;
                } else {
                    remainder[shift + i] = carry;
                    carry = 1;
                }
            }
            borrow += carry;
        }

        result[shift] = quotient_digit as u32;
    }

    let scaled: Limbs = remainder.into_iter().map(|d| d as u32).collect();
    let (remainder, _) = div_mod_small(&trimmed(&scaled), lambda);
    trim(&mut result);
    (result, remainder)
}

/// Guess-and-check long division used for large operands.
///
/// Each quotient digit is estimated from the two leading limbs of the
/// running remainder and divisor, then decremented until the product fits.
/// Requires a divisor of at least two limbs.
pub(crate) fn div_mod_schoolbook(a: &[u32], b: &[u32]) -> (Limbs, Limbs) {
    let base = BASE as u128;
    let b_len = b.len();
    let high_divisor = b[b_len - 1] as u128 * base + b[b_len - 2] as u128;
    let mut result: Vec<u32> = Vec::with_capacity(a.len());
    let mut part: Limbs = smallvec![0];

    for i in (0..a.len()).rev() {
        part.insert(0, a[i]);
        trim(&mut part);

        if compare_abs(&part, b) == Ordering::Less {
            result.push(0);
            continue;
        }

        let x_len = part.len();
        let mut high_remainder = part[x_len - 1] as u128 * base + part[x_len - 2] as u128;
        if x_len > b_len {
            high_remainder = (high_remainder + 1) * base;
        }
        let mut guess = high_remainder.div_ceil(high_divisor) as u64;

        loop {
            let check = multiply_small(b, guess);
            if compare_abs(&check, &part) != Ordering::Greater {
                part = subtract(&part, &check);
                break;
            }
            guess -= 1;
            if guess == 0 {
                break;
            }
        }
        result.push(guess as u32);
    }

    result.reverse();
    (trimmed(&result), part)
}

/// Truncating division of magnitudes. The divisor must be nonzero.
pub(crate) fn div_mod_abs(a: &[u32], b: &[u32]) -> (Limbs, Limbs) {
    if b.len() == 1 {
        let (q, r) = div_mod_small(a, b[0] as u64);
        return (q, smallvec![r as u32]);
    }
    match compare_abs(a, b) {
        Ordering::Less => return (smallvec![0], trimmed(a)),
        Ordering::Equal => return (smallvec![1], smallvec![0]),
        Ordering::Greater => {},
    }

    if a.len() + b.len() <= SCHOOLBOOK_THRESHOLD {
        div_mod_knuth(a, b)
    } else {
        tracing::trace!(
            dividend_limbs = a.len(),
            divisor_limbs = b.len(),
            "using guess-and-check division"
        );
        div_mod_schoolbook(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::super::limbs::{from_u128, multiply_long, add, to_u128};
    use super::*;

    fn check_identity(a: &Limbs, b: &Limbs, q: &Limbs, r: &Limbs) {
        assert_eq!(compare_abs(r, b), Ordering::Less);
        let rebuilt = add(&multiply_long(q, b), r);
        assert_eq!(&rebuilt, a);
    }

    #[test]
    fn test_div_mod_small() {
        let (q, r) = div_mod_small(&from_u128(123_456_789_012), 97);
        assert_eq!(to_u128(&q), Some(123_456_789_012 / 97));
        assert_eq!(r as u128, 123_456_789_012 % 97);
    }

    #[test]
    fn test_div_mod_knuth_native() {
        let a = 340_282_366_920_938_463_463_374_607_431u128;
        let b = 18_446_744_073_709_551_557u128;
        let (q, r) = div_mod_knuth(&from_u128(a), &from_u128(b));
        assert_eq!(to_u128(&q), Some(a / b));
        assert_eq!(to_u128(&r), Some(a % b));
    }

    #[test]
    fn test_div_mod_knuth_add_back() {
        // Leading divisor limb of 1 forces the maximum normalization factor.
        let a = from_u128(99_999_999_999_999_999_999_999_999);
        let b = from_u128(10_000_000_000_001);
        let (q, r) = div_mod_knuth(&a, &b);
        check_identity(&a, &b, &q, &r);
    }

    #[test]
    fn test_kernels_agree_on_large_operands() {
        let a: Limbs = trimmed(&(0..160).map(|i| (i * 7_654_321 + 11) % BASE).collect::<Vec<_>>());
        let b: Limbs = trimmed(&(0..70).map(|i| (i * 1_234_567 + 3) % BASE).collect::<Vec<_>>());

        let (q1, r1) = div_mod_knuth(&a, &b);
        let (q2, r2) = div_mod_schoolbook(&a, &b);
        assert_eq!(q1, q2);
        assert_eq!(r1, r2);
        check_identity(&a, &b, &q1, &r1);

        let (q3, r3) = div_mod_abs(&a, &b);
        assert_eq!(q3, q1);
        assert_eq!(r3, r1);
    }

    #[test]
    fn test_div_mod_abs_short_cuts() {
        let a = from_u128(5);
        let b = from_u128(50_000_000_000);
        let (q, r) = div_mod_abs(&a, &b);
        assert_eq!(q.as_slice(), &[0]);
        assert_eq!(r, a);

        let (q, r) = div_mod_abs(&b, &b);
        assert_eq!(q.as_slice(), &[1]);
        assert_eq!(r.as_slice(), &[0]);
    }
}
