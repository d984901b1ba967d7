// ============================================================================
// Limb Kernels
// Magnitude arithmetic over base-10^7 limb arrays (least significant first)
// ============================================================================
//
// Every kernel in this module operates on magnitudes only. Signs are handled
// by `BigInteger`. Inputs are expected to be trimmed (no high-order zero
// limbs, zero is `[0]`) unless a function states otherwise, and every output
// is trimmed.

use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;

/// Radix of one limb.
pub(crate) const BASE: u32 = 10_000_000;

/// Decimal digits per limb.
pub(crate) const LOG_BASE: usize = 7;

/// Limb storage. Values below 10^28 stay inline.
pub(crate) type Limbs = SmallVec<[u32; 4]>;

/// Operand length at or below which Karatsuba falls back to schoolbook.
const KARATSUBA_LEAF: usize = 30;

// ============================================================================
// Normalization and Conversion
// ============================================================================

/// Remove high-order zero limbs, keeping at least one limb.
#[inline]
pub(crate) fn trim(v: &mut Limbs) {
    while v.len() > 1 && v[v.len() - 1] == 0 {
        v.pop();
    }
    if v.is_empty() {
        v.push(0);
    }
}

/// Copy a possibly untrimmed slice into trimmed storage.
#[inline]
pub(crate) fn trimmed(v: &[u32]) -> Limbs {
    let mut out = Limbs::from_slice(v);
    trim(&mut out);
    out
}

#[inline]
pub(crate) fn is_zero(v: &[u32]) -> bool {
    v.iter().all(|&limb| limb == 0)
}

/// Split a native magnitude into limbs.
pub(crate) fn from_u128(mut n: u128) -> Limbs {
    if n == 0 {
        return smallvec![0];
    }
    let mut out = Limbs::new();
    while n > 0 {
        out.push((n % BASE as u128) as u32);
        n /= BASE as u128;
    }
    out
}

/// Reassemble a magnitude that fits in `u128`.
pub(crate) fn to_u128(v: &[u32]) -> Option<u128> {
    let mut acc: u128 = 0;
    for &limb in v.iter().rev() {
        acc = acc.checked_mul(BASE as u128)?.checked_add(limb as u128)?;
    }
    Some(acc)
}

// ============================================================================
// Comparison
// ============================================================================

/// Compare two trimmed magnitudes.
pub(crate) fn compare_abs(a: &[u32], b: &[u32]) -> Ordering {
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    for i in (0..a.len()).rev() {
        if a[i] != b[i] {
            return a[i].cmp(&b[i]);
        }
    }
    Ordering::Equal
}

// ============================================================================
// Addition and Subtraction
// ============================================================================

/// Schoolbook addition with carry propagation.
pub(crate) fn add(a: &[u32], b: &[u32]) -> Limbs {
    let (a, b) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut r = Limbs::with_capacity(a.len() + 1);
    let mut carry = 0u32;

    for i in 0..a.len() {
        let mut sum = a[i] + carry + b.get(i).copied().unwrap_or(0);
        carry = if sum >= BASE { 1 } else { 0 };
        sum -= carry * BASE;
        r.push(sum);
    }
    if carry > 0 {
        r.push(carry);
    }

    trim(&mut r);
    r
}

/// Add a native value to a magnitude.
pub(crate) fn add_small(a: &[u32], small: u64) -> Limbs {
    let mut r = Limbs::with_capacity(a.len() + 1);
    let mut carry = small;

    for &limb in a {
        let sum = limb as u64 + carry;
        r.push((sum % BASE as u64) as u32);
        carry = sum / BASE as u64;
    }
    while carry > 0 {
        r.push((carry % BASE as u64) as u32);
        carry /= BASE as u64;
    }

    trim(&mut r);
    r
}

/// Schoolbook subtraction with borrow propagation. Requires `|a| >= |b|`.
pub(crate) fn subtract(a: &[u32], b: &[u32]) -> Limbs {
    let mut r = Limbs::with_capacity(a.len());
    let mut borrow = 0i64;

    for i in 0..a.len() {
        let mut difference = a[i] as i64 - borrow - b.get(i).copied().unwrap_or(0) as i64;
        if difference < 0 {
            difference += BASE as i64;
            borrow = 1;
        } else {
            borrow = 0;
        }
        r.push(difference as u32);
    }

    trim(&mut r);
    r
}

/// Subtract a native value from a magnitude. Requires `|a| >= small`.
pub(crate) fn subtract_small(a: &[u32], small: u64) -> Limbs {
    let mut r = Limbs::with_capacity(a.len());
    let mut carry = -(small as i128);

    for &limb in a {
        let difference = limb as i128 + carry;
        carry = difference.div_euclid(BASE as i128);
        r.push(difference.rem_euclid(BASE as i128) as u32);
    }

    trim(&mut r);
    r
}

// ============================================================================
// Multiplication
// ============================================================================

/// Multiply a magnitude by a native value.
pub(crate) fn multiply_small(a: &[u32], b: u64) -> Limbs {
    if b == 0 || is_zero(a) {
        return smallvec![0];
    }
    let mut r = Limbs::with_capacity(a.len() + 3);
    let mut carry: u128 = 0;

    for &limb in a {
        let product = limb as u128 * b as u128 + carry;
        r.push((product % BASE as u128) as u32);
        carry = product / BASE as u128;
    }
    while carry > 0 {
        r.push((carry % BASE as u128) as u32);
        carry /= BASE as u128;
    }

    trim(&mut r);
    r
}

/// O(n·m) convolution.
pub(crate) fn multiply_long(a: &[u32], b: &[u32]) -> Limbs {
    let base = BASE as u64;
    let mut r = vec![0u64; a.len() + b.len()];

    for (i, &a_i) in a.iter().enumerate() {
        if a_i == 0 {
            continue;
        }
        for (j, &b_j) in b.iter().enumerate() {
            let product = a_i as u64 * b_j as u64 + r[i + j];
            let carry = product / base;
            r[i + j] = product - carry * base;
            r[i + j + 1] += carry;
        }
    }

    let mut out: Limbs = r.into_iter().map(|limb| limb as u32).collect();
    trim(&mut out);
    out
}

/// Whether the split multiply beats schoolbook for operands of these lengths.
#[inline]
pub(crate) fn use_karatsuba(l1: usize, l2: usize) -> bool {
    let (l1, l2) = (l1 as f64, l2 as f64);
    -0.012 * l1 - 0.012 * l2 + 0.000015 * l1 * l2 > 0.0
}

/// Prepend `n` zero limbs (multiply by BASE^n).
fn shift_limbs(x: &[u32], n: usize) -> Limbs {
    if is_zero(x) {
        return smallvec![0];
    }
    let mut r = Limbs::with_capacity(x.len() + n);
    r.extend(std::iter::repeat(0).take(n));
    r.extend_from_slice(x);
    r
}

/// Split at limb `n` into trimmed (low, high) halves.
fn split_at_limb(x: &[u32], n: usize) -> (Limbs, Limbs) {
    if x.len() <= n {
        (trimmed(x), smallvec![0])
    } else {
        (trimmed(&x[..n]), trimmed(&x[n..]))
    }
}

/// Recursive split multiply: three half-size products combined by shifted addition.
pub(crate) fn multiply_karatsuba(x: &[u32], y: &[u32]) -> Limbs {
    let n = x.len().max(y.len());
    if n <= KARATSUBA_LEAF {
        return multiply_long(x, y);
    }
    let n = n.div_ceil(2);

    let (a, b) = split_at_limb(x, n);
    let (c, d) = split_at_limb(y, n);

    let ac = multiply_karatsuba(&a, &c);
    let bd = multiply_karatsuba(&b, &d);
    let abcd = multiply_karatsuba(&add(&a, &b), &add(&c, &d));

    let middle = subtract(&subtract(&abcd, &ac), &bd);
    let product = add(
        &add(&ac, &shift_limbs(&middle, n)),
        &shift_limbs(&bd, 2 * n),
    );
    trimmed(&product)
}

/// Squaring that visits only the upper triangle and doubles cross terms.
pub(crate) fn square(a: &[u32]) -> Limbs {
    let base = BASE as i64;
    let l = a.len();
    let mut r = vec![0i64; l + l];

    for i in 0..l {
        let a_i = a[i] as i64;
        let mut carry = -(a_i * a_i);
        for j in i..l {
            let a_j = a[j] as i64;
            let product = 2 * (a_i * a_j) + r[i + j] + carry;
            carry = product.div_euclid(base);
            r[i + j] = product - carry * base;
        }
        r[i + l] = carry;
    }

    let mut out: Limbs = r.into_iter().map(|limb| limb as u32).collect();
    trim(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limbs(value: u128) -> Limbs {
        from_u128(value)
    }

    #[test]
    fn test_from_and_to_u128() {
        assert_eq!(limbs(0).as_slice(), &[0]);
        assert_eq!(limbs(12_345_678).as_slice(), &[2_345_678, 1]);
        assert_eq!(to_u128(&limbs(987_654_321_123_456_789)), Some(987_654_321_123_456_789));
    }

    #[test]
    fn test_trim() {
        let mut v: Limbs = smallvec![5, 0, 0];
        trim(&mut v);
        assert_eq!(v.as_slice(), &[5]);

        let mut z: Limbs = smallvec![0, 0];
        trim(&mut z);
        assert_eq!(z.as_slice(), &[0]);
    }

    #[test]
    fn test_compare_abs() {
        assert_eq!(compare_abs(&limbs(10), &limbs(9)), Ordering::Greater);
        assert_eq!(compare_abs(&limbs(10_000_000), &limbs(9_999_999)), Ordering::Greater);
        assert_eq!(compare_abs(&limbs(42), &limbs(42)), Ordering::Equal);
    }

    #[test]
    fn test_add_and_subtract_carry() {
        let sum = add(&limbs(9_999_999), &limbs(1));
        assert_eq!(sum.as_slice(), &[0, 1]);

        let diff = subtract(&limbs(10_000_000), &limbs(1));
        assert_eq!(diff.as_slice(), &[9_999_999]);

        let diff = subtract(&limbs(100_000_000_000_000), &limbs(1));
        assert_eq!(to_u128(&diff), Some(99_999_999_999_999));
    }

    #[test]
    fn test_small_kernels() {
        assert_eq!(to_u128(&add_small(&limbs(9_999_999_999), 1)), Some(10_000_000_000));
        assert_eq!(to_u128(&subtract_small(&limbs(10_000_000_000), 1)), Some(9_999_999_999));
        assert_eq!(
            to_u128(&multiply_small(&limbs(123_456_789), 1_000_000_007)),
            Some(123_456_789 * 1_000_000_007)
        );
    }

    #[test]
    fn test_multiply_long_matches_native() {
        let a = 123_456_789_012_345_678u128;
        let b = 987_654_321u128;
        assert_eq!(to_u128(&multiply_long(&limbs(a), &limbs(b))), Some(a * b));
    }

    #[test]
    fn test_square_matches_multiply() {
        let a = limbs(99_999_999_999_999_999_999);
        assert_eq!(square(&a), multiply_long(&a, &a));
    }

    #[test]
    fn test_karatsuba_matches_schoolbook() {
        let x: Limbs = (0..75).map(|i| (i * 7_919 + 13) % BASE).collect();
        let y: Limbs = (0..64).map(|i| (i * 104_729 + 7) % BASE).collect();
        let x = trimmed(&x);
        let y = trimmed(&y);
        assert_eq!(multiply_karatsuba(&x, &y), multiply_long(&x, &y));
    }

    #[test]
    fn test_use_karatsuba_crossover() {
        assert!(!use_karatsuba(10, 10));
        assert!(!use_karatsuba(1000, 1));
        assert!(use_karatsuba(2000, 2000));
    }
}
