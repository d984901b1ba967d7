// ============================================================================
// Random Integers
// Uniform sampling over inclusive integer ranges
// ============================================================================

use super::big_integer::{BigInteger, MAX_SAFE_INTEGER};
use super::limbs::{Limbs, BASE};
use rand::Rng;

impl BigInteger {
    /// Uniform random integer in `[min(a, b), max(a, b)]`.
    ///
    /// Narrow ranges are sampled directly. Wide ranges are built one limb at
    /// a time from the most significant end: a limb is bounded by the
    /// range's own limb only while every higher limb has matched it.
    pub fn rand_between<R: Rng + ?Sized>(a: &BigInteger, b: &BigInteger, rng: &mut R) -> BigInteger {
        let low = BigInteger::min(a, b);
        let high = BigInteger::max(a, b);
        let range = high.minus(&low).next();

        if let Some(span) = range.to_u64().filter(|&s| s <= MAX_SAFE_INTEGER) {
            return low.plus(&BigInteger::from(rng.gen_range(0..span)));
        }

        let digits: Vec<u32> = range.magnitude.iter().rev().copied().collect();
        let mut result = Vec::with_capacity(digits.len());
        let mut restricted = true;
        for (i, &limit) in digits.iter().enumerate() {
            let top = if restricted {
                limit as f64 + digits.get(i + 1).map_or(0.0, |&next| next as f64 / BASE as f64)
            } else {
                BASE as f64
            };
            let digit = (rng.gen::<f64>() * top).trunc() as u32;
            result.push(digit);
            if digit < limit {
                restricted = false;
            }
        }

        let magnitude: Limbs = result.into_iter().rev().collect();
        low.plus(&BigInteger::from_limbs(magnitude, false))
    }
}
