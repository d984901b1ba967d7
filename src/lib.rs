// ============================================================================
// Arbitrary-Precision Arithmetic Library
// Exact big integers and rounded big decimals over base-10^7 digit arrays
// ============================================================================

//! # arbnum
//!
//! Two independent arbitrary-precision number types:
//!
//! - **[`BigInteger`]**: exact signed integers of unbounded magnitude with
//!   Karatsuba multiplication, Knuth division, modular exponentiation,
//!   Miller–Rabin primality, two's-complement bitwise operations and
//!   radix conversion.
//! - **[`Decimal`]**: signed decimals rounded to a configurable number of
//!   significant digits under nine rounding policies, with `sqrt`, `ln`,
//!   `exp`, `log` and `pow`.
//!
//! Decimal operations that round take an explicit [`DecimalContext`]; there
//! is no global configuration, so independent contexts can be used from
//! different threads freely.
//!
//! ## Example
//!
//! ```rust
//! use arbnum::prelude::*;
//!
//! let a: BigInteger = "123456789123456789123456789".parse()?;
//! let b: BigInteger = "987654321987654321987654321".parse()?;
//! assert_eq!(
//!     a.times(&b).to_string(),
//!     "121932631356500531591068431581771069347203169112635269"
//! );
//!
//! let ctx = DecimalContext::default();
//! let third = Decimal::from(1).divided_by(&Decimal::from(3), &ctx)?;
//! assert_eq!(third.to_string(), "0.33333333333333333333");
//! assert_eq!(third.to_fixed(4, RoundingMode::HalfUp)?, "0.3333");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - `serde`: (de)serialize contexts, and numbers as decimal strings
//! - `num-bigint`: conversions to and from `num_bigint::BigInt`
//! - `logging`: `tracing-subscriber` for the demo binary

pub mod decimal;
pub mod integer;

pub use decimal::{Decimal, DecimalContext, DecimalError, DecimalResult, RoundingMode};
pub use integer::{BigInteger, IntegerError, IntegerResult};

// Re-exports for convenience
pub mod prelude {
    pub use crate::decimal::{Decimal, DecimalContext, DecimalError, DecimalResult, RoundingMode};
    pub use crate::integer::{BigInteger, IntegerError, IntegerResult, RadixDigits};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use proptest::prelude::*;
    use quickcheck_macros::quickcheck;

    fn big(s: &str) -> BigInteger {
        s.parse().unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_end_to_end_big_product() {
        let a = big("123456789123456789123456789");
        let b = big("987654321987654321987654321");
        let product = a.times(&b);
        assert_eq!(product.to_string(), "121932631356500531591068431581771069347203169112635269");

        let oracle: num_bigint::BigInt = "123456789123456789123456789".parse::<num_bigint::BigInt>().unwrap()
            * "987654321987654321987654321".parse::<num_bigint::BigInt>().unwrap();
        assert_eq!(product.to_string(), oracle.to_string());
        assert_eq!(product.checked_div(&b).unwrap(), a);
    }

    #[test]
    fn test_end_to_end_one_third() {
        let ctx = DecimalContext::default();
        let third = Decimal::from(1).divided_by(&Decimal::from(3), &ctx).unwrap();
        assert_eq!(third.to_string(), "0.33333333333333333333");

        let back = third.times(&Decimal::from(3), &ctx).unwrap();
        assert_eq!(back.to_string(), "0.99999999999999999999");
        let rounded = back.to_significant_digits(ctx.precision - 1, ctx.rounding).unwrap();
        assert_eq!(rounded.to_string(), "1");
    }

    #[test]
    fn test_end_to_end_gcd_lcm() {
        assert_eq!(BigInteger::from(1071).gcd(&BigInteger::from(462)), BigInteger::from(21));
        assert_eq!(BigInteger::from(4).lcm(&BigInteger::from(6)), BigInteger::from(12));
    }

    #[test]
    fn test_primality_agrees_with_trial_division() {
        fn trial(n: u64) -> bool {
            if n < 2 {
                return false;
            }
            let mut d = 2;
            while d * d <= n {
                if n % d == 0 {
                    return false;
                }
                d += 1;
            }
            true
        }
        for n in (0..2_000u64).chain([7919, 561, 1105, 8911, 97 * 97, 7919 * 7919, 1_000_003]) {
            assert_eq!(BigInteger::from(n).is_prime(false), trial(n), "{}", n);
        }
        assert!(BigInteger::from((1u64 << 61) - 1).is_prime(false));
        assert!(!BigInteger::from(((1u64 << 31) - 1) * ((1u64 << 31) - 1)).is_prime(false));
    }

    #[test]
    fn test_mod_pow_matches_pow_then_rem() {
        let cases = [(4, 13, 497), (-7, 5, 11), (123, 0, 17), (5, 3, 1), (2, 100, 1_000_000_007)];
        for (a, e, m) in cases {
            let (a, e, m) = (BigInteger::from(a), BigInteger::from(e), BigInteger::from(m));
            let direct = a.pow(&e).unwrap().checked_rem(&m).unwrap();
            assert_eq!(a.mod_pow(&e, &m).unwrap(), direct);
        }
    }

    #[test]
    fn test_exp_ln_round_trip() {
        let ctx = DecimalContext::default().with_precision(25);
        for s in ["0.001", "0.5", "2", "17.25", "1000", "123456.789"] {
            let x = dec(s);
            let back = x.ln(&ctx).unwrap().exp(&ctx).unwrap();
            let tolerance = dec(&format!("1e{}", x.exponent() - 22));
            let diff = back.minus(&x, &ctx).unwrap().abs();
            assert!(diff <= tolerance, "exp(ln({})) = {}", s, back);
        }
        for s in ["-3", "0.25", "1", "12.5"] {
            let x = dec(s);
            let back = x.exp(&ctx).unwrap().ln(&ctx).unwrap();
            let diff = back.minus(&x, &ctx).unwrap().abs();
            assert!(diff <= dec("1e-22"), "ln(exp({})) = {}", s, back);
        }
    }

    #[test]
    fn test_sqrt_non_perfect_squares() {
        let p = 20;
        let ctx = DecimalContext::default().with_precision(p);
        for s in ["2", "3", "10", "0.5", "123456789.123"] {
            let x = dec(s);
            let root = x.sqrt(&ctx).unwrap();
            let wide = DecimalContext::default().with_precision(2 * p);
            let squared = root.times(&root, &wide).unwrap();
            let relative = squared.minus(&x, &wide).unwrap().abs().divided_by(&x, &wide).unwrap();
            assert!(relative < dec(&format!("1e-{}", p - 2)), "sqrt({}) = {}", s, root);
        }
    }

    #[test]
    fn test_contexts_are_independent() {
        let narrow = DecimalContext::default().with_precision(5);
        let wide = DecimalContext::decimal128();
        let handles: Vec<_> = [narrow, wide]
            .into_iter()
            .map(|ctx| std::thread::spawn(move || Decimal::from(2).sqrt(&ctx).unwrap().to_string()))
            .collect();
        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results[0], "1.4142");
        assert_eq!(results[1], "1.414213562373095048801688724209698");
    }

    // ========================================================================
    // Properties
    // ========================================================================

    fn big_integer_text() -> impl Strategy<Value = String> {
        "-?[1-9][0-9]{0,60}|0"
    }

    proptest! {
        #[test]
        fn prop_add_sub_inverse(a in big_integer_text(), b in big_integer_text()) {
            let (a, b) = (big(&a), big(&b));
            prop_assert_eq!(a.plus(&b).minus(&b), a.clone());
            prop_assert_eq!(a.plus(&b), b.plus(&a));
            prop_assert_eq!(a.times(&b), b.times(&a));
        }

        #[test]
        fn prop_exact_division(a in big_integer_text(), b in big_integer_text()) {
            let (a, b) = (big(&a), big(&b));
            prop_assume!(!b.is_zero());
            prop_assert_eq!(a.times(&b).checked_div(&b).unwrap(), a);
        }

        #[test]
        fn prop_div_mod_identity(a in big_integer_text(), m in big_integer_text()) {
            let (a, m) = (big(&a), big(&m));
            prop_assume!(!m.is_zero());
            let (q, r) = a.div_mod(&m).unwrap();
            prop_assert_eq!(q.times(&m).plus(&r), a.clone());
            prop_assert!(r.is_zero() || r.is_negative() == a.is_negative());
            prop_assert!(r.compare_abs(&m) == std::cmp::Ordering::Less);
        }

        #[test]
        fn prop_product_matches_oracle(a in big_integer_text(), b in big_integer_text()) {
            let oracle = a.parse::<num_bigint::BigInt>().unwrap() * b.parse::<num_bigint::BigInt>().unwrap();
            prop_assert_eq!(big(&a).times(&big(&b)).to_string(), oracle.to_string());
        }

        #[test]
        fn prop_radix_round_trip(a in big_integer_text(), radix in 2i64..=36) {
            let a = big(&a);
            let text = a.to_string_radix(radix).unwrap();
            prop_assert_eq!(BigInteger::from_str_radix(&text, radix).unwrap(), a);
        }

        #[test]
        fn prop_decimal_string_round_trip(
            mantissa in any::<i64>(),
            exponent in -40i32..40,
            precision in 1u32..30,
        ) {
            let x = dec(&format!("{}e{}", mantissa, exponent));
            let rounded = x.to_significant_digits(precision, RoundingMode::HalfEven).unwrap();
            prop_assert_eq!(dec(&rounded.to_string()), rounded.clone());
            prop_assert_eq!(dec(&rounded.to_plain_string()), rounded);
        }

        #[test]
        fn prop_sqrt_perfect_squares(n in 1u64..1_000_000) {
            let ctx = DecimalContext::default();
            let square = Decimal::from(n * n);
            prop_assert_eq!(square.sqrt(&ctx).unwrap(), Decimal::from(n));
        }
    }

    #[quickcheck]
    fn qc_integer_order_matches_native(a: i64, b: i64) -> bool {
        BigInteger::from(a).cmp(&BigInteger::from(b)) == a.cmp(&b)
    }

    #[quickcheck]
    fn qc_decimal_order_matches_native(a: i64, b: i64) -> bool {
        Decimal::from(a).cmp(&Decimal::from(b)) == a.cmp(&b)
    }

    #[quickcheck]
    fn qc_decimal_add_commutes(a: i64, b: i32) -> bool {
        let ctx = DecimalContext::default();
        let (x, y) = (Decimal::from(a), Decimal::from(b as i64).divided_by(&Decimal::from(7), &ctx).unwrap());
        x.plus(&y, &ctx).unwrap() == y.plus(&x, &ctx).unwrap()
    }

    #[quickcheck]
    fn qc_integer_matches_native_i128(a: i64, b: i64) -> bool {
        let product = BigInteger::from(a).times(&BigInteger::from(b));
        product.to_i128() == Some(a as i128 * b as i128)
    }
}
