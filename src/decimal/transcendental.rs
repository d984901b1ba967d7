// ============================================================================
// Transcendental Functions
// Square root, natural logarithm, exponential, logarithm and power
// ============================================================================
//
// Series and iterations run in exact mode at a boosted working precision,
// truncating every intermediate result. Each loop stops when two successive
// sums agree on their leading `wpr` digits, or fails with `NoConvergence`
// after an iteration budget scaled to `wpr`. The final value is rounded once
// with the caller's rounding mode.

use super::arithmetic::{divide, finish, minus, multiply, plus};
use super::context::{RoundingMode, Working};
use super::decimal::Decimal;
use super::errors::{DecimalError, DecimalResult};
use super::parse::{pack_digits, parse_decimal};
use super::round::{round, rounded};
use super::words::{digits_to_string, BASE};
use crate::integer::MAX_SAFE_INTEGER;
use std::sync::OnceLock;

/// ln(10) to 115 significant digits.
const LN10_DIGITS: &str = "2302585092994045684017991454684364207601101488628772976033327900967572609677352480235997205089598298341967784042286";

/// Significant digits available for ln(10).
pub const LN10_PRECISION: i64 = 115;

/// Base-10 exponent above which `exp` refuses its argument.
const EXP_MAX_EXPONENT: i64 = 16;

/// Above this base-10 exponent `ln` splits off `e·ln(10)` before reducing
/// the argument, so repeated self-multiplication cannot overflow the range.
const LN_SPLIT_EXPONENT: i64 = 1_500_000_000_000_000;

fn ln10_constant() -> &'static Decimal {
    static LN10: OnceLock<Decimal> = OnceLock::new();
    LN10.get_or_init(|| pack_digits(1, LN10_DIGITS, 1))
}

/// ln(10) truncated to `sd` significant digits.
fn ln10(sd: i64) -> DecimalResult<Decimal> {
    if sd > LN10_PRECISION {
        return Err(DecimalError::PrecisionLimitExceeded {
            requested: sd,
            available: LN10_PRECISION,
        });
    }
    rounded(ln10_constant().clone(), sd, None, false)
}

/// Loop budget for one operation. Every loop below converges well within
/// `4·wpr + 64` steps; reaching the limit reports `NoConvergence`.
struct Iterations {
    operation: &'static str,
    count: u64,
    limit: u64,
}

impl Iterations {
    fn new(operation: &'static str, wpr: i64, max_iterations: Option<u64>) -> Self {
        Self {
            operation,
            count: 0,
            limit: max_iterations.unwrap_or(4 * wpr.max(0) as u64 + 64),
        }
    }

    fn step(&mut self) -> DecimalResult<()> {
        self.count += 1;
        if self.count > self.limit {
            tracing::debug!(operation = self.operation, limit = self.limit, "iteration limit reached");
            return Err(DecimalError::NoConvergence {
                operation: self.operation,
                iterations: self.limit,
            });
        }
        Ok(())
    }
}

fn same_leading_digits(a: &Decimal, b: &Decimal, n: i64) -> bool {
    let (a, b) = (digits_to_string(&a.digits), digits_to_string(&b.digits));
    let n = n.max(0) as usize;
    a[..n.min(a.len())] == b[..n.min(b.len())]
}

// ============================================================================
// Exponential
// ============================================================================

/// Maclaurin series for `e^x`, unrounded, accurate to about `sd` digits.
fn exp_series(x: &Decimal, sd: i64, max_iterations: Option<u64>) -> DecimalResult<Decimal> {
    let e10 = x.base10_exponent();
    if e10 > EXP_MAX_EXPONENT {
        return Err(DecimalError::ExponentOutOfRange(e10));
    }
    if x.is_zero() {
        return Ok(Decimal::one());
    }

    // Divide by 2^5 until |x| < 0.1; undone by squaring k times.
    let reduce = pack_digits(1, "3125", -1);
    let mut x = x.clone();
    let mut k = 0u32;
    while x.base10_exponent() >= -1 {
        x = multiply(&x, &reduce, Working::exact(sd))?;
        k += 5;
    }

    // Extra digits so the squarings leave the leading digits intact.
    let guard = (k as f64 * std::f64::consts::LOG10_2 * 2.0 + 5.0) as i64;
    let wpr = sd + guard;
    let w = Working::exact(wpr);
    tracing::trace!(k, wpr, "exp argument reduced");
    let mut iterations = Iterations::new("exp", wpr, max_iterations);

    let mut power = Decimal::one();
    let mut denominator = Decimal::one();
    let mut sum = Decimal::one();
    let mut i = 0i64;
    loop {
        iterations.step()?;
        power = rounded(multiply(&power, &x, w)?, wpr, None, false)?;
        i += 1;
        denominator = multiply(&denominator, &Decimal::from(i), w)?;
        let term = divide(&power, &denominator, w, Some(wpr), false, None)?;
        let next = plus(&sum, &term, w)?;
        if same_leading_digits(&next, &sum, wpr) {
            for _ in 0..k {
                sum = rounded(multiply(&sum, &sum, w)?, wpr, None, false)?;
            }
            return Ok(sum);
        }
        sum = next;
    }
}

/// `e^x` rounded to the working precision.
pub(crate) fn exp(x: &Decimal, w: Working) -> DecimalResult<Decimal> {
    let sum = exp_series(x, w.precision, None)?;
    finish(sum, w)
}

// ============================================================================
// Logarithms
// ============================================================================

/// Natural logarithm, unrounded, accurate to about `sd` digits.
fn ln_series(y: &Decimal, sd: i64, max_iterations: Option<u64>) -> DecimalResult<Decimal> {
    if y.is_zero() {
        return Err(DecimalError::InfinityResult("ln(0)".to_string()));
    }
    if y.is_negative() {
        return Err(DecimalError::NotANumber(format!("ln({})", y)));
    }
    if y.is_one() {
        return Ok(Decimal::zero());
    }
    if *y == Decimal::from(10) {
        return ln10(sd);
    }

    let guard = 10;
    let wpr = sd + guard;
    let w = Working::exact(wpr);
    let mut c = digits_to_string(&y.digits);
    let e = y.base10_exponent();

    if e.abs() >= LN_SPLIT_EXPONENT {
        // ln(m·10^e) = ln(m) + e·ln(10)
        tracing::debug!(exponent = e, "ln splitting off power of ten");
        let shift = multiply(&ln10(wpr + 2)?, &Decimal::from(e), w)?;
        let mantissa = pack_digits(1, &c, 1);
        return plus(&ln_series(&mantissa, wpr - guard, max_iterations)?, &shift, w);
    }

    // Raise to a power n until the significand leads with 7, 8, 9, 10..13.
    let mut iterations = Iterations::new("ln", wpr, max_iterations);
    let mut x = y.clone();
    let mut n = 1i64;
    loop {
        let lead = c.as_bytes()[0];
        let next = c.as_bytes().get(1).copied().unwrap_or(b'0');
        if !((lead < b'7' && lead != b'1') || (lead == b'1' && next > b'3')) {
            break;
        }
        iterations.step()?;
        x = multiply(&x, y, w)?;
        c = digits_to_string(&x.digits);
        n += 1;
    }

    let mut e = x.base10_exponent();
    let x = if c.as_bytes()[0] > b'1' {
        e += 1;
        pack_digits(1, &c, 0)
    } else {
        pack_digits(1, &c, 1)
    };

    // ln(x) = 2·artanh(t) = 2(t + t³/3 + t⁵/5 + ...), t = (x - 1)/(x + 1)
    let one = Decimal::one();
    let t = divide(&minus(&x, &one, w)?, &plus(&x, &one, w)?, w, Some(wpr), false, None)?;
    let t2 = rounded(multiply(&t, &t, w)?, wpr, None, false)?;
    let mut numerator = t.clone();
    let mut sum = t;
    let mut denominator = 3i64;
    loop {
        iterations.step()?;
        numerator = rounded(multiply(&numerator, &t2, w)?, wpr, None, false)?;
        let term = divide(&numerator, &Decimal::from(denominator), w, Some(wpr), false, None)?;
        let next = plus(&sum, &term, w)?;
        if same_leading_digits(&next, &sum, wpr) {
            sum = multiply(&sum, &Decimal::from(2), w)?;
            if e != 0 {
                let shift = multiply(&ln10(wpr + 2)?, &Decimal::from(e), w)?;
                sum = plus(&sum, &shift, w)?;
            }
            return divide(&sum, &Decimal::from(n), w, Some(wpr), false, None);
        }
        sum = next;
        denominator += 2;
    }
}

/// Natural logarithm rounded to the working precision.
pub(crate) fn ln(x: &Decimal, w: Working) -> DecimalResult<Decimal> {
    if *x == Decimal::from(10) {
        if w.precision > LN10_PRECISION {
            return Err(DecimalError::PrecisionLimitExceeded {
                requested: w.precision,
                available: LN10_PRECISION,
            });
        }
        return finish(ln10_constant().clone(), w);
    }
    let r = ln_series(x, w.precision, None)?;
    finish(r, w)
}

/// Logarithm of `x` to `base` (10 when `None`).
pub(crate) fn log(x: &Decimal, base: Option<&Decimal>, w: Working) -> DecimalResult<Decimal> {
    let ten = Decimal::from(10);
    let base = base.unwrap_or(&ten);
    if !base.is_positive() || base.is_one() {
        return Err(DecimalError::NotANumber(format!("log base {}", base)));
    }
    if x.is_zero() {
        return Err(DecimalError::InfinityResult(format!("log[{}](0)", base)));
    }
    if x.is_negative() {
        return Err(DecimalError::NotANumber(format!("log[{}]({})", base, x)));
    }
    if x.is_one() {
        return Ok(Decimal::zero());
    }

    let wpr = w.precision + 5;
    let exact = Working::exact(wpr);
    let r = divide(&ln_series(x, wpr, None)?, &ln_series(base, wpr, None)?, exact, Some(wpr), false, None)?;
    finish(r, w)
}

// ============================================================================
// Square Root
// ============================================================================

/// Square root by Newton–Raphson from a native-float seed.
pub(crate) fn sqrt(x: &Decimal, w: Working) -> DecimalResult<Decimal> {
    sqrt_newton(x, w, None)
}

fn sqrt_newton(x: &Decimal, w: Working, max_iterations: Option<u64>) -> DecimalResult<Decimal> {
    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    if x.is_negative() {
        return Err(DecimalError::NotANumber(format!("sqrt({})", x)));
    }

    let seed = x.to_f64().sqrt();
    let mut r = if seed == 0.0 || seed.is_infinite() {
        // Outside f64 range: take the root of the digits, then fix the exponent.
        let mut e = x.base10_exponent();
        let mut n = digits_to_string(&x.digits);
        if (n.len() as i64 + e) % 2 == 0 {
            n.push('0');
        }
        let s = n.parse::<f64>().unwrap_or(f64::INFINITY).sqrt();
        e = (e + 1).div_euclid(2) - i64::from(e < 0 || e % 2 != 0);
        let text = if s.is_infinite() {
            format!("5e{}", e)
        } else {
            let m = format!("{:e}", s);
            let mantissa = m.find('e').map_or(m.as_str(), |p| &m[..p]);
            format!("{}e{}", mantissa, e)
        };
        parse_decimal(&text, false)?
    } else {
        Decimal::from_f64(seed)?
    };

    let pr = w.precision;
    let half = pack_digits(1, "5", 0);
    let first_wpr = pr + 3;
    let mut wpr = first_wpr;
    let mut iterations = Iterations::new("sqrt", first_wpr, max_iterations);

    loop {
        iterations.step()?;
        let t = r;
        let exact = Working::exact(wpr + 2);
        let quotient = divide(x, &t, exact, Some(wpr + 2), false, None)?;
        r = multiply(&plus(&t, &quotient, exact)?, &half, exact)?;

        let digits = digits_to_string(&r.digits);
        if !same_leading_digits(&t, &r, wpr) {
            continue;
        }

        // The 4th rounding digit may be off by one, so near a rounding
        // boundary keep iterating at higher precision.
        let lo = ((wpr - 3).max(0) as usize).min(digits.len());
        let hi = ((wpr + 1) as usize).min(digits.len());
        let rounding_digits = &digits[lo..hi];

        if wpr == first_wpr && rounding_digits == "4999" {
            // The nines may repeat forever; check whether rounding up is exact.
            let mut up = t.clone();
            round(&mut up, pr + 1, Some(RoundingMode::Up), false, false)?;
            if multiply(&up, &up, Working::exact(wpr))? == *x {
                r = up;
                break;
            }
        } else if rounding_digits != "9999" {
            break;
        }

        wpr += 4;
        tracing::debug!(wpr, "sqrt extending precision at rounding boundary");
    }

    finish(r, w)
}

// ============================================================================
// Power
// ============================================================================

/// `|y|` when `y` is an integer no larger than `MAX_SAFE_INTEGER`.
fn small_integer(y: &Decimal) -> Option<u64> {
    if !y.is_integer() || y.exponent > 2 {
        return None;
    }
    let mut value: u128 = 0;
    for i in 0..=y.exponent as usize {
        value = value * BASE as u128 + y.digits.get(i).copied().unwrap_or(0) as u128;
    }
    (value <= MAX_SAFE_INTEGER as u128).then_some(value as u64)
}

/// Drop words past `limit`, keeping the canonical form.
fn truncate_words(x: &mut Decimal, limit: usize) {
    if x.digits.len() > limit {
        x.digits.truncate(limit);
        while x.digits.len() > 1 && x.digits[x.digits.len() - 1] == 0 {
            x.digits.pop();
        }
    }
}

/// `x^y` rounded to the working precision.
pub(crate) fn pow(x: &Decimal, y: &Decimal, w: Working) -> DecimalResult<Decimal> {
    if y.is_zero() {
        return Ok(Decimal::one());
    }
    if x.is_zero() {
        if y.is_negative() {
            return Err(DecimalError::InfinityResult(format!("0^{}", y)));
        }
        return Ok(Decimal::zero());
    }
    if x.is_one() {
        return Ok(x.clone());
    }
    if y.is_one() {
        return finish(x.clone(), w);
    }

    let pr = w.precision;
    let last = y.digits.len() as i64 - 1;
    let y_is_int = y.exponent >= last;

    if !y_is_int {
        if x.is_negative() {
            return Err(DecimalError::NotANumber(format!("({})^{}", x, y)));
        }
    } else if let Some(mut k) = small_integer(y) {
        // Exponentiation by squaring; words beyond the limit leave 28..34 guard digits.
        tracing::trace!(exponent = k, "pow by squaring");
        let limit = ((pr + 6) / 7 + 4) as usize;
        let exact = Working::exact(pr);
        let mut r = Decimal::one();
        let mut base = x.clone();
        // k ≤ 2^53 - 1, so at most 53 squarings.
        while k > 0 {
            if k & 1 == 1 {
                r = multiply(&r, &base, exact)?;
                truncate_words(&mut r, limit);
            }
            k >>= 1;
            if k > 0 {
                base = multiply(&base, &base, exact)?;
                truncate_words(&mut base, limit);
            }
        }
        return if y.is_negative() {
            divide(&Decimal::one(), &r, w, None, false, w.rounding)
        } else {
            finish(r, w)
        };
    }

    // x^y = exp(y·ln|x|); odd integer powers of negatives are negative.
    let odd = y.exponent == last && y.digits[last as usize] % 2 == 1;
    let sign = if x.is_negative() && odd { -1 } else { 1 };
    tracing::trace!("pow via exp(y·ln(x))");

    let guard = 12;
    let product = multiply(y, &ln_series(&x.abs(), pr + guard, None)?, Working::exact(pr + guard))?;
    let mut r = exp_series(&product, pr, None)?;
    r.sign = sign;
    finish(r, w)
}
