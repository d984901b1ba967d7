// ============================================================================
// Decimal Arithmetic
// Word-level add, subtract, multiply and long division
// ============================================================================
//
// Every function takes a `Working` state. In external mode the result is
// rounded to `precision` with the working rounding mode and its exponent is
// range-checked; in exact mode results are returned as computed (division
// still truncates to the requested digits).

use super::context::{RoundingMode, Working};
use super::decimal::Decimal;
use super::errors::{DecimalError, DecimalResult};
use super::round::round;
use super::words::{compare_words, multiply_integer, subtract_words, BASE, LOG_BASE};

/// Apply final rounding in external mode.
pub(crate) fn finish(mut y: Decimal, w: Working) -> DecimalResult<Decimal> {
    if let Some(rm) = w.rounding {
        round(&mut y, w.precision, Some(rm), false, true)?;
    }
    Ok(y)
}

fn prepend_zeros(d: &mut Vec<u32>, count: usize) {
    d.splice(0..0, std::iter::repeat(0).take(count));
}

fn trim_trailing(d: &mut Vec<u32>) {
    while d.len() > 1 && d[d.len() - 1] == 0 {
        d.pop();
    }
}

// ============================================================================
// Addition and Subtraction
// ============================================================================

/// `x + y` for any signs.
pub(crate) fn plus(x: &Decimal, y: &Decimal, w: Working) -> DecimalResult<Decimal> {
    if x.sign != y.sign {
        return subtract(x, &y.neg(), w);
    }
    add(x, y, w)
}

/// `x - y` for any signs.
pub(crate) fn minus(x: &Decimal, y: &Decimal, w: Working) -> DecimalResult<Decimal> {
    if x.sign != y.sign {
        return add(x, &y.neg(), w);
    }
    subtract(x, y, w)
}

/// Magnitude addition of operands with the same sign (or a zero operand).
fn add(x: &Decimal, y: &Decimal, w: Working) -> DecimalResult<Decimal> {
    if x.is_zero() || y.is_zero() {
        let r = if y.is_zero() { x.clone() } else { y.clone() };
        return finish(r, w);
    }

    let mut xd = x.digits.clone();
    let mut yd = y.digits.clone();
    let mut e = y.exponent;
    let mut shift = x.exponent - y.exponent;

    // Align exponents, bounding the zero padding of the smaller operand.
    if shift != 0 {
        let (d, other_len) = if shift < 0 {
            shift = -shift;
            (&mut xd, yd.len() as i64)
        } else {
            e = x.exponent;
            (&mut yd, xd.len() as i64)
        };
        let words = (w.precision + LOG_BASE - 1) / LOG_BASE;
        let limit = words.max(other_len) + 1;
        if shift > limit {
            shift = limit;
            d.truncate(1);
        }
        prepend_zeros(d, shift as usize);
    }

    if xd.len() < yd.len() {
        std::mem::swap(&mut xd, &mut yd);
    }

    // Words of xd past the end of yd are unchanged.
    let mut carry = 0u32;
    for i in (0..yd.len()).rev() {
        let sum = xd[i] + yd[i] + carry;
        carry = sum / BASE;
        xd[i] = sum % BASE;
    }
    if carry > 0 {
        xd.insert(0, carry);
        e += 1;
    }
    trim_trailing(&mut xd);

    finish(Decimal::from_parts(x.sign, xd, e), w)
}

/// Magnitude subtraction of operands with the same sign (or a zero operand).
fn subtract(x: &Decimal, y: &Decimal, w: Working) -> DecimalResult<Decimal> {
    if x.is_zero() || y.is_zero() {
        let r = if y.is_zero() { x.clone() } else { y.neg() };
        return finish(r, w);
    }

    let mut xd = x.digits.clone();
    let mut yd = y.digits.clone();
    let mut e = y.exponent;
    let mut sign = x.sign;
    let mut shift = x.exponent - y.exponent;
    let x_lt_y;

    if shift != 0 {
        x_lt_y = shift < 0;
        let (d, other_len) = if x_lt_y {
            shift = -shift;
            (&mut xd, yd.len() as i64)
        } else {
            e = x.exponent;
            (&mut yd, xd.len() as i64)
        };
        let words = (w.precision + LOG_BASE - 1) / LOG_BASE;
        let limit = words.max(other_len) + 2;
        if shift > limit {
            shift = limit;
            d.truncate(1);
        }
        prepend_zeros(d, shift as usize);
    } else {
        let common = xd.len().min(yd.len());
        let mut lt = xd.len() < yd.len();
        for i in 0..common {
            if xd[i] != yd[i] {
                lt = xd[i] < yd[i];
                break;
            }
        }
        x_lt_y = lt;
        shift = 0;
    }

    if x_lt_y {
        std::mem::swap(&mut xd, &mut yd);
        sign = -sign;
    }
    while xd.len() < yd.len() {
        xd.push(0);
    }

    // The first `shift` words of yd are padding zeros.
    let skip = shift as usize;
    for i in (skip..yd.len()).rev() {
        if xd[i] < yd[i] {
            let mut j = i;
            while j > 0 {
                j -= 1;
                if xd[j] != 0 {
                    break;
                }
                xd[j] = BASE - 1;
            }
            xd[j] -= 1;
            xd[i] += BASE;
        }
        xd[i] -= yd[i];
    }

    trim_trailing(&mut xd);
    let leading = xd.iter().take_while(|&&d| d == 0).count();
    if leading == xd.len() {
        return finish(Decimal::zero(), w);
    }
    xd.drain(..leading);
    e -= leading as i64;

    finish(Decimal::from_parts(sign, xd, e), w)
}

// ============================================================================
// Multiplication
// ============================================================================

/// Word convolution.
pub(crate) fn multiply(x: &Decimal, y: &Decimal, w: Working) -> DecimalResult<Decimal> {
    if x.is_zero() || y.is_zero() {
        return Ok(Decimal::zero());
    }

    let sign = x.sign * y.sign;
    let mut e = x.exponent + y.exponent;
    let (xd, yd) = if x.digits.len() < y.digits.len() {
        (&y.digits, &x.digits)
    } else {
        (&x.digits, &y.digits)
    };
    let (x_len, y_len) = (xd.len(), yd.len());
    let base = BASE as u64;

    let mut r = vec![0u64; x_len + y_len];
    let mut carry = 0u64;
    for i in (0..y_len).rev() {
        carry = 0;
        let mut k = x_len + i;
        while k > i {
            let t = r[k] + yd[i] as u64 * xd[k - i - 1] as u64 + carry;
            r[k] = t % base;
            carry = t / base;
            k -= 1;
        }
        r[k] = (r[k] + carry) % base;
    }

    let mut digits: Vec<u32> = r.into_iter().map(|d| d as u32).collect();
    trim_trailing(&mut digits);
    if carry > 0 {
        e += 1;
    } else {
        digits.remove(0);
    }

    finish(Decimal::from_parts(sign, digits, e), w)
}

// ============================================================================
// Division
// ============================================================================

/// Long division in base 10^7.
///
/// Produces `pr` significant digits (or `pr` decimal places when `dp`),
/// defaulting to the working precision. The quotient is computed by
/// truncation; `rm` then rounds it, seeing whether the discarded remainder
/// was nonzero.
pub(crate) fn divide(
    x: &Decimal,
    y: &Decimal,
    w: Working,
    pr: Option<i64>,
    dp: bool,
    rm: Option<RoundingMode>,
) -> DecimalResult<Decimal> {
    let sign = if x.sign == y.sign { 1 } else { -1 };

    if x.is_zero() {
        return Ok(Decimal::zero());
    }
    if y.is_zero() {
        return Err(DecimalError::DivisionByZero);
    }

    let mut xd = x.digits.clone();
    let mut yd = y.digits.clone();
    let mut e = x.exponent - y.exponent;
    let mut y_len = yd.len();
    let mut x_len = xd.len();

    // Result exponent may be one less than e.
    let mut i = 0;
    while i < y_len && yd[i] == xd.get(i).copied().unwrap_or(0) {
        i += 1;
    }
    if i < y_len && yd[i] > xd.get(i).copied().unwrap_or(0) {
        e -= 1;
    }

    let pr = pr.unwrap_or(w.precision);
    let mut sd = if dp {
        pr + (x.base10_exponent() - y.base10_exponent()) + 1
    } else {
        pr
    };
    if sd < 0 {
        return Ok(Decimal::zero());
    }

    // Convert precision in digits to words, plus guard words.
    sd = sd / LOG_BASE + 2;
    let mut qd: Vec<u32> = Vec::new();
    let sticky;

    if y_len == 1 {
        // Single-word divisor.
        let divisor = yd[0] as u64;
        let base = BASE as u64;
        let mut k = 0u64;
        let mut i = 0usize;
        sd += 1;
        while i < x_len || k != 0 {
            let budget = sd;
            sd -= 1;
            if budget == 0 {
                break;
            }
            let t = k * base + xd.get(i).copied().unwrap_or(0) as u64;
            qd.push((t / divisor) as u32);
            k = t % divisor;
            i += 1;
        }
        sticky = k != 0 || i < x_len;
    } else {
        // Normalise so the divisor's leading word is at least BASE / 2.
        let k = BASE / (yd[0] + 1);
        if k > 1 {
            yd = multiply_integer(&yd, k);
            xd = multiply_integer(&xd, k);
            y_len = yd.len();
            x_len = xd.len();
        }

        let mut xi = y_len;
        let mut rem: Vec<u32> = xd.iter().take(y_len).copied().collect();
        while rem.len() < y_len {
            rem.push(0);
        }
        let mut rem_len = rem.len();

        let mut yz = yd.clone();
        yz.insert(0, 0);
        let mut yd0 = yd[0] as u64;
        if yd[1] >= BASE / 2 {
            yd0 += 1;
        }

        loop {
            let mut k: u64 = 0;
            let mut cmp = compare_words(&yd, &rem, y_len, rem_len);

            if cmp < 0 {
                // Estimate the quotient word from the leading remainder words.
                let mut rem0 = rem[0] as u64;
                if y_len != rem_len {
                    rem0 = rem0 * BASE as u64 + rem.get(1).copied().unwrap_or(0) as u64;
                }
                k = rem0 / yd0;

                let mut prod;
                if k > 1 {
                    if k >= BASE as u64 {
                        k = BASE as u64 - 1;
                    }
                    prod = multiply_integer(&yd, k as u32);
                    let prod_len = prod.len();
                    rem_len = rem.len();
                    cmp = compare_words(&prod, &rem, prod_len, rem_len);
                    if cmp == 1 {
                        k -= 1;
                        let sub = if y_len < prod_len { &yz } else { &yd };
                        subtract_words(&mut prod, sub, prod_len);
                    }
                } else {
                    if k == 0 {
                        cmp = 1;
                        k = 1;
                    }
                    prod = yd.clone();
                }

                if prod.len() < rem_len {
                    prod.insert(0, 0);
                }
                subtract_words(&mut rem, &prod, rem_len);

                if cmp == -1 {
                    rem_len = rem.len();
                    cmp = compare_words(&yd, &rem, y_len, rem_len);
                    if cmp < 1 {
                        k += 1;
                        let sub = if y_len < rem_len { &yz } else { &yd };
                        subtract_words(&mut rem, sub, rem_len);
                    }
                }
                rem_len = rem.len();
            } else if cmp == 0 {
                k += 1;
                rem = vec![0];
            }

            qd.push(k as u32);

            // Bring down the next word; an empty remainder marks exhaustion.
            if cmp != 0 && rem.first().is_some_and(|&r| r != 0) {
                rem.push(xd.get(xi).copied().unwrap_or(0));
                rem_len += 1;
            } else {
                rem = xd.get(xi).map(|&d| vec![d]).unwrap_or_default();
                rem_len = 1;
            }

            let in_range = xi < x_len;
            xi += 1;
            if !(in_range || !rem.is_empty()) {
                break;
            }
            let budget = sd;
            sd -= 1;
            if budget == 0 {
                break;
            }
        }

        sticky = rem.iter().any(|&r| r != 0) || xi < x_len;
    }

    if qd.first() == Some(&0) && qd.len() > 1 {
        qd.remove(0);
    }
    trim_trailing(&mut qd);

    let mut q = Decimal::from_parts(sign, qd, e);
    if q.digits.iter().all(|&d| d == 0) {
        return Ok(Decimal::zero());
    }
    let sd = if dp { pr + q.base10_exponent() + 1 } else { pr };
    round(&mut q, sd, rm, sticky, w.is_external())?;
    Ok(q)
}

/// Integer part of `x / y`, truncated toward zero.
pub(crate) fn divide_to_integer(x: &Decimal, y: &Decimal, w: Working) -> DecimalResult<Decimal> {
    let q = divide(x, y, w, Some(0), true, None)?;
    finish(q, w)
}

/// `x - trunc(x / y) * y`, carrying the sign of `x`.
pub(crate) fn modulo(x: &Decimal, y: &Decimal, w: Working) -> DecimalResult<Decimal> {
    if y.is_zero() {
        return Err(DecimalError::NotANumber(format!("{} mod 0", x)));
    }
    if x.is_zero() {
        return finish(x.clone(), w);
    }
    let exact = Working::exact(w.precision);
    let q = divide(x, y, exact, Some(0), true, None)?;
    let product = multiply(&q, y, exact)?;
    minus(x, &product, w)
}
