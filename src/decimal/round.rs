// ============================================================================
// Rounding
// The shared significant-digit rounding routine
// ============================================================================

use super::context::{RoundingMode, MAX_E};
use super::decimal::Decimal;
use super::errors::{DecimalError, DecimalResult};
use super::words::{digit_count, pow10, BASE, LOG_BASE};

/// Round `x` in place to `sd` significant digits.
///
/// `sd` may be zero or negative, in which case the result is either zero
/// or a single unit at the corresponding power of ten. `rm: None` truncates.
/// `sticky` reports nonzero digits known to exist beyond those stored in
/// `x` (e.g. an inexact division remainder). With `check_range`, an
/// exponent outside `±MAX_E` words is an error.
pub(crate) fn round(
    x: &mut Decimal,
    sd: i64,
    rm: Option<RoundingMode>,
    sticky: bool,
    check_range: bool,
) -> DecimalResult<()> {
    if x.is_zero() {
        return Ok(());
    }

    // Locate the rounding digit: word index `xdi`, digit `j` within word `w`.
    let mut n = digit_count(x.digits[0]);
    let mut i = sd - n;
    let j: i64;
    let w: u32;
    let mut xdi: usize;

    if i < 0 {
        i += LOG_BASE;
        j = sd;
        xdi = 0;
        w = x.digits[0];
    } else {
        xdi = ((i + 1 + LOG_BASE - 1) / LOG_BASE) as usize;
        if xdi >= x.digits.len() {
            return Ok(());
        }
        w = x.digits[xdi];
        n = digit_count(w);
        i %= LOG_BASE;
        j = i - LOG_BASE + n;
    }

    let mut do_round = false;
    if let Some(rm) = rm {
        let below = n - j - 1;
        let (rd, rest) = if below >= LOG_BASE {
            (0u64, w as u64)
        } else {
            let k = pow10(below);
            (w as u64 / k % 10, w as u64 % k)
        };

        let more = sd < 0 || x.digits.get(xdi + 1).is_some() || rest != 0 || sticky;
        let negative = x.sign < 0;

        do_round = if !rm.is_half() {
            (rd != 0 || more)
                && (rm == RoundingMode::Up
                    || rm == if negative { RoundingMode::Floor } else { RoundingMode::Ceil })
        } else {
            let preceding_odd = || {
                let preceding = if i > 0 {
                    if j > 0 {
                        w as u64 / pow10(n - j)
                    } else {
                        0
                    }
                } else if xdi > 0 {
                    x.digits[xdi - 1] as u64
                } else {
                    0
                };
                preceding % 10 % 2 == 1
            };
            let toward = if negative { RoundingMode::HalfFloor } else { RoundingMode::HalfCeil };
            rd > 5
                || (rd == 5
                    && (rm == RoundingMode::HalfUp
                        || more
                        || (rm == RoundingMode::HalfEven && preceding_odd())
                        || rm == toward))
        };
    }

    if sd < 1 {
        if do_round {
            // Becomes 1 in the last kept decimal place.
            let k = x.base10_exponent();
            let dp = sd - k - 1;
            x.digits.truncate(1);
            x.digits[0] = pow10((-dp).rem_euclid(LOG_BASE)) as u32;
            x.exponent = (-dp).div_euclid(LOG_BASE);
        } else {
            *x = Decimal::zero();
        }
        return check_exponent(x, check_range);
    }

    // Drop the digits after the rounding position.
    let mut k: u32;
    if i == 0 {
        x.digits.truncate(xdi);
        k = 1;
        xdi -= 1;
    } else {
        x.digits.truncate(xdi + 1);
        k = pow10(LOG_BASE - i) as u32;
        x.digits[xdi] = if j > 0 {
            ((w as u64 / pow10(n - j) % pow10(j)) as u32) * k
        } else {
            0
        };
    }

    if do_round {
        loop {
            if xdi == 0 {
                x.digits[0] += k;
                if x.digits[0] == BASE {
                    x.digits[0] = 1;
                    x.exponent += 1;
                }
                break;
            }
            x.digits[xdi] += k;
            if x.digits[xdi] != BASE {
                break;
            }
            x.digits[xdi] = 0;
            xdi -= 1;
            k = 1;
        }
    }

    while x.digits.len() > 1 && x.digits[x.digits.len() - 1] == 0 {
        x.digits.pop();
    }
    if x.digits[0] == 0 {
        *x = Decimal::zero();
    }

    check_exponent(x, check_range)
}

fn check_exponent(x: &Decimal, check_range: bool) -> DecimalResult<()> {
    if check_range && (x.exponent > MAX_E || x.exponent < -MAX_E) {
        return Err(DecimalError::ExponentOutOfRange(x.base10_exponent()));
    }
    Ok(())
}

/// Owned convenience wrapper around [`round`].
pub(crate) fn rounded(
    mut x: Decimal,
    sd: i64,
    rm: Option<RoundingMode>,
    check_range: bool,
) -> DecimalResult<Decimal> {
    round(&mut x, sd, rm, false, check_range)?;
    Ok(x)
}
