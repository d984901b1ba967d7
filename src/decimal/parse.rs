// ============================================================================
// Decimal Parsing
// String and float construction
// ============================================================================

use super::context::MAX_E;
use super::decimal::Decimal;
use super::errors::{DecimalError, DecimalResult};
use super::words::LOG_BASE;
use std::str::FromStr;

/// Exponent suffixes beyond this magnitude are out of range regardless of
/// the mantissa, so parsing saturates here.
const EXPONENT_CLAMP: i64 = 100_000_000_000_000_000;

fn parse_word(s: &str) -> u32 {
    s.bytes().fold(0, |acc, b| acc * 10 + (b - b'0') as u32)
}

/// Pack an ASCII digit string into words.
///
/// `point` is the position of the decimal point counted in digits from the
/// start of `digits`; it may be negative or past the end.
pub(crate) fn pack_digits(sign: i8, digits: &str, point: i64) -> Decimal {
    let bytes = digits.as_bytes();
    let lead = bytes.iter().take_while(|&&b| b == b'0').count();
    let end = bytes.len() - bytes.iter().rev().take_while(|&&b| b == b'0').count();
    if lead >= end {
        return Decimal::zero();
    }

    let s = &digits[lead..end];
    let mut len = s.len() as i64;
    let e = point - lead as i64 - 1;
    let exponent = e.div_euclid(LOG_BASE);

    // Digits in the first word.
    let mut i = (e + 1) % LOG_BASE;
    if e < 0 {
        i += LOG_BASE;
    }

    let mut words = Vec::with_capacity((len / LOG_BASE + 2) as usize);
    let mut tail: String;
    let pad;
    if i < len {
        if i > 0 {
            words.push(parse_word(&s[..i as usize]));
        }
        len -= LOG_BASE;
        while i < len {
            words.push(parse_word(&s[i as usize..(i + LOG_BASE) as usize]));
            i += LOG_BASE;
        }
        tail = s[i as usize..].to_string();
        pad = LOG_BASE - tail.len() as i64;
    } else {
        tail = s.to_string();
        pad = i - len;
    }
    for _ in 0..pad {
        tail.push('0');
    }
    words.push(parse_word(&tail));

    Decimal::from_parts(sign, words, exponent)
}

/// Parse `-?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?`.
///
/// With `check_range`, an exponent beyond `±MAX_E` words is rejected.
pub(crate) fn parse_decimal(text: &str, check_range: bool) -> DecimalResult<Decimal> {
    let invalid = || DecimalError::InvalidArgument(text.to_string());
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text),
    };

    let (mantissa, suffix) = match body.find(['e', 'E']) {
        Some(p) => (&body[..p], Some(&body[p + 1..])),
        None => (body, None),
    };
    let (int_part, frac_part) = match mantissa.find('.') {
        Some(p) => (&mantissa[..p], &mantissa[p + 1..]),
        None => (mantissa, ""),
    };
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(invalid());
    }

    let mut point = int_part.len() as i64;
    if let Some(suffix) = suffix {
        let magnitude = suffix.strip_prefix(['+', '-']).unwrap_or(suffix);
        if magnitude.is_empty() || !all_digits(magnitude) {
            return Err(invalid());
        }
        let shift = magnitude
            .bytes()
            .fold(0i64, |acc, b| (acc * 10 + (b - b'0') as i64).min(EXPONENT_CLAMP));
        point += if suffix.starts_with('-') { -shift } else { shift };
    }

    let coefficient = format!("{}{}", int_part, frac_part);
    let x = pack_digits(sign, &coefficient, point);
    if check_range && (x.exponent > MAX_E || x.exponent < -MAX_E) {
        return Err(DecimalError::ExponentOutOfRange(x.base10_exponent()));
    }
    Ok(x)
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> DecimalResult<Self> {
        parse_decimal(s, true)
    }
}

impl TryFrom<String> for Decimal {
    type Error = DecimalError;

    fn try_from(value: String) -> DecimalResult<Self> {
        value.parse()
    }
}

impl TryFrom<f64> for Decimal {
    type Error = DecimalError;

    fn try_from(value: f64) -> DecimalResult<Self> {
        Decimal::from_f64(value)
    }
}

impl Decimal {
    /// Convert a finite float using its shortest round-trip representation.
    ///
    /// `0.1` becomes exactly `0.1`, not the binary expansion of the double.
    pub fn from_f64(value: f64) -> DecimalResult<Decimal> {
        if !value.is_finite() {
            return Err(DecimalError::InvalidArgument(value.to_string()));
        }
        if value == 0.0 {
            return Ok(Decimal::zero());
        }
        if value.fract() == 0.0 && value.abs() < 1e7 {
            return Ok(Decimal::from_i128(value as i128));
        }
        parse_decimal(&format!("{:e}", value), true)
    }
}
