// ============================================================================
// Integer Parsing
// Decimal strings (with exponent notation) and arbitrary-radix strings
// ============================================================================

use super::big_integer::{BigInteger, MAX_SAFE_INTEGER};
use super::errors::{IntegerError, IntegerResult};
use super::limbs::{self, Limbs, LOG_BASE};
use std::str::FromStr;

/// Digit alphabet used when none is supplied: `0-9` then `a-z`.
pub const DEFAULT_ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Most decimal digits an exponent-notation string may expand to
/// (10^7 limbs).
pub const MAX_PARSED_DIGITS: u64 = 70_000_000;

// ============================================================================
// Decimal Parsing
// ============================================================================

/// Split a string of ASCII decimal digits into limbs.
fn digits_to_limbs(digits: &str) -> Limbs {
    let bytes = digits.as_bytes();
    let mut out = Limbs::with_capacity(bytes.len() / LOG_BASE + 1);
    let mut end = bytes.len();
    while end > 0 {
        let start = end.saturating_sub(LOG_BASE);
        let limb = bytes[start..end]
            .iter()
            .fold(0u32, |acc, &b| acc * 10 + (b - b'0') as u32);
        out.push(limb);
        end = start;
    }
    limbs::trim(&mut out);
    out
}

/// Parse `-?digits`, optionally followed by a fractional part and exponent
/// (`1.5e3`). The scaled value must remain an integer.
pub(crate) fn parse_decimal(text: &str) -> IntegerResult<BigInteger> {
    let invalid = || IntegerError::InvalidInteger(text.to_string());
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let mut split = body.splitn(3, ['e', 'E']);
    let mantissa = split.next().unwrap_or("");
    let exponent = split.next();
    if split.next().is_some() {
        return Err(invalid());
    }

    let digits = match exponent {
        None => mantissa.to_string(),
        Some(exp_text) => {
            let exp: i64 = exp_text.parse().map_err(|_| invalid())?;
            if exp.unsigned_abs() > MAX_SAFE_INTEGER {
                return Err(invalid());
            }
            let (int_part, frac_part) = match mantissa.split_once('.') {
                Some((i, f)) => (i, f),
                None => (mantissa, ""),
            };
            if int_part.is_empty() && frac_part.is_empty() {
                return Err(invalid());
            }
            if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let scale = exp - frac_part.len() as i64;
            if scale < 0 {
                return Err(IntegerError::InvalidInteger(format!(
                    "{} (cannot include negative exponent part for integers)",
                    text
                )));
            }
            let total = (int_part.len() + frac_part.len()) as u64 + scale as u64;
            if total > MAX_PARSED_DIGITS {
                return Err(IntegerError::InvalidInteger(format!(
                    "{} (expands to {} digits, limit {})",
                    text, total, MAX_PARSED_DIGITS
                )));
            }
            let mut digits = String::with_capacity(int_part.len() + frac_part.len() + scale as usize);
            digits.push_str(int_part);
            digits.push_str(frac_part);
            digits.extend(std::iter::repeat('0').take(scale as usize));
            digits
        },
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    Ok(BigInteger::from_limbs(digits_to_limbs(&digits), negative))
}

impl FromStr for BigInteger {
    type Err = IntegerError;

    fn from_str(s: &str) -> IntegerResult<Self> {
        parse_decimal(s)
    }
}

// ============================================================================
// Radix Parsing
// ============================================================================

/// One parsed digit: an alphabet symbol or a `<value>` escape.
enum Digit {
    Symbol(usize),
    Escaped(BigInteger),
}

impl BigInteger {
    /// Parse `text` in `radix` using the default alphabet, case-insensitively.
    pub fn from_str_radix(text: &str, radix: i64) -> IntegerResult<BigInteger> {
        Self::from_str_radix_with(text, radix, DEFAULT_ALPHABET, false)
    }

    /// Parse `text` in `radix` with a custom digit alphabet.
    ///
    /// Digits outside the alphabet may be written as `<value>` escapes,
    /// e.g. `"<35><12>"` in base 36. Negative radices and the unary base 1
    /// are accepted.
    pub fn from_str_radix_with(
        text: &str,
        radix: i64,
        alphabet: &str,
        case_sensitive: bool,
    ) -> IntegerResult<BigInteger> {
        if radix == 0 {
            return Err(IntegerError::InvalidRadix("base 0 has no digits".to_string()));
        }
        let (text, alphabet) = if case_sensitive {
            (text.to_string(), alphabet.to_string())
        } else {
            (text.to_lowercase(), alphabet.to_lowercase())
        };
        if radix == 10 && alphabet == DEFAULT_ALPHABET {
            return parse_decimal(&text);
        }

        let symbols: Vec<char> = alphabet.chars().collect();
        let abs_base = radix.unsigned_abs();
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.as_str()),
        };

        let mut digits = Vec::with_capacity(body.len());
        let mut chars = body.chars();
        while let Some(c) = chars.next() {
            if let Some(value) = symbols.iter().position(|&s| s == c) {
                if value as u64 >= abs_base && !(c == '1' && abs_base == 1) {
                    return Err(IntegerError::InvalidInteger(format!(
                        "{} is not a valid digit in base {}",
                        c, radix
                    )));
                }
                digits.push(Digit::Symbol(value));
            } else if c == '<' {
                let mut escaped = String::new();
                let mut closed = false;
                for ch in chars.by_ref() {
                    if ch == '>' {
                        closed = true;
                        break;
                    }
                    escaped.push(ch);
                }
                if !closed {
                    return Err(IntegerError::InvalidInteger(format!("unterminated escape in {}", text)));
                }
                digits.push(Digit::Escaped(parse_decimal(&escaped)?));
            } else {
                return Err(IntegerError::InvalidInteger(format!("{} is not a valid character", c)));
            }
        }

        if digits.is_empty() {
            return Err(IntegerError::InvalidInteger(text));
        }

        let digits: Vec<BigInteger> = digits
            .into_iter()
            .map(|d| match d {
                Digit::Symbol(v) => BigInteger::small(v as i64),
                Digit::Escaped(v) => v,
            })
            .collect();
        Ok(Self::from_digits(&digits, &BigInteger::from(radix), negative))
    }

    /// Combine most-significant-first `digits` in `base` by Horner's rule.
    pub fn from_digits(digits: &[BigInteger], base: &BigInteger, negative: bool) -> BigInteger {
        let value = digits
            .iter()
            .fold(BigInteger::zero(), |acc, digit| acc.times(base).plus(digit));
        if negative {
            value.negate()
        } else {
            value
        }
    }
}
