// ============================================================================
// Decimal Formatting
// Normal, fixed, exponential and precision string renderings
// ============================================================================

use super::context::{DecimalContext, RoundingMode};
use super::decimal::{check_digits_arg, Decimal};
use super::errors::DecimalResult;
use super::round::rounded;
use super::words::digits_to_string;
use std::fmt;

fn zeros(count: i64) -> String {
    "0".repeat(count.max(0) as usize)
}

/// Render `x` in normal or exponential notation, padding with zeros up to
/// `sd` significant digits when given.
fn render(x: &Decimal, exponential: bool, sd: Option<i64>) -> String {
    let e = x.base10_exponent();
    let mut s = digits_to_string(&x.digits);
    let len = s.len() as i64;
    let pad = |used: i64| sd.map(|sd| sd - used).filter(|&k| k > 0);

    if exponential {
        if let Some(k) = pad(len) {
            s.insert(1, '.');
            s.push_str(&zeros(k));
        } else if len > 1 {
            s.insert(1, '.');
        }
        s.push('e');
        if e >= 0 {
            s.push('+');
        }
        s.push_str(&e.to_string());
    } else if e < 0 {
        s = format!("0.{}{}", zeros(-e - 1), s);
        if let Some(k) = pad(len) {
            s.push_str(&zeros(k));
        }
    } else if e >= len {
        s.push_str(&zeros(e + 1 - len));
        if let Some(k) = pad(e + 1) {
            s.push('.');
            s.push_str(&zeros(k));
        }
    } else {
        if e + 1 < len {
            s.insert((e + 1) as usize, '.');
        }
        if let Some(k) = pad(len) {
            if e + 1 == len {
                s.push('.');
            }
            s.push_str(&zeros(k));
        }
    }

    if x.sign < 0 {
        s.insert(0, '-');
    }
    s
}

impl Decimal {
    /// Render using the context's exponential-notation thresholds.
    pub fn to_string_with(&self, ctx: &DecimalContext) -> String {
        let e = self.base10_exponent();
        render(self, e <= ctx.to_exp_neg || e >= ctx.to_exp_pos, None)
    }

    /// Render in normal notation regardless of magnitude.
    pub fn to_plain_string(&self) -> String {
        render(self, false, None)
    }

    /// Normal notation with exactly `dp` decimal places.
    ///
    /// A negative value that rounds to zero keeps its sign: `-0.1` to zero
    /// places is `"-0"`.
    pub fn to_fixed(&self, dp: u32, rm: RoundingMode) -> DecimalResult<String> {
        let dp = check_digits_arg(dp, 0)?;
        let y = rounded(self.clone(), dp + self.base10_exponent() + 1, Some(rm), true)?;
        let s = render(&y.abs(), false, Some(dp + y.base10_exponent() + 1));
        Ok(if self.is_negative() { format!("-{}", s) } else { s })
    }

    /// Exponential notation, with `dp` digits after the point when given.
    pub fn to_exponential(&self, dp: Option<u32>, rm: RoundingMode) -> DecimalResult<String> {
        let Some(dp) = dp else {
            return Ok(render(self, true, None));
        };
        let dp = check_digits_arg(dp, 0)?;
        let y = rounded(self.clone(), dp + 1, Some(rm), true)?;
        Ok(render(&y, true, Some(dp + 1)))
    }

    /// `sd` significant digits, in exponential notation when `sd` is too
    /// few for the integer part or the value is below the default
    /// negative-exponent threshold.
    pub fn to_precision(&self, sd: u32, rm: RoundingMode) -> DecimalResult<String> {
        let sd = check_digits_arg(sd, 1)?;
        let y = rounded(self.clone(), sd, Some(rm), true)?;
        let e = y.base10_exponent();
        let to_exp_neg = DecimalContext::default().to_exp_neg;
        Ok(render(&y, sd <= e || e <= to_exp_neg, Some(sd)))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&DecimalContext::default()))
    }
}

impl From<Decimal> for String {
    fn from(value: Decimal) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_thresholds() {
        assert_eq!(dec("0.0000001").to_string(), "1e-7");
        assert_eq!(dec("0.000001").to_string(), "0.000001");
        assert_eq!(dec("123456789012345678901").to_string(), "123456789012345678901");
        assert_eq!(dec("1234567890123456789012").to_string(), "1.234567890123456789012e+21");
        assert_eq!(dec("-1.5e-10").to_string(), "-1.5e-10");
        assert_eq!(Decimal::zero().to_string(), "0");
    }

    #[test]
    fn test_custom_thresholds_and_plain() {
        let ctx = DecimalContext::default().with_exp_thresholds(-3, 3);
        assert_eq!(dec("1000").to_string_with(&ctx), "1e+3");
        assert_eq!(dec("999").to_string_with(&ctx), "999");
        assert_eq!(dec("0.001").to_string_with(&ctx), "1e-3");
        assert_eq!(dec("1e-10").to_plain_string(), "0.0000000001");
        assert_eq!(dec("1.5e25").to_plain_string(), "15000000000000000000000000");
    }

    #[test]
    fn test_to_fixed() {
        let rm = RoundingMode::HalfUp;
        assert_eq!(dec("3.14159").to_fixed(2, rm).unwrap(), "3.14");
        assert_eq!(dec("2.5").to_fixed(0, rm).unwrap(), "3");
        assert_eq!(dec("0").to_fixed(2, rm).unwrap(), "0.00");
        assert_eq!(dec("1e21").to_fixed(1, rm).unwrap(), "1000000000000000000000.0");
        assert_eq!(dec("0.000123").to_fixed(8, rm).unwrap(), "0.00012300");
        assert_eq!(dec("-0.1").to_fixed(0, rm).unwrap(), "-0");
        assert_eq!(dec("-1.005").to_fixed(2, RoundingMode::Down).unwrap(), "-1.00");
        assert_eq!(dec("99.96").to_fixed(1, rm).unwrap(), "100.0");
    }

    #[test]
    fn test_to_exponential() {
        let rm = RoundingMode::HalfUp;
        assert_eq!(dec("45.6").to_exponential(None, rm).unwrap(), "4.56e+1");
        assert_eq!(dec("45.6").to_exponential(Some(0), rm).unwrap(), "5e+1");
        assert_eq!(dec("45.6").to_exponential(Some(4), rm).unwrap(), "4.5600e+1");
        assert_eq!(dec("0.00012").to_exponential(Some(1), rm).unwrap(), "1.2e-4");
    }

    #[test]
    fn test_to_precision() {
        let rm = RoundingMode::HalfUp;
        assert_eq!(dec("45.6").to_precision(1, rm).unwrap(), "5e+1");
        assert_eq!(dec("45.6").to_precision(2, rm).unwrap(), "46");
        assert_eq!(dec("45.6").to_precision(5, rm).unwrap(), "45.600");
        assert_eq!(dec("0.000123").to_precision(2, rm).unwrap(), "0.00012");
        assert!(dec("1").to_precision(0, rm).is_err());
    }
}
