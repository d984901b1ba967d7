// ============================================================================
// Decimal Context
// Precision, rounding policy and notation thresholds for decimal operations
// ============================================================================

use super::errors::{DecimalError, DecimalResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest precision, decimal-place or significant-digit argument accepted.
pub const MAX_DIGITS: u32 = 1_000_000_000;

/// Largest magnitude of the base-10^7 exponent (`⌊(2^53 - 1) / 7⌋`).
pub const MAX_E: i64 = 1_286_742_750_677_284;

// ============================================================================
// Rounding Mode
// ============================================================================

/// Rounding policy applied when a result has more digits than allowed.
///
/// The discriminants match the conventional numbering 0..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum RoundingMode {
    /// Away from zero
    Up = 0,
    /// Toward zero (truncate)
    Down = 1,
    /// Toward +∞
    Ceil = 2,
    /// Toward -∞
    Floor = 3,
    /// Nearest; ties away from zero
    #[default]
    HalfUp = 4,
    /// Nearest; ties toward zero
    HalfDown = 5,
    /// Nearest; ties to the even neighbour (banker's rounding)
    HalfEven = 6,
    /// Nearest; ties toward +∞
    HalfCeil = 7,
    /// Nearest; ties toward -∞
    HalfFloor = 8,
}

impl RoundingMode {
    /// All modes in numeric order.
    pub const ALL: [RoundingMode; 9] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceil,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
        RoundingMode::HalfCeil,
        RoundingMode::HalfFloor,
    ];

    /// True for the five nearest-neighbour policies.
    #[inline]
    pub fn is_half(self) -> bool {
        (self as u8) >= 4
    }
}

impl TryFrom<u8> for RoundingMode {
    type Error = DecimalError;

    fn try_from(value: u8) -> DecimalResult<Self> {
        RoundingMode::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| DecimalError::InvalidArgument(format!("rounding mode {}", value)))
    }
}

// ============================================================================
// Decimal Context
// ============================================================================

/// Configuration captured by every rounding decimal operation.
///
/// Contexts are plain values: each caller owns its own, so independent
/// contexts never interfere.
///
/// # Example
/// ```
/// use arbnum::{Decimal, DecimalContext, RoundingMode};
///
/// let ctx = DecimalContext::default().with_precision(5).with_rounding(RoundingMode::HalfEven);
/// let third = Decimal::from(1).divided_by(&Decimal::from(3), &ctx)?;
/// assert_eq!(third.to_string(), "0.33333");
/// # Ok::<(), arbnum::DecimalError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecimalContext {
    /// Maximum significant digits of a rounded result (1..=1e9)
    pub precision: u32,

    /// Rounding policy for results exceeding `precision`
    pub rounding: RoundingMode,

    /// `to_string` uses exponential notation when the base-10 exponent is at or below this
    pub to_exp_neg: i64,

    /// `to_string` uses exponential notation when the base-10 exponent is at or above this
    pub to_exp_pos: i64,
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self {
            precision: 20,
            rounding: RoundingMode::HalfUp,
            to_exp_neg: -7,
            to_exp_pos: 21,
        }
    }
}

impl DecimalContext {
    /// Create a context with the given precision and rounding, default thresholds.
    pub fn new(precision: u32, rounding: RoundingMode) -> Self {
        Self {
            precision,
            rounding,
            ..Self::default()
        }
    }

    /// IEEE 754 decimal64-like preset: 16 digits, half-even.
    pub fn decimal64() -> Self {
        Self::new(16, RoundingMode::HalfEven)
    }

    /// IEEE 754 decimal128-like preset: 34 digits, half-even.
    pub fn decimal128() -> Self {
        Self::new(34, RoundingMode::HalfEven)
    }

    /// Builder method: Set precision
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method: Set rounding mode
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Builder method: Set exponential-notation thresholds
    pub fn with_exp_thresholds(mut self, to_exp_neg: i64, to_exp_pos: i64) -> Self {
        self.to_exp_neg = to_exp_neg;
        self.to_exp_pos = to_exp_pos;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> DecimalResult<()> {
        if self.precision < 1 || self.precision > MAX_DIGITS {
            return Err(DecimalError::InvalidArgument(format!(
                "precision {} outside 1..={}",
                self.precision, MAX_DIGITS
            )));
        }
        if self.to_exp_neg > 0 || self.to_exp_neg < -MAX_E {
            return Err(DecimalError::InvalidArgument(format!(
                "to_exp_neg {}",
                self.to_exp_neg
            )));
        }
        if self.to_exp_pos < 0 || self.to_exp_pos > MAX_E {
            return Err(DecimalError::InvalidArgument(format!(
                "to_exp_pos {}",
                self.to_exp_pos
            )));
        }
        Ok(())
    }

    /// Rounding working state for a public operation.
    pub(crate) fn working(&self) -> DecimalResult<Working> {
        self.validate()?;
        Ok(Working {
            precision: self.precision as i64,
            rounding: Some(self.rounding),
        })
    }
}

// ============================================================================
// Working Precision
// ============================================================================

/// Precision state threaded through internal algorithms.
///
/// `rounding: None` is the exact mode used for intermediate steps: results
/// are truncated rather than rounded and the exponent range is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Working {
    pub precision: i64,
    pub rounding: Option<RoundingMode>,
}

impl Working {
    /// Exact mode at the given precision.
    pub fn exact(precision: i64) -> Self {
        Self { precision, rounding: None }
    }

    /// Whether final rounding and range checks apply.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.rounding.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = DecimalContext::default();
        assert_eq!(ctx.precision, 20);
        assert_eq!(ctx.rounding, RoundingMode::HalfUp);
        assert_eq!(ctx.to_exp_neg, -7);
        assert_eq!(ctx.to_exp_pos, 21);
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(DecimalContext::decimal64().precision, 16);
        assert_eq!(DecimalContext::decimal128().precision, 34);
        assert_eq!(DecimalContext::decimal128().rounding, RoundingMode::HalfEven);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(DecimalContext::default().with_precision(0).validate().is_err());
        assert!(DecimalContext::default().with_precision(MAX_DIGITS + 1).validate().is_err());
        assert!(DecimalContext::default().with_exp_thresholds(1, 21).validate().is_err());
        assert!(DecimalContext::default().with_exp_thresholds(-7, -1).validate().is_err());
    }

    #[test]
    fn test_rounding_mode_numbering() {
        assert_eq!(RoundingMode::try_from(0).unwrap(), RoundingMode::Up);
        assert_eq!(RoundingMode::try_from(6).unwrap(), RoundingMode::HalfEven);
        assert_eq!(RoundingMode::try_from(8).unwrap(), RoundingMode::HalfFloor);
        assert!(RoundingMode::try_from(9).is_err());
        assert!(!RoundingMode::Floor.is_half());
        assert!(RoundingMode::HalfDown.is_half());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_context_serde() {
        let ctx = DecimalContext::decimal64();
        let json = serde_json::to_string(&ctx).unwrap();
        let back: DecimalContext = serde_json::from_str(&json).unwrap();
        assert_eq!(ctx, back);
    }
}
