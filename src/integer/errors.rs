// ============================================================================
// Integer Errors
// Error types for arbitrary-precision integer operations
// ============================================================================

use std::fmt;

/// Errors that can occur during integer construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IntegerError {
    /// Input string or native value is not an integer
    InvalidInteger(String),
    /// Radix cannot represent the requested value
    InvalidRadix(String),
    /// Attempted division (or reduction) by zero
    DivisionByZero,
    /// Exponent does not fit the native safe-integer range
    ExponentTooLarge(String),
    /// Modular inverse requested for operands sharing a factor
    NotCoprime { value: String, modulus: String },
    /// Shift amount exceeds the supported range
    ShiftTooLarge(String),
}

impl fmt::Display for IntegerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegerError::InvalidInteger(input) => write!(f, "invalid integer: {}", input),
            IntegerError::InvalidRadix(reason) => write!(f, "invalid radix: {}", reason),
            IntegerError::DivisionByZero => write!(f, "division by zero"),
            IntegerError::ExponentTooLarge(exp) => {
                write!(f, "the exponent {} is too large", exp)
            },
            IntegerError::NotCoprime { value, modulus } => {
                write!(f, "{} and {} are not co-prime", value, modulus)
            },
            IntegerError::ShiftTooLarge(amount) => {
                write!(f, "{} is too large for shifting", amount)
            },
        }
    }
}

impl std::error::Error for IntegerError {}

/// Result type alias for integer operations
pub type IntegerResult<T> = Result<T, IntegerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(IntegerError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            IntegerError::InvalidInteger("12a".to_string()).to_string(),
            "invalid integer: 12a"
        );
        assert_eq!(
            IntegerError::NotCoprime {
                value: "4".to_string(),
                modulus: "8".to_string()
            }
            .to_string(),
            "4 and 8 are not co-prime"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(IntegerError::DivisionByZero, IntegerError::DivisionByZero);
        assert_ne!(
            IntegerError::DivisionByZero,
            IntegerError::ExponentTooLarge("1e20".to_string())
        );
    }
}
