// ============================================================================
// Decimal Errors
// Error types for arbitrary-precision decimal operations
// ============================================================================

use std::fmt;

/// Errors that can occur during decimal construction, arithmetic and formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecimalError {
    /// Malformed input string, non-finite float or out-of-range argument
    InvalidArgument(String),
    /// Attempted division by zero
    DivisionByZero,
    /// Result is undefined (log or sqrt of a negative, bad log base, etc.)
    NotANumber(String),
    /// Result would be infinite (log of zero, zero to a negative power)
    InfinityResult(String),
    /// Base-10 exponent outside the representable range
    ExponentOutOfRange(i64),
    /// Working precision exceeds the digits available for a stored constant
    PrecisionLimitExceeded { requested: i64, available: i64 },
    /// An iterative algorithm hit its iteration limit before converging
    NoConvergence { operation: &'static str, iterations: u64 },
}

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecimalError::InvalidArgument(arg) => write!(f, "invalid argument: {}", arg),
            DecimalError::DivisionByZero => write!(f, "division by zero"),
            DecimalError::NotANumber(op) => write!(f, "not a number: {}", op),
            DecimalError::InfinityResult(op) => write!(f, "result is infinite: {}", op),
            DecimalError::ExponentOutOfRange(exp) => {
                write!(f, "exponent out of range: {}", exp)
            },
            DecimalError::PrecisionLimitExceeded { requested, available } => write!(
                f,
                "precision limit exceeded: requested {} digits, {} available",
                requested, available
            ),
            DecimalError::NoConvergence { operation, iterations } => {
                write!(f, "{} did not converge after {} iterations", operation, iterations)
            },
        }
    }
}

impl std::error::Error for DecimalError {}

/// Result type alias for decimal operations
pub type DecimalResult<T> = Result<T, DecimalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DecimalError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            DecimalError::ExponentOutOfRange(9_000_000_000_000_000).to_string(),
            "exponent out of range: 9000000000000000"
        );
        assert_eq!(
            DecimalError::PrecisionLimitExceeded { requested: 200, available: 115 }.to_string(),
            "precision limit exceeded: requested 200 digits, 115 available"
        );
        assert_eq!(
            DecimalError::NoConvergence { operation: "sqrt", iterations: 144 }.to_string(),
            "sqrt did not converge after 144 iterations"
        );
    }

    #[test]
    fn test_error_kinds_distinct() {
        assert_ne!(
            DecimalError::NotANumber("ln".to_string()),
            DecimalError::InfinityResult("ln".to_string())
        );
    }
}
