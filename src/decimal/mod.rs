// ============================================================================
// Decimal Module
// Arbitrary-precision decimals with explicit rounding contexts
// ============================================================================
//
// This module provides:
// - Decimal: immutable decimal value over base-10^7 words
// - DecimalContext: precision, rounding mode and notation thresholds
// - RoundingMode: the nine rounding policies
// - DecimalError: error types for decimal construction and arithmetic
//
// Design principles:
// - No global state: every rounding operation takes a context
// - Intermediate steps truncate; only the final result is rounded
// - Exponents are range-checked at public boundaries

mod arithmetic;
mod context;
mod convert;
#[allow(clippy::module_inception)]
mod decimal;
mod errors;
mod format;
mod parse;
mod round;
mod transcendental;
mod words;

pub use context::{DecimalContext, RoundingMode, MAX_DIGITS, MAX_E};
pub use decimal::Decimal;
pub use errors::{DecimalError, DecimalResult};
pub use transcendental::LN10_PRECISION;
