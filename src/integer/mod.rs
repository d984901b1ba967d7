// ============================================================================
// Integer Module
// Arbitrary-precision signed integers over base-10^7 limbs
// ============================================================================
//
// This module provides:
// - BigInteger: immutable sign-magnitude integer
// - IntegerError: error types for integer construction and arithmetic
// - RadixDigits: digit expansion in arbitrary bases
//
// Design principles:
// - Canonical representation (no high limbs of zero, no negative zero)
// - Fallible operations return Result; operator traits panic like integer primitives
// - Values under 10^14 take native fast paths

mod big_integer;
mod bitwise;
mod cache;
pub(crate) mod division;
mod errors;
pub(crate) mod limbs;
mod number_theory;
mod parse;
mod primality;
mod radix;
mod random;

pub use big_integer::{BigInteger, MAX_SAFE_INTEGER};
pub use bitwise::MAX_SHIFT;
pub use cache::CACHE_BOUND;
pub use errors::{IntegerError, IntegerResult};
pub use parse::{DEFAULT_ALPHABET, MAX_PARSED_DIGITS};
pub use primality::DEFAULT_PROBABLE_PRIME_ROUNDS;
pub use radix::RadixDigits;
