//! Error types for binary64 conversion operations.

use thiserror::Error;

/// Errors that can occur while converting between binary64 bit patterns
/// and decimal text.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FloatError {
    /// The input text does not start with a valid decimal numeral.
    #[error("input is not a valid decimal numeral")]
    Syntax,

    /// The decimal components describe a magnitude outside the finite
    /// binary64 range.
    #[error("magnitude out of range for binary64")]
    OutOfRange,
}

/// An out-of-band range condition reported alongside a successfully
/// parsed value.
///
/// The parse still delivers a value: a correctly signed infinity on
/// overflow, a correctly signed zero on underflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeCondition {
    /// The literal's magnitude exceeds the largest finite binary64 value.
    Overflow,
    /// The literal's magnitude is too small for the smallest subnormal.
    Underflow,
}
