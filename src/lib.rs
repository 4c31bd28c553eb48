//! # binary64-rs
//!
//! Conversion engine between IEEE 754 binary64 bit patterns and decimal
//! text, built around the shortest round-trip guarantee: [`format`] emits
//! the unique shortest digit string that [`parse`] maps back to exactly the
//! same bit pattern.
//!
//! ## Overview
//!
//! The crate works on raw `u64` bit patterns rather than `f64` so callers
//! keep full control over NaN payloads and the sign of zero. Four
//! operations cover the conversion square:
//!
//! 1. **Decode** (`bits → DecimalFloat`): the shortest canonical decimal
//!    significand/exponent pair for a bit pattern
//! 2. **Encode** (`DecimalFloat → bits`): the correctly rounded bit pattern
//!    for arbitrary decimal components
//! 3. **Parse** (`text → bits`): scan a decimal literal prefix and encode it
//! 4. **Format** (`bits → text`): decode and render, fixed or scientific
//!
//! Every operation is a pure function of its inputs plus constant tables;
//! nothing blocks, nothing is shared, and formatting fits a fixed 25-byte
//! buffer ([`MAX_FORMAT_LEN`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use binary64_rs::{format, parse};
//!
//! let parsed = parse("712.292").unwrap();
//! assert_eq!(parsed.consumed, 7);
//! assert_eq!(f64::from_bits(parsed.bits), 712.292);
//!
//! // Formatting always produces the shortest round-tripping string.
//! assert_eq!(format(parsed.bits), "712.292");
//! assert_eq!(format(0.1f64.to_bits()), "0.1");
//! assert_eq!(format((3.33444712e-7f64).to_bits()), "3.33444712e-07");
//! ```
//!
//! ## Range conditions
//!
//! A syntactically valid literal whose magnitude leaves the binary64 range
//! still parses: the result is a correctly signed infinity or zero, and the
//! excursion is reported alongside instead of as an error.
//!
//! ```rust
//! use binary64_rs::{parse, RangeCondition, INFINITY_BITS};
//!
//! let big = parse("1e10000").unwrap();
//! assert_eq!(big.bits, INFINITY_BITS);
//! assert_eq!(big.range, Some(RangeCondition::Overflow));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bits;
mod cast;
mod decimal;
mod decode;
mod encode;
mod error;
mod format;
mod scan;
mod tables;

pub use decimal::{
    DecimalFloat, FloatKind, INFINITY_BITS, NAN_BITS, NEG_INFINITY_BITS, NEG_NAN_BITS,
    NEG_ZERO_BITS, ZERO_BITS,
};
pub use error::{FloatError, RangeCondition};
pub use format::MAX_FORMAT_LEN;
pub use scan::Scanned;

use encode::{decimal_magnitude, MAX_DECIMAL_MAGNITUDE, MIN_DECIMAL_MAGNITUDE};

/// Convenience type alias for Results with FloatError.
pub type Result<T> = std::result::Result<T, FloatError>;

/// Outcome of parsing a decimal literal into a bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed {
    /// The resulting binary64 bit pattern.
    pub bits: u64,
    /// Number of input bytes consumed.
    pub consumed: usize,
    /// Overflow or underflow encountered while the value was still
    /// produced, if any.
    pub range: Option<RangeCondition>,
}

/// Format a bit pattern as the shortest string that parses back to it.
pub fn format(bits: u64) -> String {
    let mut buf = [0u8; MAX_FORMAT_LEN];
    let len = format::format_bits(bits, &mut buf);
    // The formatter writes pure ASCII.
    String::from_utf8_lossy(&buf[..len]).into_owned()
}

/// Format a bit pattern into a caller-provided buffer of at least
/// [`MAX_FORMAT_LEN`] bytes, returning the number of bytes written.
///
/// # Panics
///
/// Panics if `buf` is shorter than [`MAX_FORMAT_LEN`].
pub fn format_into(bits: u64, buf: &mut [u8]) -> usize {
    format::format_bits(bits, buf)
}

/// Decode a bit pattern into canonical decimal components.
///
/// For `Normal` results the significand is never divisible by 10 and is the
/// shortest one that encodes back to `bits`.
pub fn decode(bits: u64) -> DecimalFloat {
    decode::decode_bits(bits)
}

/// Encode decimal components into the nearest binary64 bit pattern.
///
/// Special kinds map to their canonical patterns. A `Normal` value with a
/// zero significand encodes as a signed zero. Returns
/// [`FloatError::OutOfRange`] when the magnitude exceeds the finite
/// binary64 range in either direction.
pub fn encode(dec: &DecimalFloat) -> Result<u64> {
    let sign = (dec.negative as u64) << 63;
    match dec.kind {
        FloatKind::Nan => Ok(if dec.negative { NEG_NAN_BITS } else { NAN_BITS }),
        FloatKind::Infinity => Ok(sign | INFINITY_BITS),
        FloatKind::Zero => Ok(sign),
        FloatKind::Normal => {
            let mut dec = *dec;
            if dec.significand == 0 {
                return Ok(sign);
            }
            if !decimal::normalize(&mut dec.significand, &mut dec.exponent)
                || !(MIN_DECIMAL_MAGNITUDE..=MAX_DECIMAL_MAGNITUDE)
                    .contains(&decimal_magnitude(&dec))
            {
                return Err(FloatError::OutOfRange);
            }
            encode::encode_normal(&dec).ok_or(FloatError::OutOfRange)
        }
    }
}

/// Parse a decimal literal prefix into a bit pattern.
///
/// Trailing bytes after the numeral are not an error; `consumed` reports
/// how far the parse got. Out-of-range magnitudes still produce a value (a
/// signed infinity or zero) with the condition recorded in `range`.
pub fn parse(text: &str) -> Result<Parsed> {
    let scanned = scan::scan(text.as_bytes())?;
    let (bits, range) = resolve(&scanned);
    Ok(Parsed {
        bits,
        consumed: scanned.consumed,
        range,
    })
}

/// Parse a decimal literal that must span the whole input.
///
/// Like [`parse`] but any unconsumed trailing byte is a
/// [`FloatError::Syntax`] error, so `"0x101"` is rejected rather than read
/// as `0`.
pub fn parse_all(text: &str) -> Result<Parsed> {
    let parsed = parse(text)?;
    if parsed.consumed != text.len() {
        return Err(FloatError::Syntax);
    }
    Ok(parsed)
}

/// Scan a decimal literal prefix into decimal components without encoding.
///
/// Exposes the exactness flag: whether every scanned digit was captured in
/// the 64-bit significand. Unlike [`parse`], finite components are returned
/// as scanned; magnitudes beyond the binary64 range are the caller's to
/// detect from the exponent.
pub fn parse_components(text: &str) -> Result<Scanned> {
    scan::scan(text.as_bytes())
}

/// Interpret a bit pattern as an exact `i64`.
///
/// Returns `None` unless the value is an integer in `i64` range; both
/// zeros map to `0`.
pub fn to_i64(bits: u64) -> Option<i64> {
    cast::bits_to_i64(bits)
}

/// Interpret a bit pattern as an exact `u64`.
///
/// Returns `None` unless the value is a non-negative integer in `u64`
/// range; negative zero still maps to `0`.
pub fn to_u64(bits: u64) -> Option<u64> {
    cast::bits_to_u64(bits)
}

/// Turn scanned components into bits, applying the range gates.
fn resolve(scanned: &Scanned) -> (u64, Option<RangeCondition>) {
    let dec = &scanned.value;
    let sign = (dec.negative as u64) << 63;
    match dec.kind {
        FloatKind::Nan => (
            if dec.negative { NEG_NAN_BITS } else { NAN_BITS },
            scanned.range,
        ),
        FloatKind::Infinity => (sign | INFINITY_BITS, scanned.range),
        FloatKind::Zero => (sign, scanned.range),
        FloatKind::Normal => {
            // Gate on the magnitude of the whole value, not the exponent
            // alone: a wide significand can put the exponent far past the
            // subnormal floor while the value stays representable.
            let magnitude = decimal_magnitude(dec);
            if magnitude < MIN_DECIMAL_MAGNITUDE {
                return (sign, Some(RangeCondition::Underflow));
            }
            if magnitude > MAX_DECIMAL_MAGNITUDE {
                return (sign | INFINITY_BITS, Some(RangeCondition::Overflow));
            }
            match encode::encode_normal(dec) {
                None => (sign | INFINITY_BITS, Some(RangeCondition::Overflow)),
                // A nonzero literal that rounded all the way to zero.
                Some(bits) if bits << 1 == 0 => (bits, Some(RangeCondition::Underflow)),
                Some(bits) => (bits, None),
            }
        }
    }
}
