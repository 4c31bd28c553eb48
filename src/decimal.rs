//! The decimal intermediate representation and IEEE 754 bit layout helpers.
//!
//! `DecimalFloat` is the canonical meeting point of every conversion in this
//! crate: the decoder produces one, the encoder consumes one, and the scanner
//! and formatter translate between it and text.

/// Number of stored mantissa bits in a binary64 value.
pub(crate) const MANTISSA_BITS: i32 = 52;

/// Number of biased exponent bits in a binary64 value.
pub(crate) const EXPONENT_BITS: i32 = 11;

/// The IEEE 754 binary64 exponent bias.
pub(crate) const BIAS: i32 = 1023;

/// Bit pattern of positive zero.
pub const ZERO_BITS: u64 = 0;

/// Bit pattern of negative zero.
pub const NEG_ZERO_BITS: u64 = 0x8000_0000_0000_0000;

/// Bit pattern of positive infinity.
pub const INFINITY_BITS: u64 = 0x7ff0_0000_0000_0000;

/// Bit pattern of negative infinity.
pub const NEG_INFINITY_BITS: u64 = 0xfff0_0000_0000_0000;

/// Bit pattern of the canonical quiet NaN.
pub const NAN_BITS: u64 = 0x7ff8_0000_0000_0000;

/// Bit pattern of the canonical quiet NaN with the sign bit set.
pub const NEG_NAN_BITS: u64 = 0xfff8_0000_0000_0000;

/// The four disjoint kinds a binary64 value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatKind {
    /// Not a number.
    Nan,
    /// Positive or negative infinity.
    Infinity,
    /// Positive or negative zero.
    Zero,
    /// A finite nonzero value, normal or subnormal.
    Normal,
}

/// Decimal components of a binary64 value.
///
/// For `Normal` the represented magnitude is `significand × 10^exponent`.
/// `negative` is meaningful for every kind, including `Zero` and `Nan`.
///
/// The decoder always produces a canonical value whose significand is not
/// divisible by 10; the encoder accepts non-canonical input as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalFloat {
    /// Which of the four binary64 kinds this value is.
    pub kind: FloatKind,
    /// Sign of the value.
    pub negative: bool,
    /// Decimal significand; meaningful only for `Normal`.
    pub significand: u64,
    /// Decimal exponent; meaningful only for `Normal`.
    pub exponent: i32,
}

impl DecimalFloat {
    /// A special (non-`Normal`) value of the given kind and sign.
    pub(crate) fn special(kind: FloatKind, negative: bool) -> Self {
        DecimalFloat {
            kind,
            negative,
            significand: 0,
            exponent: 0,
        }
    }
}

/// Raw fields of a binary64 bit pattern.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IeeeParts {
    pub(crate) kind: FloatKind,
    pub(crate) negative: bool,
    /// The 52 stored mantissa bits, without the implicit leading bit.
    pub(crate) mantissa: u64,
    /// The biased exponent field.
    pub(crate) exponent: u32,
}

/// Split a bit pattern into sign, biased exponent and stored mantissa, and
/// classify it.
pub(crate) fn breakup(bits: u64) -> IeeeParts {
    let negative = bits >> (MANTISSA_BITS + EXPONENT_BITS) & 1 != 0;
    let mantissa = bits & ((1u64 << MANTISSA_BITS) - 1);
    let exponent = (bits >> MANTISSA_BITS) as u32 & ((1u32 << EXPONENT_BITS) - 1);
    let kind = if exponent == (1u32 << EXPONENT_BITS) - 1 {
        if mantissa != 0 {
            FloatKind::Nan
        } else {
            FloatKind::Infinity
        }
    } else if exponent != 0 || mantissa != 0 {
        FloatKind::Normal
    } else {
        FloatKind::Zero
    };
    IeeeParts {
        kind,
        negative,
        mantissa,
        exponent,
    }
}

/// Divide trailing decimal zeros out of the significand, compensating in the
/// exponent.
///
/// This is the canonicalization that makes the decimal representation
/// unique. Returns `false` if the exponent adjustment overflows `i32`.
pub(crate) fn normalize(significand: &mut u64, exponent: &mut i32) -> bool {
    if *significand == 0 {
        return true;
    }
    let mut e = *exponent as i64;
    while *significand % 100 == 0 {
        *significand /= 100;
        e += 2;
    }
    if *significand % 10 == 0 {
        *significand /= 10;
        e += 1;
    }
    if e > i32::MAX as i64 {
        return false;
    }
    *exponent = e as i32;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakup_one() {
        let parts = breakup(1.0f64.to_bits());
        assert_eq!(parts.kind, FloatKind::Normal);
        assert!(!parts.negative);
        assert_eq!(parts.mantissa, 0);
        assert_eq!(parts.exponent, 1023);
    }

    #[test]
    fn test_breakup_negative_zero() {
        let parts = breakup(NEG_ZERO_BITS);
        assert_eq!(parts.kind, FloatKind::Zero);
        assert!(parts.negative);
    }

    #[test]
    fn test_breakup_specials() {
        assert_eq!(breakup(NAN_BITS).kind, FloatKind::Nan);
        assert_eq!(breakup(NEG_NAN_BITS).kind, FloatKind::Nan);
        assert!(breakup(NEG_NAN_BITS).negative);
        assert_eq!(breakup(INFINITY_BITS).kind, FloatKind::Infinity);
        assert_eq!(breakup(NEG_INFINITY_BITS).kind, FloatKind::Infinity);
    }

    #[test]
    fn test_breakup_subnormal() {
        // Smallest positive subnormal: biased exponent 0, mantissa 1.
        let parts = breakup(1);
        assert_eq!(parts.kind, FloatKind::Normal);
        assert_eq!(parts.exponent, 0);
        assert_eq!(parts.mantissa, 1);
    }

    #[test]
    fn test_normalize_strips_trailing_zeros() {
        let mut significand = 150_000u64;
        let mut exponent = -2i32;
        assert!(normalize(&mut significand, &mut exponent));
        assert_eq!(significand, 15);
        assert_eq!(exponent, 2);
    }

    #[test]
    fn test_normalize_keeps_canonical_value() {
        let mut significand = 123u64;
        let mut exponent = 7i32;
        assert!(normalize(&mut significand, &mut exponent));
        assert_eq!(significand, 123);
        assert_eq!(exponent, 7);
    }

    #[test]
    fn test_normalize_zero() {
        let mut significand = 0u64;
        let mut exponent = 5i32;
        assert!(normalize(&mut significand, &mut exponent));
        assert_eq!(significand, 0);
        assert_eq!(exponent, 5);
    }
}
