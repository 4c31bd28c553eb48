//! Exact integer casts from binary64 bit patterns.
//!
//! The conversions succeed only when the value is an integer the target
//! type can hold exactly; anything fractional, out of range or non-finite
//! is rejected.

use crate::decimal::{BIAS, MANTISSA_BITS};

/// Bit pattern of `i64::MIN` as a binary64 value, the one negative integer
/// whose magnitude does not fit the positive path.
const I64_MIN_BITS: u64 = 0xc3e0_0000_0000_0000;

/// Interpret a bit pattern as an exact `i64`.
///
/// Returns `None` for fractional values, magnitudes outside the `i64`
/// range, infinities and NaNs. Both zeros map to `0`.
pub(crate) fn bits_to_i64(bits: u64) -> Option<i64> {
    if bits << 1 == 0 {
        return Some(0);
    }
    if bits == I64_MIN_BITS {
        return Some(i64::MIN);
    }
    let exp = (bits >> MANTISSA_BITS & 0x7ff) as i32 - BIAS;
    // Non-finite patterns fall out here: their biased exponent maps to 1024.
    if !(0..63).contains(&exp) {
        return None;
    }
    let magnitude = integer_magnitude(bits, exp)?;
    let n = magnitude as i64;
    Some(if bits >> 63 != 0 { -n } else { n })
}

/// Interpret a bit pattern as an exact `u64`.
///
/// Like [`bits_to_i64`] but rejects every negative value except `-0.0`.
pub(crate) fn bits_to_u64(bits: u64) -> Option<u64> {
    if bits << 1 == 0 {
        return Some(0);
    }
    if bits >> 63 != 0 {
        return None;
    }
    let exp = (bits >> MANTISSA_BITS & 0x7ff) as i32 - BIAS;
    if !(0..64).contains(&exp) {
        return None;
    }
    integer_magnitude(bits, exp)
}

fn integer_magnitude(bits: u64, exp: i32) -> Option<u64> {
    let mask = u64::MAX >> 12;
    let significand = bits & mask | 1u64 << MANTISSA_BITS;
    if exp >= MANTISSA_BITS {
        return Some(significand << (exp - MANTISSA_BITS));
    }
    if bits & mask >> exp != 0 {
        // Fractional bits remain below the binary point.
        return None;
    }
    Some(significand >> (MANTISSA_BITS - exp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_i64_zeros() {
        assert_eq!(bits_to_i64(0.0f64.to_bits()), Some(0));
        assert_eq!(bits_to_i64((-0.0f64).to_bits()), Some(0));
    }

    #[test]
    fn test_to_i64_integers() {
        assert_eq!(bits_to_i64(1.0f64.to_bits()), Some(1));
        assert_eq!(bits_to_i64((-1.0f64).to_bits()), Some(-1));
        assert_eq!(bits_to_i64(712.0f64.to_bits()), Some(712));
        assert_eq!(bits_to_i64((-2333444712.0f64).to_bits()), Some(-2333444712));
        assert_eq!(bits_to_i64(9007199254740992.0f64.to_bits()), Some(1 << 53));
    }

    #[test]
    fn test_to_i64_extremes() {
        assert_eq!(bits_to_i64((i64::MIN as f64).to_bits()), Some(i64::MIN));
        // i64::MAX is not representable; the nearest binary64 is 2^63.
        assert_eq!(bits_to_i64((9.223372036854776e18f64).to_bits()), None);
        // The largest representable integer below 2^63.
        let below = (1u64 << 63) - 1024;
        assert_eq!(bits_to_i64((below as f64).to_bits()), Some(below as i64));
    }

    #[test]
    fn test_to_i64_rejects_fractions() {
        assert_eq!(bits_to_i64(0.5f64.to_bits()), None);
        assert_eq!(bits_to_i64(712.292f64.to_bits()), None);
        assert_eq!(bits_to_i64((-1.5f64).to_bits()), None);
    }

    #[test]
    fn test_to_i64_rejects_non_finite() {
        assert_eq!(bits_to_i64(f64::NAN.to_bits()), None);
        assert_eq!(bits_to_i64(f64::INFINITY.to_bits()), None);
        assert_eq!(bits_to_i64(f64::NEG_INFINITY.to_bits()), None);
    }

    #[test]
    fn test_to_u64_basic() {
        assert_eq!(bits_to_u64(0.0f64.to_bits()), Some(0));
        assert_eq!(bits_to_u64((-0.0f64).to_bits()), Some(0));
        assert_eq!(bits_to_u64(1.0f64.to_bits()), Some(1));
        assert_eq!(bits_to_u64(2333444712.0f64.to_bits()), Some(2333444712));
    }

    #[test]
    fn test_to_u64_extremes() {
        // 2^63 and 2^64 - 2048 are exactly representable.
        assert_eq!(bits_to_u64((9.223372036854776e18f64).to_bits()), Some(1 << 63));
        let top = u64::MAX - 2047;
        assert_eq!(bits_to_u64((top as f64).to_bits()), Some(top));
        // 2^64 itself is out of range.
        assert_eq!(bits_to_u64(1.8446744073709552e19f64.to_bits()), None);
    }

    #[test]
    fn test_to_u64_rejects_negative_and_fractions() {
        assert_eq!(bits_to_u64((-1.0f64).to_bits()), None);
        assert_eq!(bits_to_u64(0.5f64.to_bits()), None);
        assert_eq!(bits_to_u64(f64::NAN.to_bits()), None);
        assert_eq!(bits_to_u64(f64::INFINITY.to_bits()), None);
    }
}
