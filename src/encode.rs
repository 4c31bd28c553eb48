//! Decimal to binary64 encoding.
//!
//! Given decimal components, compute the nearest representable binary64 bit
//! pattern. A single table multiply produces a 64-bit mantissa candidate;
//! divisibility predicates decide whether the multiply was exact, which in
//! turn decides how ties are broken when the mantissa is squeezed into 52
//! bits.

use crate::bits::{
    ceil_log2_pow5, decimal_digits, floor_log2, log2_pow5, mul_shift_64,
    multiple_of_power_of_2, multiple_of_power_of_5,
};
use crate::decimal::{DecimalFloat, BIAS, EXPONENT_BITS, MANTISSA_BITS};
use crate::tables::{POW5_BITCOUNT, POW5_INV_BITCOUNT, POW5_INV_SPLIT, POW5_SPLIT};

/// Decimal magnitude (digit count plus exponent) below which every value
/// underflows to zero.
///
/// A value of magnitude -324 is below 1e-324, under half the smallest
/// subnormal (roughly 4.94e-324), so it cannot round up to it.
pub(crate) const MIN_DECIMAL_MAGNITUDE: i64 = -323;

/// Decimal magnitude above which every value overflows to infinity.
///
/// A value of magnitude 310 is at least 1e309, past the largest finite
/// binary64 (roughly 1.8e308).
pub(crate) const MAX_DECIMAL_MAGNITUDE: i64 = 309;

/// Decimal magnitude of the components: the power of ten of the leading
/// digit, plus one.
pub(crate) fn decimal_magnitude(dec: &DecimalFloat) -> i64 {
    decimal_digits(dec.significand) as i64 + dec.exponent as i64
}

/// Encode a finite nonzero decimal into a bit pattern.
///
/// Requires `significand != 0` and a decimal magnitude within
/// `MIN_DECIMAL_MAGNITUDE..=MAX_DECIMAL_MAGNITUDE` (the façade clamps
/// values outside that range to zero or infinity before calling; the
/// bound keeps every table index and shift distance in range). Returns
/// `None` when the magnitude overflows the finite binary64 range.
pub(crate) fn encode_normal(dec: &DecimalFloat) -> Option<u64> {
    debug_assert!(dec.significand != 0);
    debug_assert!(
        (MIN_DECIMAL_MAGNITUDE..=MAX_DECIMAL_MAGNITUDE).contains(&decimal_magnitude(dec))
    );
    let m10 = dec.significand;
    let e10 = dec.exponent;

    let (e2, m2, trailing_zeros) = if e10 >= 0 {
        let e2 =
            floor_log2(m10) as i32 + e10 + log2_pow5(e10 as u32) as i32 - (MANTISSA_BITS + 1);
        let j = e2 - e10 - ceil_log2_pow5(e10 as u32) as i32 + POW5_BITCOUNT;
        let m2 = mul_shift_64(m10, POW5_SPLIT[e10 as usize], j);
        let trailing = e2 < e10
            || (e2 - e10 < 64 && multiple_of_power_of_2(m10, (e2 - e10) as u32));
        (e2, m2, trailing)
    } else {
        let e2 =
            floor_log2(m10) as i32 + e10 - ceil_log2_pow5(-e10 as u32) as i32 - (MANTISSA_BITS + 1);
        let j = e2 - e10 + ceil_log2_pow5(-e10 as u32) as i32 - 1 + POW5_INV_BITCOUNT;
        let m2 = mul_shift_64(m10, POW5_INV_SPLIT[-e10 as usize], j);
        let trailing = multiple_of_power_of_5(m10, -e10 as u32);
        (e2, m2, trailing)
    };

    let mut ieee_e2 = e2 + BIAS + floor_log2(m2) as i32;
    if ieee_e2 < 0 {
        ieee_e2 = 0;
    }
    if ieee_e2 > 0x7fe {
        return None;
    }
    let shift = if ieee_e2 == 0 { 1 } else { ieee_e2 } - e2 - BIAS - MANTISSA_BITS;
    debug_assert!(shift >= 1);
    if shift >= 64 {
        // The candidate is entirely below the subnormal range.
        return Some((dec.negative as u64) << (MANTISSA_BITS + EXPONENT_BITS));
    }
    let trailing_zeros = trailing_zeros && m2 & ((1u64 << (shift - 1)) - 1) == 0;
    let last_removed_bit = m2 >> (shift - 1) & 1;
    let round_up = last_removed_bit != 0 && (!trailing_zeros || m2 >> shift & 1 != 0);
    let mut ieee_m2 = (m2 >> shift) + round_up as u64;
    ieee_m2 &= (1u64 << MANTISSA_BITS) - 1;
    let mut ieee_e2 = ieee_e2 as u64;
    if ieee_m2 == 0 && round_up {
        // Rounding carried out of the mantissa.
        ieee_e2 += 1;
    }
    Some(
        (dec.negative as u64) << (MANTISSA_BITS + EXPONENT_BITS)
            | ieee_e2 << MANTISSA_BITS
            | ieee_m2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::FloatKind;

    fn normal(significand: u64, exponent: i32, negative: bool) -> DecimalFloat {
        DecimalFloat {
            kind: FloatKind::Normal,
            negative,
            significand,
            exponent,
        }
    }

    fn encode_value(significand: u64, exponent: i32) -> f64 {
        f64::from_bits(encode_normal(&normal(significand, exponent, false)).unwrap())
    }

    #[test]
    fn test_encode_integers() {
        assert_eq!(encode_value(7, 0), 7.0);
        assert_eq!(encode_value(7, 2), 700.0);
        assert_eq!(encode_value(2333444712, 0), 2333444712.0);
    }

    #[test]
    fn test_encode_fractions() {
        assert_eq!(encode_value(1, -1), 0.1);
        assert_eq!(encode_value(15, -1), 1.5);
        assert_eq!(encode_value(712292, -3), 712.292);
        assert_eq!(encode_value(123, -8), 0.00000123);
    }

    #[test]
    fn test_encode_accepts_non_canonical_significand() {
        assert_eq!(encode_value(150, -1), 15.0);
        assert_eq!(encode_value(1000, -4), 0.1);
        assert_eq!(encode_value(10, 0), 10.0);
    }

    #[test]
    fn test_encode_negative() {
        let bits = encode_normal(&normal(2, 0, true)).unwrap();
        assert_eq!(f64::from_bits(bits), -2.0);
    }

    #[test]
    fn test_encode_extremes() {
        assert_eq!(encode_value(17976931348623157, 292), f64::MAX);
        assert_eq!(encode_value(22250738585072014, -324), f64::MIN_POSITIVE);
        // Smallest positive subnormal.
        assert_eq!(encode_normal(&normal(5, -324, false)), Some(1));
    }

    #[test]
    fn test_encode_overflow() {
        assert_eq!(encode_normal(&normal(9, 308, false)), None);
        assert_eq!(encode_normal(&normal(1797693134863, 296, false)), None);
    }

    #[test]
    fn test_encode_rounds_up_into_infinity() {
        // Values between MAX + ulp/2 and 2^1024 carry out of the mantissa
        // and land exactly on the infinity pattern.
        assert_eq!(
            encode_normal(&normal(17976931348623159, 292, false)),
            Some(crate::decimal::INFINITY_BITS)
        );
    }

    #[test]
    fn test_encode_underflow_to_zero() {
        // 1e-324 is below half the smallest subnormal.
        assert_eq!(encode_normal(&normal(1, -324, false)), Some(0));
        let bits = encode_normal(&normal(1, -324, true)).unwrap();
        assert_eq!(bits, crate::decimal::NEG_ZERO_BITS);
    }

    #[test]
    fn test_encode_wide_significand_deep_exponent() {
        // A wide significand pushes the exponent far below -324 while the
        // magnitude stays inside the representable range.
        assert_eq!(encode_value(2225073858507201412, -326), f64::MIN_POSITIVE);
        // Magnitude -323 at 19 digits reaches the deepest subnormal.
        assert_eq!(encode_normal(&normal(4940656458412465442, -342, false)), Some(1));
        // At 20 digits the exponent reaches -343; this one rounds to zero.
        assert_eq!(
            encode_normal(&normal(18446744073709551615, -343, false)),
            Some(0)
        );
    }

    #[test]
    fn test_encode_subnormal_rounding() {
        // 7e-324 is between one and two ulps of the subnormal floor and
        // rounds to the nearest pattern.
        let bits = encode_normal(&normal(7, -324, false)).unwrap();
        assert_eq!(bits, 1);
        // 2.47e-324 is just below the half-ulp boundary.
        assert_eq!(encode_normal(&normal(247, -326, false)), Some(0));
    }
}
