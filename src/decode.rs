//! Binary64 to shortest-decimal decoding.
//!
//! Given a bit pattern, produce the unique shortest decimal significand and
//! exponent that round-trip back to exactly that pattern. The algorithm
//! computes the value and both of its rounding-interval boundaries scaled to
//! integers with a single 128-bit table multiply, then strips decimal digits
//! while the interval still separates the boundaries.

use crate::bits::{
    ceil_log2_pow5, log2_pow5, log10_pow2, log10_pow5, mul_shift_all_64,
    multiple_of_power_of_2, multiple_of_power_of_5,
};
use crate::decimal::{breakup, normalize, DecimalFloat, FloatKind, IeeeParts, BIAS, MANTISSA_BITS};
use crate::tables::{POW5_BITCOUNT, POW5_INV_BITCOUNT, POW5_INV_SPLIT, POW5_SPLIT};

/// Decode a bit pattern into canonical decimal components.
///
/// Special kinds come back immediately with the sign preserved. Values that
/// are exact small integers take a fast path that skips the boundary
/// computation entirely.
pub(crate) fn decode_bits(bits: u64) -> DecimalFloat {
    let ieee = breakup(bits);
    if ieee.kind != FloatKind::Normal {
        return DecimalFloat::special(ieee.kind, ieee.negative);
    }
    let e2 = BIAS + MANTISSA_BITS - ieee.exponent as i32;
    if (0..=MANTISSA_BITS).contains(&e2) {
        let m2 = 1u64 << MANTISSA_BITS | ieee.mantissa;
        if m2 & ((1u64 << e2) - 1) == 0 {
            // The value is a 53-bit integer; only trailing-zero removal is
            // needed.
            let mut significand = m2 >> e2;
            let mut exponent = 0;
            normalize(&mut significand, &mut exponent);
            return DecimalFloat {
                kind: FloatKind::Normal,
                negative: ieee.negative,
                significand,
                exponent,
            };
        }
    }
    decode_nontrivial(&ieee)
}

fn decode_nontrivial(ieee: &IeeeParts) -> DecimalFloat {
    let (e2, m2) = if ieee.exponent == 0 {
        (1 - BIAS - MANTISSA_BITS - 2, ieee.mantissa)
    } else {
        (
            ieee.exponent as i32 - BIAS - MANTISSA_BITS - 2,
            1u64 << MANTISSA_BITS | ieee.mantissa,
        )
    };
    let even = m2 & 1 == 0;
    let accept_bounds = even;
    // The value and its boundaries in quarter units.
    let mv = 4 * m2;
    // The lower boundary is closer when the mantissa sits on a power of two.
    let mm_shift = (ieee.mantissa != 0 || ieee.exponent <= 1) as u32;

    let (mut vr, mut vp, mut vm);
    let e10;
    let mut vm_is_trailing_zeros = false;
    let mut vr_is_trailing_zeros = false;
    if e2 >= 0 {
        let q = log10_pow2(e2 as u32) - (e2 > 3) as u32;
        e10 = q as i32;
        let k = POW5_INV_BITCOUNT + log2_pow5(q) as i32;
        let i = -e2 + q as i32 + k;
        (vr, vp, vm) = mul_shift_all_64(m2, POW5_INV_SPLIT[q as usize], i, mm_shift);
        if q <= 21 {
            // Only one of mv, mv - 1 - mm_shift and mv + 2 can be a multiple
            // of 5, given that mv has at most 55 bits.
            if mv % 5 == 0 {
                vr_is_trailing_zeros = multiple_of_power_of_5(mv, q);
            } else if accept_bounds {
                vm_is_trailing_zeros = multiple_of_power_of_5(mv - 1 - mm_shift as u64, q);
            } else {
                vp -= multiple_of_power_of_5(mv + 2, q) as u64;
            }
        }
    } else {
        let q = log10_pow5(-e2 as u32) - (-e2 > 1) as u32;
        e10 = q as i32 + e2;
        let i = -e2 - q as i32;
        let k = ceil_log2_pow5(i as u32) as i32 - POW5_BITCOUNT;
        let j = q as i32 - k;
        (vr, vp, vm) = mul_shift_all_64(m2, POW5_SPLIT[i as usize], j, mm_shift);
        if q <= 1 {
            // Every value with q <= 1 has at least one trailing zero digit.
            vr_is_trailing_zeros = true;
            if accept_bounds {
                vm_is_trailing_zeros = mm_shift == 1;
            } else {
                vp -= 1;
            }
        } else if q < 63 {
            vr_is_trailing_zeros = multiple_of_power_of_2(mv, q);
        }
    }

    let mut removed = 0;
    let mut last_removed_digit = 0u8;
    let significand;
    if vm_is_trailing_zeros || vr_is_trailing_zeros {
        // Rare path: the exact value or the lower boundary ends in zero
        // digits, so boundary-inclusive rounding may apply.
        loop {
            let vp_div10 = vp / 10;
            let vm_div10 = vm / 10;
            if vp_div10 <= vm_div10 {
                break;
            }
            let vm_mod10 = vm % 10;
            let vr_div10 = vr / 10;
            let vr_mod10 = vr % 10;
            vm_is_trailing_zeros &= vm_mod10 == 0;
            vr_is_trailing_zeros &= last_removed_digit == 0;
            last_removed_digit = vr_mod10 as u8;
            vr = vr_div10;
            vp = vp_div10;
            vm = vm_div10;
            removed += 1;
        }
        if vm_is_trailing_zeros {
            loop {
                let vm_div10 = vm / 10;
                let vm_mod10 = vm % 10;
                if vm_mod10 != 0 {
                    break;
                }
                let vp_div10 = vp / 10;
                let vr_div10 = vr / 10;
                let vr_mod10 = vr % 10;
                vr_is_trailing_zeros &= last_removed_digit == 0;
                last_removed_digit = vr_mod10 as u8;
                vr = vr_div10;
                vp = vp_div10;
                vm = vm_div10;
                removed += 1;
            }
        }
        if vr_is_trailing_zeros && last_removed_digit == 5 && vr % 2 == 0 {
            // Round even when the exact value sits exactly on a half.
            last_removed_digit = 4;
        }
        significand = vr
            + ((vr == vm && (!accept_bounds || !vm_is_trailing_zeros)) || last_removed_digit >= 5)
                as u64;
    } else {
        // Common path: plain round-up decision, removing two digits at a
        // time while the interval allows it.
        let mut round_up = false;
        let vp_div100 = vp / 100;
        let vm_div100 = vm / 100;
        if vp_div100 > vm_div100 {
            let vr_div100 = vr / 100;
            let vr_mod100 = vr % 100;
            round_up = vr_mod100 >= 50;
            vr = vr_div100;
            vp = vp_div100;
            vm = vm_div100;
            removed += 2;
        }
        loop {
            let vp_div10 = vp / 10;
            let vm_div10 = vm / 10;
            if vp_div10 <= vm_div10 {
                break;
            }
            let vr_div10 = vr / 10;
            let vr_mod10 = vr % 10;
            round_up = vr_mod10 >= 5;
            vr = vr_div10;
            vp = vp_div10;
            vm = vm_div10;
            removed += 1;
        }
        significand = vr + (vr == vm || round_up) as u64;
    }

    DecimalFloat {
        kind: FloatKind::Normal,
        negative: ieee.negative,
        significand,
        exponent: e10 + removed,
    }
}
