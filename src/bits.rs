//! Fixed-width arithmetic primitives for the conversion engine.
//!
//! Everything here is a pure, total function: widening 64×64→128-bit
//! multiplication built from 32-bit partial products, 128-bit shifts, integer
//! logarithm approximations, and divisibility predicates. The multiply/shift
//! combinations are the workhorses of both conversion directions.

use crate::tables::DECIMAL_BOUNDARIES;

/// Full 128-bit product of two 64-bit values, returned as `(lo, hi)`.
///
/// Built from four 32×32→64 partial products with explicit carry
/// propagation; no native 128-bit arithmetic is assumed.
#[inline]
pub(crate) fn widening_multiply(a: u64, b: u64) -> (u64, u64) {
    let a_lo = a as u32 as u64;
    let a_hi = a >> 32;
    let b_lo = b as u32 as u64;
    let b_hi = b >> 32;
    let b00 = a_lo * b_lo;
    let b01 = a_lo * b_hi;
    let b10 = a_hi * b_lo;
    let b11 = a_hi * b_hi;
    let b00_lo = b00 as u32 as u64;
    let b00_hi = b00 >> 32;
    let mid1 = b10 + b00_hi;
    let mid1_lo = mid1 as u32 as u64;
    let mid1_hi = mid1 >> 32;
    let mid2 = b01 + mid1_lo;
    let mid2_lo = mid2 as u32 as u64;
    let mid2_hi = mid2 >> 32;
    let hi = b11 + mid1_hi + mid2_hi;
    (mid2_lo << 32 | b00_lo, hi)
}

/// Bits `[dist, dist + 64)` of the 128-bit value `(hi:lo)`.
#[inline]
pub(crate) fn shift_right_128(lo: u64, hi: u64, dist: u32) -> u64 {
    debug_assert!(dist > 0 && dist < 64);
    hi << (64 - dist) | lo >> dist
}

/// Integer approximation of `floor(log2(5^e))`. Valid for `e <= 3528`.
#[inline]
pub(crate) fn log2_pow5(e: u32) -> u32 {
    debug_assert!(e <= 3528);
    e.wrapping_mul(1217359) >> 19
}

/// Integer approximation of `ceil(log2(5^e))`. Valid for `e <= 3528`.
#[inline]
pub(crate) fn ceil_log2_pow5(e: u32) -> u32 {
    log2_pow5(e) + 1
}

/// Integer approximation of `floor(log10(2^e))`. Valid for `e <= 1650`.
#[inline]
pub(crate) fn log10_pow2(e: u32) -> u32 {
    debug_assert!(e <= 1650);
    e * 78913 >> 18
}

/// Integer approximation of `floor(log10(5^e))`. Valid for `e <= 2620`.
#[inline]
pub(crate) fn log10_pow5(e: u32) -> u32 {
    debug_assert!(e <= 2620);
    e * 732923 >> 20
}

/// Index of the highest set bit of a nonzero value.
#[inline]
pub(crate) fn floor_log2(value: u64) -> u32 {
    debug_assert!(value != 0);
    63 - value.leading_zeros()
}

/// Whether `value` is divisible by `5^p`, without arbitrary-precision
/// division.
///
/// Multiplying by the modular inverse of 5 maps multiples of 5 onto the
/// range `[0, 2^64 / 5]` and non-multiples outside it.
pub(crate) fn multiple_of_power_of_5(mut value: u64, p: u32) -> bool {
    if p == 0 {
        return true;
    }
    // Inverse of 5 (mod 2^64) and 2^64 div 5.
    const M_INV_5: u64 = 14757395258967641293;
    const N_DIV_5: u64 = 3689348814741910323;
    let mut count = 0;
    loop {
        debug_assert!(value != 0);
        value = value.wrapping_mul(M_INV_5);
        if value > N_DIV_5 {
            return false;
        }
        count += 1;
        if count >= p {
            return true;
        }
    }
}

/// Whether `value` is divisible by `2^p`. Requires `value != 0` and
/// `p < 64`.
#[inline]
pub(crate) fn multiple_of_power_of_2(value: u64, p: u32) -> bool {
    debug_assert!(value != 0);
    debug_assert!(p < 64);
    value & ((1u64 << p) - 1) == 0
}

/// Multiply a significand by a 128-bit table entry and keep 64 bits
/// starting at bit `j` of the product.
///
/// Significands wider than 55 bits push the wanted window entirely into
/// the high word; that case is a plain shift of it.
pub(crate) fn mul_shift_64(m: u64, mul: (u64, u64), j: i32) -> u64 {
    let (low1, high1) = widening_multiply(m, mul.1);
    let (_, high0) = widening_multiply(m, mul.0);
    let sum = high0.wrapping_add(low1);
    let high1 = high1.wrapping_add((sum < high0) as u64);
    let dist = (j - 64) as u32;
    if dist >= 64 {
        high1 >> (dist - 64)
    } else {
        shift_right_128(sum, high1, dist)
    }
}

/// Compute the scaled value and both rounding boundaries in one go.
///
/// Returns `(vr, vp, vm)`: the value itself, the upper boundary and the
/// lower boundary, all multiplied by the same table entry and shifted into
/// decimal-integer range. `mm_shift` selects how far below the value the
/// lower boundary sits (1 unit or 2 half-units).
pub(crate) fn mul_shift_all_64(
    m: u64,
    mul: (u64, u64),
    j: i32,
    mm_shift: u32,
) -> (u64, u64, u64) {
    let m = m << 1;
    let (lo, tmp) = widening_multiply(m, mul.0);
    let (lo1, hi1) = widening_multiply(m, mul.1);
    let mid = tmp.wrapping_add(lo1);
    let hi = hi1.wrapping_add((mid < tmp) as u64);

    let lo2 = lo.wrapping_add(mul.0);
    let mid2 = mid.wrapping_add(mul.1).wrapping_add((lo2 < lo) as u64);
    let hi2 = hi.wrapping_add((mid2 < mid) as u64);
    let vp = shift_right_128(mid2, hi2, (j - 64 - 1) as u32);

    let vm = if mm_shift == 1 {
        let lo3 = lo.wrapping_sub(mul.0);
        let mid3 = mid.wrapping_sub(mul.1).wrapping_sub((lo3 > lo) as u64);
        let hi3 = hi.wrapping_sub((mid3 > mid) as u64);
        shift_right_128(mid3, hi3, (j - 64 - 1) as u32)
    } else {
        let lo3 = lo.wrapping_add(lo);
        let mid3 = mid.wrapping_add(mid).wrapping_add((lo3 < lo) as u64);
        let hi3 = hi.wrapping_add(hi).wrapping_add((mid3 < mid) as u64);
        let lo4 = lo3.wrapping_sub(mul.0);
        let mid4 = mid3.wrapping_sub(mul.1).wrapping_sub((lo4 > lo3) as u64);
        let hi4 = hi3.wrapping_sub((mid4 > mid3) as u64);
        shift_right_128(mid4, hi4, (j - 64) as u32)
    };

    let vr = shift_right_128(mid, hi, (j - 64 - 1) as u32);
    (vr, vp, vm)
}

/// Number of decimal digits of a nonzero value.
#[inline]
pub(crate) fn decimal_digits(value: u64) -> u32 {
    let (lower, cutoff) = DECIMAL_BOUNDARIES[floor_log2(value) as usize];
    lower + (value >= cutoff) as u32
}
