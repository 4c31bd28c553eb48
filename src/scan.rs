//! Decimal literal scanner.
//!
//! Scans a numeral prefix out of a byte slice: optional sign, digits with an
//! optional fraction and exponent, or the case-insensitive keywords `nan`
//! and `inf`/`infinity`. Digits beyond 64-bit precision are consumed and
//! counted but rounded into the last retained digit, so arbitrarily long
//! literals scan in bounded state.

use crate::decimal::{normalize, DecimalFloat, FloatKind};
use crate::error::{FloatError, RangeCondition};

/// Result of scanning a numeral prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned {
    /// The scanned decimal components.
    pub value: DecimalFloat,
    /// Number of input bytes consumed.
    pub consumed: usize,
    /// Whether the significand captured every scanned digit exactly.
    pub exact: bool,
    /// Overflow/underflow of the exponent field itself, if any.
    pub range: Option<RangeCondition>,
}

/// Scan a numeral prefix from `bytes`.
///
/// Returns `FloatError::Syntax` when no valid numeral starts at the first
/// byte. Trailing bytes after the numeral are not an error; `consumed`
/// reports how far the scan got.
pub(crate) fn scan(bytes: &[u8]) -> Result<Scanned, FloatError> {
    let mut pos = 0;
    let mut negative = false;
    if let Some(&sign) = bytes.first() {
        if sign == b'+' || sign == b'-' {
            negative = sign == b'-';
            pos = 1;
        }
    }
    let first = *bytes.get(pos).ok_or(FloatError::Syntax)?;
    let mut exact = true;
    let mut range = None;
    let (kind, significand, exponent, end) = match first.to_ascii_lowercase() {
        b'n' => {
            let end = scan_keyword(bytes, pos, b"nan").ok_or(FloatError::Syntax)?;
            (FloatKind::Nan, 0, 0, end)
        }
        b'i' => {
            let end = scan_infinity(bytes, pos).ok_or(FloatError::Syntax)?;
            (FloatKind::Infinity, 0, 0, end)
        }
        _ => scan_normal(bytes, pos, &mut exact, &mut range).ok_or(FloatError::Syntax)?,
    };
    Ok(Scanned {
        value: DecimalFloat {
            kind,
            negative,
            significand,
            exponent,
        },
        consumed: end,
        exact,
        range,
    })
}

/// Match one case-insensitive keyword in full.
fn scan_keyword(bytes: &[u8], mut pos: usize, keyword: &[u8]) -> Option<usize> {
    for &letter in keyword {
        if *bytes.get(pos)? | 0x20 != letter {
            return None;
        }
        pos += 1;
    }
    Some(pos)
}

/// Match `inf`, extended to `infinity` when the full suffix is present.
///
/// A partial suffix (`infin`, `infinit`) backtracks to the end of `inf`;
/// the mismatching bytes are left for the caller.
fn scan_infinity(bytes: &[u8], pos: usize) -> Option<usize> {
    let short = scan_keyword(bytes, pos, b"inf")?;
    Some(scan_keyword(bytes, short, b"inity").unwrap_or(short))
}

/// Scan an unsigned digit run into a 64-bit accumulator.
///
/// `magnitude` counts the digits actually retained in `value`. Once another
/// digit would overflow, the first dropped digit rounds half-up into the
/// accumulator, `exact` is cleared, and the remaining digits are consumed
/// without further effect. Leading zeros are skipped before `start` is
/// pinned to the first significant position.
fn scan_digits(
    bytes: &[u8],
    mut pos: usize,
    start: &mut Option<usize>,
    value: &mut u64,
    magnitude: &mut i32,
    exact: &mut bool,
) -> Option<usize> {
    if !bytes.get(pos)?.is_ascii_digit() {
        return None;
    }
    let mut n = *value;
    let mut m = *magnitude;
    if n == 0 {
        while bytes.get(pos) == Some(&b'0') {
            pos += 1;
        }
    }
    if start.is_none() {
        *start = Some(pos);
    }
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        let digit = (bytes[pos] - b'0') as u64;
        pos += 1;
        let mul10 = n.wrapping_mul(10);
        let next = mul10.wrapping_add(digit);
        if n > u64::MAX / 10 || next < mul10 {
            *exact = false;
            if digit >= 5 {
                if n < u64::MAX {
                    n += 1;
                } else {
                    n = n / 10 + 1;
                    m -= 1;
                }
            }
            break;
        }
        n = next;
        m += 1;
    }
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    *value = n;
    *magnitude = m;
    Some(pos)
}

/// Scan the significand: integer digits, optionally followed by a fraction.
///
/// Returns the canonical `(significand, exponent)` pair; `1.50` and
/// `150e-2` come out identical. Once a `.` is consumed, fraction digits
/// must follow; there is no backtracking to the integer part.
fn scan_significand(
    bytes: &[u8],
    pos: usize,
    significand: &mut u64,
    exponent: &mut i32,
    exact: &mut bool,
) -> Option<usize> {
    let mut magnitude = 0i32;
    let mut int_start = None;
    let int_end = scan_digits(bytes, pos, &mut int_start, significand, &mut magnitude, exact);
    // Significant integer digits, including any dropped beyond the
    // retained precision.
    let int_digits = int_end.map_or(0, |end| end - int_start.unwrap_or(end));
    let pos = int_end.unwrap_or(pos);
    if bytes.get(pos) != Some(&b'.') {
        let pos = int_end?;
        if *significand == 0 {
            return Some(pos);
        }
        *exponent = i32::try_from(int_digits as i64 - magnitude as i64).ok()?;
        return normalize(significand, exponent).then_some(pos);
    }
    let dot = pos;
    let mut frac_start = None;
    let pos = scan_digits(bytes, dot + 1, &mut frac_start, significand, &mut magnitude, exact)?;
    if *significand == 0 {
        return Some(pos);
    }
    let e = if int_digits > 0 {
        int_digits as i64 - magnitude as i64
    } else {
        let leading_zeros = frac_start.unwrap_or(dot + 1) - (dot + 1);
        -(leading_zeros as i64) - magnitude as i64
    };
    *exponent = i32::try_from(e).ok()?;
    normalize(significand, exponent).then_some(pos)
}

/// Scan a numeral that is not a keyword: significand plus optional
/// exponent suffix.
fn scan_normal(
    bytes: &[u8],
    pos: usize,
    exact: &mut bool,
    range: &mut Option<RangeCondition>,
) -> Option<(FloatKind, u64, i32, usize)> {
    let mut significand = 0u64;
    let mut exponent = 0i32;
    let pos = scan_significand(bytes, pos, &mut significand, &mut exponent, exact)?;
    if !matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        let kind = if significand != 0 {
            FloatKind::Normal
        } else {
            FloatKind::Zero
        };
        return Some((kind, significand, exponent, pos));
    }
    let mut pos = pos + 1;
    let exp_negative = bytes.get(pos) == Some(&b'-');
    if exp_negative || bytes.get(pos) == Some(&b'+') {
        pos += 1;
    }
    let mut start = None;
    let mut suffix = 0u64;
    let mut suffix_magnitude = 0i32;
    let mut exact_exp = true;
    let pos = scan_digits(
        bytes,
        pos,
        &mut start,
        &mut suffix,
        &mut suffix_magnitude,
        &mut exact_exp,
    )?;
    if significand == 0 {
        return Some((FloatKind::Zero, significand, exponent, pos));
    }
    // An exponent too large for 64 bits is an unconditional range
    // excursion; the direction alone decides the outcome.
    if exp_negative {
        if exact_exp {
            if let Ok(e) = i32::try_from(exponent as i128 - suffix as i128) {
                return Some((FloatKind::Normal, significand, e, pos));
            }
        }
        *range = Some(RangeCondition::Underflow);
        Some((FloatKind::Zero, 0, 0, pos))
    } else {
        if exact_exp {
            if let Ok(e) = i32::try_from(exponent as i128 + suffix as i128) {
                return Some((FloatKind::Normal, significand, e, pos));
            }
        }
        *range = Some(RangeCondition::Overflow);
        Some((FloatKind::Infinity, 0, 0, pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_ok(text: &str) -> Scanned {
        scan(text.as_bytes()).unwrap()
    }

    fn scan_normal_parts(text: &str) -> (u64, i32) {
        let scanned = scan_ok(text);
        assert_eq!(scanned.value.kind, FloatKind::Normal);
        (scanned.value.significand, scanned.value.exponent)
    }

    #[test]
    fn test_scan_integers() {
        assert_eq!(scan_normal_parts("7"), (7, 0));
        assert_eq!(scan_normal_parts("700"), (7, 2));
        assert_eq!(scan_normal_parts("00123"), (123, 0));
        assert_eq!(scan_ok("00123").consumed, 5);
    }

    #[test]
    fn test_scan_fractions() {
        assert_eq!(scan_normal_parts("712.292"), (712292, -3));
        assert_eq!(scan_normal_parts("0.1"), (1, -1));
        assert_eq!(scan_normal_parts("0.00000123"), (123, -8));
    }

    #[test]
    fn test_scan_canonicalizes_equivalent_forms() {
        assert_eq!(scan_normal_parts("1.50"), (15, -1));
        assert_eq!(scan_normal_parts("150e-2"), (15, -1));
        assert_eq!(scan_normal_parts("0.0150e2"), (15, -1));
        assert_eq!(scan_normal_parts("15e-1"), (15, -1));
    }

    #[test]
    fn test_scan_leading_dot() {
        assert_eq!(scan_normal_parts(".5"), (5, -1));
        assert_eq!(scan_normal_parts(".05"), (5, -2));
        assert_eq!(scan_ok(".5").consumed, 2);
    }

    #[test]
    fn test_scan_exponent_suffix() {
        assert_eq!(scan_normal_parts("1e10"), (1, 10));
        assert_eq!(scan_normal_parts("1E+10"), (1, 10));
        assert_eq!(scan_normal_parts("1e-10"), (1, -10));
        assert_eq!(scan_normal_parts("2.5e3"), (25, 2));
    }

    #[test]
    fn test_scan_sign() {
        let scanned = scan_ok("-2");
        assert!(scanned.value.negative);
        assert_eq!(scanned.value.significand, 2);
        assert!(!scan_ok("+2").value.negative);
    }

    #[test]
    fn test_scan_zero_forms() {
        assert_eq!(scan_ok("0").value.kind, FloatKind::Zero);
        let neg = scan_ok("-0.0");
        assert_eq!(neg.value.kind, FloatKind::Zero);
        assert!(neg.value.negative);
        assert_eq!(scan_ok("0e99999999999999999999").value.kind, FloatKind::Zero);
    }

    #[test]
    fn test_scan_keywords() {
        for text in ["nan", "NAN", "NaN"] {
            let scanned = scan_ok(text);
            assert_eq!(scanned.value.kind, FloatKind::Nan);
            assert_eq!(scanned.consumed, 3);
        }
        let neg = scan_ok("-nan");
        assert_eq!(neg.value.kind, FloatKind::Nan);
        assert!(neg.value.negative);
        for text in ["inf", "INF", "Infinity", "INFINITY"] {
            let scanned = scan_ok(text);
            assert_eq!(scanned.value.kind, FloatKind::Infinity);
            assert_eq!(scanned.consumed, text.len());
        }
    }

    #[test]
    fn test_scan_inf_early_stop() {
        // A partial "inity" suffix backtracks to the end of "inf".
        assert_eq!(scan_ok("infx").consumed, 3);
        assert_eq!(scan_ok("infin").consumed, 3);
        assert_eq!(scan_ok("infinit").consumed, 3);
        assert_eq!(scan_ok("infinityx").consumed, 8);
        assert_eq!(scan_ok("nanx").consumed, 3);
    }

    #[test]
    fn test_scan_trailing_text() {
        let scanned = scan_ok("1.5 apples");
        assert_eq!(scanned.consumed, 3);
        assert_eq!(scanned.value.significand, 15);
        // The scanner stops at the first byte that cannot extend the
        // numeral; "0x101" yields zero with one byte consumed.
        let hexish = scan_ok("0x101");
        assert_eq!(hexish.value.kind, FloatKind::Zero);
        assert_eq!(hexish.consumed, 1);
    }

    #[test]
    fn test_scan_syntax_errors() {
        for text in ["", "x", "+", "-", ".", "e5", "5.", "5.x", "1e", "1e+", "in", "na"] {
            assert_eq!(
                scan(text.as_bytes()),
                Err(FloatError::Syntax),
                "text={:?}",
                text
            );
        }
    }

    #[test]
    fn test_scan_long_significand_rounds() {
        // 2^64 does not fit; the 20th digit rounds half-up into the last
        // retained digit.
        let scanned = scan_ok("18446744073709551616");
        assert!(!scanned.exact);
        assert_eq!(scanned.value.significand, 1844674407370955162);
        assert_eq!(scanned.value.exponent, 1);
        // A 20th digit still fits when it does not overflow; digits after
        // it below the rounding threshold truncate.
        let scanned = scan_ok("184467440737095516144444");
        assert!(!scanned.exact);
        assert_eq!(scanned.value.significand, 18446744073709551614);
        assert_eq!(scanned.value.exponent, 4);
    }

    #[test]
    fn test_scan_exponent_overflow() {
        let scanned = scan_ok("1e10000");
        assert_eq!(scanned.value.kind, FloatKind::Normal);
        assert_eq!(scanned.value.exponent, 10000);
        assert_eq!(scanned.range, None);

        let scanned = scan_ok("1e99999999999999999999");
        assert_eq!(scanned.value.kind, FloatKind::Infinity);
        assert_eq!(scanned.range, Some(RangeCondition::Overflow));

        let scanned = scan_ok("-1e-99999999999999999999");
        assert_eq!(scanned.value.kind, FloatKind::Zero);
        assert!(scanned.value.negative);
        assert_eq!(scanned.range, Some(RangeCondition::Underflow));

        let scanned = scan_ok("1e3000000000");
        assert_eq!(scanned.value.kind, FloatKind::Infinity);
        assert_eq!(scanned.range, Some(RangeCondition::Overflow));
    }

    #[test]
    fn test_scan_exact_flag() {
        assert!(scan_ok("0.1").exact);
        assert!(scan_ok("12345678901234567").exact);
        assert!(!scan_ok("123456789012345678901234567890").exact);
    }
}
