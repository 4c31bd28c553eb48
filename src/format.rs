//! Decimal-component formatting.
//!
//! Renders canonical decimal components as the shortest human-readable
//! string, choosing fixed notation while the magnitude stays readable and
//! scientific notation otherwise. Digits are emitted through 8/4/2/1-digit
//! fast paths over a two-ASCII-digit lookup table.

use crate::decimal::{DecimalFloat, FloatKind};
use crate::bits::decimal_digits;
use crate::decode::decode_bits;

/// Formatting any binary64 value needs at most this many bytes.
pub const MAX_FORMAT_LEN: usize = 25;

/// All two-digit numbers as consecutive ASCII pairs.
const DIGIT_TABLE: &[u8; 200] = b"0001020304050607080910111213141516171819\
2021222324252627282930313233343536373839\
4041424344454647484950515253545556575859\
6061626364656667686970717273747576777879\
8081828384858687888990919293949596979899";

#[inline]
fn emit_one_digit(buf: &mut [u8], n: u32) {
    buf[0] = b'0' + (n % 10) as u8;
}

#[inline]
fn emit_two_digits(buf: &mut [u8], n: u32) {
    let index = (n % 100) as usize * 2;
    buf[..2].copy_from_slice(&DIGIT_TABLE[index..index + 2]);
}

#[inline]
fn emit_four_digits(buf: &mut [u8], n: u32) {
    emit_two_digits(&mut buf[2..], n);
    emit_two_digits(buf, n / 100);
}

#[inline]
fn emit_eight_digits(buf: &mut [u8], n: u32) {
    emit_four_digits(&mut buf[4..], n);
    emit_four_digits(buf, n / 10_000);
}

/// Write the low `magnitude` decimal digits of `n` into `buf[..magnitude]`.
fn emit_integer(buf: &mut [u8], mut n: u64, mut magnitude: usize) {
    while magnitude >= 8 {
        let n_low = (n % 100_000_000) as u32;
        n /= 100_000_000;
        magnitude -= 8;
        emit_eight_digits(&mut buf[magnitude..], n_low);
    }
    let mut n_low = n as u32;
    if magnitude >= 4 {
        magnitude -= 4;
        emit_four_digits(&mut buf[magnitude..], n_low);
        n_low /= 10_000;
    }
    if magnitude >= 2 {
        magnitude -= 2;
        emit_two_digits(&mut buf[magnitude..], n_low);
        n_low /= 100;
    }
    if magnitude != 0 {
        emit_one_digit(buf, n_low);
    }
}

fn format_normal(dec: &DecimalFloat, buf: &mut [u8]) -> usize {
    let mut p = 0;
    if dec.negative {
        buf[p] = b'-';
        p += 1;
    }
    let significand_magnitude = decimal_digits(dec.significand) as usize;
    let magnitude = significand_magnitude as i32 + dec.exponent;
    if (-5..=10).contains(&magnitude) {
        if magnitude >= 1 {
            if dec.exponent >= 0 {
                // Pure integer: digits plus trailing zeros.
                emit_integer(&mut buf[p..], dec.significand, significand_magnitude);
                p += significand_magnitude;
                let zeros = dec.exponent as usize;
                buf[p..p + zeros].fill(b'0');
                p += zeros;
            } else {
                // Digits straddle the decimal point; emit one position
                // right, then slide the integer part over the gap.
                emit_integer(&mut buf[p + 1..], dec.significand, significand_magnitude);
                let int_digits = magnitude as usize;
                buf.copy_within(p + 1..p + 1 + int_digits, p);
                buf[p + int_digits] = b'.';
                p += significand_magnitude + 1;
            }
        } else {
            // Leading "0." plus padding zeros ahead of the digits.
            let leadup = (2 - magnitude) as usize;
            emit_integer(&mut buf[p + leadup..], dec.significand, significand_magnitude);
            buf[p..p + leadup].fill(b'0');
            buf[p + 1] = b'.';
            p += leadup + significand_magnitude;
        }
    } else {
        emit_integer(&mut buf[p + 1..], dec.significand, significand_magnitude);
        buf[p] = buf[p + 1];
        if significand_magnitude > 1 {
            buf[p + 1] = b'.';
            p += significand_magnitude + 1;
        } else {
            p += 1;
        }
        buf[p] = b'e';
        p += 1;
        let mut exp = dec.exponent + significand_magnitude as i32 - 1;
        if exp >= 0 {
            buf[p] = b'+';
        } else {
            buf[p] = b'-';
            exp = -exp;
        }
        p += 1;
        // Binary64 decimal exponents never reach four digits.
        if exp < 100 {
            emit_two_digits(&mut buf[p..], exp as u32);
        } else {
            emit_one_digit(&mut buf[p..], exp as u32 / 100);
            p += 1;
            emit_two_digits(&mut buf[p..], exp as u32);
        }
        p += 2;
    }
    p
}

fn put(buf: &mut [u8], text: &[u8]) -> usize {
    buf[..text.len()].copy_from_slice(text);
    text.len()
}

/// Format a bit pattern into `buf`, returning the number of bytes written.
///
/// `buf` must hold at least [`MAX_FORMAT_LEN`] bytes.
pub(crate) fn format_bits(bits: u64, buf: &mut [u8]) -> usize {
    assert!(buf.len() >= MAX_FORMAT_LEN, "format buffer too small");
    let dec = decode_bits(bits);
    match (dec.kind, dec.negative) {
        (FloatKind::Normal, _) => format_normal(&dec, buf),
        (FloatKind::Nan, false) => put(buf, b"nan"),
        (FloatKind::Nan, true) => put(buf, b"-nan"),
        (FloatKind::Infinity, false) => put(buf, b"infinity"),
        (FloatKind::Infinity, true) => put(buf, b"-infinity"),
        (FloatKind::Zero, false) => put(buf, b"0"),
        (FloatKind::Zero, true) => put(buf, b"-0.0"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_value(value: f64) -> String {
        let mut buf = [0u8; MAX_FORMAT_LEN];
        let len = format_bits(value.to_bits(), &mut buf);
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    #[test]
    fn test_format_specials() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-0.0), "-0.0");
        assert_eq!(format_value(f64::NAN), "nan");
        assert_eq!(format_value(-f64::NAN), "-nan");
        assert_eq!(format_value(f64::INFINITY), "infinity");
        assert_eq!(format_value(f64::NEG_INFINITY), "-infinity");
    }

    #[test]
    fn test_format_integers() {
        assert_eq!(format_value(7.0), "7");
        assert_eq!(format_value(712.0), "712");
        assert_eq!(format_value(700.0), "700");
        assert_eq!(format_value(2333444712.0), "2333444712");
        assert_eq!(format_value(-2.0), "-2");
    }

    #[test]
    fn test_format_fixed_fractions() {
        assert_eq!(format_value(0.1), "0.1");
        assert_eq!(format_value(0.123), "0.123");
        assert_eq!(format_value(712.292), "712.292");
        assert_eq!(format_value(0.00000123), "0.00000123");
        assert_eq!(format_value(-0.00000123), "-0.00000123");
        assert_eq!(format_value(-3.33444712), "-3.33444712");
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_value(3.33444712e-07), "3.33444712e-07");
        assert_eq!(format_value(3.33444712e10), "3.33444712e+10");
        assert_eq!(format_value(-3.33444712e-07), "-3.33444712e-07");
        assert_eq!(format_value(-3.33444712e-10), "-3.33444712e-10");
        assert_eq!(format_value(1.7976931348623157e308), "1.7976931348623157e+308");
        assert_eq!(format_value(5e-324), "5e-324");
    }

    #[test]
    fn test_format_single_digit_scientific_has_no_point() {
        assert_eq!(format_value(1e30), "1e+30");
        assert_eq!(format_value(1e-30), "1e-30");
        assert_eq!(format_value(7e100), "7e+100");
    }

    #[test]
    fn test_format_notation_boundaries() {
        // Magnitude 10 still formats fixed; magnitude 11 switches.
        assert_eq!(format_value(1e9), "1000000000");
        assert_eq!(format_value(1e10), "1e+10");
        assert_eq!(format_value(9999999999.0), "9999999999");
        // Magnitude -5 still formats fixed; magnitude -6 switches.
        assert_eq!(format_value(1e-6), "0.000001");
        assert_eq!(format_value(1e-7), "1e-07");
    }

    #[test]
    fn test_format_length_fits_reported() {
        let samples = [
            0.1f64,
            -0.00000123,
            f64::MAX,
            f64::MIN_POSITIVE,
            5e-324,
            123456.789,
            -9.87654321e-200,
        ];
        let mut buf = [0u8; MAX_FORMAT_LEN];
        for &value in &samples {
            let len = format_bits(value.to_bits(), &mut buf);
            assert!(len <= MAX_FORMAT_LEN);
            assert!(std::str::from_utf8(&buf[..len]).is_ok());
        }
    }
}
