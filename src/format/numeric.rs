//! Numeric text conversion
//!
//! Reading follows the C library's lenient prefix rules: leading whitespace
//! is skipped, the longest numeric prefix is used and anything after it is
//! ignored. Writing always produces plain decimal text.

use super::parser::is_space;

/// Parse the leading decimal integer of `text`
///
/// Returns `None` when there is no digit after the optional sign.
/// Out-of-range values saturate at `i64::MIN`/`i64::MAX`.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let rest = text.trim_start_matches(is_space);
    let bytes = rest.as_bytes();

    let (negative, mut i) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    let digits_start = i;
    let mut value: i64 = 0;
    while let Some(&b) = bytes.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        let digit = i64::from(b - b'0');
        // Accumulate towards the sign so i64::MIN stays representable
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
        i += 1;
    }

    if i == digits_start {
        None
    } else {
        Some(value)
    }
}

/// Parse the leading floating-point number of `text`
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, or `inf`/`infinity`/`nan` in any case. A `0x` prefix switches
/// to hex digits with a `p` binary exponent, so `0x1Ap0` is 26. Returns
/// `None` when no prefix qualifies.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let rest = text.trim_start_matches(is_space);
    let bytes = rest.as_bytes();

    let mut i = match bytes.first() {
        Some(b'-') | Some(b'+') => 1,
        _ => 0,
    };

    let unsigned = &bytes[i..];
    for word in ["infinity", "inf", "nan"] {
        if unsigned.len() >= word.len()
            && unsigned[..word.len()].eq_ignore_ascii_case(word.as_bytes())
        {
            return rest[..i + word.len()].parse().ok();
        }
    }

    if unsigned.len() > 2 && unsigned[0] == b'0' && matches!(unsigned[1], b'x' | b'X') {
        // "0x" with no hex digit after it falls through and reads as "0"
        if let Some(value) = parse_hex_body(&unsigned[2..]) {
            return Some(if bytes[0] == b'-' { -value } else { value });
        }
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // The exponent only counts if it carries at least one digit
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'-') | Some(b'+')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j.min(bytes.len())..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    rest[..i].parse().ok()
}

/// Format an integer as decimal text
pub fn format_int(value: i64) -> String {
    value.to_string()
}

/// Format a float as decimal text
///
/// `None` gives the shortest text that parses back to the same value;
/// `Some(p)` gives exactly `p` fraction digits.
pub fn format_float(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, value),
        None => format!("{}", value),
    }
}

/// Magnitude of the hex mantissa and optional `p` exponent after `0x`
fn parse_hex_body(bytes: &[u8]) -> Option<f64> {
    let mut mantissa: u64 = 0;
    let mut exponent: i64 = 0;
    let mut digits = 0;
    let mut seen_point = false;
    let mut i = 0;

    while let Some(&b) = bytes.get(i) {
        if b == b'.' && !seen_point {
            seen_point = true;
            i += 1;
            continue;
        }
        let Some(d) = char::from(b).to_digit(16) else {
            break;
        };
        // Digits past 60 bits of mantissa only move the exponent
        if mantissa >> 60 == 0 {
            mantissa = mantissa << 4 | u64::from(d);
            if seen_point {
                exponent -= 4;
            }
        } else if !seen_point {
            exponent += 4;
        }
        digits += 1;
        i += 1;
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(i), Some(b'p') | Some(b'P')) {
        let mut j = i + 1;
        let negative = match bytes.get(j) {
            Some(b'-') => {
                j += 1;
                true
            }
            Some(b'+') => {
                j += 1;
                false
            }
            _ => false,
        };
        let exp_digits = count_digits(&bytes[j.min(bytes.len())..]);
        if exp_digits > 0 {
            let value = bytes[j..j + exp_digits].iter().fold(0i64, |acc, &b| {
                acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
            });
            exponent = if negative {
                exponent.saturating_sub(value)
            } else {
                exponent.saturating_add(value)
            };
        }
    }

    if mantissa == 0 {
        return Some(0.0);
    }

    // Scale in two halves so a large mantissa with a tiny exponent can
    // still land on a subnormal instead of underflowing early
    let exponent = exponent.clamp(-2400, 2400) as i32;
    let half = exponent / 2;
    Some(mantissa as f64 * 2f64.powi(half) * 2f64.powi(exponent - half))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
