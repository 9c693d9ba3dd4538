//! Number formatting for readouts, labels and the chart.

/// Mantissa/exponent notation with `precision` fractional digits, e.g.
/// `2.25e+5`, `-1.23e+5`, `0.00e+0`. The mantissa magnitude is always in
/// [1, 10) except for zero.
pub fn format_scientific(value: f64, precision: usize) -> String {
    if let Some(s) = non_finite(value) {
        return s.to_string();
    }
    let (mantissa, exponent) = split_exponent(value, precision);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{}", mantissa, sign, exponent.abs())
}

/// Like [`format_scientific`] but written for people: `2.25×10⁵`.
pub fn format_times_ten(value: f64, precision: usize) -> String {
    if let Some(s) = non_finite(value) {
        return s.to_string();
    }
    let (mantissa, exponent) = split_exponent(value, precision);
    format!("{}×10{}", mantissa, superscript(exponent))
}

/// `value` expressed in units of 10^`exponent`, e.g. `1.50 × 10⁻⁷` for
/// σ = 1.5e-7 shown in units of 10⁻⁷.
pub fn format_scaled(value: f64, exponent: i32, precision: usize) -> String {
    let scaled = value / 10f64.powi(exponent);
    format!("{:.*} × 10{}", precision, normalize_zero(scaled), superscript(exponent))
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

pub fn superscript(n: i32) -> String {
    let mut out = String::new();
    if n < 0 {
        out.push('⁻');
    }
    for c in n.unsigned_abs().to_string().chars() {
        out.push(match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            _ => '⁹',
        });
    }
    out
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

// -0.0 prints as "-0.00"; a signed zero carries no information here
fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Enough fractional digits to print any finite f64 exactly.
const EXACT_DIGITS: usize = 800;

/// Mantissa text and decimal exponent. Rounds half away from zero on the
/// exact binary value, carries included (9.999e5 at two digits becomes 1.00
/// and 6).
fn split_exponent(value: f64, precision: usize) -> (String, i32) {
    let value = normalize_zero(value);
    if value == 0.0 {
        return (format!("{:.*}", precision, 0.0), 0);
    }

    let exact = format!("{:.*e}", EXACT_DIGITS.max(precision + 1), value.abs());
    let (digits, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: Vec<u8> = digits.bytes().filter(u8::is_ascii_digit).map(|b| b - b'0').collect();

    let mut kept = digits[..=precision].to_vec();
    if digits[precision + 1] >= 5 {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
            kept.truncate(precision + 1);
            exponent += 1;
        }
    }

    let mut mantissa = String::with_capacity(precision + 3);
    if value < 0.0 {
        mantissa.push('-');
    }
    mantissa.push((b'0' + kept[0]) as char);
    if precision > 0 {
        mantissa.push('.');
        mantissa.extend(kept[1..].iter().map(|&d| (b'0' + d) as char));
    }
    (mantissa, exponent)
}
