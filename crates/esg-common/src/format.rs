//! Number formatting for display.

/// Format a number with thousands separators and at most one decimal.
///
/// Magnitudes of 1e15 and above are printed in exponent form (`1.2e15`),
/// since tenths are no longer exact there.
///
/// ```
/// use esg_common::format::format_number;
/// assert_eq!(format_number(3435.0), "3,435");
/// assert_eq!(format_number(10800.25), "10,800.3");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    if value.abs() >= LARGE_MAGNITUDE {
        return format!("{value:e}");
    }
    let rounded = (value * 10.0).round() / 10.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let tenths = ((abs - abs.trunc()) * 10.0).round() as u64;

    let mut out = group_thousands(whole);
    if tenths > 0 {
        out.push('.');
        out.push_str(&tenths.to_string());
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// Format a signed magnitude, always showing the sign (`+2`, `-0.5`).
pub fn format_signed(value: f64) -> String {
    let body = format_number(value.abs());
    if value < 0.0 && body != "0" {
        format!("-{body}")
    } else {
        format!("+{body}")
    }
}

/// Format a percentage change with one decimal (`+3.9%`).
pub fn format_change_pct(pct: f64) -> String {
    if !pct.is_finite() {
        return "N/A".to_string();
    }
    format!("{:+.1}%", pct)
}

const LARGE_MAGNITUDE: f64 = 1e15;

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
