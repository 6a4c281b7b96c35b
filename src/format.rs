/// Placeholder rendered for any missing or non-numeric value.
pub const NOT_AVAILABLE: &str = "N/A";

// Enough fractional digits to print any finite f64 exactly.
const EXACT_DIGITS: usize = 1100;

/// Format `value` with a fixed number of decimals, rounding the way
/// `Number.prototype.toFixed` does: exact halves round away from zero,
/// non-finite values print as `Infinity`/`-Infinity`/`NaN`.
///
/// Plain `format!("{:.1}")` rounds exact halves to even (`0.25` -> `0.2`),
/// which would change how totals and averages read on the board.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.abs() >= 1e21 {
        return plain_number(value);
    }

    let negative = value < 0.0;
    let magnitude = value.abs();
    let body = if is_exact_half(magnitude, digits) {
        round_half_up(magnitude, digits)
    } else {
        format!("{:.*}", digits, magnitude)
    };

    if negative {
        format!("-{body}")
    } else {
        body
    }
}

/// Fixed-decimal rendering with the `N/A` placeholder for missing values.
pub fn fixed_or_na(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) => to_fixed(v, digits),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Shortest round-trip form (`80` for `80.0`, `8.25` for `8.25`).
pub fn plain_number(value: f64) -> String {
    format!("{value}")
}

pub fn plain_or_na(value: Option<f64>) -> String {
    value.map(plain_number).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Text field with the `N/A` placeholder for missing or blank values.
pub fn text_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn exact_fraction(magnitude: f64) -> String {
    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    exact
        .split_once('.')
        .map(|(_, frac)| frac.to_string())
        .unwrap_or_default()
}

fn is_exact_half(magnitude: f64, digits: usize) -> bool {
    let frac = exact_fraction(magnitude);
    let bytes = frac.as_bytes();
    if bytes.len() <= digits || bytes[digits] != b'5' {
        return false;
    }
    bytes[digits + 1..].iter().all(|b| *b == b'0')
}

fn round_half_up(magnitude: f64, digits: usize) -> String {
    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    let (int_part, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut kept: Vec<u8> = int_part.bytes().collect();
    kept.extend(frac.bytes().take(digits));

    // Carry a one into the last kept digit.
    let mut idx = kept.len();
    loop {
        if idx == 0 {
            kept.insert(0, b'1');
            break;
        }
        idx -= 1;
        if kept[idx] == b'9' {
            kept[idx] = b'0';
        } else {
            kept[idx] += 1;
            break;
        }
    }

    let int_len = kept.len() - digits;
    let mut out = String::from_utf8_lossy(&kept[..int_len]).into_owned();
    if digits > 0 {
        out.push('.');
        out.push_str(&String::from_utf8_lossy(&kept[int_len..]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_halves_round_away_from_zero() {
        assert_eq!(to_fixed(0.25, 1), "0.3");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-0.25, 1), "-0.3");
        assert_eq!(to_fixed(9.95, 1), "9.9");
        assert_eq!(to_fixed(99.75, 1), "99.8");
        assert_eq!(to_fixed(9.5, 0), "10");
    }

    #[test]
    fn non_ties_use_nearest_value() {
        assert_eq!(to_fixed(20.0, 1), "20.0");
        assert_eq!(to_fixed(4.0, 1), "4.0");
        assert_eq!(to_fixed(0.15, 1), "0.1");
        assert_eq!(to_fixed(1.0 / 3.0, 1), "0.3");
    }

    #[test]
    fn special_values_match_script_output() {
        assert_eq!(to_fixed(f64::INFINITY, 1), "Infinity");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 1), "-Infinity");
        assert_eq!(to_fixed(f64::NAN, 1), "NaN");
        assert_eq!(to_fixed(-0.0, 1), "0.0");
        assert_eq!(to_fixed(-0.04, 1), "-0.0");
    }

    #[test]
    fn placeholders() {
        assert_eq!(fixed_or_na(None, 1), "N/A");
        assert_eq!(plain_or_na(Some(80.0)), "80");
        assert_eq!(plain_or_na(Some(8.25)), "8.25");
        assert_eq!(text_or_na(Some("  ")), "N/A");
    }
}
