/// Placeholder printed for a missing value or a missing aggregate.
pub const NO_DATA: &str = "n/a";

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use motion_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-12.25, 1), "-12.3");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a scaled epsilon so exact midpoints round away from zero.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        // "0.50" -> ".50"
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format an angle in degrees.
pub fn format_angle(value: Option<f64>, decimals: u32) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{}°", format_number(v, decimals)),
        _ => NO_DATA.to_string(),
    }
}

/// Format a game time given in seconds.
///
/// * `< 60` seconds → `"45.2s"`
/// * otherwise      → `"3m 05s"`
///
/// ```
/// use motion_core::formatting::format_seconds;
///
/// assert_eq!(format_seconds(Some(45.24), 1), "45.2s");
/// assert_eq!(format_seconds(Some(185.0), 1), "3m 05s");
/// assert_eq!(format_seconds(None, 1), "n/a");
/// ```
pub fn format_seconds(seconds: Option<f64>, decimals: u32) -> String {
    let Some(secs) = seconds.filter(|v| !v.is_nan()) else {
        return NO_DATA.to_string();
    };
    if secs.abs() < 60.0 {
        return format!("{}s", format_number(secs, decimals));
    }
    let total = secs.round() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!("{}{}m {:02}s", sign, total / 60, total % 60)
}

/// One-based label for a zero-based session index.
pub fn session_label(session_index: usize) -> String {
    format!("Session {}", session_index + 1)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_negative_rounding_to_zero_has_no_sign() {
        assert_eq!(format_number(-0.01, 1), "0.0");
    }

    #[test]
    fn test_format_angle() {
        assert_eq!(format_angle(Some(35.0), 1), "35.0°");
        assert_eq!(format_angle(None, 1), NO_DATA);
    }

    #[test]
    fn test_format_seconds_short() {
        assert_eq!(format_seconds(Some(0.5), 1), "0.5s");
        assert_eq!(format_seconds(Some(59.94), 1), "59.9s");
    }

    #[test]
    fn test_format_seconds_minutes() {
        assert_eq!(format_seconds(Some(60.0), 1), "1m 00s");
        assert_eq!(format_seconds(Some(125.4), 1), "2m 05s");
    }

    #[test]
    fn test_format_seconds_missing() {
        assert_eq!(format_seconds(None, 0), NO_DATA);
    }

    #[test]
    fn test_session_label_is_one_based() {
        assert_eq!(session_label(0), "Session 1");
        assert_eq!(session_label(9), "Session 10");
    }
}
