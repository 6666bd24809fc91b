//! Display formatting shared by stat cards, rankings and tooltips.

/// Thousands-separated integer rendering of a price, e.g. `12,345`.
pub fn format_number(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0 {
        format!("-{out}")
    } else {
        out
    }
}

/// Large-count rendering: values from 10,000 up collapse to `N.n万`.
pub fn format_large_number(value: u64) -> String {
    if value >= 10_000 {
        format!("{:.1}万", value as f64 / 10_000.0)
    } else {
        format_number(value as f64)
    }
}

/// Signed percentage, e.g. `+2.5%` / `-1.2%` / `0%`.
pub fn format_signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{value}%")
    } else {
        format!("{value}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_every_three_digits() {
        assert_eq!(format_number(1_000.0), "1,000");
        assert_eq!(format_number(58_234.0), "58,234");
        assert_eq!(format_number(1_234_567.0), "1,234,567");
        assert_eq!(format_number(999.0), "999");
    }

    #[test]
    fn negatives_keep_the_sign_outside_the_groups() {
        assert_eq!(format_number(-1_234.0), "-1,234");
    }

    #[test]
    fn large_numbers_collapse_to_wan() {
        assert_eq!(format_large_number(12_453), "1.2万");
        assert_eq!(format_large_number(9_999), "9,999");
    }

    #[test]
    fn signed_percent() {
        assert_eq!(format_signed_percent(2.0), "+2%");
        assert_eq!(format_signed_percent(-1.0), "-1%");
        assert_eq!(format_signed_percent(0.0), "0%");
    }
}
