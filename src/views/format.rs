//! Display formatting for leaderboard cells.

/// Format an amount as US dollars with thousands grouping, e.g. `$12,345.60`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

/// Average finishing position with one decimal place.
pub fn format_position(position: f64) -> String {
    format!("{:.1}", position)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(5.0), "$5.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(100000.0), "$100,000.00");
    }

    #[test]
    fn test_format_usd_negative() {
        assert_eq!(format_usd(-1500.0), "-$1,500.00");
        assert_eq!(format_usd(-0.001), "$0.00");
    }

    #[test]
    fn test_format_position() {
        assert_eq!(format_position(1.0), "1.0");
        assert_eq!(format_position(2.24), "2.2");
        assert_eq!(format_position(7.0 / 3.0), "2.3");
    }
}
