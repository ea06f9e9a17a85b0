// services/formatting.rs
//! Display normalization for gateway values. Both functions degrade to the
//! input string instead of failing.

const THOUSANDS_SEPARATOR: char = '.';
const CURRENCY_SUFFIX: &str = "\u{a0}₫";
const PAY_DATE_LEN: usize = 14;

/// Formats a minor-unit amount (`"10000000"`) as VND (`"100.000 ₫"`).
///
/// VND has no fractional digits, so the major amount is rounded half away from zero.
pub fn format_amount(raw: &str) -> String {
    let minor: i64 = match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => return raw.to_string(),
    };

    let mut major = minor / 100;
    if (minor % 100).abs() >= 50 {
        major += minor.signum();
    }

    let digits = major.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(digit);
    }

    let sign = if major < 0 { "-" } else { "" };
    format!("{}{}{}", sign, grouped, CURRENCY_SUFFIX)
}

/// `YYYYMMDDHHMMSS` -> `DD/MM/YYYY HH:MM:SS`. Anything that is not exactly 14
/// ASCII characters comes back unchanged.
pub fn format_pay_date(raw: &str) -> String {
    if raw.len() != PAY_DATE_LEN || !raw.is_ascii() {
        return raw.to_string();
    }

    format!(
        "{}/{}/{} {}:{}:{}",
        &raw[6..8],
        &raw[4..6],
        &raw[0..4],
        &raw[8..10],
        &raw[10..12],
        &raw[12..14]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_divides_minor_units_and_groups() {
        assert_eq!(format_amount("10000000"), "100.000\u{a0}₫");
        assert_eq!(format_amount("99900"), "999\u{a0}₫");
        assert_eq!(format_amount("123456789000"), "1.234.567.890\u{a0}₫");
        assert_eq!(format_amount("0"), "0\u{a0}₫");
    }

    #[test]
    fn amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount("150"), "2\u{a0}₫");
        assert_eq!(format_amount("149"), "1\u{a0}₫");
        assert_eq!(format_amount("-150"), "-2\u{a0}₫");
        assert_eq!(format_amount("-100000"), "-1.000\u{a0}₫");
    }

    #[test]
    fn unparseable_amount_passes_through() {
        assert_eq!(format_amount("abc"), "abc");
        assert_eq!(format_amount(""), "");
        assert_eq!(format_amount("12.5"), "12.5");
    }

    #[test]
    fn fourteen_char_date_is_reformatted() {
        assert_eq!(format_pay_date("20240115103045"), "15/01/2024 10:30:45");
    }

    #[test]
    fn other_lengths_pass_through() {
        assert_eq!(format_pay_date("2024011510304"), "2024011510304");
        assert_eq!(format_pay_date("202401151030455"), "202401151030455");
        assert_eq!(format_pay_date(""), "");
        assert_eq!(format_pay_date("2024-01-15"), "2024-01-15");
    }
}
