//! Localized currency rendering.

use crate::Currency;

const GROUPING_SEPARATOR: char = ',';
const DECIMAL_SEPARATOR: char = '.';

/// Renders amounts as currency strings.
///
/// Formatting is lenient: values are rounded half-to-even to the currency's
/// fractional digits, and non-finite input renders as an empty string instead
/// of failing.
#[derive(Debug, Default, Clone, Copy)]
pub struct AmountFormatter;

impl AmountFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Formats `value` for the currency named by its lowercase locale code.
    ///
    /// Codes that do not name a supported currency fall back to a plain
    /// `CODE 1,234.56` rendering.
    pub fn format(&self, value: f64, currency_code: &str) -> String {
        match Currency::from_locale_code(currency_code) {
            Some(currency) => self.format_currency(value, currency),
            None => {
                if !value.is_finite() {
                    return String::new();
                }
                let (negative, number) = render_number(value, 2);
                let sign = if negative { "-" } else { "" };
                format!(
                    "{}{} {}",
                    sign,
                    currency_code.trim().to_uppercase(),
                    number
                )
            }
        }
    }

    /// Formats `value` for a known currency.
    pub fn format_currency(&self, value: f64, currency: Currency) -> String {
        if !value.is_finite() {
            return String::new();
        }

        let (negative, number) = render_number(value, currency.fraction_digits());
        let sign = if negative { "-" } else { "" };

        format!("{}{}{}", sign, currency.symbol(), number)
    }
}

/// Rounds to `digits` fractional places and renders with grouping.
///
/// Returns whether the rounded value is negative alongside the unsigned text.
fn render_number(value: f64, digits: u32) -> (bool, String) {
    let scale = 10u128.pow(digits);
    let scaled = (value.abs() * scale as f64).round_ties_even();
    // `as` saturates for magnitudes beyond u128.
    let minor = scaled as u128;
    let negative = value.is_sign_negative() && minor != 0;

    let major = (minor / scale).to_string();
    let fraction = minor % scale;

    let mut grouped = String::with_capacity(major.len() + major.len() / 3);
    for (i, ch) in major.chars().enumerate() {
        if i > 0 && (major.len() - i) % 3 == 0 {
            grouped.push(GROUPING_SEPARATOR);
        }
        grouped.push(ch);
    }

    if digits > 0 {
        grouped.push(DECIMAL_SEPARATOR);
        grouped.push_str(&format!("{:0width$}", fraction, width = digits as usize));
    }

    (negative, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        let formatter = AmountFormatter::new();
        assert_eq!(formatter.format(50.0, "usd"), "$50.00");
        assert_eq!(formatter.format(1234.5, "usd"), "$1,234.50");
    }

    #[test]
    fn test_format_eur() {
        let formatter = AmountFormatter::new();
        assert_eq!(formatter.format(92.0, "eur"), "€92.00");
        assert_eq!(formatter.format(1_000_000.0, "eur"), "€1,000,000.00");
    }

    #[test]
    fn test_locale_lookup_tolerates_casing() {
        let formatter = AmountFormatter::new();
        assert_eq!(formatter.format(1.0, "EUR"), formatter.format(1.0, "eur"));
    }

    #[test]
    fn test_off_scale_doubles_round_to_cents() {
        let formatter = AmountFormatter::new();
        assert_eq!(formatter.format(0.1 + 0.2, "usd"), "$0.30");
        assert_eq!(formatter.format(100.0 * 0.92, "eur"), "€92.00");
        assert_eq!(formatter.format(19.999, "usd"), "$20.00");
    }

    #[test]
    fn test_ties_round_to_even() {
        let formatter = AmountFormatter::new();
        assert_eq!(formatter.format(0.125, "usd"), "$0.12");
        assert_eq!(formatter.format(0.375, "usd"), "$0.38");
    }

    #[test]
    fn test_negative_amounts() {
        let formatter = AmountFormatter::new();
        assert_eq!(formatter.format(-5.5, "usd"), "-$5.50");
        assert_eq!(formatter.format(-0.001, "usd"), "$0.00");
    }

    #[test]
    fn test_non_finite_renders_empty() {
        let formatter = AmountFormatter::new();
        assert_eq!(formatter.format(f64::NAN, "usd"), "");
        assert_eq!(formatter.format(f64::INFINITY, "eur"), "");
    }

    #[test]
    fn test_unknown_code_falls_back_to_code_prefix() {
        let formatter = AmountFormatter::new();
        assert_eq!(formatter.format(1234.5, "gbp"), "GBP 1,234.50");
    }
}
