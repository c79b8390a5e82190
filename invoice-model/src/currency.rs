//! Currency display format shared with the remote UI.
//!
//! Every amount on the Create Invoice page renders as `"Rs "` followed by
//! the value with exactly two decimal digits. The harness compares displayed
//! strings verbatim, so this format is a wire contract, not a convenience.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::TotalsError;

/// Fixed prefix used by the target application for all monetary values.
pub const CURRENCY_PREFIX: &str = "Rs ";

/// Round a monetary amount to 2 decimal places, half away from zero.
///
/// Standard currency rounding; never truncation.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount the way the UI displays it: `1200` -> `"Rs 1200.00"`.
pub fn format_currency(amount: Decimal) -> String {
    format!("{CURRENCY_PREFIX}{:.2}", round_money(amount))
}

/// Parse a displayed amount back into a decimal.
///
/// Accepts values with or without the `"Rs "` prefix and surrounding
/// whitespace, since some UI cells trim the prefix.
pub fn parse_currency(s: &str) -> Result<Decimal, TotalsError> {
    let trimmed = s.trim();
    let numeric = trimmed.strip_prefix(CURRENCY_PREFIX).unwrap_or(trimmed);
    Decimal::from_str(numeric.trim()).map_err(|_| TotalsError::MalformedCurrency(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_amounts_with_two_decimals() {
        assert_eq!(format_currency(Decimal::from(1200)), "Rs 1200.00");
        assert_eq!(format_currency(Decimal::ZERO), "Rs 0.00");
    }

    #[test]
    fn formats_fractional_amounts() {
        assert_eq!(format_currency(Decimal::new(87574, 2)), "Rs 875.74");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 589.625 must become 589.63, not 589.62
        assert_eq!(format_currency(Decimal::new(589625, 3)), "Rs 589.63");
        assert_eq!(round_money(Decimal::new(25, 3)), Decimal::new(3, 2));
    }

    #[test]
    fn parse_round_trips_formatted_values() {
        for raw in [
            Decimal::new(120000, 2),
            Decimal::new(87574, 2),
            Decimal::ZERO,
            Decimal::new(1395274, 3),
        ] {
            let formatted = format_currency(raw);
            let parsed = parse_currency(&formatted).unwrap();
            assert_eq!(parsed, round_money(raw));
        }
    }

    #[test]
    fn parse_accepts_bare_numbers() {
        assert_eq!(parse_currency("875.74").unwrap(), Decimal::new(87574, 2));
        assert_eq!(parse_currency(" Rs 1416.00 ").unwrap(), Decimal::new(141600, 2));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_currency("Rs --").unwrap_err();
        assert!(matches!(err, TotalsError::MalformedCurrency(_)));
    }
}
