//! Invoice totals engine.
//!
//! Mirrors the arithmetic of the target application's Totals Summary panel:
//!
//! ```text
//! subtotal     = sum(unit_price * quantity)
//! discount     = subtotal * discount_percent / 100
//! taxable_base = subtotal - discount
//! vat          = taxable_base * tax_rate_percent / 100
//! grand_total  = taxable_base + vat
//! ```
//!
//! Full precision is carried through the intermediates; each derived amount
//! is rounded to 2 decimal places independently at the end, which is the
//! rounding point the sampled UI scenarios are consistent with.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::round_money;
use crate::error::TotalsError;
use crate::line_item::LineItem;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Derived totals for one invoice. Always produced fresh by
/// [`compute_totals`]; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub discount_percentage: Decimal,
    pub discount_amount: Decimal,
    pub grand_total: Decimal,
}

/// Compute invoice totals from line items, a VAT rate, and a discount.
///
/// Rates are percentages (`18` means 18%). Values outside [0, 100] are
/// computed rather than rejected; only negative inputs are errors. An empty
/// item list yields an all-zero result regardless of rates.
///
/// Pure and idempotent; the result is invariant under item reordering.
pub fn compute_totals(
    items: &[LineItem],
    tax_rate_percent: Decimal,
    discount_percent: Decimal,
) -> Result<InvoiceTotals, TotalsError> {
    if tax_rate_percent < Decimal::ZERO {
        return Err(TotalsError::InvalidInput(format!(
            "tax rate must be non-negative, got {tax_rate_percent}"
        )));
    }
    if discount_percent < Decimal::ZERO {
        return Err(TotalsError::InvalidInput(format!(
            "discount must be non-negative, got {discount_percent}"
        )));
    }
    for item in items {
        if item.unit_price < Decimal::ZERO {
            return Err(TotalsError::InvalidInput(format!(
                "unit price must be non-negative, got {} for {:?}",
                item.unit_price, item.description
            )));
        }
    }

    let subtotal: Decimal = items.iter().map(LineItem::amount).sum();
    let discount_amount = subtotal * discount_percent / ONE_HUNDRED;
    let taxable_base = subtotal - discount_amount;
    let tax_amount = taxable_base * tax_rate_percent / ONE_HUNDRED;
    let grand_total = taxable_base + tax_amount;

    Ok(InvoiceTotals {
        subtotal: round_money(subtotal),
        tax_rate: tax_rate_percent,
        tax_amount: round_money(tax_amount),
        discount_percentage: discount_percent,
        discount_amount: round_money(discount_amount),
        grand_total: round_money(grand_total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductCatalog;
    use crate::catalog::{CAKE, ICE_CREAM};
    use crate::currency::format_currency;

    fn item(label: &str, quantity: u32) -> LineItem {
        let catalog = ProductCatalog::builtin();
        LineItem::new(label, quantity, catalog.unit_price(label).unwrap()).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn single_item_default_vat() {
        let totals = compute_totals(&[item(ICE_CREAM, 1)], dec("18"), Decimal::ZERO).unwrap();
        assert_eq!(format_currency(totals.subtotal), "Rs 1200.00");
        assert_eq!(format_currency(totals.tax_amount), "Rs 216.00");
        assert_eq!(format_currency(totals.grand_total), "Rs 1416.00");
    }

    #[test]
    fn multiple_items_default_vat() {
        let items = [item(ICE_CREAM, 2), item(CAKE, 1)];
        let totals = compute_totals(&items, dec("18"), Decimal::ZERO).unwrap();
        assert_eq!(format_currency(totals.subtotal), "Rs 3275.74");
        assert_eq!(format_currency(totals.tax_amount), "Rs 589.63");
        assert_eq!(format_currency(totals.grand_total), "Rs 3865.37");
    }

    #[test]
    fn high_quantity_multi_item_precision() {
        let items = [item(ICE_CREAM, 5), item(CAKE, 2)];
        let totals = compute_totals(&items, dec("18"), Decimal::ZERO).unwrap();
        assert_eq!(format_currency(totals.subtotal), "Rs 7751.48");
        assert_eq!(format_currency(totals.tax_amount), "Rs 1395.27");
        assert_eq!(format_currency(totals.grand_total), "Rs 9146.75");
    }

    #[test]
    fn zero_vat_grand_total_equals_subtotal() {
        let totals = compute_totals(&[item(CAKE, 1)], Decimal::ZERO, Decimal::ZERO).unwrap();
        assert_eq!(format_currency(totals.subtotal), "Rs 875.74");
        assert_eq!(format_currency(totals.tax_amount), "Rs 0.00");
        assert_eq!(totals.grand_total, totals.subtotal);
    }

    #[test]
    fn full_vat_doubles_the_subtotal() {
        let totals = compute_totals(&[item(ICE_CREAM, 1)], dec("100"), Decimal::ZERO).unwrap();
        assert_eq!(format_currency(totals.tax_amount), "Rs 1200.00");
        assert_eq!(format_currency(totals.grand_total), "Rs 2400.00");
    }

    #[test]
    fn fractional_vat_rate() {
        // 8.5% of 1200.00 = 102.00
        let totals = compute_totals(&[item(ICE_CREAM, 1)], dec("8.5"), Decimal::ZERO).unwrap();
        assert_eq!(format_currency(totals.tax_amount), "Rs 102.00");
        assert_eq!(format_currency(totals.grand_total), "Rs 1302.00");
    }

    #[test]
    fn empty_item_list_is_all_zero() {
        let totals = compute_totals(&[], dec("18"), dec("5")).unwrap();
        assert_eq!(format_currency(totals.subtotal), "Rs 0.00");
        assert_eq!(format_currency(totals.tax_amount), "Rs 0.00");
        assert_eq!(format_currency(totals.grand_total), "Rs 0.00");
    }

    #[test]
    fn discount_applies_before_vat() {
        // 2 x 150.00 = 300.00; 10% discount = 30.00; VAT 8% of 270.00 = 21.60
        let items = [LineItem::new("Design Consultation", 2, dec("150")).unwrap()];
        let totals = compute_totals(&items, dec("8"), dec("10")).unwrap();
        assert_eq!(totals.discount_amount, dec("30.00"));
        assert_eq!(totals.tax_amount, dec("21.60"));
        assert_eq!(totals.grand_total, dec("291.60"));
    }

    #[test]
    fn full_discount_zeroes_everything_after_subtotal() {
        let totals = compute_totals(&[item(ICE_CREAM, 1)], dec("18"), dec("100")).unwrap();
        assert_eq!(totals.subtotal, dec("1200.00"));
        assert_eq!(totals.discount_amount, dec("1200.00"));
        assert_eq!(totals.tax_amount, Decimal::ZERO.round_dp(2));
        assert_eq!(totals.grand_total, Decimal::ZERO.round_dp(2));
    }

    #[test]
    fn invariant_under_reordering() {
        let forward = [item(ICE_CREAM, 2), item(CAKE, 1), item(ICE_CREAM, 3)];
        let reversed = [item(ICE_CREAM, 3), item(CAKE, 1), item(ICE_CREAM, 2)];
        let a = compute_totals(&forward, dec("18"), dec("5")).unwrap();
        let b = compute_totals(&reversed, dec("18"), dec("5")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn idempotent_for_identical_inputs() {
        let items = [item(ICE_CREAM, 5), item(CAKE, 2)];
        let a = compute_totals(&items, dec("18"), Decimal::ZERO).unwrap();
        let b = compute_totals(&items, dec("18"), Decimal::ZERO).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn negative_rate_is_rejected() {
        let err = compute_totals(&[item(CAKE, 1)], dec("-1"), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, TotalsError::InvalidInput(_)));
    }

    #[test]
    fn negative_discount_is_rejected() {
        let err = compute_totals(&[item(CAKE, 1)], dec("18"), dec("-5")).unwrap_err();
        assert!(matches!(err, TotalsError::InvalidInput(_)));
    }

    #[test]
    fn negative_unit_price_is_rejected() {
        let bad = LineItem {
            description: "Refund line".to_string(),
            quantity: 1,
            unit_price: dec("-10"),
        };
        let err = compute_totals(&[bad], dec("18"), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, TotalsError::InvalidInput(_)));
    }

    #[test]
    fn rates_above_one_hundred_still_compute() {
        let totals = compute_totals(&[item(ICE_CREAM, 1)], dec("150"), Decimal::ZERO).unwrap();
        assert_eq!(totals.tax_amount, dec("1800.00"));
        assert_eq!(totals.grand_total, dec("3000.00"));
    }
}
