//! Line item model for invoice-model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TotalsError;

/// A product/quantity pair contributing to an invoice subtotal.
///
/// Constructed per scenario and never reused across runs. A quantity of
/// zero is representable and contributes nothing; negative quantities are
/// unrepresentable by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl LineItem {
    /// Create a line item, rejecting negative unit prices.
    pub fn new(
        description: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<Self, TotalsError> {
        if unit_price < Decimal::ZERO {
            return Err(TotalsError::InvalidInput(format!(
                "unit price must be non-negative, got {unit_price}"
            )));
        }
        Ok(Self {
            description: description.into(),
            quantity,
            unit_price,
        })
    }

    /// Extended amount for this line: unit price times quantity.
    pub fn amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
