//! invoice-model: Domain core for the InvoiceDesk e2e suite.
//!
//! Pure decimal arithmetic for invoice totals, the `"Rs 1234.56"` currency
//! display format, and the static product catalog of the test organisation.
//! No I/O and no async: everything here is synchronous and deterministic so
//! the harness can compute expected values before touching the UI.

mod catalog;
mod currency;
mod error;
mod line_item;
mod totals;

pub use catalog::{ProductCatalog, CAKE, CUSTOMER_SHIHARA, ICE_CREAM};
pub use currency::{format_currency, parse_currency, round_money, CURRENCY_PREFIX};
pub use error::TotalsError;
pub use line_item::LineItem;
pub use totals::{compute_totals, InvoiceTotals};

pub use rust_decimal::Decimal;
