//! UI driver capability trait.
//!
//! One implementation exists per target UI technology; the runner depends
//! only on this trait and never on how the clicks happen. Mutating calls
//! take `&mut self` because the page is stateful; readbacks are `&self`.

use async_trait::async_trait;
use harness_core::DriverError;
use rust_decimal::Decimal;

/// Abstract Create Invoice page.
///
/// Implementations are expected to follow wait-then-act discipline
/// internally (wait for a control to be visible/enabled before using it)
/// and to surface a [`DriverError::Timeout`] when the page never gets
/// there.
#[async_trait]
pub trait InvoiceUiDriver: Send {
    /// Navigate to a fresh Create Invoice page and wait for it to load.
    async fn open_create_invoice_page(&mut self) -> Result<(), DriverError>;

    /// Select a customer by dropdown label.
    async fn select_customer(&mut self, name: &str) -> Result<(), DriverError>;

    /// Add a line item row and pick the product and quantity.
    async fn add_item(&mut self, product_label: &str, quantity: u32) -> Result<(), DriverError>;

    /// Fill the VAT rate spinbutton (a percentage).
    async fn set_vat_rate(&mut self, percent: Decimal) -> Result<(), DriverError>;

    /// Displayed subtotal string, e.g. `"Rs 1200.00"`.
    async fn displayed_subtotal(&self) -> Result<String, DriverError>;

    /// Displayed VAT string, or `None` when the VAT line is hidden.
    ///
    /// The application hides the VAT line entirely when the VAT amount is
    /// zero instead of showing `"Rs 0.00"`.
    async fn displayed_vat(&self) -> Result<Option<String>, DriverError>;

    /// Displayed grand total string.
    async fn displayed_grand_total(&self) -> Result<String, DriverError>;

    /// Save the invoice; returns the invoice number assigned by the server.
    async fn save(&mut self) -> Result<String, DriverError>;
}
